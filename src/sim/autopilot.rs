//! Idle/demo mode controller
//!
//! Keeps the sprite just above the lower edge of the next gap by jumping
//! whenever it sinks too close and isn't already climbing hard.

use super::state::GameState;

/// How far above the gap's lower edge the sprite's bottom should stay
const FLOOR_MARGIN: f32 = 40.0;
/// Don't re-jump while rising faster than this
const RISING_CUTOFF: f32 = -1.0;

/// Should the autopilot jump this tick?
pub fn wants_jump(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let config = &state.config;
    let sprite_bottom = state.sprite.y + config.sprite_height;

    // Nearest lower segment whose right edge hasn't passed the sprite yet
    let floor = state
        .obstacles
        .iter()
        .filter(|o| o.is_lower && o.right(config.pipe_width) > config.sprite_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|lower| lower.top)
        // No pipes yet: hold a gap-sized band below the start position
        .unwrap_or(config.sprite_start_y + config.pipe_gap);

    sprite_bottom > floor - FLOOR_MARGIN && state.sprite.vel > RISING_CUTOFF
}
