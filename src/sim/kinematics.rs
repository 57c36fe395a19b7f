//! Sprite kinematics
//!
//! Constant gravity with per-tick damping, clamped to the viewport.

use super::state::Sprite;
use crate::config::{GameConfig, Integration};

/// Advance the sprite by one tick.
///
/// With `Integration::Lagged` the position moves by the velocity the sprite
/// carried into this tick and the new velocity is computed afterwards, so the
/// position trails `Integration::SemiImplicit` by one velocity update. A jump
/// applied before this call still moves the sprite by the full impulse here.
pub fn advance(sprite: &Sprite, config: &GameConfig, viewport_height: f32) -> Sprite {
    let next_vel = (sprite.vel + config.gravity) * config.damping;
    let step = match config.integration {
        Integration::Lagged => sprite.vel,
        Integration::SemiImplicit => next_vel,
    };

    Sprite {
        y: clamp_to_viewport(sprite.y + step, config.sprite_height, viewport_height),
        vel: next_vel,
    }
}

/// Replace the sprite's velocity with the jump impulse
pub fn jump(sprite: &Sprite, config: &GameConfig) -> Sprite {
    Sprite {
        y: sprite.y,
        vel: config.jump_impulse,
    }
}

/// Keep the sprite's top edge inside `[0, viewport_height - sprite_height]`
#[inline]
pub fn clamp_to_viewport(y: f32, sprite_height: f32, viewport_height: f32) -> f32 {
    // min then max: a viewport shorter than the sprite pins it to the top
    y.min(viewport_height - sprite_height).max(0.0)
}
