//! Per-frame simulation tick
//!
//! One tick runs, in order: jump input, sprite kinematics, track advance and
//! retirement, collision/pass evaluation, then the phase transitions.

use super::autopilot;
use super::collision::{self, Evaluation};
use super::kinematics;
use super::state::{CrashCause, GameEvent, GamePhase, GameState};
use super::track;
use super::viewport::ViewportMetrics;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (click/tap)
    pub jump: bool,
    /// Idle/demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// Apply a jump. Ignored after game over.
pub fn jump(state: &mut GameState) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }
    state.sprite = kinematics::jump(&state.sprite, &state.config);
    Some(GameEvent::Jumped)
}

/// Advance the game state by one frame
pub fn tick<V: ViewportMetrics + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    viewport: &V,
) -> Vec<GameEvent> {
    // Game over freezes everything until reset
    if state.phase == GamePhase::GameOver {
        return Vec::new();
    }

    let mut events = Vec::new();

    let wants_jump = input.jump || (input.autopilot && autopilot::wants_jump(state));
    if wants_jump {
        events.extend(jump(state));
    }

    state.time_ticks += 1;

    let viewport_height = viewport.height();
    state.sprite = kinematics::advance(&state.sprite, &state.config, viewport_height);

    let step = track::advance(
        &mut state.obstacles,
        state.scroll_speed,
        state.config.pipe_width,
    );

    let eval = collision::evaluate(
        &state.sprite,
        &state.obstacles,
        &step,
        state.last_scored_id,
        &state.config,
        viewport_height,
    );
    apply_evaluation(state, &eval, &mut events);

    // Ensure deterministic ordering
    state.normalize_order();

    events
}

/// Phase transitions for one evaluated tick. A crash wins over a pass
/// detected on the same tick.
fn apply_evaluation(state: &mut GameState, eval: &Evaluation, events: &mut Vec<GameEvent>) {
    if let Some(id) = eval.collided {
        events.push(end_run(state, CrashCause::Obstacle(id)));
        return;
    }
    if eval.ground_hit {
        events.push(end_run(state, CrashCause::Ground));
        return;
    }
    if let Some(passed) = eval.passed {
        events.extend(register_pass(state, passed.id));
    }
}

/// Score a cleared pipe and ramp the scroll speed on every `score_step`
pub fn register_pass(state: &mut GameState, obstacle_id: u32) -> Vec<GameEvent> {
    let mut events = Vec::with_capacity(2);

    state.score += 1;
    state.last_scored_id = Some(obstacle_id);
    log::debug!("Passed pipe {} (score {})", obstacle_id, state.score);
    events.push(GameEvent::Scored {
        obstacle_id,
        score: state.score,
    });

    if state.score.is_multiple_of(state.config.score_step) {
        state.scroll_speed += state.config.scroll_speed_increment;
        log::info!(
            "Score {} reached, scroll speed now {}",
            state.score,
            state.scroll_speed
        );
        events.push(GameEvent::SpeedUp {
            scroll_speed: state.scroll_speed,
        });
    }

    events
}

/// Enter game over
pub fn end_run(state: &mut GameState, cause: CrashCause) -> GameEvent {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over after {} ticks: {:?} (score {})",
        state.time_ticks,
        cause,
        state.score
    );
    GameEvent::Crashed { cause }
}
