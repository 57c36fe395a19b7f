//! Session driver
//!
//! Owns the `GameState` and the two callbacks that mutate it: the per-frame
//! tick and the fixed-interval pipe spawner. Whoever owns the render loop
//! calls `start`/`stop` and forwards frames, timer firings and input here.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, ViewportMetrics, spawn_pair, tick};

/// One pipe segment as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub top: f32,
    pub height: f32,
    pub is_lower: bool,
}

/// Read-only view of a session handed to the renderer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sprite_y: f32,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fixed-interval timer state (armed flag plus accumulated time for `pump`)
#[derive(Debug, Clone, Default)]
struct SpawnTimer {
    armed: bool,
    elapsed_ms: f64,
}

/// A running game session
pub struct Game<V: ViewportMetrics> {
    state: GameState,
    viewport: V,
    /// Inputs collected since the last frame
    input: TickInput,
    started: bool,
    frame_armed: bool,
    spawn_timer: SpawnTimer,
}

impl<V: ViewportMetrics> Game<V> {
    /// Fails if `config` doesn't pass `GameConfig::validate`
    pub fn new(seed: u64, config: GameConfig, viewport: V) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(seed, config)?,
            viewport,
            input: TickInput::default(),
            started: false,
            frame_armed: false,
            spawn_timer: SpawnTimer::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the frame callback should keep being scheduled
    pub fn frame_loop_armed(&self) -> bool {
        self.frame_armed
    }

    pub fn spawn_timer_armed(&self) -> bool {
        self.spawn_timer.armed
    }

    /// Idle/demo mode - the autopilot plays
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Arm the frame loop and spawn timer. Calling it twice is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.frame_armed = self.state.is_running();
        self.spawn_timer = SpawnTimer {
            armed: true,
            elapsed_ms: 0.0,
        };
        log::info!("Game started (seed {})", self.state.seed);
    }

    /// Disarm both callbacks (teardown). Calling it twice is a no-op.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.frame_armed = false;
        self.spawn_timer = SpawnTimer::default();
        log::info!("Game stopped");
    }

    /// Queue a jump for the next frame. Ignored after game over.
    pub fn jump(&mut self) {
        if self.state.is_running() {
            self.input.jump = true;
        }
    }

    /// Start a fresh run. Re-arms the frame loop if the game is started.
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.jump = false;
        if self.started {
            self.frame_armed = true;
            self.spawn_timer.elapsed_ms = 0.0;
        }
        log::info!("Game reset");
    }

    /// Frame callback: one simulation tick. No-op unless the frame loop is armed.
    pub fn on_frame(&mut self) -> Vec<GameEvent> {
        if !self.frame_armed {
            return Vec::new();
        }

        let events = tick(&mut self.state, &self.input, &self.viewport);

        // Clear one-shot inputs after processing
        self.input.jump = false;

        if self.state.phase == GamePhase::GameOver {
            self.frame_armed = false;
        }
        events
    }

    /// Spawn timer callback. Spawns nothing while disarmed or after game over.
    pub fn on_spawn_timer(&mut self) -> Option<GameEvent> {
        if !self.spawn_timer.armed {
            return None;
        }

        let [upper, lower] = spawn_pair(&mut self.state, &self.viewport)?;
        Some(GameEvent::Spawned {
            upper_id: upper.id,
            lower_id: lower.id,
            gap_start: crate::sim::spawner::gap_start_of(&upper),
        })
    }

    /// Drive the spawn timer from elapsed wall-clock time (native runs and
    /// tests). Fires once per full spawn interval.
    pub fn pump(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.spawn_timer.armed {
            return events;
        }

        let interval = self.state.config.spawn_interval_ms as f64;
        self.spawn_timer.elapsed_ms += elapsed_ms;
        while self.spawn_timer.elapsed_ms >= interval {
            self.spawn_timer.elapsed_ms -= interval;
            events.extend(self.on_spawn_timer());
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sprite_y: self.state.sprite.y,
            obstacles: self
                .state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    top: o.top,
                    height: o.height,
                    is_lower: o.is_lower,
                })
                .collect(),
            score: self.state.score,
            phase: self.state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FixedViewport, Sprite};

    const VIEWPORT: FixedViewport = FixedViewport::new(800.0, 600.0);

    fn started_game() -> Game<FixedViewport> {
        let mut game = Game::new(42, GameConfig::default(), VIEWPORT).unwrap();
        game.start();
        game
    }

    #[test]
    fn test_spawn_after_one_interval() {
        let mut game = started_game();

        assert!(game.pump(1499.0).is_empty());
        assert!(game.snapshot().obstacles.is_empty());

        let events = game.pump(1.0);
        assert_eq!(events.len(), 1);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.obstacles.len(), 2);
        let upper = snapshot.obstacles[0];
        let lower = snapshot.obstacles[1];
        assert!(upper.x == 800.0 && lower.x == 800.0);
        assert!(!upper.is_lower && lower.is_lower);
        assert!((50.0..250.0).contains(&upper.height));
        assert_eq!(lower.top, upper.height + 200.0);
    }

    #[test]
    fn test_pump_catches_up_multiple_intervals() {
        let mut game = started_game();
        assert_eq!(game.pump(4600.0).len(), 3);
        assert_eq!(game.state().obstacles.len(), 6);
    }

    #[test]
    fn test_nothing_runs_before_start() {
        let mut game = Game::new(42, GameConfig::default(), VIEWPORT).unwrap();
        assert!(game.on_frame().is_empty());
        assert!(game.pump(3000.0).is_empty());
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_game_over_disarms_frame_loop() {
        let mut game = started_game();
        game.state.sprite = Sprite { y: 560.0, vel: 0.0 };

        game.on_frame();
        assert_eq!(game.snapshot().phase, GamePhase::GameOver);
        assert!(!game.frame_loop_armed());

        let ticks = game.state().time_ticks;
        assert!(game.on_frame().is_empty());
        assert_eq!(game.state().time_ticks, ticks);

        // Spawn timer stays dormant: it fires but adds nothing
        assert!(game.spawn_timer_armed());
        assert!(game.pump(1500.0).is_empty());
        assert!(game.snapshot().obstacles.is_empty());
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut game = started_game();
        game.state.phase = GamePhase::GameOver;
        game.jump();
        assert!(!game.input.jump);
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut game = started_game();
        game.pump(1500.0);
        game.state.phase = GamePhase::GameOver;
        game.state.score = 37;
        game.state.scroll_speed = 5.5;
        game.state.last_scored_id = Some(1);
        game.frame_armed = false;

        game.reset();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert!(snapshot.obstacles.is_empty());
        assert_eq!(game.state().scroll_speed, 4.0);
        assert!(game.state().last_scored_id.is_none());
        assert!(game.frame_loop_armed());
    }

    #[test]
    fn test_reset_while_stopped_leaves_loop_disarmed() {
        let mut game = Game::new(42, GameConfig::default(), VIEWPORT).unwrap();
        game.reset();
        assert!(!game.frame_loop_armed());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut game = started_game();
        game.stop();
        game.stop();
        assert!(!game.is_started());
        assert!(!game.frame_loop_armed());
        assert!(!game.spawn_timer_armed());
        assert!(game.pump(3000.0).is_empty());
        assert!(game.on_frame().is_empty());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut game = started_game();
        game.pump(1000.0);
        game.start();
        // Second start must not rewind the spawn timer
        assert_eq!(game.pump(500.0).len(), 1);
    }

    #[test]
    fn test_queued_jump_consumed_by_next_frame() {
        let mut game = started_game();
        game.jump();
        let events = game.on_frame();
        assert_eq!(events.first(), Some(&GameEvent::Jumped));
        assert!(game.snapshot().sprite_y < 100.0);

        let events = game.on_frame();
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_new_rejects_empty_gap_range() {
        let config = GameConfig {
            gap_start_min: 250,
            gap_start_max: 250,
            ..Default::default()
        };
        let err = Game::new(1, config, VIEWPORT).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "gap_start_min", .. }));
    }

    #[test]
    fn test_new_rejects_zero_spawn_interval() {
        let config = GameConfig {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        let err = Game::new(1, config, VIEWPORT).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { field: "spawn_interval_ms", .. }));
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = started_game();
        game.pump(1500.0);
        let json = game.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"is_lower\":true"));

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game.snapshot());
    }
}
