//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; the sprite and the
//! obstacle set are only touched through the sim functions.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only `reset` leaves this phase
    GameOver,
}

/// The player-controlled sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Top edge
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
}

impl Sprite {
    pub fn new(start_y: f32) -> Self {
        Self { y: start_y, vel: 0.0 }
    }
}

/// One pipe segment. Pipes come in upper/lower pairs sharing a gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub top: f32,
    pub height: f32,
    /// Grows from the floor rather than the ceiling
    pub is_lower: bool,
}

impl Obstacle {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Sprite overlapped the obstacle with this id
    Obstacle(u32),
    /// Sprite reached the bottom of the viewport
    Ground,
}

/// Notable things that happened during an update (for logging/presentation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Spawned {
        upper_id: u32,
        lower_id: u32,
        gap_start: u32,
    },
    Scored {
        obstacle_id: u32,
        score: u32,
    },
    SpeedUp {
        scroll_speed: f32,
    },
    Crashed {
        cause: CrashCause,
    },
}

/// Complete per-session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap position RNG
    pub rng: Pcg32,
    /// Session tuning
    pub config: GameConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Pipe pairs cleared
    pub score: u32,
    /// Pixels per tick; never decreases within a session
    pub scroll_speed: f32,
    /// Last obstacle that earned a point
    pub last_scored_id: Option<u32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub sprite: Sprite,
    /// Live obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed. The config is validated
    /// here; an invalid one never reaches the sim functions.
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            scroll_speed: config.initial_scroll_speed,
            last_scored_id: None,
            time_ticks: 0,
            sprite: Sprite::new(config.sprite_start_y),
            obstacles: Vec::new(),
            next_id: 1,
            config,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reinitialize the session. The RNG and id counter carry on so ids
    /// stay unique across resets.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.scroll_speed = self.config.initial_scroll_speed;
        self.last_scored_id = None;
        self.time_ticks = 0;
        self.sprite = Sprite::new(self.config.sprite_start_y);
        self.obstacles.clear();
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, GameConfig::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed, 4.0);
        assert_eq!(state.sprite, Sprite { y: 100.0, vel: 0.0 });
        assert!(state.obstacles.is_empty());
        assert!(state.last_scored_id.is_none());
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut state = GameState::new(7, GameConfig::default()).unwrap();
        let id = state.next_entity_id();
        state.phase = GamePhase::GameOver;
        state.score = 37;
        state.scroll_speed = 5.5;
        state.last_scored_id = Some(id);
        state.sprite = Sprite { y: 560.0, vel: 8.0 };
        state.obstacles.push(Obstacle {
            id,
            x: 20.0,
            top: 0.0,
            height: 100.0,
            is_lower: false,
        });

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed, 4.0);
        assert!(state.obstacles.is_empty());
        assert!(state.last_scored_id.is_none());
        assert_eq!(state.sprite, Sprite::new(100.0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            score_step: 0,
            ..Default::default()
        };
        let err = GameState::new(7, config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "score_step", .. }));
    }

    #[test]
    fn test_ids_keep_increasing_across_reset() {
        let mut state = GameState::new(7, GameConfig::default()).unwrap();
        let a = state.next_entity_id();
        state.reset();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
