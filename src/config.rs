//! Game tuning configuration
//!
//! Every physics and pacing constant lives here so a session can be tuned
//! without touching the simulation. Defaults come from `crate::consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How sprite velocity and position are integrated each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Integration {
    /// Position moves by the velocity carried into the tick, then velocity
    /// updates. Each step uses velocity one update behind `SemiImplicit`.
    #[default]
    Lagged,
    /// Velocity updates first and the position moves by the new velocity.
    SemiImplicit,
}

/// Errors raised while loading a configuration override
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config is not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Kinematics ===
    pub gravity: f32,
    /// Must be in (0, 1)
    pub damping: f32,
    /// Must be negative (upward)
    pub jump_impulse: f32,
    pub integration: Integration,

    // === Sprite ===
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub sprite_x: f32,
    pub sprite_start_y: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub gap_start_min: u32,
    /// Exclusive
    pub gap_start_max: u32,
    pub floor_segment_height: f32,

    // === Pacing ===
    pub spawn_interval_ms: u32,
    pub initial_scroll_speed: f32,
    pub scroll_speed_increment: f32,
    pub score_step: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            damping: DAMPING,
            jump_impulse: JUMP_IMPULSE,
            integration: Integration::Lagged,

            sprite_width: SPRITE_WIDTH,
            sprite_height: SPRITE_HEIGHT,
            sprite_x: SPRITE_X,
            sprite_start_y: SPRITE_START_Y,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            gap_start_min: GAP_START_MIN,
            gap_start_max: GAP_START_MAX,
            floor_segment_height: FLOOR_SEGMENT_HEIGHT,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            initial_scroll_speed: INITIAL_SCROLL_SPEED,
            scroll_speed_increment: SCROLL_SPEED_INCREMENT,
            score_step: SCORE_STEP,
        }
    }
}

impl GameConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return invalid("damping", "must be between 0 and 1 (exclusive)");
        }
        if self.jump_impulse >= 0.0 {
            return invalid("jump_impulse", "must be negative");
        }
        if self.sprite_width <= 0.0 || self.sprite_height <= 0.0 {
            return invalid("sprite_width", "sprite size must be positive");
        }
        if self.pipe_width <= 0.0 {
            return invalid("pipe_width", "must be positive");
        }
        if self.pipe_gap <= 0.0 {
            return invalid("pipe_gap", "must be positive");
        }
        if self.gap_start_min >= self.gap_start_max {
            return invalid("gap_start_min", "must be below gap_start_max");
        }
        if self.spawn_interval_ms == 0 {
            return invalid("spawn_interval_ms", "must be positive");
        }
        if self.initial_scroll_speed <= 0.0 {
            return invalid("initial_scroll_speed", "must be positive");
        }
        if self.scroll_speed_increment < 0.0 {
            return invalid("scroll_speed_increment", "must not be negative");
        }
        if self.score_step == 0 {
            return invalid("score_step", "must be positive");
        }
        Ok(())
    }

    /// LocalStorage key for a config override
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_web_config";

    /// Load a config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval_ms, 1500);
        assert_eq!(config.integration, Integration::Lagged);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "gravity": 0.2, "score_step": 5 }"#).unwrap();
        assert_eq!(config.gravity, 0.2);
        assert_eq!(config.score_step, 5);
        assert_eq!(config.pipe_gap, PIPE_GAP);
        assert_eq!(config.jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_integration_parses_by_name() {
        let config = GameConfig::from_json(r#"{ "integration": "SemiImplicit" }"#).unwrap();
        assert_eq!(config.integration, Integration::SemiImplicit);
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = GameConfig::from_json(r#"{ "damping": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "damping", .. }));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = GameConfig::from_json(r#"{ "jump_impulse": 2.9 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jump_impulse", .. }));
    }

    #[test]
    fn test_rejects_empty_gap_range() {
        let err = GameConfig::from_json(r#"{ "gap_start_min": 250, "gap_start_max": 250 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gap_start_min", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            integration: Integration::SemiImplicit,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
