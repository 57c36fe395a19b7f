//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod kinematics;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod track;
pub mod viewport;

pub use collision::{Aabb, Evaluation, evaluate};
pub use spawner::spawn_pair;
pub use state::{CrashCause, GameEvent, GamePhase, GameState, Obstacle, Sprite};
pub use tick::{TickInput, jump, tick};
pub use track::TrackStep;
pub use viewport::{FixedViewport, ViewportMetrics};
