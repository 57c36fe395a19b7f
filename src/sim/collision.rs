//! Collision and pass detection
//!
//! Box tests between the sprite and the pipe segments, the floor check, and
//! picking which pipe earns a point when the track retires one.

use glam::Vec2;

use super::state::{Obstacle, Sprite};
use super::track::TrackStep;
use crate::config::GameConfig;

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on the horizontal axis (touching edges don't count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// The sprite's box. Its left edge is fixed at `sprite_x`.
pub fn sprite_box(sprite: &Sprite, config: &GameConfig) -> Aabb {
    Aabb::from_min_size(
        Vec2::new(config.sprite_x, sprite.y),
        Vec2::new(config.sprite_width, config.sprite_height),
    )
}

pub fn obstacle_box(obstacle: &Obstacle, pipe_width: f32) -> Aabb {
    Aabb::from_min_size(
        Vec2::new(obstacle.x, obstacle.top),
        Vec2::new(pipe_width, obstacle.height),
    )
}

/// Does the sprite touch this pipe segment?
///
/// An upper segment is hit when the sprite's top is above the segment's
/// bottom; a lower segment when the sprite's bottom is below its top.
pub fn obstacle_hit(sprite: &Aabb, obstacle: &Obstacle, pipe_width: f32) -> bool {
    let pipe = obstacle_box(obstacle, pipe_width);
    if !pipe.overlaps_x(sprite) {
        return false;
    }

    if obstacle.is_lower {
        sprite.bottom() > pipe.top()
    } else {
        sprite.top() < pipe.bottom()
    }
}

/// Sprite reached the floor
pub fn ground_hit(sprite: &Aabb, viewport_height: f32) -> bool {
    sprite.bottom() >= viewport_height
}

/// Pick the pipe that earns a point this tick, if any.
///
/// Only runs when the track retired something. The candidate is the first
/// pipe (pre-advance) still ahead of the sprite's right edge; it is reported
/// only if it is newer than the last scored one, so no id scores twice.
pub fn detect_pass(step: &TrackStep, sprite_right: f32, last_scored: Option<u32>) -> Option<Obstacle> {
    if !step.retired_any() {
        return None;
    }

    let candidate = step.before.iter().find(|o| o.x > sprite_right)?;
    if last_scored.is_none_or(|last| candidate.id > last) {
        Some(*candidate)
    } else {
        None
    }
}

/// Outcome of checking one tick's combined state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluation {
    /// Id of the first pipe the sprite overlaps
    pub collided: Option<u32>,
    pub ground_hit: bool,
    pub passed: Option<Obstacle>,
}

impl Evaluation {
    pub fn crashed(&self) -> bool {
        self.collided.is_some() || self.ground_hit
    }
}

/// Check the sprite against the live pipes, the floor, and this tick's retirements
pub fn evaluate(
    sprite: &Sprite,
    obstacles: &[Obstacle],
    step: &TrackStep,
    last_scored: Option<u32>,
    config: &GameConfig,
    viewport_height: f32,
) -> Evaluation {
    let sprite = sprite_box(sprite, config);

    let collided = obstacles
        .iter()
        .find(|o| obstacle_hit(&sprite, o, config.pipe_width))
        .map(|o| o.id);

    Evaluation {
        collided,
        ground_hit: ground_hit(&sprite, viewport_height),
        passed: detect_pass(step, sprite.right(), last_scored),
    }
}
