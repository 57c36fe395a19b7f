//! Obstacle scrolling and retirement

use super::state::Obstacle;

/// Result of advancing the track by one tick
#[derive(Debug, Clone, Default)]
pub struct TrackStep {
    /// Obstacle set as it was before this tick's advance
    pub before: Vec<Obstacle>,
    /// Obstacles that scrolled off the left edge this tick
    pub retired: Vec<Obstacle>,
}

impl TrackStep {
    pub fn retired_any(&self) -> bool {
        !self.retired.is_empty()
    }
}

/// Scroll every obstacle left by `scroll_speed` and drop the ones whose
/// left edge reached `-pipe_width`.
pub fn advance(obstacles: &mut Vec<Obstacle>, scroll_speed: f32, pipe_width: f32) -> TrackStep {
    let before = obstacles.clone();

    for obstacle in obstacles.iter_mut() {
        obstacle.x -= scroll_speed;
    }

    let mut retired = Vec::new();
    obstacles.retain(|o| {
        if o.x > -pipe_width {
            true
        } else {
            retired.push(*o);
            false
        }
    });

    TrackStep { before, retired }
}
