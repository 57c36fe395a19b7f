//! Pipe pair spawning
//!
//! Each firing of the spawn timer adds one upper/lower pair at the right
//! edge of the viewport with a random gap position.

use rand::Rng;

use super::state::{GameState, Obstacle};
use super::viewport::ViewportMetrics;

/// Spawn one pipe pair. Returns `None` (and spawns nothing) after game over.
pub fn spawn_pair<V: ViewportMetrics + ?Sized>(
    state: &mut GameState,
    viewport: &V,
) -> Option<[Obstacle; 2]> {
    if !state.is_running() {
        return None;
    }

    let gap_start = state
        .rng
        .random_range(state.config.gap_start_min..state.config.gap_start_max);
    let x = viewport.width();

    let upper = Obstacle {
        id: state.next_entity_id(),
        x,
        top: 0.0,
        height: gap_start as f32,
        is_lower: false,
    };
    let lower = Obstacle {
        id: state.next_entity_id(),
        x,
        top: gap_start as f32 + state.config.pipe_gap,
        height: state.config.floor_segment_height,
        is_lower: true,
    };

    state.obstacles.push(upper);
    state.obstacles.push(lower);

    log::debug!(
        "Spawned pipes {}/{} at x={} gap_start={}",
        upper.id,
        lower.id,
        x,
        gap_start
    );

    Some([upper, lower])
}

/// Gap start of a pair, recovered from its upper segment
pub fn gap_start_of(upper: &Obstacle) -> u32 {
    upper.height as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::GamePhase;
    use crate::sim::viewport::FixedViewport;

    const VIEWPORT: FixedViewport = FixedViewport::new(800.0, 600.0);

    #[test]
    fn test_spawn_pair_layout() {
        let mut state = GameState::new(42, GameConfig::default()).unwrap();
        let [upper, lower] = spawn_pair(&mut state, &VIEWPORT).unwrap();

        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(upper.x, 800.0);
        assert_eq!(lower.x, 800.0);
        assert_eq!(upper.top, 0.0);
        assert!(!upper.is_lower);
        assert!(lower.is_lower);

        let gap_start = gap_start_of(&upper);
        assert!((50..250).contains(&gap_start));
        assert_eq!(lower.top, gap_start as f32 + 200.0);
        assert_eq!(lower.height, 500.0);
        assert!(lower.id > upper.id);
    }

    #[test]
    fn test_gap_start_stays_in_range() {
        let mut state = GameState::new(1, GameConfig::default()).unwrap();
        for _ in 0..500 {
            let [upper, _] = spawn_pair(&mut state, &VIEWPORT).unwrap();
            assert!((50..250).contains(&gap_start_of(&upper)));
        }
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut state = GameState::new(3, GameConfig::default()).unwrap();
        for _ in 0..10 {
            spawn_pair(&mut state, &VIEWPORT);
        }
        assert!(state.obstacles.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_no_spawn_after_game_over() {
        let mut state = GameState::new(42, GameConfig::default()).unwrap();
        state.phase = GamePhase::GameOver;
        assert!(spawn_pair(&mut state, &VIEWPORT).is_none());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = GameState::new(99, GameConfig::default()).unwrap();
        let mut b = GameState::new(99, GameConfig::default()).unwrap();
        for _ in 0..5 {
            assert_eq!(spawn_pair(&mut a, &VIEWPORT), spawn_pair(&mut b, &VIEWPORT));
        }
    }
}
