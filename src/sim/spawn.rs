//! Interceptor spawner
//!
//! Batches enter at the left edge, spread across evenly spaced horizontal
//! bands. Spawning only appends; existing interceptors are never touched.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, Interceptor, SimulationState};

/// Advance the spawn timer and emit a batch when the interval has elapsed
pub fn update_spawner(state: &mut SimulationState, dt: f32, events: &mut Vec<GameEvent>) {
    state.spawn_timer += dt;
    let interval = state.tuning.spawn_interval(state.game.difficulty_tier);
    if state.spawn_timer >= interval {
        state.spawn_timer -= interval;
        let count = spawn_batch(state);
        events.push(GameEvent::Spawned { count });
    }
}

/// Spawn `spawn_batch_base + random(0..=extra)` interceptors. Returns how many.
pub fn spawn_batch(state: &mut SimulationState) -> u32 {
    let extra = state.tuning.spawn_batch_extra;
    let count = state
        .game
        .spawn_batch_base
        .saturating_add(state.rng.random_range(0..=extra));
    spawn_formation(state, count);
    count
}

/// Place `count` interceptors in one formation (0 spawns nothing)
pub fn spawn_formation(state: &mut SimulationState, count: u32) {
    if count == 0 {
        return;
    }

    let height = state.field.height;
    let band = height / (count + 1) as f32;
    let min_y = state.tuning.spawn_edge_padding;
    let max_y = (height - state.tuning.spawn_edge_padding).max(min_y);
    let jitter = state.tuning.spawn_jitter;
    let x = -state.tuning.spawn_margin;

    for i in 0..count {
        let offset = if jitter > 0.0 {
            state.rng.random_range(-jitter..=jitter)
        } else {
            0.0
        };
        let y = (band * (i + 1) as f32 + offset).clamp(min_y, max_y);
        spawn_interceptor_at(state, Vec2::new(x, y));
    }
    log::debug!("Spawned {} interceptors at x={}", count, x);
}

/// Append a single interceptor at an explicit position
pub fn spawn_interceptor_at(state: &mut SimulationState, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state.interceptors.push(Interceptor { id, pos });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn fixed_tuning() -> Tuning {
        Tuning {
            spawn_batch_extra: 0,
            spawn_jitter: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_of_two_in_even_bands() {
        let mut state = SimulationState::new(fixed_tuning(), 3);
        state.game.spawn_batch_base = 2;

        let count = spawn_batch(&mut state);
        assert_eq!(count, 2);
        assert_eq!(state.interceptors.len(), 2);
        assert_eq!(state.interceptors[0].pos, Vec2::new(-50.0, 200.0));
        assert_eq!(state.interceptors[1].pos, Vec2::new(-50.0, 400.0));
    }

    #[test]
    fn test_zero_batch_spawns_nothing() {
        let mut state = SimulationState::new(fixed_tuning(), 3);
        state.game.spawn_batch_base = 0;
        assert_eq!(spawn_batch(&mut state), 0);
        assert!(state.interceptors.is_empty());
    }

    #[test]
    fn test_random_extra_stays_in_range() {
        let tuning = Tuning {
            spawn_jitter: 0.0,
            ..Default::default()
        };
        let mut state = SimulationState::new(tuning, 11);
        for _ in 0..50 {
            let base = state.game.spawn_batch_base;
            let count = spawn_batch(&mut state);
            assert!(count >= base && count <= base + 2);
        }
    }

    #[test]
    fn test_jitter_is_clamped_to_spawn_bounds() {
        let tuning = Tuning {
            spawn_jitter: 500.0,
            ..Default::default()
        };
        let mut state = SimulationState::new(tuning, 5);
        spawn_formation(&mut state, 4);
        for interceptor in &state.interceptors {
            assert!(interceptor.pos.y >= 30.0 && interceptor.pos.y <= 570.0);
        }
    }

    #[test]
    fn test_spawning_never_moves_existing() {
        let mut state = SimulationState::new(Tuning::default(), 5);
        let id = spawn_interceptor_at(&mut state, Vec2::new(123.0, 45.0));
        spawn_formation(&mut state, 3);
        let original = state
            .interceptors
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.pos);
        assert_eq!(original, Some(Vec2::new(123.0, 45.0)));
        assert_eq!(state.interceptors.len(), 4);
    }

    #[test]
    fn test_spawner_waits_for_interval() {
        let mut state = SimulationState::new(fixed_tuning(), 5);
        let mut events = Vec::new();
        // Tier 1 interval: 2.5 - 0.3 = 2.2s
        update_spawner(&mut state, 2.0, &mut events);
        assert!(state.interceptors.is_empty());
        update_spawner(&mut state, 0.25, &mut events);
        assert_eq!(state.interceptors.len(), 1);
        assert_eq!(events, vec![GameEvent::Spawned { count: 1 }]);
    }
}
