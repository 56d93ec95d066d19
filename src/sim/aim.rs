//! Aim and fire control
//!
//! The aim angle is recomputed from every pointer sample. Firing creates one
//! projectile at the origin on the current heading.

use glam::Vec2;
use rand::Rng;

use super::state::{Projectile, ProjectileKind, SimulationState};

/// Angle in degrees from `origin` toward `pointer`
///
/// Total over all inputs: pointers outside the field, or exactly on the
/// origin, still produce a finite angle.
#[inline]
pub fn aim_angle(pointer: Vec2, origin: Vec2) -> f32 {
    (pointer.y - origin.y).atan2(pointer.x - origin.x).to_degrees()
}

/// Update the stored aim angle from a pointer sample
pub fn aim(state: &mut SimulationState, pointer: Vec2) -> f32 {
    let angle = aim_angle(pointer, state.origin());
    if angle.is_finite() {
        state.aim_angle = angle;
    } else {
        log::warn!("Ignoring non-finite pointer sample {:?}", pointer);
    }
    state.aim_angle
}

/// Fire one projectile from the origin. Returns its id, or `None` when the
/// game is over or the trigger falls inside the fire cooldown.
pub fn fire(state: &mut SimulationState, angle_degrees: f32) -> Option<u32> {
    if state.is_game_over() {
        return None;
    }

    let cooldown = state.tuning.fire_cooldown_ticks as u64;
    if cooldown > 0 {
        if let Some(last) = state.last_fire_tick {
            if state.time_ticks.saturating_sub(last) < cooldown {
                return None;
            }
        }
    }

    let kind = if state.rng.random_bool(0.5) {
        ProjectileKind::Shell
    } else {
        ProjectileKind::Bomb
    };
    let id = state.next_entity_id();
    let origin = state.origin();
    state.projectiles.push(Projectile {
        id,
        pos: origin,
        angle_degrees,
        kind,
    });
    state.last_fire_tick = Some(state.time_ticks);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_aim_angle_cardinal_directions() {
        let origin = Vec2::new(400.0, 300.0);
        assert!((aim_angle(Vec2::new(500.0, 300.0), origin) - 0.0).abs() < 1e-4);
        assert!((aim_angle(Vec2::new(400.0, 400.0), origin) - 90.0).abs() < 1e-4);
        assert!((aim_angle(Vec2::new(300.0, 300.0), origin).abs() - 180.0).abs() < 1e-4);
        assert!((aim_angle(Vec2::new(400.0, 200.0), origin) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_aim_tolerates_out_of_field_pointer() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        let angle = aim(&mut state, Vec2::new(-5000.0, 1.0e6));
        assert!(angle.is_finite());
        let origin = state.origin();
        let on_origin = aim(&mut state, origin);
        assert!(on_origin.is_finite());
    }

    #[test]
    fn test_aim_ignores_nan_pointer() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        aim(&mut state, Vec2::new(500.0, 300.0));
        let angle = aim(&mut state, Vec2::new(f32::NAN, 0.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_fire_spawns_at_origin() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        let id = fire(&mut state, 45.0).expect("fire should succeed");
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, id);
        assert_eq!(state.projectiles[0].pos, state.origin());
        assert_eq!(state.projectiles[0].angle_degrees, 45.0);
    }

    #[test]
    fn test_fire_unlimited_by_default() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        for _ in 0..25 {
            assert!(fire(&mut state, 0.0).is_some());
        }
        assert_eq!(state.projectiles.len(), 25);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let tuning = Tuning {
            fire_cooldown_ticks: 10,
            ..Default::default()
        };
        let mut state = SimulationState::new(tuning, 1);
        assert!(fire(&mut state, 0.0).is_some());
        assert!(fire(&mut state, 0.0).is_none());
        state.time_ticks += 9;
        assert!(fire(&mut state, 0.0).is_none());
        state.time_ticks += 1;
        assert!(fire(&mut state, 0.0).is_some());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_disabled_after_game_over() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        state.end();
        assert!(fire(&mut state, 0.0).is_none());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_kinds_vary() {
        let mut state = SimulationState::new(Tuning::default(), 99);
        for _ in 0..64 {
            fire(&mut state, 0.0);
        }
        let shells = state
            .projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::Shell)
            .count();
        assert!(shells > 0 && shells < 64);
    }
}
