//! Physics integration
//!
//! One discrete step per call, purely additive: interceptors slide right at
//! the current speed multiplier, projectiles travel along their fixed heading
//! at the bullet speed.

use glam::Vec2;

use super::state::SimulationState;
use crate::degrees_to_direction;

/// Advance every live entity by one tick
pub fn integrate(state: &mut SimulationState) {
    let speed = state.game.speed_multiplier;
    for interceptor in &mut state.interceptors {
        interceptor.pos.x += speed;
    }

    let bullet_speed = state.tuning.bullet_speed;
    for projectile in &mut state.projectiles {
        projectile.pos += projectile_step(projectile.angle_degrees, bullet_speed);
    }
}

/// Per-tick displacement for a projectile heading
#[inline]
pub fn projectile_step(angle_degrees: f32, bullet_speed: f32) -> Vec2 {
    degrees_to_direction(angle_degrees) * bullet_speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aim::fire;
    use crate::sim::spawn::spawn_interceptor_at;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_interceptor_moves_right_only() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        state.game.speed_multiplier = 4.0;
        spawn_interceptor_at(&mut state, Vec2::new(-50.0, 300.0));

        integrate(&mut state);
        assert_eq!(state.interceptors[0].pos, Vec2::new(-46.0, 300.0));
    }

    #[test]
    fn test_projectile_follows_heading() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        fire(&mut state, 180.0);

        for _ in 0..3 {
            integrate(&mut state);
        }
        let pos = state.projectiles[0].pos;
        assert!((pos.x - 364.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_interceptor_x_never_decreases(
            speed in 0.0f32..20.0,
            y in 0.0f32..600.0,
            ticks in 1usize..200,
        ) {
            let mut state = SimulationState::new(Tuning::default(), 1);
            state.game.speed_multiplier = speed;
            spawn_interceptor_at(&mut state, Vec2::new(-50.0, y));

            let mut last_x = state.interceptors[0].pos.x;
            for _ in 0..ticks {
                integrate(&mut state);
                let pos = state.interceptors[0].pos;
                prop_assert!(pos.x >= last_x);
                prop_assert_eq!(pos.y, y);
                last_x = pos.x;
            }
        }

        #[test]
        fn prop_projectile_heading_and_speed_constant(
            angle in -360.0f32..360.0,
            ticks in 1usize..60,
        ) {
            let mut state = SimulationState::new(Tuning::default(), 1);
            fire(&mut state, angle);

            let mut last = state.projectiles[0].pos;
            for _ in 0..ticks {
                integrate(&mut state);
                let projectile = &state.projectiles[0];
                prop_assert_eq!(projectile.angle_degrees, angle);
                let moved = (projectile.pos - last).length();
                prop_assert!((moved - 12.0).abs() < 1e-2);
                last = projectile.pos;
            }
        }
    }
}
