//! Fixed timestep simulation tick
//!
//! Pipeline per tick: aim -> fire -> spawn -> integrate -> collide -> difficulty.
//! Once the game is over every call is a no-op.

use glam::Vec2;

use super::aim::{aim, fire};
use super::collision::resolve_collisions;
use super::difficulty::update_difficulty;
use super::physics::integrate;
use super::spawn::update_spawner;
use super::state::{GameEvent, GamePhase, SimulationState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position in field coordinates (last write wins)
    pub pointer: Option<Vec2>,
    /// Fire triggers received since the previous tick
    pub fire_triggers: u32,
}

/// Advance the simulation by one fixed timestep. Returns what happened.
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::GameOver => return events,
        GamePhase::Idle => state.start(),
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    if let Some(pointer) = input.pointer {
        aim(state, pointer);
    }
    for _ in 0..input.fire_triggers {
        let angle = state.aim_angle;
        if let Some(projectile) = fire(state, angle) {
            events.push(GameEvent::Fired { projectile });
        }
    }

    update_spawner(state, dt, &mut events);
    integrate(state);

    if resolve_collisions(state, &mut events) {
        return events;
    }

    update_difficulty(state, dt, &mut events);

    // Ensure deterministic ordering
    state.normalize_order();
    events
}
