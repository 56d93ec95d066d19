//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aim::{aim, aim_angle, fire};
pub use collision::{assign_hits, find_breach, resolve_collisions};
pub use difficulty::{apply_checkpoints, is_checkpoint, update_difficulty};
pub use physics::integrate;
pub use spawn::{spawn_batch, spawn_formation, spawn_interceptor_at, update_spawner};
pub use state::{
    DifficultyChange, Field, GameEvent, GamePhase, GameState, Interceptor, Projectile,
    ProjectileKind, SimulationState, Snapshot,
};
pub use tick::{TickInput, tick};
