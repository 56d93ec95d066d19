//! Flak 404 - the anti-air mini game behind the "page not found" screen
//!
//! Core modules:
//! - `sim`: Simulation core (entities, physics, collisions, difficulty, game state)
//! - `session`: Host-facing controller (fixed-step clock, input queue, loop cancellation)
//! - `tuning`: Data-driven game balance

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{LoopControl, LoopToken, Session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one logical tick per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Interceptors enter this far left of the field
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Vertical jitter applied around each spawn band (+/-)
    pub const SPAWN_JITTER: f32 = 20.0;
    /// Keep interceptors away from the top/bottom edges
    pub const SPAWN_EDGE_PADDING: f32 = 30.0;

    /// An interceptor this close to the origin ends the session
    pub const BREACH_RADIUS: f32 = 45.0;
    /// A projectile this close to an interceptor destroys it
    pub const HIT_RADIUS: f32 = 25.0;

    /// Projectile speed (pixels per tick)
    pub const BULLET_SPEED: f32 = 12.0;

    /// Interceptor speed (pixels per tick)
    pub const BASE_SPEED: f32 = 2.0;
    pub const SPEED_STEP: f32 = 0.25;
    pub const MAX_SPEED: f32 = 6.0;

    /// Interceptors per spawn, before the random extra
    pub const BASE_SPAWN_BATCH: u32 = 1;
    /// Random extra per spawn is drawn from 0..=SPAWN_BATCH_EXTRA
    pub const SPAWN_BATCH_EXTRA: u32 = 2;
    pub const MAX_SPAWN_BATCH: u32 = 5;
    /// Upper bound on one formation (largest batch plus random extra)
    pub const SPAWN_BATCH_LIMIT: u32 = 32;

    pub const BASE_DIFFICULTY_TIER: u32 = 1;
    pub const MAX_DIFFICULTY_TIER: u32 = 5;

    /// Spawner cadence (seconds)
    pub const BASE_SPAWN_INTERVAL: f32 = 2.5;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.3;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.8;

    /// Difficulty checkpoints (seconds of elapsed play)
    pub const SPEED_CHECKPOINT: f64 = 2.0;
    pub const BATCH_CHECKPOINT: f64 = 1.5;
    pub const TIER_CHECKPOINT: f64 = 30.0;

    /// Ticks between accepted fire triggers (0 = unlimited)
    pub const FIRE_COOLDOWN_TICKS: u32 = 0;
}

/// Unit direction vector for an angle in degrees
#[inline]
pub fn degrees_to_direction(angle_degrees: f32) -> Vec2 {
    let radians = angle_degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
