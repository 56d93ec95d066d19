//! Game state and core simulation types
//!
//! One `SimulationState` value holds everything the simulation mutates: the
//! entity collections, the scoreboard, the spawn/difficulty timers and the RNG.
//! Replacing it wholesale is how a session is reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not ticked yet
    Idle,
    /// Active gameplay
    Playing,
    /// An interceptor breached the origin; ticking is frozen
    GameOver,
}

/// Cosmetic projectile flavour. Has no effect on physics or scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Shell,
    Bomb,
}

/// A hostile crossing the field left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interceptor {
    pub id: u32,
    pub pos: Vec2,
}

/// A player-fired round travelling on a fixed heading from the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Heading in degrees, screen coordinates (0 = +x, 90 = +y / down)
    pub angle_degrees: f32,
    pub kind: ProjectileKind,
}

/// Scoreboard and difficulty counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub missed: u32,
    pub elapsed_seconds: u32,
    pub difficulty_tier: u32,
    /// Interceptor speed (pixels per tick)
    pub speed_multiplier: f32,
    pub spawn_batch_base: u32,
    pub game_over: bool,
}

impl GameState {
    /// Fresh counters at the tuning baselines
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            missed: 0,
            elapsed_seconds: 0,
            difficulty_tier: tuning.base_difficulty_tier,
            speed_multiplier: tuning.base_speed,
            spawn_batch_base: tuning.base_spawn_batch,
            game_over: false,
        }
    }
}

/// Play field dimensions. The origin sits at the centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The defended point
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside the field (edges inclusive)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

/// Something that happened during a tick, for sound/effects hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile: u32 },
    Spawned { count: u32 },
    Hit { projectile: u32, interceptor: u32 },
    Missed { interceptor: u32 },
    Breached { interceptor: u32 },
    DifficultyRaised(DifficultyChange),
}

/// A single difficulty escalation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DifficultyChange {
    Speed(f32),
    SpawnBatch(u32),
    Tier(u32),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub field: Field,
    pub phase: GamePhase,
    pub game: GameState,
    /// Live interceptors (sorted by id)
    pub interceptors: Vec<Interceptor>,
    /// Live projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Latest aim angle in degrees
    pub aim_angle: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Seconds accumulated toward the next elapsed-second increment
    pub clock_timer: f32,
    /// Tick of the last accepted fire trigger
    pub last_fire_tick: Option<u64>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Create an idle state with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let field = Field::new(tuning.field_width, tuning.field_height);
        Self::with_field(tuning, field, seed)
    }

    fn with_field(tuning: Tuning, field: Field, seed: u64) -> Self {
        Self {
            seed,
            game: GameState::new(&tuning),
            tuning,
            field,
            phase: GamePhase::Idle,
            interceptors: Vec::new(),
            projectiles: Vec::new(),
            aim_angle: 0.0,
            time_ticks: 0,
            spawn_timer: 0.0,
            clock_timer: 0.0,
            last_fire_tick: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Move from Idle to Playing. No effect in any other phase.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Playing;
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Fully re-initialize into Playing, keeping tuning and the current field size
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_field(tuning, self.field, seed);
        self.phase = GamePhase::Playing;
        log::info!("Session reset (seed {})", seed);
    }

    /// Enter GameOver. Final counters are preserved for display.
    pub fn end(&mut self) {
        self.game.game_over = true;
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, missed {}, survived {}s",
            self.game.score,
            self.game.missed,
            self.game.elapsed_seconds
        );
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game.game_over
    }

    /// The defended point for the current field
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.field.origin()
    }

    /// Apply new field dimensions. Live entities keep their coordinates.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            log::warn!("Ignoring degenerate field size {}x{}", width, height);
            return;
        }
        self.field = Field::new(width, height);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).unwrap_or_else(|| {
            log::warn!("Entity ids exhausted, wrapping to 1");
            1
        });
        id
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.interceptors.sort_by_key(|i| i.id);
        self.projectiles.sort_by_key(|p| p.id);
    }

    /// Read-only copy for the rendering layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            interceptors: self.interceptors.clone(),
            projectiles: self.projectiles.clone(),
            game: self.game.clone(),
            aim_angle: self.aim_angle,
            field: self.field,
            origin: self.origin(),
        }
    }
}

/// Immutable per-tick view handed to the host for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub interceptors: Vec<Interceptor>,
    pub projectiles: Vec<Projectile>,
    pub game: GameState,
    pub aim_angle: f32,
    pub field: Field,
    pub origin: Vec2,
}
