//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Spawner ===
    pub spawn_margin: f32,
    pub spawn_jitter: f32,
    /// Distance kept from the top/bottom edge when placing interceptors
    pub spawn_edge_padding: f32,
    pub base_spawn_interval: f32,
    pub spawn_interval_step: f32,
    pub min_spawn_interval: f32,
    pub base_spawn_batch: u32,
    pub spawn_batch_extra: u32,
    pub max_spawn_batch: u32,

    // === Collisions ===
    pub breach_radius: f32,
    pub hit_radius: f32,

    // === Motion ===
    pub bullet_speed: f32,
    pub base_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,

    // === Difficulty ===
    pub base_difficulty_tier: u32,
    pub max_difficulty_tier: u32,
    pub speed_checkpoint: f64,
    pub batch_checkpoint: f64,
    pub tier_checkpoint: f64,

    // === Fire control ===
    /// Ticks that must pass between two accepted fire triggers (0 = unlimited)
    pub fire_cooldown_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            spawn_margin: SPAWN_MARGIN,
            spawn_jitter: SPAWN_JITTER,
            spawn_edge_padding: SPAWN_EDGE_PADDING,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            base_spawn_batch: BASE_SPAWN_BATCH,
            spawn_batch_extra: SPAWN_BATCH_EXTRA,
            max_spawn_batch: MAX_SPAWN_BATCH,

            breach_radius: BREACH_RADIUS,
            hit_radius: HIT_RADIUS,

            bullet_speed: BULLET_SPEED,
            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            max_speed: MAX_SPEED,

            base_difficulty_tier: BASE_DIFFICULTY_TIER,
            max_difficulty_tier: MAX_DIFFICULTY_TIER,
            speed_checkpoint: SPEED_CHECKPOINT,
            batch_checkpoint: BATCH_CHECKPOINT,
            tier_checkpoint: TIER_CHECKPOINT,

            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a non-negative finite number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("breach_radius", self.breach_radius)?;
        positive("hit_radius", self.hit_radius)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("base_speed", self.base_speed)?;
        positive("base_spawn_interval", self.base_spawn_interval)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        positive("max_speed", self.max_speed)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;
        non_negative("spawn_edge_padding", self.spawn_edge_padding)?;
        non_negative("speed_step", self.speed_step)?;
        non_negative("spawn_interval_step", self.spawn_interval_step)?;

        if self.spawn_margin > self.field_width {
            return Err(TuningError::Invalid {
                field: "spawn_margin",
                reason: "must not exceed field_width",
            });
        }
        if self.spawn_jitter > self.field_height {
            return Err(TuningError::Invalid {
                field: "spawn_jitter",
                reason: "must not exceed field_height",
            });
        }
        if self.max_spawn_batch.saturating_add(self.spawn_batch_extra) > SPAWN_BATCH_LIMIT {
            return Err(TuningError::Invalid {
                field: "max_spawn_batch",
                reason: "max_spawn_batch + spawn_batch_extra exceeds the batch limit",
            });
        }
        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval",
                reason: "must not exceed base_spawn_interval",
            });
        }
        if self.spawn_edge_padding * 2.0 > self.field_height {
            return Err(TuningError::Invalid {
                field: "spawn_edge_padding",
                reason: "leaves no room to spawn",
            });
        }
        if self.max_speed < self.base_speed {
            return Err(TuningError::Invalid {
                field: "max_speed",
                reason: "must be at least base_speed",
            });
        }
        if self.max_spawn_batch < self.base_spawn_batch {
            return Err(TuningError::Invalid {
                field: "max_spawn_batch",
                reason: "must be at least base_spawn_batch",
            });
        }
        if self.max_difficulty_tier < self.base_difficulty_tier {
            return Err(TuningError::Invalid {
                field: "max_difficulty_tier",
                reason: "must be at least base_difficulty_tier",
            });
        }
        for (field, value) in [
            ("speed_checkpoint", self.speed_checkpoint),
            ("batch_checkpoint", self.batch_checkpoint),
            ("tier_checkpoint", self.tier_checkpoint),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "checkpoint must be a positive finite number of seconds",
                });
            }
        }
        Ok(())
    }

    /// Spawner cadence for a difficulty tier (seconds)
    pub fn spawn_interval(&self, difficulty_tier: u32) -> f32 {
        (self.base_spawn_interval - difficulty_tier as f32 * self.spawn_interval_step)
            .max(self.min_spawn_interval)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flak404_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
