//! Difficulty escalation
//!
//! A one-second clock advances `elapsed_seconds`. After each increment the
//! checkpoints are evaluated against the new value; every increase saturates
//! at its tuning cap.
//!
//! Checkpoints are tested as a float modulo on the integer second counter, so
//! the 1.5 s batch checkpoint fires whenever `elapsed_seconds` is a multiple
//! of 3.

use super::state::{DifficultyChange, GameEvent, GameState, SimulationState};
use crate::tuning::Tuning;

/// Length of one elapsed-second step
pub const CLOCK_PERIOD: f32 = 1.0;

/// Advance the difficulty clock by `dt` seconds
pub fn update_difficulty(state: &mut SimulationState, dt: f32, events: &mut Vec<GameEvent>) {
    state.clock_timer += dt;
    while state.clock_timer >= CLOCK_PERIOD {
        state.clock_timer -= CLOCK_PERIOD;
        state.game.elapsed_seconds += 1;
        for change in apply_checkpoints(&mut state.game, &state.tuning) {
            log::info!(
                "Difficulty raised at {}s: {:?}",
                state.game.elapsed_seconds,
                change
            );
            events.push(GameEvent::DifficultyRaised(change));
        }
    }
}

/// Whether `elapsed` seconds lands exactly on a checkpoint period
#[inline]
pub fn is_checkpoint(elapsed: u32, period: f64) -> bool {
    elapsed > 0 && (elapsed as f64) % period == 0.0
}

/// Apply every checkpoint matching the current `elapsed_seconds`.
/// Only changes that actually moved a counter are returned.
pub fn apply_checkpoints(game: &mut GameState, tuning: &Tuning) -> Vec<DifficultyChange> {
    let elapsed = game.elapsed_seconds;
    let mut changes = Vec::new();

    if is_checkpoint(elapsed, tuning.speed_checkpoint) {
        let next = (game.speed_multiplier + tuning.speed_step).min(tuning.max_speed);
        if next > game.speed_multiplier {
            game.speed_multiplier = next;
            changes.push(DifficultyChange::Speed(next));
        }
    }

    if is_checkpoint(elapsed, tuning.batch_checkpoint) && game.spawn_batch_base < tuning.max_spawn_batch
    {
        game.spawn_batch_base += 1;
        changes.push(DifficultyChange::SpawnBatch(game.spawn_batch_base));
    }

    if is_checkpoint(elapsed, tuning.tier_checkpoint)
        && game.difficulty_tier < tuning.max_difficulty_tier
    {
        game.difficulty_tier += 1;
        changes.push(DifficultyChange::Tier(game.difficulty_tier));
    }

    changes
}
