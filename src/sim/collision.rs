//! Collision detection and response
//!
//! Runs once per tick after integration, in a fixed order:
//! 1. Breach: an interceptor inside the breach radius ends the game
//! 2. Miss: interceptors past the right edge count as missed
//! 3. Hit: projectile/interceptor pairs inside the hit radius score
//! 4. Exit: projectiles outside the field are dropped
//!
//! The pair scan is O(P x I), fine for the tens of entities the game keeps alive.

use glam::Vec2;

use super::state::{GameEvent, Interceptor, Projectile, SimulationState};
use crate::distance;

/// Resolve all collisions for this tick. Returns `true` if the origin was breached.
pub fn resolve_collisions(state: &mut SimulationState, events: &mut Vec<GameEvent>) -> bool {
    if let Some(id) = find_breach(&state.interceptors, state.origin(), state.tuning.breach_radius)
    {
        state.interceptors.retain(|i| i.id != id);
        events.push(GameEvent::Breached { interceptor: id });
        state.end();
        return true;
    }

    let field_width = state.field.width;
    let mut missed = Vec::new();
    state.interceptors.retain(|i| {
        if i.pos.x > field_width {
            missed.push(i.id);
            false
        } else {
            true
        }
    });
    for id in missed {
        state.game.missed += 1;
        events.push(GameEvent::Missed { interceptor: id });
    }

    let hits = assign_hits(
        &state.projectiles,
        &state.interceptors,
        state.tuning.hit_radius,
    );
    for &(projectile, interceptor) in &hits {
        state.projectiles.retain(|p| p.id != projectile);
        state.interceptors.retain(|i| i.id != interceptor);
        state.game.score += 1;
        log::debug!("Projectile {} hit interceptor {}", projectile, interceptor);
        events.push(GameEvent::Hit {
            projectile,
            interceptor,
        });
    }

    let field = state.field;
    state.projectiles.retain(|p| field.contains(p.pos));

    false
}

/// First interceptor (lowest id) inside the breach radius
pub fn find_breach(interceptors: &[Interceptor], origin: Vec2, breach_radius: f32) -> Option<u32> {
    interceptors
        .iter()
        .find(|i| distance(i.pos, origin) < breach_radius)
        .map(|i| i.id)
}

/// Pair projectiles with interceptors they hit
///
/// Interceptors are resolved in ascending id order. Each takes the nearest
/// projectile within `hit_radius` that has not been consumed yet; equal
/// distances go to the earlier (lower id) projectile. Every entity appears in
/// at most one pair. Returns `(projectile_id, interceptor_id)` pairs.
pub fn assign_hits(
    projectiles: &[Projectile],
    interceptors: &[Interceptor],
    hit_radius: f32,
) -> Vec<(u32, u32)> {
    let mut order: Vec<&Interceptor> = interceptors.iter().collect();
    order.sort_by_key(|i| i.id);

    let mut consumed = vec![false; projectiles.len()];
    let mut hits = Vec::new();

    for interceptor in order {
        let mut best: Option<(usize, f32)> = None;
        for (idx, projectile) in projectiles.iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            let dist = distance(projectile.pos, interceptor.pos);
            if dist >= hit_radius {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_idx, best_dist)) => {
                    dist < best_dist
                        || (dist == best_dist && projectile.id < projectiles[best_idx].id)
                }
            };
            if better {
                best = Some((idx, dist));
            }
        }

        if let Some((idx, _)) = best {
            consumed[idx] = true;
            hits.push((projectiles[idx].id, interceptor.id));
        }
    }

    hits
}
