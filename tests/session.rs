//! Host contract tests for `Session`

use flak_404::consts::SIM_DT;
use flak_404::sim::{GamePhase, spawn_interceptor_at};
use flak_404::{LoopControl, Session, Tuning};
use glam::Vec2;

fn play_for(session: &mut Session, seconds: f32) {
    let frames = (seconds / SIM_DT).round() as u32;
    for _ in 0..frames {
        session.advance(SIM_DT);
    }
}

#[test]
fn reset_is_idempotent_and_clears_previous_session() {
    let mut session = Session::new(7);
    session.start();
    session.pointer_moved(0.0, 300.0);
    session.trigger_fire();
    play_for(&mut session, 5.0);
    assert!(session.state().game.elapsed_seconds > 0);

    session.reset(11);
    let once = session.snapshot();
    session.reset(11);
    session.reset(11);
    let thrice = session.snapshot();

    assert_eq!(once, thrice);
    assert!(thrice.interceptors.is_empty());
    assert!(thrice.projectiles.is_empty());
    assert_eq!(thrice.game.score, 0);
    assert_eq!(thrice.game.missed, 0);
    assert_eq!(thrice.game.elapsed_seconds, 0);
    assert_eq!(thrice.game.difficulty_tier, 1);
    assert!(!thrice.game.game_over);
    assert_eq!(thrice.phase, GamePhase::Playing);
}

#[test]
fn queued_triggers_do_not_survive_reset() {
    let mut session = Session::new(7);
    session.start();
    session.trigger_fire();
    session.trigger_fire();
    session.reset(8);

    session.advance(SIM_DT);
    assert!(session.snapshot().projectiles.is_empty());
}

#[test]
fn superseded_loop_stops_without_touching_state() {
    let mut session = Session::new(3);
    let old = session.start();
    let new = session.reset(4);

    let before = session.snapshot();
    for _ in 0..100 {
        assert_eq!(session.run_frame(old, SIM_DT), LoopControl::Stop);
    }
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.run_frame(new, SIM_DT), LoopControl::Continue);
}

#[test]
fn loop_stops_on_breach_and_stays_frozen() {
    let mut session = Session::new(5);
    let token = session.start();
    let origin = session.state().origin();
    spawn_interceptor_at(session.state_mut(), origin - Vec2::new(10.0, 0.0));

    assert_eq!(session.run_frame(token, SIM_DT), LoopControl::Stop);
    let frozen = session.snapshot();
    assert!(frozen.game.game_over);

    session.trigger_fire();
    session.advance(SIM_DT * 5.0);
    assert_eq!(session.snapshot(), frozen);
}

#[test]
fn resize_moves_origin_but_not_entities() {
    let tuning = Tuning {
        base_spawn_interval: 1.0e3,
        min_spawn_interval: 1.0e3,
        ..Default::default()
    };
    let mut session = Session::with_tuning(tuning, 9).expect("tuning is valid");
    session.start();
    spawn_interceptor_at(session.state_mut(), Vec2::new(10.0, 20.0));

    session.resize(1200.0, 900.0);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.origin, Vec2::new(600.0, 450.0));
    assert_eq!(snapshot.interceptors[0].pos, Vec2::new(10.0, 20.0));

    // New projectiles leave from the new origin
    session.trigger_fire();
    session.advance(SIM_DT);
    let projectile = &session.snapshot().projectiles[0];
    assert!((projectile.pos - Vec2::new(612.0, 450.0)).length() < 1e-3);
}

#[test]
fn snapshot_serializes_for_the_host() {
    let mut session = Session::new(1);
    session.start();
    session.trigger_fire();
    session.advance(SIM_DT);

    let json = serde_json::to_string(&session.snapshot()).expect("snapshot serializes");
    assert!(json.contains("\"projectiles\""));
    assert!(json.contains("\"aim_angle\""));
}
