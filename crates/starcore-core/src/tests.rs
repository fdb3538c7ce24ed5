use glam::DVec2;

use crate::config::{Tuning, TurretTuning};
use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::ReplicationEvent;
use crate::replication::{Authority, Change, Mirror, Replicated};
use crate::state::ReplicationFrame;
use crate::types::*;

fn approx(a: DVec2, b: DVec2) -> bool {
    a.distance(b) < 1e-9
}

// ---- Geometry ----

#[test]
fn test_transform_basis_at_zero_heading() {
    let t = Transform2D::new(DVec2::ZERO, 0.0);
    assert!(approx(t.up(), DVec2::new(0.0, 1.0)));
    assert!(approx(t.right(), DVec2::new(1.0, 0.0)));
}

#[test]
fn test_transform_basis_rotates_counter_clockwise() {
    let t = Transform2D::new(DVec2::ZERO, 90.0);
    assert!(approx(t.up(), DVec2::new(-1.0, 0.0)));
    assert!(approx(t.right(), DVec2::new(0.0, 1.0)));
    // +30 offset is to the left of forward
    let left = Transform2D::new(DVec2::ZERO, 0.0).up_rotated(30.0);
    assert!(left.x < 0.0 && left.y > 0.0);
}

#[test]
fn test_wrap_degrees() {
    assert_eq!(wrap_degrees(0.0), 0.0);
    assert_eq!(wrap_degrees(190.0), -170.0);
    assert_eq!(wrap_degrees(-190.0), 170.0);
    assert_eq!(wrap_degrees(-180.0), 180.0);
    assert_eq!(wrap_degrees(540.0), 180.0);
}

#[test]
fn test_heading_from_direction() {
    let ahead = heading_from_direction(DVec2::new(0.0, 10.0)).unwrap();
    assert!(ahead.abs() < 1e-9);
    let h = heading_from_direction(DVec2::new(10.0, 0.0)).unwrap();
    assert!((h + 90.0).abs() < 1e-9);
    assert_eq!(heading_from_direction(DVec2::ZERO), None);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, TICK_RATE as u64);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_secs_to_ticks() {
    assert_eq!(secs_to_ticks(0.05), 1);
    assert_eq!(secs_to_ticks(0.2), 4);
    assert_eq!(secs_to_ticks(0.15), 3);
    assert_eq!(secs_to_ticks(2.0), 40);
    assert_eq!(secs_to_ticks(-1.0), 0);
}

// ---- Replication ----

#[test]
fn test_authority_only_for_server() {
    assert!(Authority::claim(Role::Server).is_some());
    assert!(Authority::claim(Role::Observer).is_none());
}

#[test]
fn test_replicated_equal_write_is_noop() {
    let auth = Authority::claim(Role::Server).unwrap();
    let mut state = Replicated::new(BehaviorState::Scouting);
    assert_eq!(state.set(&auth, BehaviorState::Scouting), None);
    assert_eq!(state.take_change(), None);
}

#[test]
fn test_replicated_change_reaches_mirror() {
    let auth = Authority::claim(Role::Server).unwrap();
    let mut state = Replicated::new(BehaviorState::Scouting);
    let mut mirror = Mirror::new(BehaviorState::Scouting);

    let change = state.set(&auth, BehaviorState::Attacking);
    assert_eq!(
        change,
        Some(Change {
            previous: BehaviorState::Scouting,
            current: BehaviorState::Attacking,
        })
    );

    let broadcast = state.take_change().unwrap();
    mirror.apply(broadcast);
    assert_eq!(mirror.get(), BehaviorState::Attacking);
    assert_eq!(state.take_change(), None, "change drains once");
}

#[test]
fn test_replicated_changes_coalesce_within_a_tick() {
    let auth = Authority::claim(Role::Server).unwrap();
    let mut state = Replicated::new(BehaviorState::Attacking);
    state.set(&auth, BehaviorState::Retreating);
    state.set(&auth, BehaviorState::Charging);
    let change = state.take_change().unwrap();
    assert_eq!(change.previous, BehaviorState::Attacking);
    assert_eq!(change.current, BehaviorState::Charging);
}

// ---- Config ----

#[test]
fn test_tuning_defaults_match_constants() {
    let tuning = Tuning::default();
    assert_eq!(tuning.ship.low_health, LOW_HEALTH_THRESHOLD);
    assert_eq!(tuning.ship.sensor_spread_deg, 30.0);
    assert_eq!(tuning.turret.sensor_spread_deg, 45.0);
    assert_eq!(tuning.turret.traverse_limit_deg, 75.0);
    assert!(tuning.validate().is_ok());
}

#[test]
fn test_tuning_partial_json_overrides() {
    let tuning = Tuning::from_json_str(r#"{ "ship": { "firing_distance": 8.0 } }"#).unwrap();
    assert_eq!(tuning.ship.firing_distance, 8.0);
    assert_eq!(tuning.ship.ideal_distance, IDEAL_DISTANCE);
    assert_eq!(tuning.turret, TurretTuning::default());
}

#[test]
fn test_tuning_rejects_inverted_thresholds() {
    let result =
        Tuning::from_json_str(r#"{ "ship": { "low_health": 10, "critical_health": 20 } }"#);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "ship.critical_health",
            ..
        })
    ));
}

#[test]
fn test_tuning_rejects_zero_interval() {
    let result = Tuning::from_json_str(r#"{ "turret": { "aim_interval_secs": 0.0 } }"#);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_tuning_rejects_zero_helper_expiry() {
    let result = Tuning::from_json_str(r#"{ "ship": { "helper_expiry_secs": 0.0 } }"#);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "ship.helper_expiry_secs",
            ..
        })
    ));
}

#[test]
fn test_tuning_parse_error() {
    assert!(matches!(
        Tuning::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

// ---- Serialization ----

#[test]
fn test_frame_serde() {
    let frame = ReplicationFrame {
        time: SimTime {
            tick: 3,
            elapsed_secs: 0.15,
        },
        phase: MatchPhase::Active,
        entities: Vec::new(),
        events: vec![ReplicationEvent::BoostEffect {
            entity: EntityId(7),
            effect: BoostEffect::Play,
        }],
    };
    let json = serde_json::to_string(&frame).unwrap();
    let back: ReplicationFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(back.time, frame.time);
    assert_eq!(back.events, frame.events);
}
