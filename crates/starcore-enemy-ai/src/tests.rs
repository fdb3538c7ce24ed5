use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starcore_core::config::{ShipTuning, TurretTuning};
use starcore_core::enums::{BehaviorState, BoostEffect, Category, CategoryMask, Role, SweepMode};
use starcore_core::replication::Authority;
use starcore_core::types::{EntityId, Transform2D};

use crate::behavior::{ActiveLoop, BehaviorLoop, Directive, Situation};
use crate::brain::{BrainOutput, EnemyBrain};
use crate::combat::{BoostState, BurstFire, BurstSpec};
use crate::motion::{aim, rotate_towards, velocity_command, AimPoint, MotionProfile, TraverseLimit};
use crate::perception::{scan, Candidate, RayCaster, RayHit, ScanResult, SensorProfile, WorldProbe};
use crate::targeting::{choose_target, HitResponse, TargetingState};
use crate::timers::{Pacer, TimerRegistry};
use crate::turret::TurretBrain;

// ---- Fakes ----

struct Body {
    id: EntityId,
    category: Category,
    position: DVec2,
    radius: f64,
}

#[derive(Default)]
struct FakeWorld {
    bodies: Vec<Body>,
}

impl FakeWorld {
    fn with(mut self, id: u64, category: Category, x: f64, y: f64) -> Self {
        self.bodies.push(Body {
            id: EntityId(id),
            category,
            position: DVec2::new(x, y),
            radius: 0.6,
        });
        self
    }

    fn remove(&mut self, id: u64) {
        self.bodies.retain(|b| b.id != EntityId(id));
    }
}

impl RayCaster for FakeWorld {
    fn cast_ray(
        &self,
        origin: DVec2,
        direction: DVec2,
        max_distance: f64,
        filter: CategoryMask,
        ignore: EntityId,
    ) -> Option<RayHit> {
        let dir = direction.normalize();
        self.bodies
            .iter()
            .filter(|b| b.id != ignore && filter.contains(b.category.mask()))
            .filter_map(|b| {
                let to_center = b.position - origin;
                let along = to_center.dot(dir);
                let perp_sq = to_center.length_squared() - along * along;
                if along < 0.0 || perp_sq > b.radius * b.radius {
                    return None;
                }
                let distance = along - (b.radius * b.radius - perp_sq).sqrt();
                (distance <= max_distance).then_some(RayHit {
                    entity: b.id,
                    category: b.category,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl WorldProbe for FakeWorld {
    fn position_of(&self, entity: EntityId) -> Option<DVec2> {
        self.bodies
            .iter()
            .find(|b| b.id == entity)
            .map(|b| b.position)
    }
}

const SELF_ID: EntityId = EntityId(1);

fn server() -> Authority {
    Authority::claim(Role::Server).unwrap()
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn ship_sensor(sweep: SweepMode) -> SensorProfile {
    SensorProfile {
        spread_deg: 30.0,
        sight_distance: 20.0,
        filter: CategoryMask::PLAYER | CategoryMask::CORE,
        sweep,
    }
}

fn origin() -> Transform2D {
    Transform2D::new(DVec2::ZERO, 0.0)
}

fn situation(health: i32, target: Option<DVec2>) -> Situation {
    Situation {
        transform: origin(),
        health,
        target,
        helper: None,
        core: Some(DVec2::new(0.0, 50.0)),
        got_hit: false,
        recently_retreated: false,
    }
}

/// A loop past its entry tick.
fn primed(state: BehaviorState, tuning: &ShipTuning) -> BehaviorLoop {
    let mut r = rng();
    let mut behavior = BehaviorLoop::enter(state, tuning, &mut r);
    let first = behavior.step(&situation(100, None), tuning, &mut r);
    assert_eq!(first, Directive::default(), "entry tick does nothing");
    behavior
}

// ---- Perception ----

#[test]
fn test_scan_without_hits_is_distinct_from_not_scanned() {
    let world = FakeWorld::default().with(2, Category::Player, 0.0, -10.0);
    let result = scan(&world, SELF_ID, &origin(), &ship_sensor(SweepMode::FirstHit));
    assert_eq!(result, ScanResult::NoCandidates);
    assert_ne!(result, ScanResult::NotScanned);
    assert!(result.candidates().is_empty());
}

#[test]
fn test_forward_hit_takes_precedence() {
    let left = Transform2D::new(DVec2::ZERO, 30.0).up() * 8.0;
    let world = FakeWorld::default()
        .with(2, Category::Player, 0.0, 15.0)
        .with(3, Category::Player, left.x, left.y);
    let result = scan(&world, SELF_ID, &origin(), &ship_sensor(SweepMode::FirstHit));
    assert_eq!(
        result.candidates(),
        &[Candidate {
            entity: EntityId(2),
            category: Category::Player
        }]
    );
}

#[test]
fn test_near_right_target_hidden_behind_forward_hit() {
    let right = Transform2D::new(DVec2::ZERO, -30.0).up() * 5.0;
    let world = FakeWorld::default()
        .with(2, Category::Core, 0.0, 18.0)
        .with(3, Category::Player, right.x, right.y);
    let result = scan(&world, SELF_ID, &origin(), &ship_sensor(SweepMode::FirstHit));
    assert_eq!(result.candidates().len(), 1);
    assert_eq!(result.candidates()[0].entity, EntityId(2));
}

#[test]
fn test_all_rays_sweep_keeps_precedence_order() {
    let left = Transform2D::new(DVec2::ZERO, 30.0).up() * 8.0;
    let right = Transform2D::new(DVec2::ZERO, -30.0).up() * 5.0;
    let world = FakeWorld::default()
        .with(2, Category::Core, 0.0, 18.0)
        .with(3, Category::Player, right.x, right.y)
        .with(4, Category::Player, left.x, left.y);
    let result = scan(&world, SELF_ID, &origin(), &ship_sensor(SweepMode::AllRays));
    let ids: Vec<u64> = result.candidates().iter().map(|c| c.entity.0).collect();
    assert_eq!(ids, vec![2, 4, 3]);
}

#[test]
fn test_scan_ignores_self_and_filtered_categories() {
    let world = FakeWorld::default()
        .with(1, Category::Enemy, 0.0, 0.0)
        .with(5, Category::Enemy, 0.0, 6.0);
    let result = scan(&world, SELF_ID, &origin(), &ship_sensor(SweepMode::FirstHit));
    assert_eq!(result, ScanResult::NoCandidates);
}

// ---- Targeting ----

#[test]
fn test_combatant_preferred_over_core() {
    let candidates = [
        Candidate {
            entity: EntityId(9),
            category: Category::Core,
        },
        Candidate {
            entity: EntityId(4),
            category: Category::Player,
        },
    ];
    assert_eq!(choose_target(&candidates), Some(EntityId(4)));
    assert_eq!(choose_target(&candidates[..1]), Some(EntityId(9)));
    assert_eq!(choose_target(&[]), None);
}

fn player_scan(id: u64) -> ScanResult {
    ScanResult::Candidates(vec![Candidate {
        entity: EntityId(id),
        category: Category::Player,
    }])
}

#[test]
fn test_switch_cooldown_blocks_retarget_until_expiry() {
    let cooldown = 120;
    let mut targeting = TargetingState::default();
    let mut timers = TimerRegistry::default();

    let first = targeting.on_scan(&player_scan(2), BehaviorState::Scouting, &mut timers, cooldown);
    assert_eq!(first.map(|r| r.enter_attacking), Some(true));

    for _ in 1..cooldown {
        timers.advance();
        let blocked = targeting.on_scan(&player_scan(3), BehaviorState::Attacking, &mut timers, cooldown);
        assert_eq!(blocked, None);
    }
    assert_eq!(targeting.target, Some(EntityId(2)));

    timers.advance();
    let retarget = targeting.on_scan(&player_scan(3), BehaviorState::Attacking, &mut timers, cooldown);
    assert_eq!(retarget.map(|r| r.target), Some(EntityId(3)));
    assert!(!retarget.unwrap().enter_attacking);
}

#[test]
fn test_retreating_never_retargets_from_scan() {
    let mut targeting = TargetingState::default();
    let mut timers = TimerRegistry::default();
    let result = targeting.on_scan(&player_scan(2), BehaviorState::Retreating, &mut timers, 120);
    assert_eq!(result, None);
    assert_eq!(targeting.target, None);
}

#[test]
fn test_helper_expiry_is_reference_counted() {
    let mut targeting = TargetingState {
        target: Some(EntityId(2)),
        ..Default::default()
    };
    let mut timers = TimerRegistry::default();
    let respond = |t: &mut TargetingState, timers: &mut TimerRegistry, attacker| {
        t.on_hit(Some(EntityId(attacker)), BehaviorState::Retreating, timers, 120, 100)
    };

    assert_eq!(respond(&mut targeting, &mut timers, 3), HitResponse::TrackHelper);
    for _ in 0..50 {
        assert!(!timers.advance());
    }
    assert_eq!(respond(&mut targeting, &mut timers, 3), HitResponse::TrackHelper);
    assert_eq!(timers.helper_expiry.holders(), 2);

    // the first window ends at 100 but the second still holds
    for _ in 0..50 {
        assert!(!timers.advance());
    }
    assert_eq!(timers.helper_expiry.holders(), 1);
    for _ in 0..49 {
        assert!(!timers.advance());
    }
    assert!(timers.advance(), "closes when the last holder expires");
}

#[test]
fn test_hit_response_depends_on_state() {
    let mut timers = TimerRegistry::default();
    let mut targeting = TargetingState::default();

    let scouting = targeting.on_hit(Some(EntityId(3)), BehaviorState::Scouting, &mut timers, 120, 100);
    assert_eq!(scouting, HitResponse::AdoptTarget { enter_attacking: true });
    assert_eq!(targeting.target, Some(EntityId(3)));

    // cooldown now armed
    let attacking = targeting.on_hit(Some(EntityId(4)), BehaviorState::Attacking, &mut timers, 120, 100);
    assert_eq!(attacking, HitResponse::TrackHelper);
    assert_eq!(targeting.helper, Some(EntityId(4)));
    assert_eq!(targeting.target, Some(EntityId(3)));

    let charging = targeting.on_hit(Some(EntityId(5)), BehaviorState::Charging, &mut timers, 120, 100);
    assert_eq!(charging, HitResponse::Ignored);
    assert_eq!(targeting.target, Some(EntityId(3)));

    let mut idle = TimerRegistry::default();
    let charging = targeting.on_hit(Some(EntityId(5)), BehaviorState::Charging, &mut idle, 120, 100);
    assert_eq!(charging, HitResponse::AdoptTarget { enter_attacking: false });

    let mut idle = TimerRegistry::default();
    let retreating = targeting.on_hit(Some(EntityId(6)), BehaviorState::Retreating, &mut idle, 120, 100);
    assert_eq!(retreating, HitResponse::TrackHelper);
    assert_eq!(targeting.target, Some(EntityId(5)));
}

#[test]
fn test_hit_from_current_target_or_unknown_only_sets_flag() {
    let mut timers = TimerRegistry::default();
    let mut targeting = TargetingState {
        target: Some(EntityId(3)),
        ..Default::default()
    };
    assert_eq!(
        targeting.on_hit(Some(EntityId(3)), BehaviorState::Attacking, &mut timers, 120, 100),
        HitResponse::Ignored
    );
    assert!(targeting.consume_hit());
    assert_eq!(
        targeting.on_hit(None, BehaviorState::Scouting, &mut timers, 120, 100),
        HitResponse::Ignored
    );
    assert!(targeting.got_hit);
    assert!(!timers.switch_target.is_active());
}

// ---- Motion ----

#[test]
fn test_aim_converges_with_enough_budget() {
    let t = Transform2D::new(DVec2::ZERO, 30.0);
    let heading = aim(&t, AimPoint::Position(DVec2::new(0.0, 10.0)), 0.05, 0.0, 1000.0, None);
    assert!(heading.abs() < 1e-9);
}

#[test]
fn test_aim_is_rate_limited_without_overshoot() {
    let heading = aim(&origin(), AimPoint::Position(DVec2::new(10.0, 0.0)), 0.05, 0.0, 180.0, None);
    assert!((heading + 9.0).abs() < 1e-9);
    assert_eq!(rotate_towards(0.0, 5.0, 9.0), 5.0);
    assert_eq!(rotate_towards(170.0, -170.0, 9.0), 179.0);
}

#[test]
fn test_aim_offset_turns_left_of_target() {
    let heading = aim(&origin(), AimPoint::Direction(DVec2::Y), 0.05, 30.0, 1000.0, None);
    assert!((heading - 30.0).abs() < 1e-9);
}

#[test]
fn test_aim_keeps_heading_on_degenerate_direction() {
    let t = Transform2D::new(DVec2::new(3.0, 3.0), 42.0);
    assert_eq!(aim(&t, AimPoint::Position(DVec2::new(3.0, 3.0)), 0.05, 0.0, 180.0, None), 42.0);
    assert_eq!(aim(&t, AimPoint::Direction(DVec2::ZERO), 0.05, 0.0, 180.0, None), 42.0);
}

#[test]
fn test_traverse_limit_refuses_rotation() {
    let limit = TraverseLimit {
        baseline_deg: 0.0,
        max_deviation_deg: 75.0,
    };
    let behind = aim(&origin(), AimPoint::Position(DVec2::new(0.0, -10.0)), 0.1, 0.0, 90.0, Some(&limit));
    assert_eq!(behind, 0.0);
    let ahead = aim(&origin(), AimPoint::Position(DVec2::new(-10.0, 10.0)), 0.1, 0.0, 90.0, Some(&limit));
    assert!((ahead - 9.0).abs() < 1e-9);
}

#[test]
fn test_move_adds_boost_to_forward_axis() {
    let profile = MotionProfile {
        vertical_speed: 5.0,
        horizontal_speed: 4.0,
        max_rotation_speed: 180.0,
    };
    let forward = velocity_command(&origin(), DVec2::Y, 1.0, &profile);
    assert!(forward.distance(DVec2::new(0.0, 10.0)) < 1e-9);

    let lateral = velocity_command(&origin(), DVec2::X, 0.0, &profile);
    assert!(lateral.distance(DVec2::new(4.0, 0.0)) < 1e-9);
    assert!(lateral.dot(origin().up()).abs() < 1e-9);
}

// ---- Combat ----

#[test]
fn test_burst_fires_at_fixed_spacing() {
    let mut burst = BurstFire::start(BurstSpec::from_secs(3, 0.2));
    let shot_ticks: Vec<u32> = (0..20).filter(|_| burst.advance()).collect();
    assert_eq!(shot_ticks, vec![0, 4, 8]);
    assert!(burst.is_finished());
}

#[test]
fn test_boost_toggle_always_emits_effect() {
    let mut boost = BoostState::default();
    assert_eq!(boost.set(false, 1.0), BoostEffect::Stop);
    assert_eq!(boost.set(true, 1.0), BoostEffect::Play);
    assert_eq!(boost.amount(), 1.0);
    assert_eq!(boost.set(true, 1.0), BoostEffect::Play);
}

#[test]
fn test_pacer_ready_on_first_tick_then_every_interval() {
    let mut pacer = Pacer::new(4);
    let ready: Vec<u32> = (0..10).filter(|_| pacer.ready()).collect();
    assert_eq!(ready, vec![0, 4, 8]);
}

// ---- Behavior loops ----

#[test]
fn test_attacking_to_retreating_needs_all_conditions() {
    let tuning = ShipTuning::default();
    let target = Some(DVec2::new(0.0, 10.0));
    let base = Situation {
        got_hit: true,
        ..situation(30, target)
    };

    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let d = behavior.step(&base, &tuning, &mut rng());
    assert_eq!(d.transition, Some(BehaviorState::Retreating));
    assert!(d.consume_hit);

    let variants = [
        Situation { health: 41, ..base },
        Situation { got_hit: false, ..base },
        Situation { recently_retreated: true, ..base },
    ];
    for sit in variants {
        let mut behavior = primed(BehaviorState::Attacking, &tuning);
        let d = behavior.step(&sit, &tuning, &mut rng());
        assert_eq!(d.transition, None);
        assert!(!d.consume_hit);
    }
}

#[test]
fn test_critical_health_escalates_to_charging() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let d = behavior.step(&situation(10, Some(DVec2::new(0.0, 10.0))), &tuning, &mut rng());
    assert_eq!(d.transition, Some(BehaviorState::Charging));
}

#[test]
fn test_low_health_hit_retreats_even_when_critical() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let sit = Situation {
        got_hit: true,
        ..situation(10, Some(DVec2::new(0.0, 10.0)))
    };
    let d = behavior.step(&sit, &tuning, &mut rng());
    assert_eq!(d.transition, Some(BehaviorState::Retreating));
    assert!(d.consume_hit);
}

#[test]
fn test_attacking_band_movement() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let far = behavior.step(&situation(100, Some(DVec2::new(0.0, 18.0))), &tuning, &mut rng());
    assert_eq!(far.movement, Some(DVec2::Y));
    assert_eq!(far.burst, None, "out of firing distance");

    let close = behavior.step(&situation(100, Some(DVec2::new(0.0, 4.0))), &tuning, &mut rng());
    assert_eq!(close.movement, Some(DVec2::NEG_Y));
    assert!(close.burst.is_some());

    let mid = behavior.step(&situation(100, Some(DVec2::new(0.0, 10.0))), &tuning, &mut rng());
    let strafe = mid.movement.unwrap();
    assert_eq!(strafe.y, 0.0);
    assert_eq!(strafe.x.abs(), 1.0);
    assert_eq!(mid.burst, None, "cooldown running");
}

#[test]
fn test_attacking_without_target_holds_still() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let d = behavior.step(&situation(100, None), &tuning, &mut rng());
    assert_eq!(d.movement, Some(DVec2::ZERO));
    assert_eq!(d.heading, None);
    assert_eq!(d.burst, None);
}

#[test]
fn test_attacking_strafes_away_from_helper() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let sit = Situation {
        helper: Some(DVec2::new(-6.0, 0.0)),
        ..situation(100, Some(DVec2::new(0.0, 10.0)))
    };
    let d = behavior.step(&sit, &tuning, &mut rng());
    assert_eq!(d.movement, Some(DVec2::X));
}

#[test]
fn test_reentering_attacking_resets_loop_state() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Attacking, &tuning);
    let d = behavior.step(&situation(100, Some(DVec2::new(0.0, 10.0))), &tuning, &mut rng());
    assert!(d.burst.is_some());
    let ActiveLoop::Attacking(ctx) = behavior.active() else {
        panic!("expected attacking loop");
    };
    assert_eq!(ctx.fire_cooldown_ticks(), 80);

    let fresh = BehaviorLoop::enter(BehaviorState::Attacking, &tuning, &mut rng());
    let ActiveLoop::Attacking(ctx) = fresh.active() else {
        panic!("expected attacking loop");
    };
    assert_eq!(ctx.fire_cooldown_ticks(), 0);
}

#[test]
fn test_retreat_waits_for_helper_then_returns_to_attacking() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Retreating, &tuning);
    let far_target = Some(DVec2::new(0.0, -40.0));

    let near_helper = Situation {
        helper: Some(DVec2::new(10.0, 0.0)),
        ..situation(30, far_target)
    };
    let d = behavior.step(&near_helper, &tuning, &mut rng());
    assert_eq!(d.transition, None);
    assert_eq!(d.movement, Some(DVec2::Y));

    let d = behavior.step(&situation(30, far_target), &tuning, &mut rng());
    assert_eq!(d.transition, Some(BehaviorState::Attacking));
    assert!(d.arm_retreat_cooldown);
}

#[test]
fn test_retreat_escalates_only_while_close() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Retreating, &tuning);
    let d = behavior.step(&situation(10, Some(DVec2::new(0.0, 5.0))), &tuning, &mut rng());
    assert_eq!(d.transition, Some(BehaviorState::Charging));
}

#[test]
fn test_charging_fires_long_bursts_in_range() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Charging, &tuning);
    let d = behavior.step(&situation(10, Some(DVec2::new(0.0, 8.0))), &tuning, &mut rng());
    assert_eq!(d.burst.map(|b| b.shots), Some(5));
    assert_eq!(d.movement, Some(DVec2::Y));
    assert_eq!(d.transition, None);
}

#[test]
fn test_scouting_look_around_cycle() {
    let tuning = ShipTuning::default();
    let mut behavior = primed(BehaviorState::Scouting, &tuning);
    let mut r = rng();
    let sit = situation(100, None);

    for _ in 0..99 {
        let d = behavior.step(&sit, &tuning, &mut r);
        assert_eq!(d.movement, Some(DVec2::Y));
    }
    let d = behavior.step(&sit, &tuning, &mut r);
    assert_eq!(d.movement, Some(DVec2::ZERO));

    let looking = |b: &BehaviorLoop| match b.active() {
        ActiveLoop::Scouting(ctx) => ctx.is_looking_around(),
        _ => false,
    };
    assert!(looking(&behavior));
    for _ in 0..299 {
        behavior.step(&sit, &tuning, &mut r);
    }
    assert!(looking(&behavior), "three full sweeps");
    behavior.step(&sit, &tuning, &mut r);
    assert!(!looking(&behavior));
}

// ---- Brain ----

#[test]
fn test_brain_spots_player_and_fires_burst() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let world = FakeWorld::default().with(2, Category::Player, 0.0, 10.0);
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);

    let first = brain.tick(&auth, &world, &origin(), 100, &mut r);
    assert_eq!(brain.state(), BehaviorState::Attacking);
    assert_eq!(brain.targeting().target, Some(EntityId(2)));
    assert_eq!(first.boost_effect, Some(BoostEffect::Stop));
    assert_eq!(first.shots, 0);
    let change = brain.take_state_change().unwrap();
    assert_eq!(change.current, BehaviorState::Attacking);

    let second = brain.tick(&auth, &world, &origin(), 100, &mut r);
    assert_eq!(second.shots, 1);
    assert!(!brain.is_listening_for_commands());
}

#[test]
fn test_despawn_mid_burst_stops_everything() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let world = FakeWorld::default().with(2, Category::Player, 0.0, 10.0);
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);

    brain.tick(&auth, &world, &origin(), 100, &mut r);
    assert_eq!(brain.tick(&auth, &world, &origin(), 100, &mut r).shots, 1);
    assert!(brain.has_pending_bursts());

    brain.despawn();
    assert!(!brain.has_pending_bursts());
    for _ in 0..100 {
        let out = brain.tick(&auth, &world, &origin(), 100, &mut r);
        assert_eq!(out, BrainOutput::default());
    }
    assert_eq!(
        brain.notify_hit(&auth, Some(EntityId(2)), &mut r),
        HitResponse::Ignored
    );
}

#[test]
fn test_destroyed_target_is_dropped() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let mut world = FakeWorld::default().with(2, Category::Player, 0.0, 10.0);
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);
    brain.tick(&auth, &world, &origin(), 100, &mut r);

    world.remove(2);
    let out = brain.tick(&auth, &world, &origin(), 100, &mut r);
    assert_eq!(brain.targeting().target, None);
    assert_eq!(out.shots, 0);
    assert_eq!(out.velocity, Some(DVec2::ZERO));
}

#[test]
fn test_hit_while_scouting_starts_attacking() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);
    let response = brain.notify_hit(&auth, Some(EntityId(8)), &mut r);
    assert_eq!(response, HitResponse::AdoptTarget { enter_attacking: true });
    assert_eq!(brain.state(), BehaviorState::Attacking);
    assert!(brain.timers().switch_target.is_active());
}

#[test]
fn test_low_health_hit_triggers_retreat_with_boost() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let world = FakeWorld::default().with(2, Category::Player, 0.0, 10.0);
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);
    brain.tick(&auth, &world, &origin(), 100, &mut r);
    brain.take_state_change();

    brain.notify_hit(&auth, Some(EntityId(2)), &mut r);
    let out = brain.tick(&auth, &world, &origin(), 30, &mut r);
    assert_eq!(brain.state(), BehaviorState::Retreating);
    assert_eq!(out.boost_effect, Some(BoostEffect::Play));
    assert!(!brain.targeting().got_hit);
    assert!(brain.boost().is_on());

    // entered after the step, so the retreat loop drives the very next tick
    let next = brain.tick(&auth, &world, &origin(), 30, &mut r);
    assert!(next.heading.is_some());
    assert!(next.velocity.is_some());
}

#[test]
fn test_hit_driven_attack_steps_on_next_tick() {
    let auth = server();
    let mut r = rng();
    let tuning = ShipTuning::default();
    let world = FakeWorld::default().with(8, Category::Player, 0.0, 10.0);
    let mut brain = EnemyBrain::spawn(&auth, SELF_ID, None, &tuning, &mut r);
    brain.notify_hit(&auth, Some(EntityId(8)), &mut r);
    assert_eq!(brain.state(), BehaviorState::Attacking);

    let out = brain.tick(&auth, &world, &origin(), 90, &mut r);
    assert!(out.velocity.is_some());
    assert_eq!(out.shots, 1);
}

// ---- Turret ----

#[test]
fn test_turret_tracks_then_fires_when_aligned() {
    let auth = server();
    let tuning = TurretTuning::default();
    let left = Transform2D::new(DVec2::ZERO, 45.0).up() * 10.0;
    let world = FakeWorld::default().with(2, Category::Enemy, left.x, left.y);
    let mut turret = TurretBrain::spawn(&auth, SELF_ID, 0.0, &tuning);
    let mut transform = origin();

    let mut first_fire = None;
    for tick in 0..10 {
        let out = turret.tick(&auth, &world, &transform);
        if let Some(heading) = out.heading {
            transform.heading_deg = heading;
        }
        if out.fire && first_fire.is_none() {
            first_fire = Some(tick);
        }
    }
    assert_eq!(turret.target(), Some(EntityId(2)));
    assert_eq!(first_fire, Some(6));
}

#[test]
fn test_turret_turn_rate_holds_for_uneven_aim_interval() {
    let auth = server();
    // 0.12 s rounds to an aim every 2 ticks
    let tuning = TurretTuning {
        aim_interval_secs: 0.12,
        sensor_spread_deg: 60.0,
        ..Default::default()
    };
    let off_axis = Transform2D::new(DVec2::ZERO, 60.0).up() * 10.0;
    let world = FakeWorld::default().with(2, Category::Enemy, off_axis.x, off_axis.y);
    let mut turret = TurretBrain::spawn(&auth, SELF_ID, 0.0, &tuning);
    let mut transform = origin();

    let mut aims = 0;
    for _ in 0..4 {
        if let Some(heading) = turret.tick(&auth, &world, &transform).heading {
            transform.heading_deg = heading;
            aims += 1;
        }
    }
    assert_eq!(aims, 2);
    let max_turn = tuning.max_rotation_speed * 4.0 * starcore_core::constants::DT;
    assert!((transform.heading_deg - max_turn).abs() < 1e-9);
}

#[test]
fn test_turret_holds_still_outside_traverse() {
    let auth = server();
    let tuning = TurretTuning {
        sensor_spread_deg: 100.0,
        ..Default::default()
    };
    let side = Transform2D::new(DVec2::ZERO, 100.0).up() * 10.0;
    let world = FakeWorld::default().with(2, Category::Enemy, side.x, side.y);
    let mut turret = TurretBrain::spawn(&auth, SELF_ID, 0.0, &tuning);
    let out = turret.tick(&auth, &world, &origin());
    assert_eq!(turret.target(), Some(EntityId(2)));
    assert_eq!(out.heading, Some(0.0));
    assert!(!out.fire);
}
