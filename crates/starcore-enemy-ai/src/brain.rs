//! Per-ship agent: one scan pacer, one behavior loop, its timers and bursts.
//!
//! A brain can only be spawned and advanced with an [`Authority`], so only the
//! server ever runs it. Order within a tick:
//! timers, stale reference pruning, scan, loop step, bursts, state transition.

use glam::DVec2;
use rand::Rng;
use tracing::debug;

use starcore_core::config::ShipTuning;
use starcore_core::constants::secs_to_ticks;
use starcore_core::enums::{BehaviorState, BoostEffect};
use starcore_core::replication::{Authority, Change, Replicated};
use starcore_core::types::{EntityId, Transform2D};

use crate::behavior::{boost_on_entry, BehaviorLoop, Situation};
use crate::combat::{BoostState, BurstQueue};
use crate::motion::{velocity_command, MotionProfile};
use crate::perception::{self, ScanResult, SensorProfile, WorldProbe};
use crate::targeting::{HitResponse, TargetingState};
use crate::timers::{Pacer, TimerPurpose, TimerRegistry};

/// Effects of one brain tick for the world to apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrainOutput {
    pub heading: Option<f64>,
    /// World velocity command. `None` keeps the previous one.
    pub velocity: Option<DVec2>,
    /// Projectiles to spawn from the ship's muzzle this tick.
    pub shots: u32,
    pub boost_effect: Option<BoostEffect>,
}

/// Server-side AI of one enemy ship.
#[derive(Debug)]
pub struct EnemyBrain {
    id: EntityId,
    core: Option<EntityId>,
    tuning: ShipTuning,
    state: Replicated<BehaviorState>,
    behavior: BehaviorLoop,
    timers: TimerRegistry,
    targeting: TargetingState,
    boost: BoostState,
    bursts: BurstQueue,
    scan_pacer: Pacer,
    last_scan: ScanResult,
    pending_boost_effect: Option<BoostEffect>,
    despawned: bool,
}

impl EnemyBrain {
    /// Create the brain of a freshly spawned ship. It starts Scouting toward `core`.
    pub fn spawn<R: Rng + ?Sized>(
        _authority: &Authority,
        id: EntityId,
        core: Option<EntityId>,
        tuning: &ShipTuning,
        rng: &mut R,
    ) -> Self {
        let mut boost = BoostState::default();
        let effect = boost.set(boost_on_entry(BehaviorState::Scouting), tuning.boost_factor);
        Self {
            id,
            core,
            tuning: tuning.clone(),
            state: Replicated::new(BehaviorState::Scouting),
            behavior: BehaviorLoop::enter(BehaviorState::Scouting, tuning, rng),
            timers: TimerRegistry::default(),
            targeting: TargetingState::default(),
            boost,
            bursts: BurstQueue::default(),
            scan_pacer: Pacer::new(secs_to_ticks(tuning.scan_interval_secs)),
            last_scan: ScanResult::NotScanned,
            pending_boost_effect: Some(effect),
            despawned: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> BehaviorState {
        self.state.get()
    }

    pub fn behavior(&self) -> &BehaviorLoop {
        &self.behavior
    }

    pub fn targeting(&self) -> &TargetingState {
        &self.targeting
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn last_scan(&self) -> &ScanResult {
        &self.last_scan
    }

    pub fn boost(&self) -> &BoostState {
        &self.boost
    }

    pub fn has_pending_bursts(&self) -> bool {
        !self.bursts.is_empty()
    }

    pub fn is_despawned(&self) -> bool {
        self.despawned
    }

    /// Squad coordination hook. No ship accepts orders yet.
    pub fn is_listening_for_commands(&self) -> bool {
        false
    }

    /// Drain the behavior state change accumulated since the last call.
    pub fn take_state_change(&mut self) -> Option<Change<BehaviorState>> {
        self.state.take_change()
    }

    fn sensor(&self) -> SensorProfile {
        SensorProfile {
            spread_deg: self.tuning.sensor_spread_deg,
            sight_distance: self.tuning.sight_distance,
            filter: self.tuning.sensor_filter,
            sweep: self.tuning.sweep_mode,
        }
    }

    fn motion(&self) -> MotionProfile {
        MotionProfile {
            vertical_speed: self.tuning.vertical_speed,
            horizontal_speed: self.tuning.horizontal_speed,
            max_rotation_speed: self.tuning.max_rotation_speed,
        }
    }

    /// Advance the ship's AI by one tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        authority: &Authority,
        probe: &impl WorldProbe,
        transform: &Transform2D,
        health: i32,
        rng: &mut R,
    ) -> BrainOutput {
        if self.despawned {
            return BrainOutput::default();
        }

        if self.timers.advance() {
            self.targeting.helper = None;
        }

        let mut target = self.resolve_target(probe);
        let helper = self.targeting.helper.and_then(|h| probe.position_of(h));
        if helper.is_none() {
            self.targeting.helper = None;
        }
        let core = self.core.and_then(|c| probe.position_of(c));

        if self.scan_pacer.ready() {
            self.last_scan = perception::scan(probe, self.id, transform, &self.sensor());
            let retarget = self.targeting.on_scan(
                &self.last_scan,
                self.state.get(),
                &mut self.timers,
                secs_to_ticks(self.tuning.switch_target_cooldown_secs),
            );
            if let Some(retarget) = retarget {
                debug!(agent = ?self.id, target = ?retarget.target, "retargeted from scan");
                target = self.resolve_target(probe);
                if retarget.enter_attacking {
                    self.write_state(authority, BehaviorState::Attacking, false, rng);
                }
            }
        }

        let situation = Situation {
            transform: *transform,
            health,
            target,
            helper,
            core,
            got_hit: self.targeting.got_hit,
            recently_retreated: self.timers.is_active(TimerPurpose::RecentRetreat),
        };
        let directive = self.behavior.step(&situation, &self.tuning, rng);

        let moved = match directive.heading {
            Some(heading_deg) => Transform2D::new(transform.position, heading_deg),
            None => *transform,
        };
        let velocity = directive
            .movement
            .map(|input| velocity_command(&moved, input, self.boost.amount(), &self.motion()));

        if directive.consume_hit {
            self.targeting.consume_hit();
        }
        if directive.arm_retreat_cooldown {
            self.timers
                .recent_retreat
                .arm(secs_to_ticks(self.tuning.retreat_cooldown_secs));
        }
        if let Some(spec) = directive.burst {
            self.bursts.push(spec);
        }
        let shots = self.bursts.advance();

        if let Some(next) = directive.transition {
            self.write_state(authority, next, true, rng);
        }

        BrainOutput {
            heading: directive.heading,
            velocity,
            shots,
            boost_effect: self.pending_boost_effect.take(),
        }
    }

    /// Hit notification. `attacker` is `None` when the shooter no longer exists.
    pub fn notify_hit<R: Rng + ?Sized>(
        &mut self,
        authority: &Authority,
        attacker: Option<EntityId>,
        rng: &mut R,
    ) -> HitResponse {
        if self.despawned {
            return HitResponse::Ignored;
        }
        let response = self.targeting.on_hit(
            attacker,
            self.state.get(),
            &mut self.timers,
            secs_to_ticks(self.tuning.switch_target_cooldown_secs),
            secs_to_ticks(self.tuning.helper_expiry_secs),
        );
        debug!(agent = ?self.id, ?attacker, ?response, "hit");
        if let HitResponse::AdoptTarget {
            enter_attacking: true,
        } = response
        {
            self.write_state(authority, BehaviorState::Attacking, true, rng);
        }
        response
    }

    /// Stop everything this brain runs. Later ticks and hits are no-ops.
    pub fn despawn(&mut self) {
        self.despawned = true;
        self.bursts.cancel();
        self.timers.cancel_all();
        self.targeting.clear();
        self.pending_boost_effect = None;
    }

    fn resolve_target(&mut self, probe: &impl WorldProbe) -> Option<DVec2> {
        let position = self.targeting.target.and_then(|t| probe.position_of(t));
        if position.is_none() {
            self.targeting.target = None;
        }
        position
    }

    /// Write the replicated state and restart the loop if it actually changed.
    /// `after_step` is set when this tick's loop step has already run.
    fn write_state<R: Rng + ?Sized>(
        &mut self,
        authority: &Authority,
        next: BehaviorState,
        after_step: bool,
        rng: &mut R,
    ) {
        let Some(change) = self.state.set(authority, next) else {
            return;
        };
        debug!(agent = ?self.id, from = ?change.previous, to = ?change.current, "behavior state changed");
        self.bursts.cancel();
        self.behavior = if after_step {
            BehaviorLoop::enter_after_step(next, &self.tuning, rng)
        } else {
            BehaviorLoop::enter(next, &self.tuning, rng)
        };
        self.pending_boost_effect = Some(
            self.boost
                .set(boost_on_entry(next), self.tuning.boost_factor),
        );
    }
}
