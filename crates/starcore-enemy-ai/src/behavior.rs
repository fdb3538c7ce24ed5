//! The four behavior loops of an enemy ship.
//!
//! Each state owns a loop context holding its local counters. Entering a
//! state builds a fresh context, so re-entering Attacking always starts with a
//! new strafe direction and an idle fire cooldown. A loop entered before the
//! tick's step does nothing on that tick; one entered after it (a loop-driven
//! or hit-driven transition) steps on the next tick.

use glam::DVec2;
use rand::Rng;

use starcore_core::config::ShipTuning;
use starcore_core::constants::{secs_to_ticks, DT};
use starcore_core::enums::{BehaviorState, StrafeDirection};
use starcore_core::types::Transform2D;

use crate::combat::BurstSpec;
use crate::motion::{self, AimPoint};

/// What a loop sees on one tick. Positions are `None` for absent entities.
#[derive(Debug, Clone, Copy)]
pub struct Situation {
    pub transform: Transform2D,
    pub health: i32,
    pub target: Option<DVec2>,
    pub helper: Option<DVec2>,
    pub core: Option<DVec2>,
    pub got_hit: bool,
    pub recently_retreated: bool,
}

/// What a loop wants done this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directive {
    /// New heading, when the loop aimed.
    pub heading: Option<f64>,
    /// Local-frame movement input. `None` leaves the last velocity command in place.
    pub movement: Option<DVec2>,
    pub burst: Option<BurstSpec>,
    pub transition: Option<BehaviorState>,
    pub arm_retreat_cooldown: bool,
    pub consume_hit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoutingLoop {
    look_cooldown_ticks: u32,
    looking: bool,
    check_remaining_ticks: u32,
    sweeps_done: u32,
    offset_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackingLoop {
    strafe: StrafeDirection,
    strafe_ticks: u32,
    fire_cooldown_ticks: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargingLoop {
    fire_cooldown_ticks: u32,
}

/// Context of the running loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveLoop {
    Scouting(ScoutingLoop),
    Attacking(AttackingLoop),
    Retreating,
    Charging(ChargingLoop),
}

/// The one loop an agent runs at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorLoop {
    active: ActiveLoop,
    primed: bool,
}

/// Whether a state runs with boost on.
pub fn boost_on_entry(state: BehaviorState) -> bool {
    matches!(state, BehaviorState::Retreating | BehaviorState::Charging)
}

fn random_strafe<R: Rng + ?Sized>(rng: &mut R) -> StrafeDirection {
    if rng.gen_bool(0.5) {
        StrafeDirection::Left
    } else {
        StrafeDirection::Right
    }
}

fn strafe_vector(direction: StrafeDirection) -> DVec2 {
    match direction {
        StrafeDirection::Left => DVec2::NEG_X,
        StrafeDirection::Right => DVec2::X,
    }
}

/// Lateral input that moves away from `helper`.
fn strafe_away_from(transform: &Transform2D, helper: DVec2) -> DVec2 {
    let left = transform.position - transform.right();
    let right = transform.position + transform.right();
    if helper.distance(left) < helper.distance(right) {
        DVec2::X
    } else {
        DVec2::NEG_X
    }
}

impl BehaviorLoop {
    pub fn enter<R: Rng + ?Sized>(state: BehaviorState, tuning: &ShipTuning, rng: &mut R) -> Self {
        let active = match state {
            BehaviorState::Scouting => ActiveLoop::Scouting(ScoutingLoop {
                look_cooldown_ticks: secs_to_ticks(tuning.look_around_cooldown_secs),
                looking: false,
                check_remaining_ticks: secs_to_ticks(tuning.look_check_duration_secs),
                sweeps_done: 0,
                offset_deg: 0.0,
            }),
            BehaviorState::Attacking => ActiveLoop::Attacking(AttackingLoop {
                strafe: random_strafe(rng),
                strafe_ticks: 0,
                fire_cooldown_ticks: 0,
            }),
            BehaviorState::Retreating => ActiveLoop::Retreating,
            BehaviorState::Charging => ActiveLoop::Charging(ChargingLoop {
                fire_cooldown_ticks: 0,
            }),
        };
        Self {
            active,
            primed: false,
        }
    }

    /// Enter `state` from a transition made after this tick's step already ran.
    /// The new loop then steps on the very next tick.
    pub fn enter_after_step<R: Rng + ?Sized>(
        state: BehaviorState,
        tuning: &ShipTuning,
        rng: &mut R,
    ) -> Self {
        Self {
            primed: true,
            ..Self::enter(state, tuning, rng)
        }
    }

    pub fn state(&self) -> BehaviorState {
        match self.active {
            ActiveLoop::Scouting(_) => BehaviorState::Scouting,
            ActiveLoop::Attacking(_) => BehaviorState::Attacking,
            ActiveLoop::Retreating => BehaviorState::Retreating,
            ActiveLoop::Charging(_) => BehaviorState::Charging,
        }
    }

    pub fn active(&self) -> &ActiveLoop {
        &self.active
    }

    /// Advance the loop by one tick.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        sit: &Situation,
        tuning: &ShipTuning,
        rng: &mut R,
    ) -> Directive {
        if !self.primed {
            self.primed = true;
            return Directive::default();
        }
        match &mut self.active {
            ActiveLoop::Scouting(ctx) => ctx.step(sit, tuning, rng),
            ActiveLoop::Attacking(ctx) => ctx.step(sit, tuning, rng),
            ActiveLoop::Retreating => step_retreating(sit, tuning),
            ActiveLoop::Charging(ctx) => ctx.step(sit, tuning),
        }
    }
}

fn aim_at(
    transform: &Transform2D,
    point: Option<AimPoint>,
    offset_deg: f64,
    tuning: &ShipTuning,
) -> Option<f64> {
    point.map(|point| {
        motion::aim(
            transform,
            point,
            DT,
            offset_deg,
            tuning.max_rotation_speed,
            None,
        )
    })
}

fn with_heading(transform: &Transform2D, heading: Option<f64>) -> Transform2D {
    match heading {
        Some(heading_deg) => Transform2D::new(transform.position, heading_deg),
        None => *transform,
    }
}

impl ScoutingLoop {
    pub fn is_looking_around(&self) -> bool {
        self.looking
    }

    pub fn sweeps_done(&self) -> u32 {
        self.sweeps_done
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        sit: &Situation,
        tuning: &ShipTuning,
        rng: &mut R,
    ) -> Directive {
        let core = sit.core.map(AimPoint::Position);

        if self.looking {
            let heading = aim_at(&sit.transform, core, self.offset_deg, tuning);
            self.check_remaining_ticks = self.check_remaining_ticks.saturating_sub(1);
            if self.check_remaining_ticks == 0 {
                if self.sweeps_done < tuning.look_around_extra_sweeps {
                    self.sweeps_done += 1;
                    self.offset_deg += 180.0 + f64::from(rng.gen_range(-90..90));
                } else {
                    self.looking = false;
                    self.sweeps_done = 0;
                }
                self.check_remaining_ticks = secs_to_ticks(tuning.look_check_duration_secs);
            }
            return Directive {
                heading,
                movement: Some(DVec2::ZERO),
                ..Default::default()
            };
        }

        let heading = aim_at(&sit.transform, core, 0.0, tuning);
        let mut movement = DVec2::Y;
        self.look_cooldown_ticks = self.look_cooldown_ticks.saturating_sub(1);
        if self.look_cooldown_ticks == 0 {
            movement = DVec2::ZERO;
            self.looking = true;
            self.offset_deg = f64::from(rng.gen_range(-180..180));
            self.look_cooldown_ticks = secs_to_ticks(tuning.look_around_cooldown_secs);
        }
        Directive {
            heading,
            movement: Some(movement),
            ..Default::default()
        }
    }
}

impl AttackingLoop {
    pub fn strafe(&self) -> StrafeDirection {
        self.strafe
    }

    pub fn fire_cooldown_ticks(&self) -> u32 {
        self.fire_cooldown_ticks
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        sit: &Situation,
        tuning: &ShipTuning,
        rng: &mut R,
    ) -> Directive {
        let mut directive = Directive {
            heading: aim_at(
                &sit.transform,
                sit.target.map(AimPoint::Position),
                0.0,
                tuning,
            ),
            ..Default::default()
        };
        let transform = with_heading(&sit.transform, directive.heading);

        if self.fire_cooldown_ticks > 0 {
            self.fire_cooldown_ticks -= 1;
        }

        match sit.target {
            Some(target) => {
                let better = sit
                    .helper
                    .map(|helper| strafe_away_from(&transform, helper));
                let distance = transform.distance_to(target);
                let band_low = tuning.ideal_distance - tuning.distance_tolerance;
                let band_high = tuning.ideal_distance + tuning.distance_tolerance;

                let movement = if distance > band_low && distance < band_high {
                    if self.strafe_ticks > secs_to_ticks(tuning.strafe_duration_secs) {
                        self.strafe = random_strafe(rng);
                        self.strafe_ticks = 0;
                    }
                    self.strafe_ticks += 1;
                    better.unwrap_or_else(|| strafe_vector(self.strafe))
                } else if distance < tuning.ideal_distance {
                    (DVec2::NEG_Y + better.unwrap_or(DVec2::ZERO)).normalize_or_zero()
                } else {
                    (DVec2::Y + better.unwrap_or(DVec2::ZERO)).normalize_or_zero()
                };
                directive.movement = Some(movement);

                if self.fire_cooldown_ticks == 0 && distance <= tuning.firing_distance {
                    directive.burst = Some(BurstSpec::from_secs(
                        tuning.attack_burst_shots,
                        tuning.attack_burst_spacing_secs,
                    ));
                    self.fire_cooldown_ticks = secs_to_ticks(tuning.attack_fire_cooldown_secs);
                }
            }
            None => directive.movement = Some(DVec2::ZERO),
        }

        if sit.health <= tuning.low_health && !sit.recently_retreated && sit.got_hit {
            directive.consume_hit = true;
            directive.transition = Some(BehaviorState::Retreating);
        } else if sit.health <= tuning.critical_health {
            directive.transition = Some(BehaviorState::Charging);
        }
        directive
    }
}

fn step_retreating(sit: &Situation, tuning: &ShipTuning) -> Directive {
    let away = |from: DVec2| (sit.transform.position - from).normalize_or_zero();
    let heading = match (sit.helper, sit.target) {
        (Some(helper), target) => {
            let combined = away(helper) + target.map(away).unwrap_or(DVec2::ZERO);
            aim_at(
                &sit.transform,
                Some(AimPoint::Direction(combined.normalize_or_zero())),
                0.0,
                tuning,
            )
        }
        (None, target) => aim_at(
            &sit.transform,
            target.map(AimPoint::Position),
            180.0,
            tuning,
        ),
    };
    let mut directive = Directive {
        heading,
        movement: Some(DVec2::Y),
        ..Default::default()
    };

    let clear_of = |point: Option<DVec2>| {
        point.map_or(true, |p| sit.transform.distance_to(p) > tuning.safe_distance)
    };
    if clear_of(sit.target) {
        if !clear_of(sit.helper) {
            return directive;
        }
        directive.arm_retreat_cooldown = true;
        directive.transition = Some(BehaviorState::Attacking);
    } else if sit.health <= tuning.critical_health {
        directive.transition = Some(BehaviorState::Charging);
    }
    directive
}

impl ChargingLoop {
    fn step(&mut self, sit: &Situation, tuning: &ShipTuning) -> Directive {
        let mut directive = Directive {
            heading: aim_at(
                &sit.transform,
                sit.target.map(AimPoint::Position),
                0.0,
                tuning,
            ),
            movement: Some(DVec2::Y),
            ..Default::default()
        };

        if self.fire_cooldown_ticks > 0 {
            self.fire_cooldown_ticks -= 1;
        }
        let in_range = sit
            .target
            .is_some_and(|target| sit.transform.distance_to(target) <= tuning.firing_distance);
        if self.fire_cooldown_ticks == 0 && in_range {
            directive.burst = Some(BurstSpec::from_secs(
                tuning.charge_burst_shots,
                tuning.charge_burst_spacing_secs,
            ));
            self.fire_cooldown_ticks = secs_to_ticks(tuning.charge_fire_cooldown_secs);
        }
        directive
    }
}
