//! Core cannon brain.
//!
//! A stationary agent that scans every second, takes the first candidate as
//! its target, and re-aims every 0.1 s within a traverse limit around its
//! mounting heading. It fires while it holds a target in range and is aligned.

use tracing::debug;

use starcore_core::config::TurretTuning;
use starcore_core::constants::{secs_to_ticks, DT};
use starcore_core::enums::SweepMode;
use starcore_core::replication::Authority;
use starcore_core::types::{wrap_degrees, EntityId, Transform2D};

use crate::motion::{self, AimPoint, TraverseLimit};
use crate::perception::{self, ScanResult, SensorProfile, WorldProbe};
use crate::timers::{Countdown, Pacer};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurretOutput {
    pub heading: Option<f64>,
    pub fire: bool,
}

#[derive(Debug)]
pub struct TurretBrain {
    id: EntityId,
    tuning: TurretTuning,
    traverse: TraverseLimit,
    target: Option<EntityId>,
    last_scan: ScanResult,
    scan_pacer: Pacer,
    aim_pacer: Pacer,
    fire_cooldown: Countdown,
    despawned: bool,
}

impl TurretBrain {
    pub fn spawn(
        _authority: &Authority,
        id: EntityId,
        baseline_deg: f64,
        tuning: &TurretTuning,
    ) -> Self {
        Self {
            id,
            tuning: tuning.clone(),
            traverse: TraverseLimit {
                baseline_deg,
                max_deviation_deg: tuning.traverse_limit_deg,
            },
            target: None,
            last_scan: ScanResult::NotScanned,
            scan_pacer: Pacer::new(secs_to_ticks(tuning.scan_interval_secs)),
            aim_pacer: Pacer::new(secs_to_ticks(tuning.aim_interval_secs)),
            fire_cooldown: Countdown::default(),
            despawned: false,
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn last_scan(&self) -> &ScanResult {
        &self.last_scan
    }

    pub fn traverse(&self) -> &TraverseLimit {
        &self.traverse
    }

    fn sensor(&self) -> SensorProfile {
        SensorProfile {
            spread_deg: self.tuning.sensor_spread_deg,
            sight_distance: self.tuning.sight_distance,
            filter: self.tuning.sensor_filter,
            sweep: SweepMode::FirstHit,
        }
    }

    pub fn tick(
        &mut self,
        _authority: &Authority,
        probe: &impl WorldProbe,
        transform: &Transform2D,
    ) -> TurretOutput {
        if self.despawned {
            return TurretOutput::default();
        }
        self.fire_cooldown.advance();

        if self.target.is_some_and(|t| probe.position_of(t).is_none()) {
            self.target = None;
        }

        if self.scan_pacer.ready() {
            self.last_scan = perception::scan(probe, self.id, transform, &self.sensor());
            if let Some(first) = self.last_scan.candidates().first() {
                if self.target != Some(first.entity) {
                    debug!(turret = ?self.id, target = ?first.entity, "turret acquired target");
                }
                self.target = Some(first.entity);
            }
        }

        let Some(target_pos) = self.target.and_then(|t| probe.position_of(t)) else {
            return TurretOutput::default();
        };

        let mut output = TurretOutput::default();
        let mut heading = transform.heading_deg;
        if self.aim_pacer.ready() {
            // turn budget covers the ticks actually elapsed since the last aim
            let aim_interval = f64::from(self.aim_pacer.interval_ticks()) * DT;
            heading = motion::aim(
                transform,
                AimPoint::Position(target_pos),
                aim_interval,
                0.0,
                self.tuning.max_rotation_speed,
                Some(&self.traverse),
            );
            output.heading = Some(heading);
        }

        let aimed = Transform2D::new(transform.position, heading);
        let aligned = motion::facing_heading(&aimed, AimPoint::Position(target_pos))
            .is_some_and(|facing| {
                wrap_degrees(facing - heading).abs() <= self.tuning.aim_tolerance_deg
            });
        let in_range = aimed.distance_to(target_pos) <= self.tuning.sight_distance;
        if aligned && in_range && !self.fire_cooldown.is_active() {
            output.fire = true;
            self.fire_cooldown
                .arm(secs_to_ticks(self.tuning.fire_interval_secs));
        }
        output
    }

    pub fn despawn(&mut self) {
        self.despawned = true;
        self.target = None;
        self.fire_cooldown.cancel();
    }
}
