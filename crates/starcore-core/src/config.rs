//! Tuning parameters, loadable from JSON.
//!
//! Every section uses `#[serde(default)]`, so a config file only needs the
//! values it overrides. Defaults come from `constants`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CategoryMask, SweepMode};
use crate::error::ConfigError;

/// All tuning for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship: ShipTuning,
    pub turret: TurretTuning,
    pub player: PlayerTuning,
    pub arena: ArenaTuning,
}

/// Enemy ship (blaster) tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    // Motion
    pub max_rotation_speed: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub boost_factor: f64,
    // Perception and targeting
    pub sight_distance: f64,
    pub sensor_spread_deg: f64,
    pub sensor_filter: CategoryMask,
    pub sweep_mode: SweepMode,
    pub scan_interval_secs: f64,
    pub switch_target_cooldown_secs: f64,
    pub helper_expiry_secs: f64,
    pub retreat_cooldown_secs: f64,
    pub firing_distance: f64,
    // Attacking
    pub ideal_distance: f64,
    pub distance_tolerance: f64,
    pub strafe_duration_secs: f64,
    pub attack_fire_cooldown_secs: f64,
    pub attack_burst_shots: u32,
    pub attack_burst_spacing_secs: f64,
    pub low_health: i32,
    pub critical_health: i32,
    // Retreating
    pub safe_distance: f64,
    // Charging
    pub charge_fire_cooldown_secs: f64,
    pub charge_burst_shots: u32,
    pub charge_burst_spacing_secs: f64,
    // Scouting
    pub look_around_cooldown_secs: f64,
    pub look_check_duration_secs: f64,
    pub look_around_extra_sweeps: u32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            max_rotation_speed: SHIP_MAX_ROTATION_SPEED,
            vertical_speed: SHIP_VERTICAL_SPEED,
            horizontal_speed: SHIP_HORIZONTAL_SPEED,
            boost_factor: SHIP_BOOST_FACTOR,
            sight_distance: SHIP_SIGHT_DISTANCE,
            sensor_spread_deg: SHIP_SENSOR_SPREAD_DEG,
            sensor_filter: CategoryMask::PLAYER | CategoryMask::CORE,
            sweep_mode: SweepMode::FirstHit,
            scan_interval_secs: SHIP_SCAN_INTERVAL_SECS,
            switch_target_cooldown_secs: SWITCH_TARGET_COOLDOWN_SECS,
            helper_expiry_secs: HELPER_EXPIRY_SECS,
            retreat_cooldown_secs: RETREAT_COOLDOWN_SECS,
            firing_distance: FIRING_DISTANCE,
            ideal_distance: IDEAL_DISTANCE,
            distance_tolerance: DISTANCE_TOLERANCE,
            strafe_duration_secs: STRAFE_DURATION_SECS,
            attack_fire_cooldown_secs: ATTACK_FIRE_COOLDOWN_SECS,
            attack_burst_shots: ATTACK_BURST_SHOTS,
            attack_burst_spacing_secs: ATTACK_BURST_SPACING_SECS,
            low_health: LOW_HEALTH_THRESHOLD,
            critical_health: CRITICAL_HEALTH_THRESHOLD,
            safe_distance: SAFE_DISTANCE,
            charge_fire_cooldown_secs: CHARGE_FIRE_COOLDOWN_SECS,
            charge_burst_shots: CHARGE_BURST_SHOTS,
            charge_burst_spacing_secs: CHARGE_BURST_SPACING_SECS,
            look_around_cooldown_secs: LOOK_AROUND_COOLDOWN_SECS,
            look_check_duration_secs: LOOK_CHECK_DURATION_SECS,
            look_around_extra_sweeps: LOOK_AROUND_EXTRA_SWEEPS,
        }
    }
}

/// Core cannon tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretTuning {
    pub max_rotation_speed: f64,
    pub sight_distance: f64,
    pub sensor_spread_deg: f64,
    pub sensor_filter: CategoryMask,
    pub scan_interval_secs: f64,
    pub aim_interval_secs: f64,
    pub traverse_limit_deg: f64,
    pub fire_interval_secs: f64,
    pub aim_tolerance_deg: f64,
}

impl Default for TurretTuning {
    fn default() -> Self {
        Self {
            max_rotation_speed: TURRET_MAX_ROTATION_SPEED,
            sight_distance: TURRET_SIGHT_DISTANCE,
            sensor_spread_deg: TURRET_SENSOR_SPREAD_DEG,
            sensor_filter: CategoryMask::ENEMY,
            scan_interval_secs: TURRET_SCAN_INTERVAL_SECS,
            aim_interval_secs: TURRET_AIM_INTERVAL_SECS,
            traverse_limit_deg: TURRET_TRAVERSE_LIMIT_DEG,
            fire_interval_secs: TURRET_FIRE_INTERVAL_SECS,
            aim_tolerance_deg: TURRET_AIM_TOLERANCE_DEG,
        }
    }
}

/// Player ship tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub boost_factor: f64,
    pub max_rotation_speed: f64,
    pub fire_cooldown_secs: f64,
    pub aim_deadzone: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            vertical_speed: PLAYER_VERTICAL_SPEED,
            horizontal_speed: PLAYER_HORIZONTAL_SPEED,
            boost_factor: PLAYER_BOOST_FACTOR,
            max_rotation_speed: PLAYER_MAX_ROTATION_SPEED,
            fire_cooldown_secs: PLAYER_FIRE_COOLDOWN_SECS,
            aim_deadzone: PLAYER_AIM_DEADZONE,
        }
    }
}

/// Arena, health and projectile tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub core_max_health: i32,
    pub ship_max_health: i32,
    pub cannon_max_health: i32,
    pub projectile_speed: f64,
    pub projectile_damage: i32,
    pub projectile_lifetime_secs: f64,
    pub muzzle_offset: f64,
    pub spawn_ring_radius: f64,
    pub arena_radius: f64,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            core_max_health: CORE_MAX_HEALTH,
            ship_max_health: SHIP_MAX_HEALTH,
            cannon_max_health: CORE_CANNON_MAX_HEALTH,
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            muzzle_offset: MUZZLE_OFFSET,
            spawn_ring_radius: SPAWN_RING_RADIUS,
            arena_radius: ARENA_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate tuning from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the behavior loops cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ship.max_rotation_speed", self.ship.max_rotation_speed),
            ("ship.sight_distance", self.ship.sight_distance),
            ("ship.scan_interval_secs", self.ship.scan_interval_secs),
            ("ship.helper_expiry_secs", self.ship.helper_expiry_secs),
            ("ship.firing_distance", self.ship.firing_distance),
            ("ship.safe_distance", self.ship.safe_distance),
            ("turret.max_rotation_speed", self.turret.max_rotation_speed),
            ("turret.sight_distance", self.turret.sight_distance),
            ("turret.scan_interval_secs", self.turret.scan_interval_secs),
            ("turret.aim_interval_secs", self.turret.aim_interval_secs),
            ("turret.fire_interval_secs", self.turret.fire_interval_secs),
            ("arena.projectile_speed", self.arena.projectile_speed),
            ("arena.projectile_lifetime_secs", self.arena.projectile_lifetime_secs),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        if self.ship.critical_health > self.ship.low_health {
            return Err(ConfigError::Invalid {
                field: "ship.critical_health",
                reason: format!(
                    "must not exceed ship.low_health ({} > {})",
                    self.ship.critical_health, self.ship.low_health
                ),
            });
        }

        if self.ship.attack_burst_shots == 0 || self.ship.charge_burst_shots == 0 {
            return Err(ConfigError::Invalid {
                field: "ship.*_burst_shots",
                reason: "bursts need at least one shot".into(),
            });
        }

        Ok(())
    }
}
