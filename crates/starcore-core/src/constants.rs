//! Simulation constants and default tuning values.

/// Simulation tick rate (Hz). One tick is one control-loop polling interval.
pub const TICK_RATE: u32 = 20;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Convert a duration in seconds to whole ticks (rounded).
pub fn secs_to_ticks(secs: f64) -> u32 {
    (secs.max(0.0) * TICK_RATE as f64).round() as u32
}

// --- Ship motion ---

/// Maximum turn rate of an enemy ship (degrees per second).
pub const SHIP_MAX_ROTATION_SPEED: f64 = 180.0;

/// Forward/backward speed scale (units/s).
pub const SHIP_VERTICAL_SPEED: f64 = 5.0;

/// Strafe speed scale (units/s).
pub const SHIP_HORIZONTAL_SPEED: f64 = 4.0;

/// Added to the forward axis while boosting.
pub const SHIP_BOOST_FACTOR: f64 = 1.0;

// --- Ship perception and targeting ---

/// Length of each sensing ray.
pub const SHIP_SIGHT_DISTANCE: f64 = 20.0;

/// Angular offset of the left/right sensing rays from the heading (degrees).
pub const SHIP_SENSOR_SPREAD_DEG: f64 = 30.0;

/// Interval between perception scans (seconds).
pub const SHIP_SCAN_INTERVAL_SECS: f64 = 2.0;

/// Minimum time between perception-driven target switches (seconds).
pub const SWITCH_TARGET_COOLDOWN_SECS: f64 = 6.0;

/// Freshness window of the helper target after each hit (seconds).
pub const HELPER_EXPIRY_SECS: f64 = 5.0;

/// Time after a completed retreat during which no new retreat may start (seconds).
pub const RETREAT_COOLDOWN_SECS: f64 = 10.0;

/// Distance within which a ship opens fire.
pub const FIRING_DISTANCE: f64 = 12.0;

// --- Ship behavior loops ---

/// Attacking: preferred distance to the target.
pub const IDEAL_DISTANCE: f64 = 10.0;

/// Attacking: half-width of the strafing band around the ideal distance.
pub const DISTANCE_TOLERANCE: f64 = 3.0;

/// Attacking: time before the strafe direction is re-rolled (seconds).
pub const STRAFE_DURATION_SECS: f64 = 2.0;

/// Attacking: time between bursts (seconds).
pub const ATTACK_FIRE_COOLDOWN_SECS: f64 = 4.0;

/// Attacking: shots per burst.
pub const ATTACK_BURST_SHOTS: u32 = 3;

/// Attacking: spacing between shots in a burst (seconds).
pub const ATTACK_BURST_SPACING_SECS: f64 = 0.2;

/// Health at or below which a hit ship considers retreating.
pub const LOW_HEALTH_THRESHOLD: i32 = 40;

/// Health at or below which a ship starts charging.
pub const CRITICAL_HEALTH_THRESHOLD: i32 = 15;

/// Retreating: distance from target and helper considered safe.
pub const SAFE_DISTANCE: f64 = 30.0;

/// Charging: time between bursts (seconds).
pub const CHARGE_FIRE_COOLDOWN_SECS: f64 = 2.0;

/// Charging: shots per burst.
pub const CHARGE_BURST_SHOTS: u32 = 5;

/// Charging: spacing between shots in a burst (seconds).
pub const CHARGE_BURST_SPACING_SECS: f64 = 0.15;

/// Scouting: march time between look-arounds (seconds).
pub const LOOK_AROUND_COOLDOWN_SECS: f64 = 5.0;

/// Scouting: how long each look-around sweep holds its offset (seconds).
pub const LOOK_CHECK_DURATION_SECS: f64 = 5.0;

/// Scouting: re-aims after the first sweep of a look-around.
pub const LOOK_AROUND_EXTRA_SWEEPS: u32 = 2;

// --- Core cannon ---

pub const TURRET_MAX_ROTATION_SPEED: f64 = 90.0;
pub const TURRET_SIGHT_DISTANCE: f64 = 25.0;
pub const TURRET_SENSOR_SPREAD_DEG: f64 = 45.0;
pub const TURRET_SCAN_INTERVAL_SECS: f64 = 1.0;
pub const TURRET_AIM_INTERVAL_SECS: f64 = 0.1;

/// Maximum deviation of a cannon's aim from its mounted baseline (degrees).
pub const TURRET_TRAVERSE_LIMIT_DEG: f64 = 75.0;

pub const TURRET_FIRE_INTERVAL_SECS: f64 = 0.5;

/// Heading error within which a cannon considers itself on target (degrees).
pub const TURRET_AIM_TOLERANCE_DEG: f64 = 10.0;

// --- Player ships ---

pub const PLAYER_VERTICAL_SPEED: f64 = 5.0;
pub const PLAYER_HORIZONTAL_SPEED: f64 = 5.0;
pub const PLAYER_BOOST_FACTOR: f64 = 2.0;
pub const PLAYER_MAX_ROTATION_SPEED: f64 = 360.0;
pub const PLAYER_FIRE_COOLDOWN_SECS: f64 = 1.0;

/// Aim point closer than this to the ship holds the ship still.
pub const PLAYER_AIM_DEADZONE: f64 = 0.3;

// --- Arena ---

pub const CORE_MAX_HEALTH: i32 = 500;
pub const SHIP_MAX_HEALTH: i32 = 100;
pub const CORE_CANNON_MAX_HEALTH: i32 = 200;

pub const CORE_RADIUS: f64 = 3.0;
pub const SHIP_RADIUS: f64 = 0.6;
pub const CORE_CANNON_RADIUS: f64 = 0.8;

pub const PROJECTILE_SPEED: f64 = 20.0;
pub const PROJECTILE_DAMAGE: i32 = 10;
pub const PROJECTILE_LIFETIME_SECS: f64 = 3.0;

/// Distance ahead of the shooter's center at which projectiles appear.
pub const MUZZLE_OFFSET: f64 = 1.0;

/// Radius of the ring on which enemy waves spawn.
pub const SPAWN_RING_RADIUS: f64 = 60.0;

/// Entities further than this from the origin are removed.
pub const ARENA_RADIUS: f64 = 150.0;
