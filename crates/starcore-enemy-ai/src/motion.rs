//! Motion and orientation controller.
//!
//! `velocity_command` turns a local-frame input into a world-space velocity
//! for the physics step to integrate. `aim` turns the heading toward a point or
//! direction by at most `max_rotation_speed * tick_interval` degrees per call.

use glam::DVec2;

use starcore_core::types::{heading_from_direction, wrap_degrees, Transform2D};

/// Speed scales of one mobile agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    /// Degrees per second.
    pub max_rotation_speed: f64,
}

/// What to aim at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimPoint {
    /// A world position; the heading faces from the agent toward it.
    Position(DVec2),
    /// An explicit world-space direction.
    Direction(DVec2),
}

/// Mount restriction of a stationary cannon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraverseLimit {
    /// Heading the cannon was mounted with.
    pub baseline_deg: f64,
    pub max_deviation_deg: f64,
}

impl TraverseLimit {
    pub fn allows(&self, heading_deg: f64) -> bool {
        wrap_degrees(heading_deg - self.baseline_deg).abs() <= self.max_deviation_deg
    }
}

/// World velocity for local input `direction` (y = forward, x = right).
///
/// `boost` is added to the forward axis before scaling.
pub fn velocity_command(
    transform: &Transform2D,
    direction: DVec2,
    boost: f64,
    profile: &MotionProfile,
) -> DVec2 {
    transform.up() * (direction.y + boost) * profile.vertical_speed
        + transform.right() * direction.x * profile.horizontal_speed
}

/// Step `current` toward `target` along the shorter arc, by at most `max_step` degrees.
pub fn rotate_towards(current_deg: f64, target_deg: f64, max_step_deg: f64) -> f64 {
    let delta = wrap_degrees(target_deg - current_deg);
    if delta.abs() <= max_step_deg {
        wrap_degrees(target_deg)
    } else {
        wrap_degrees(current_deg + delta.signum() * max_step_deg)
    }
}

/// Heading that faces `aim` from `transform`, before any offset.
pub fn facing_heading(transform: &Transform2D, aim: AimPoint) -> Option<f64> {
    let direction = match aim {
        AimPoint::Position(point) => point - transform.position,
        AimPoint::Direction(direction) => direction,
    };
    heading_from_direction(direction)
}

/// New heading after one rate-limited aim call.
///
/// Positive `offset_deg` aims to the left of the target. A degenerate aim
/// (target on top of the agent, zero direction) keeps the current heading, as
/// does a target outside the traverse `limit`.
pub fn aim(
    transform: &Transform2D,
    aim: AimPoint,
    tick_interval: f64,
    offset_deg: f64,
    max_rotation_speed: f64,
    limit: Option<&TraverseLimit>,
) -> f64 {
    let Some(facing) = facing_heading(transform, aim) else {
        return transform.heading_deg;
    };
    if let Some(limit) = limit {
        if !limit.allows(facing) {
            return transform.heading_deg;
        }
    }
    rotate_towards(
        transform.heading_deg,
        facing + offset_deg,
        max_rotation_speed * tick_interval,
    )
}
