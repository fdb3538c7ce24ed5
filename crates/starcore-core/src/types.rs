//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a simulated entity, shared between server and observers.
///
/// The simulation maps its ECS handles onto this id; observers only ever see ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Identity of a connected client (owner of a player ship).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u32);

/// 2D position and heading of an entity.
///
/// `heading_deg` is measured counter-clockwise from world +y. At heading 0 the
/// entity faces (0, 1) and its right-hand side is (1, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub position: DVec2,
    pub heading_deg: f64,
}

/// Linear velocity command in world space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: DVec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Transform2D {
    pub fn new(position: DVec2, heading_deg: f64) -> Self {
        Self {
            position,
            heading_deg: wrap_degrees(heading_deg),
        }
    }

    /// Forward basis vector.
    pub fn up(&self) -> DVec2 {
        let rad = self.heading_deg.to_radians();
        DVec2::new(-rad.sin(), rad.cos())
    }

    /// Right-hand basis vector.
    pub fn right(&self) -> DVec2 {
        let rad = self.heading_deg.to_radians();
        DVec2::new(rad.cos(), rad.sin())
    }

    /// Forward vector rotated by `offset_deg` (positive = toward the left).
    pub fn up_rotated(&self, offset_deg: f64) -> DVec2 {
        direction_from_heading(self.heading_deg + offset_deg)
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }
}

impl Velocity {
    pub fn new(linear: DVec2) -> Self {
        Self { linear }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Unit direction an entity with the given heading faces.
pub fn direction_from_heading(heading_deg: f64) -> DVec2 {
    let rad = heading_deg.to_radians();
    DVec2::new(-rad.sin(), rad.cos())
}

/// Heading that faces along `direction`, or `None` for a zero-length vector.
pub fn heading_from_direction(direction: DVec2) -> Option<f64> {
    if direction.length_squared() <= f64::EPSILON {
        return None;
    }
    Some(wrap_degrees(direction.y.atan2(direction.x).to_degrees() - 90.0))
}
