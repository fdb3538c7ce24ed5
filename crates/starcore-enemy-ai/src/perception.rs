//! Directional sensing.
//!
//! A scan casts three rays from the agent: forward, rotated left by the
//! sensor spread, then rotated right by it. Ray precedence is fixed in that
//! order. The result is never "closest hit overall": with
//! [`SweepMode::FirstHit`] a forward hit hides everything on the side rays.

use glam::DVec2;

use starcore_core::enums::{Category, CategoryMask, SweepMode};
use starcore_core::types::{EntityId, Transform2D};

/// Nearest hit along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    pub category: Category,
    pub distance: f64,
}

/// Physics ray query service.
pub trait RayCaster {
    /// Nearest collider along `direction` within `max_distance` whose category is
    /// in `filter`, ignoring `ignore` (the caster itself).
    fn cast_ray(
        &self,
        origin: DVec2,
        direction: DVec2,
        max_distance: f64,
        filter: CategoryMask,
        ignore: EntityId,
    ) -> Option<RayHit>;
}

/// Ray queries plus liveness/position lookups for weak entity references.
pub trait WorldProbe: RayCaster {
    /// Current position of `entity`, or `None` if it no longer exists.
    fn position_of(&self, entity: EntityId) -> Option<DVec2>;
}

/// Sensor geometry of one agent kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorProfile {
    pub spread_deg: f64,
    pub sight_distance: f64,
    pub filter: CategoryMask,
    pub sweep: SweepMode,
}

/// A visible entity found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub entity: EntityId,
    pub category: Category,
}

/// Latest perception result of an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanResult {
    /// No scan has completed yet.
    #[default]
    NotScanned,
    /// A scan ran and every ray missed.
    NoCandidates,
    /// Hits in ray precedence order, without duplicates. Never empty.
    Candidates(Vec<Candidate>),
}

impl ScanResult {
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            ScanResult::Candidates(list) => list,
            _ => &[],
        }
    }
}

/// Ray offsets from the heading in precedence order: forward, left, right.
pub fn ray_offsets(spread_deg: f64) -> [f64; 3] {
    [0.0, spread_deg, -spread_deg]
}

/// Cast the three sensing rays from `transform`.
pub fn scan(
    caster: &impl RayCaster,
    agent: EntityId,
    transform: &Transform2D,
    profile: &SensorProfile,
) -> ScanResult {
    let mut found: Vec<Candidate> = Vec::with_capacity(3);

    for offset in ray_offsets(profile.spread_deg) {
        let direction = transform.up_rotated(offset);
        let Some(hit) = caster.cast_ray(
            transform.position,
            direction,
            profile.sight_distance,
            profile.filter,
            agent,
        ) else {
            continue;
        };

        if !found.iter().any(|c| c.entity == hit.entity) {
            found.push(Candidate {
                entity: hit.entity,
                category: hit.category,
            });
        }
        if profile.sweep == SweepMode::FirstHit {
            break;
        }
    }

    if found.is_empty() {
        ScanResult::NoCandidates
    } else {
        ScanResult::Candidates(found)
    }
}
