//! Entity spawn factories for setting up the arena.
//!
//! Creates the core, its cannons, enemy and player ships, and projectiles
//! with appropriate component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use tracing::info;

use starcore_core::components::*;
use starcore_core::config::{ArenaTuning, Tuning};
use starcore_core::constants::*;
use starcore_core::enums::{Category, Faction};
use starcore_core::replication::Authority;
use starcore_core::types::{heading_from_direction, ClientId, EntityId, Transform2D, Velocity};
use starcore_enemy_ai::brain::EnemyBrain;
use starcore_enemy_ai::turret::TurretBrain;

use crate::ids::entity_id;

/// Cannon mounts as (offset from the core, mounted heading).
const CANNON_MOUNTS: [(DVec2, f64); 2] = [
    (DVec2::new(-(CORE_RADIUS + 1.0), 0.0), 90.0),
    (DVec2::new(CORE_RADIUS + 1.0, 0.0), -90.0),
];

/// Set up the arena: the core at the origin and its cannons.
/// Enemy ships are spawned later by the wave scheduler.
pub fn setup_arena(world: &mut World, authority: &Authority, tuning: &Tuning) -> Entity {
    let core = spawn_core(world, &tuning.arena);
    for (offset, baseline_deg) in CANNON_MOUNTS {
        spawn_core_cannon(world, authority, offset, baseline_deg, tuning);
    }
    core
}

pub fn spawn_core(world: &mut World, arena: &ArenaTuning) -> Entity {
    world.spawn((
        CoreStructure,
        Transform2D::new(DVec2::ZERO, 0.0),
        Collider {
            radius: CORE_RADIUS,
            category: Category::Core,
            faction: Faction::Defenders,
        },
        Health {
            current: arena.core_max_health,
            max: arena.core_max_health,
        },
    ))
}

pub fn spawn_core_cannon(
    world: &mut World,
    authority: &Authority,
    position: DVec2,
    baseline_deg: f64,
    tuning: &Tuning,
) -> Entity {
    let entity = world.reserve_entity();
    let brain = TurretBrain::spawn(authority, entity_id(entity), baseline_deg, &tuning.turret);
    world.spawn_at(
        entity,
        (
            CoreCannon,
            Transform2D::new(position, baseline_deg),
            Collider {
                radius: CORE_CANNON_RADIUS,
                category: Category::CoreCannon,
                faction: Faction::Defenders,
            },
            Health {
                current: tuning.arena.cannon_max_health,
                max: tuning.arena.cannon_max_health,
            },
            brain,
        ),
    );
    entity
}

/// Spawn an enemy ship facing the core, with a fresh brain in Scouting.
pub fn spawn_enemy_ship(
    world: &mut World,
    authority: &Authority,
    rng: &mut impl Rng,
    position: DVec2,
    core: Option<(Entity, DVec2)>,
    tuning: &Tuning,
) -> Entity {
    let heading = core
        .and_then(|(_, core_pos)| heading_from_direction(core_pos - position))
        .unwrap_or(0.0);
    let entity = world.reserve_entity();
    let brain = EnemyBrain::spawn(
        authority,
        entity_id(entity),
        core.map(|(core, _)| entity_id(core)),
        &tuning.ship,
        rng,
    );
    world.spawn_at(
        entity,
        (
            EnemyShip,
            Transform2D::new(position, heading),
            Velocity::default(),
            Collider {
                radius: SHIP_RADIUS,
                category: Category::Enemy,
                faction: Faction::Raiders,
            },
            Health {
                current: tuning.arena.ship_max_health,
                max: tuning.arena.ship_max_health,
            },
            brain,
        ),
    );
    info!(entity = ?entity_id(entity), x = position.x, y = position.y, "enemy ship spawned");
    entity
}

/// Spawn a ship on a random bearing of the spawn ring.
pub fn spawn_enemy_on_ring(
    world: &mut World,
    authority: &Authority,
    rng: &mut impl Rng,
    core: Option<(Entity, DVec2)>,
    tuning: &Tuning,
) -> Entity {
    let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
    let center = core.map(|(_, pos)| pos).unwrap_or(DVec2::ZERO);
    let position = center + DVec2::from_angle(bearing) * tuning.arena.spawn_ring_radius;
    spawn_enemy_ship(world, authority, rng, position, core, tuning)
}

/// Spawn a client's ship on a small ring around the core.
pub fn spawn_player_ship(world: &mut World, client: ClientId, arena: &ArenaTuning) -> Entity {
    let bearing = (f64::from(client.0) * 40.0 - 90.0).to_radians();
    let position = DVec2::from_angle(bearing) * (CORE_RADIUS + 5.0);
    let entity = world.spawn((
        PlayerShip { owner: client },
        Transform2D::new(position, 0.0),
        Velocity::default(),
        Collider {
            radius: SHIP_RADIUS,
            category: Category::Player,
            faction: Faction::Defenders,
        },
        Health {
            current: arena.ship_max_health,
            max: arena.ship_max_health,
        },
        PlayerInput {
            aim_point: position,
            ..Default::default()
        },
        FireCooldown::default(),
        Boost::default(),
    ));
    info!(?client, entity = ?entity_id(entity), "player ship spawned");
    entity
}

/// Spawn an authoritative projectile at the shooter's muzzle.
pub fn spawn_projectile(
    world: &mut World,
    shooter: EntityId,
    faction: Faction,
    muzzle: &Transform2D,
    arena: &ArenaTuning,
) -> Entity {
    world.spawn((
        Projectile {
            shooter,
            faction,
            damage: arena.projectile_damage,
            remaining_ticks: secs_to_ticks(arena.projectile_lifetime_secs),
        },
        *muzzle,
        Velocity::new(muzzle.up() * arena.projectile_speed),
    ))
}
