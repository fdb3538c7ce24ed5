//! Wave spawning system: spawns enemy waves at scheduled times.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use starcore_core::components::CoreStructure;
use starcore_core::config::Tuning;
use starcore_core::constants::TICK_RATE;
use starcore_core::replication::Authority;
use starcore_core::types::Transform2D;

use crate::world_setup;

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Tick at which this wave spawns.
    pub spawn_at_tick: u64,
    /// Enemy ships in the wave.
    pub ships: u32,
    /// Whether this wave has already been spawned.
    pub spawned: bool,
}

/// The complete wave schedule for a match.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
}

impl WaveSchedule {
    /// Default 3-wave match with escalating size.
    pub fn default_match() -> Self {
        let at_secs = |secs: u64| secs * u64::from(TICK_RATE);
        Self {
            waves: vec![
                WaveEntry {
                    spawn_at_tick: 0,
                    ships: 2,
                    spawned: false,
                },
                WaveEntry {
                    spawn_at_tick: at_secs(30),
                    ships: 3,
                    spawned: false,
                },
                WaveEntry {
                    spawn_at_tick: at_secs(60),
                    ships: 5,
                    spawned: false,
                },
            ],
        }
    }

    pub fn total_ships(&self) -> u32 {
        self.waves.iter().map(|w| w.ships).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.waves.iter().all(|w| w.spawned)
    }
}

/// Check schedule and spawn any due waves.
pub fn run(
    world: &mut World,
    authority: &Authority,
    rng: &mut ChaCha8Rng,
    schedule: &mut WaveSchedule,
    current_tick: u64,
    tuning: &Tuning,
) {
    if schedule.is_exhausted() {
        return;
    }
    let core: Option<(hecs::Entity, DVec2)> = world
        .query::<(&CoreStructure, &Transform2D)>()
        .iter()
        .next()
        .map(|(entity, (_, transform))| (entity, transform.position));

    for wave in &mut schedule.waves {
        if !wave.spawned && current_tick >= wave.spawn_at_tick {
            for _ in 0..wave.ships {
                world_setup::spawn_enemy_on_ring(world, authority, rng, core, tuning);
            }
            wave.spawned = true;
        }
    }
}
