//! Simulation engine: the authoritative side of a match.
//!
//! `SimulationEngine` owns the hecs ECS world, validates client commands,
//! runs all systems, and produces `ReplicationFrame`s. It can only be built
//! from an [`Authority`], so observers have no way to run it. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use starcore_core::commands::ClientCommand;
use starcore_core::components::{FireCooldown, PlayerInput, PlayerShip};
use starcore_core::config::Tuning;
use starcore_core::constants::secs_to_ticks;
use starcore_core::enums::MatchPhase;
use starcore_core::error::CommandError;
use starcore_core::events::ReplicationEvent;
use starcore_core::replication::Authority;
use starcore_core::state::ReplicationFrame;
use starcore_core::types::{ClientId, SimTime};

use crate::ids::entity_id;
use crate::physics::PhysicsWorld;
use crate::systems;
use crate::systems::wave_spawner::WaveSchedule;
use crate::systems::weapons::FireRequest;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    authority: Authority,
    world: World,
    time: SimTime,
    phase: MatchPhase,
    tuning: Tuning,
    rng: ChaCha8Rng,
    command_queue: VecDeque<ClientCommand>,
    despawn_buffer: Vec<Entity>,
    fire_requests: Vec<FireRequest>,
    events: Vec<ReplicationEvent>,
    wave_schedule: WaveSchedule,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(authority: Authority, config: SimConfig) -> Self {
        Self {
            authority,
            world: World::new(),
            time: SimTime::default(),
            phase: MatchPhase::default(),
            tuning: config.tuning,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fire_requests: Vec::new(),
            events: Vec::new(),
            wave_schedule: WaveSchedule::default(),
        }
    }

    /// Queue a client command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ClientCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ClientCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting frame.
    pub fn tick(&mut self) -> ReplicationFrame {
        self.process_commands();

        if self.phase == MatchPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_frame(&self.world, &self.time, self.phase, events)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for test setup).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Start a match with the arena but no enemy waves (for tests that place ships by hand).
    #[cfg(test)]
    pub fn start_empty_match(&mut self) {
        world_setup::setup_arena(&mut self.world, &self.authority, &self.tuning);
        self.wave_schedule = WaveSchedule::default();
        self.phase = MatchPhase::Active;
    }

    /// Spawn an enemy ship at a fixed position (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, position: glam::DVec2, heading_deg: f64) -> Entity {
        let entity = world_setup::spawn_enemy_ship(
            &mut self.world,
            &self.authority,
            &mut self.rng,
            position,
            None,
            &self.tuning,
        );
        if let Ok(mut transform) = self
            .world
            .get::<&mut starcore_core::types::Transform2D>(entity)
        {
            *transform = starcore_core::types::Transform2D::new(position, heading_deg);
        }
        entity
    }

    /// The ship owned by `client`, if it has one.
    pub fn player_ship(&self, client: ClientId) -> Option<Entity> {
        self.world
            .query::<&PlayerShip>()
            .iter()
            .find(|(_, ship)| ship.owner == client)
            .map(|(entity, _)| entity)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                warn!(%err, "command rejected");
            }
        }
    }

    /// Validate and apply a single client command.
    fn handle_command(&mut self, command: ClientCommand) -> Result<(), CommandError> {
        match command {
            ClientCommand::StartMatch => {
                if self.phase != MatchPhase::Waiting {
                    return Err(CommandError::MatchAlreadyStarted);
                }
                world_setup::setup_arena(&mut self.world, &self.authority, &self.tuning);
                self.wave_schedule = WaveSchedule::default_match();
                self.phase = MatchPhase::Active;
                self.time = SimTime::default();
                info!(
                    ships = self.wave_schedule.total_ships(),
                    "match started"
                );
            }
            ClientCommand::JoinMatch { client } => {
                if self.phase != MatchPhase::Active {
                    return Err(CommandError::MatchNotActive);
                }
                if self.player_ship(client).is_some() {
                    return Err(CommandError::AlreadyJoined(client));
                }
                world_setup::spawn_player_ship(&mut self.world, client, &self.tuning.arena);
            }
            ClientCommand::LeaveMatch { client } => {
                let ship = self.player_ship(client).ok_or(CommandError::NoShip(client))?;
                if self.world.despawn(ship).is_ok() {
                    info!(?client, "player left");
                    self.events.push(ReplicationEvent::Despawned {
                        entity: entity_id(ship),
                    });
                }
            }
            ClientCommand::SetInput {
                client,
                movement,
                aim_point,
                boost,
            } => {
                let ship = self.player_ship(client).ok_or(CommandError::NoShip(client))?;
                if let Ok(mut input) = self.world.get::<&mut PlayerInput>(ship) {
                    *input = PlayerInput {
                        movement: movement.clamp_length_max(1.0),
                        aim_point,
                        boost,
                    };
                }
            }
            ClientCommand::Fire { client } => {
                if self.phase != MatchPhase::Active {
                    return Err(CommandError::MatchNotActive);
                }
                let ship = self.player_ship(client).ok_or(CommandError::NoShip(client))?;
                let mut cooldown = self
                    .world
                    .get::<&mut FireCooldown>(ship)
                    .map_err(|_| CommandError::NoShip(client))?;
                if cooldown.remaining_ticks > 0 {
                    return Err(CommandError::FireCooldown {
                        remaining_ticks: cooldown.remaining_ticks,
                    });
                }
                cooldown.remaining_ticks = secs_to_ticks(self.tuning.player.fire_cooldown_secs);
                drop(cooldown);
                self.fire_requests.push(FireRequest { shooter: ship });
            }
        }
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &self.authority,
            &mut self.rng,
            &mut self.wave_schedule,
            self.time.tick,
            &self.tuning,
        );
        // 2. Capture colliders for this tick's ray queries
        let physics = PhysicsWorld::capture(&self.world);
        // 3. Enemy AI (scan, target, behavior loop, bursts)
        systems::enemy_ai::run(
            &mut self.world,
            &self.authority,
            &physics,
            &mut self.rng,
            &mut self.fire_requests,
            &mut self.events,
        );
        // 4. Core cannons
        systems::turret_ai::run(
            &mut self.world,
            &self.authority,
            &physics,
            &mut self.fire_requests,
        );
        // 5. Player ships
        systems::player::run(&mut self.world, &self.tuning.player, &mut self.events);
        // 6. Projectile spawning
        systems::weapons::run(
            &mut self.world,
            &mut self.fire_requests,
            &self.tuning.arena,
            &mut self.events,
        );
        // 7. Movement integration
        systems::movement::run(&mut self.world);
        // 8. Projectile lifetime and hits
        systems::projectiles::run(
            &mut self.world,
            &self.authority,
            &mut self.rng,
            &mut self.despawn_buffer,
        );
        // 9. Cleanup (depleted, spent, out of bounds)
        let core_destroyed = systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            self.tuning.arena.arena_radius,
            &mut self.events,
        );
        if core_destroyed {
            info!(tick = self.time.tick, "core destroyed, match over");
            self.phase = MatchPhase::CoreDestroyed;
        }
        // 10. Behavior state replication
        systems::replication::run(&mut self.world, &mut self.events);
    }
}
