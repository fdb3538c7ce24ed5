//! Headless STARCORE server.
//!
//! Usage: `starcore-server [tuning.json]`. Starts a match with one idle
//! player ship and logs what a replicated observer sees until the core falls
//! or the match clock runs out. `RUST_LOG` controls verbosity.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use tracing::{error, info};

use starcore_core::commands::ClientCommand;
use starcore_core::config::Tuning;
use starcore_core::constants::TICK_RATE;
use starcore_core::enums::{EntityKind, MatchPhase, Role};
use starcore_core::events::ReplicationEvent;
use starcore_core::replication::Authority;
use starcore_core::types::ClientId;
use starcore_server::game_loop::spawn_game_loop;
use starcore_server::state::GameLoopCommand;
use starcore_sim::engine::SimConfig;
use starcore_sim::observer::ObserverWorld;

/// Match length before the server stops on its own (ticks).
const MAX_MATCH_TICKS: u64 = 5 * 60 * TICK_RATE as u64;

/// Ticks between status lines.
const STATUS_INTERVAL_TICKS: u64 = 5 * TICK_RATE as u64;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let tuning = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                info!(path = %path.display(), "loaded tuning");
                tuning
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load tuning");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let Some(authority) = Authority::claim(Role::Server) else {
        error!("server could not claim simulation authority");
        return ExitCode::FAILURE;
    };

    let (frame_tx, frame_rx) = mpsc::channel();
    let config = SimConfig {
        tuning,
        ..Default::default()
    };
    let (cmd_tx, handle) = match spawn_game_loop(authority, config, frame_tx) {
        Ok(spawned) => spawned,
        Err(err) => {
            error!(%err, "failed to spawn game loop thread");
            return ExitCode::FAILURE;
        }
    };

    let pilot = ClientId(0);
    for command in [
        ClientCommand::StartMatch,
        ClientCommand::JoinMatch { client: pilot },
    ] {
        if cmd_tx.send(command.into()).is_err() {
            error!("game loop exited before the match started");
            return ExitCode::FAILURE;
        }
    }

    let mut observer = ObserverWorld::new();
    while let Ok(frame) = frame_rx.recv() {
        observer.apply(&frame);

        for event in &frame.events {
            if let ReplicationEvent::BehaviorStateChanged { entity, change } = event {
                info!(
                    ?entity,
                    from = ?change.previous,
                    to = ?change.current,
                    "enemy behavior changed"
                );
            }
        }

        let tick = observer.time().tick;
        if observer.phase() == MatchPhase::Active && tick % STATUS_INTERVAL_TICKS == 0 {
            let enemies = observer
                .entities()
                .filter(|view| view.kind == EntityKind::EnemyShip)
                .count();
            let core_health = observer
                .entities()
                .find(|view| view.kind == EntityKind::Core)
                .and_then(|view| view.health);
            info!(
                tick,
                enemies,
                ?core_health,
                shots = observer.cosmetic_projectiles_spawned(),
                "status"
            );
        }

        if observer.phase() == MatchPhase::CoreDestroyed {
            info!(tick, "core destroyed");
            break;
        }
        if tick >= MAX_MATCH_TICKS {
            info!(tick, "match clock ran out");
            break;
        }
    }

    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        error!("game loop thread panicked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
