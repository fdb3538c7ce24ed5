//! Game loop thread: runs the simulation engine at `TICK_RATE` and emits frames.
//!
//! The engine is created inside this thread and owns the server's
//! [`Authority`]. Commands arrive via one `mpsc` channel and frames leave
//! through another. Nothing flows back from the frame receiver.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use starcore_core::constants::TICK_RATE;
use starcore_core::replication::Authority;
use starcore_core::state::ReplicationFrame;
use starcore_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The loop stops on
/// `Shutdown`, when the command sender is dropped, or when the frame
/// receiver goes away.
pub fn spawn_game_loop(
    authority: Authority,
    config: SimConfig,
    frame_tx: mpsc::Sender<ReplicationFrame>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("starcore-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(authority, config);
            run_game_loop(engine, &cmd_rx, &frame_tx);
        })?;

    Ok((cmd_tx, handle))
}

fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    frame_tx: &mpsc::Sender<ReplicationFrame>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Client(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) => {
                    info!(tick = engine.time().tick, "game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick
        let frame = engine.tick();

        // 3. Stream the frame to the observer
        if frame_tx.send(frame).is_err() {
            debug!("frame receiver dropped, stopping game loop");
            return;
        }

        // 4. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
