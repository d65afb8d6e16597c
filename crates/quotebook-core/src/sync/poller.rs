//! Periodic sync trigger
//!
//! The poller never touches the quote list itself. It only emits a tick
//! every interval; whoever owns the session runs the cycle, so list
//! mutations stay on a single task.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

/// Commands sent to the poller task
#[derive(Debug)]
pub enum PollerCommand {
    /// Stop ticking and exit
    Shutdown,
}

/// Events emitted by the poller task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerEvent {
    /// Time to run a sync cycle
    Tick,
}

/// Handle for controlling the background poller
pub struct SyncPollerHandle {
    command_tx: mpsc::Sender<PollerCommand>,
    event_rx: mpsc::Receiver<PollerEvent>,
}

impl SyncPollerHandle {
    /// Wait for the next tick; `None` once the poller has stopped
    pub async fn next_tick(&mut self) -> Option<PollerEvent> {
        self.event_rx.recv().await
    }

    /// Ask the poller to stop
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(PollerCommand::Shutdown).await;
    }
}

/// Spawn a background task that ticks every `interval`
///
/// The first tick fires one full interval after spawning.
pub fn spawn_sync_poller(interval: Duration) -> SyncPollerHandle {
    let (command_tx, command_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = mpsc::channel(16);

    tokio::spawn(sync_poller_task(interval, command_rx, event_tx));

    SyncPollerHandle {
        command_tx,
        event_rx,
    }
}

/// Background task that periodically signals a sync cycle
async fn sync_poller_task(
    interval: Duration,
    mut command_rx: mpsc::Receiver<PollerCommand>,
    event_tx: mpsc::Sender<PollerEvent>,
) {
    debug!("Sync poller started ({:?})", interval);

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                if event_tx.send(PollerEvent::Tick).await.is_err() {
                    break;
                }
            }
            cmd = command_rx.recv() => {
                if matches!(cmd, Some(PollerCommand::Shutdown) | None) {
                    break;
                }
            }
        }
    }

    debug!("Sync poller stopped");
}
