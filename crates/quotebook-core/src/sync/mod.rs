//! Remote sync
//!
//! Reconciles the local quote list with a remote JSON endpoint.
//!
//! ## Cycle
//!
//! 1. Fetch the remote collection (GET)
//! 2. Take the first few records, mapping `title` to quote text
//! 3. Append quotes whose text is not already present
//! 4. Persist, only if something was appended
//!
//! Manually added quotes are pushed (POST) once, best-effort.
//!
//! ## Usage
//!
//! ```ignore
//! let remote = Arc::new(HttpRemote::from_config(&config)?);
//! let engine = SyncEngine::new(remote, SyncSettings::from(&config));
//! let outcome = engine.run_cycle(&mut store, &mut storage).await;
//! ```

mod engine;
mod poller;
mod remote;

pub use engine::{normalize, novel_quotes, SyncEngine, SyncOutcome, SyncReport, SyncSettings};
pub use poller::{spawn_sync_poller, PollerCommand, PollerEvent, SyncPollerHandle};
pub use remote::{HttpRemote, RemotePost, RemoteQuotes};

#[cfg(test)]
pub(crate) use engine::tests::FakeRemote;
