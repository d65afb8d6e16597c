//! Quotebook Core Library
//!
//! This crate provides the core functionality for Quotebook, a small
//! local-first quote collection that reconciles itself with a remote
//! JSON endpoint.
//!
//! # Architecture
//!
//! - **QuoteStore**: Source of truth for the quote list, persisted as JSON
//! - **SyncEngine**: Pulls remote posts and appends the novel ones
//!
//! Category lists and rendered views are always recomputed from the store.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut session = Session::open(&config, display)?;
//!
//! session.add_quote("Stay hungry.", "Motivation").await?;
//! session.show_random();
//! session.sync_now().await;
//! ```
//!
//! # Modules
//!
//! - `session`: Unified interface over the components (main entry point)
//! - `models`: Quote and filter selection types
//! - `store`: The owned quote list and its persistence
//! - `filter`: Category derivation and the persisted selection
//! - `presenter`: Pure rendering functions and the display port
//! - `transfer`: JSON import/export documents
//! - `storage`: Key-value storage backends
//! - `sync`: Remote fetch/merge/push and the periodic poller
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod presenter;
pub mod session;
pub mod storage;
pub mod store;
pub mod sync;
pub mod transfer;

pub use config::Config;
pub use error::{QuoteError, QuoteResult};
pub use filter::FilterState;
pub use models::{FilterSelection, Quote};
pub use presenter::{DisplayPort, Rendered, RenderedQuote};
pub use session::Session;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError, StorageStats};
pub use store::QuoteStore;
pub use transfer::ImportResult;
