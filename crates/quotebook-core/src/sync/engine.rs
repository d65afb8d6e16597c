//! Sync engine
//!
//! A cycle fetches, then merges; pushes happen separately after a manual
//! add. The remote can only extend the local list: a remote quote is appended when no local
//! quote has exactly the same text, and nothing local is ever removed or
//! rewritten. A failed fetch leaves the list untouched; the next tick is the
//! retry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::remote::{RemotePost, RemoteQuotes};
use crate::config::Config;
use crate::models::Quote;
use crate::storage::KeyValueStore;
use crate::store::QuoteStore;

/// Summary of a completed cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Remote records considered (after the fetch limit)
    pub considered: usize,
    /// Quotes appended to the local list
    pub added: usize,
    /// When the cycle finished
    pub completed_at: DateTime<Utc>,
}

/// Result of one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fetch succeeded and the merge ran (possibly adding nothing)
    Merged(SyncReport),
    /// Fetch failed; nothing changed
    Failed(String),
}

impl SyncOutcome {
    /// Number of quotes added by this cycle
    pub fn added(&self) -> usize {
        match self {
            SyncOutcome::Merged(report) => report.added,
            SyncOutcome::Failed(_) => 0,
        }
    }
}

/// Settings for the sync engine
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// How many remote records to consider per cycle
    pub fetch_limit: usize,
    /// Category given to remote-derived quotes
    pub remote_category: String,
    /// Whether manual additions are pushed
    pub push_enabled: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            fetch_limit: 5,
            remote_category: "Server".to_string(),
            push_enabled: true,
        }
    }
}

impl From<&Config> for SyncSettings {
    fn from(config: &Config) -> Self {
        Self {
            fetch_limit: config.remote_fetch_limit,
            remote_category: config.remote_category.clone(),
            push_enabled: config.push_enabled,
        }
    }
}

/// Map remote posts to quotes
///
/// Only the first `limit` posts are considered. Titles are trimmed like any
/// other quote text, so novelty is decided on the trimmed text; posts whose
/// title is missing or blank are skipped.
pub fn normalize(posts: &[RemotePost], limit: usize, category: &str) -> Vec<Quote> {
    posts
        .iter()
        .take(limit)
        .filter_map(|post| post.title.as_deref())
        .filter_map(|title| Quote::new(title, category).ok())
        .collect()
}

/// The subset of `incoming` whose text appears neither locally nor earlier
/// in the batch, in received order
pub fn novel_quotes(existing: &[Quote], incoming: Vec<Quote>) -> Vec<Quote> {
    let mut novel: Vec<Quote> = Vec::new();
    for quote in incoming {
        let known = existing.iter().any(|q| q.text() == quote.text())
            || novel.iter().any(|q| q.text() == quote.text());
        if !known {
            novel.push(quote);
        }
    }
    novel
}

/// Reconciles the local quote list with the remote
pub struct SyncEngine {
    remote: Arc<dyn RemoteQuotes>,
    settings: SyncSettings,
}

impl SyncEngine {
    pub fn new(remote: Arc<dyn RemoteQuotes>, settings: SyncSettings) -> Self {
        Self { remote, settings }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Run one full cycle: fetch, then merge
    ///
    /// Network failures are logged and reported as [`SyncOutcome::Failed`];
    /// they never mutate the list.
    pub async fn run_cycle(
        &self,
        store: &mut QuoteStore,
        storage: &mut dyn KeyValueStore,
    ) -> SyncOutcome {
        debug!("Fetching remote quotes");
        let posts = match self.remote.fetch().await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Sync fetch failed: {}", e);
                return SyncOutcome::Failed(e.to_string());
            }
        };

        let incoming = normalize(
            &posts,
            self.settings.fetch_limit,
            &self.settings.remote_category,
        );
        let considered = posts.len().min(self.settings.fetch_limit);
        let added = self.merge(store, storage, incoming);

        SyncOutcome::Merged(SyncReport {
            considered,
            added,
            completed_at: Utc::now(),
        })
    }

    /// Append the novel quotes from a remote batch, returning how many
    ///
    /// With nothing novel the list and storage are left untouched.
    pub fn merge(
        &self,
        store: &mut QuoteStore,
        storage: &mut dyn KeyValueStore,
        incoming: Vec<Quote>,
    ) -> usize {
        let novel = novel_quotes(store.quotes(), incoming);
        let added = novel.len();

        if added == 0 {
            debug!("Sync found nothing new");
            return 0;
        }

        store.extend(novel, storage);
        info!("Merged {} new quote(s) from remote", added);
        added
    }

    /// Send a manually added quote to the remote
    ///
    /// Fire-and-forget: failures are logged and never retried. Returns
    /// whether the remote accepted it.
    pub async fn push(&self, quote: &Quote) -> bool {
        if !self.settings.push_enabled {
            return false;
        }
        match self.remote.push(quote).await {
            Ok(()) => {
                debug!("Pushed quote to remote");
                true
            }
            Err(e) => {
                warn!("Failed to push quote: {}", e);
                false
            }
        }
    }
}
