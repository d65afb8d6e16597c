//! Unified session interface
//!
//! A `Session` owns everything one user session needs: the quote list, the
//! filter state, persistent and session-scoped storage, the sync engine and
//! the display. Each user action mutates the list, persists it, and then
//! re-renders the filtered view.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open(&config, TerminalDisplay::new(format))?;
//!
//! session.add_quote("Stay hungry.", "Motivation").await?;
//! session.filter(FilterSelection::Category("Motivation".into()));
//! session.sync_now().await;
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::config::Config;
use crate::error::QuoteResult;
use crate::filter::FilterState;
use crate::models::{FilterSelection, Quote};
use crate::presenter::{self, DisplayPort, Rendered, RenderedQuote};
use crate::storage::{
    FileStorage, KeyValueStore, MemoryStorage, StorageError, StorageStats, LAST_VIEWED_KEY,
};
use crate::store::QuoteStore;
use crate::sync::{HttpRemote, SyncEngine, SyncOutcome, SyncSettings};
use crate::transfer::{self, ImportResult};

/// Notification after a manual add
pub const QUOTE_ADDED_MESSAGE: &str = "Quote added!";

/// Notification after a successful import
pub const QUOTES_IMPORTED_MESSAGE: &str = "Quotes imported!";

/// Notification when an import document held nothing usable
pub const NOTHING_TO_IMPORT_MESSAGE: &str = "No valid quotes.";

/// Notification when a sync cycle appended quotes
pub const SYNC_UPDATED_MESSAGE: &str = "Quotes updated from server (conflicts resolved).";

/// One user session over the quote book
pub struct Session<D: DisplayPort> {
    persistent: Box<dyn KeyValueStore>,
    session_storage: MemoryStorage,
    store: QuoteStore,
    filter: FilterState,
    engine: SyncEngine,
    display: D,
    rng: StdRng,
    storage_issue: Option<StorageError>,
}

impl<D: DisplayPort> Session<D> {
    /// Open a session over the configured data directory and remote
    ///
    /// Storage problems never stop the session. A file that cannot be read
    /// leaves the quotes in memory for this run; the problem is available
    /// from [`Session::storage_issue`].
    pub fn open(config: &Config, display: D) -> Result<Self> {
        let (persistent, storage_issue): (Box<dyn KeyValueStore>, _) =
            match FileStorage::open(config.storage_path()) {
                Ok(mut storage) => {
                    let notice = storage.take_recovery_notice();
                    (Box::new(storage), notice)
                }
                Err(e) => {
                    warn!("Storage unavailable, keeping quotes in memory: {}", e);
                    (Box::new(MemoryStorage::new()), Some(e))
                }
            };

        let remote = HttpRemote::from_config(config).context("Failed to build HTTP client")?;
        let engine = SyncEngine::new(Arc::new(remote), SyncSettings::from(config));

        let mut session = Self::new(persistent, engine, display);
        session.storage_issue = storage_issue;
        Ok(session)
    }

    /// Build a session from explicit parts
    pub fn new(persistent: Box<dyn KeyValueStore>, engine: SyncEngine, display: D) -> Self {
        let store = QuoteStore::load(persistent.as_ref());
        let filter = FilterState::load(persistent.as_ref());

        Self {
            persistent,
            session_storage: MemoryStorage::new(),
            store,
            filter,
            engine,
            display,
            rng: StdRng::from_entropy(),
            storage_issue: None,
        }
    }

    /// Replace the random source (deterministic picks in tests)
    #[cfg(test)]
    pub(crate) fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // ==================== Reads ====================

    pub fn quotes(&self) -> &[Quote] {
        self.store.quotes()
    }

    /// Distinct categories, recomputed from the list
    pub fn categories(&self) -> Vec<String> {
        FilterState::categories(self.store.quotes())
    }

    pub fn selection(&self) -> &FilterSelection {
        self.filter.current_selection()
    }

    /// Whether the current selection still names a known category
    pub fn selection_available(&self) -> bool {
        self.filter.is_available(self.store.quotes())
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn display(&self) -> &D {
        &self.display
    }

    /// Storage problem hit while opening, if any
    pub fn storage_issue(&self) -> Option<&StorageError> {
        self.storage_issue.as_ref()
    }

    /// Where the quote list is stored
    pub fn storage_stats(&self) -> StorageStats {
        self.persistent.stats()
    }

    /// The last randomly shown quote in this session, if still valid
    pub fn last_viewed(&self) -> Option<(usize, &Quote)> {
        let raw = self.session_storage.get(LAST_VIEWED_KEY).ok()??;
        let index: usize = raw.parse().ok()?;
        self.store.get(index).map(|quote| (index, quote))
    }

    // ==================== Actions ====================

    /// Show one random quote and remember its index for the session
    pub fn show_random(&mut self) -> Rendered {
        let rendered = presenter::render_random(self.store.quotes(), &mut self.rng);

        if let Rendered::Quote { index, .. } = &rendered {
            if let Err(e) = self
                .session_storage
                .set(LAST_VIEWED_KEY, &index.to_string())
            {
                warn!("Failed to record last viewed quote: {}", e);
            }
        }

        presenter::display_random(&mut self.display, &rendered);
        rendered
    }

    /// Show the view for the current selection
    pub fn show_filtered(&mut self) -> Vec<RenderedQuote> {
        let rendered = presenter::render_filtered(self.store.quotes(), self.filter.current_selection());
        presenter::display_filtered(&mut self.display, &rendered);
        rendered
    }

    /// Change the selection, persist it and show the new view
    pub fn filter(&mut self, selection: FilterSelection) -> Vec<RenderedQuote> {
        self.filter
            .set_selection(selection, self.persistent.as_mut());
        self.show_filtered()
    }

    /// Add a quote by hand, then push it to the remote
    ///
    /// The local append is committed and persisted before the push starts;
    /// a failed push does not undo it.
    pub async fn add_quote(&mut self, text: &str, category: &str) -> QuoteResult<Quote> {
        let quote = self.store.add(text, category, self.persistent.as_mut())?;

        self.display.notify(QUOTE_ADDED_MESSAGE);
        self.show_filtered();

        self.engine.push(&quote).await;
        Ok(quote)
    }

    /// Import quotes from a JSON document
    ///
    /// Format and schema errors are returned without touching the list.
    /// Valid entries are appended as-is, without dedup.
    pub fn import_document(&mut self, raw: &str) -> QuoteResult<ImportResult> {
        let result = transfer::parse_document(raw)?;

        if result.is_empty() {
            self.display.notify(NOTHING_TO_IMPORT_MESSAGE);
            return Ok(result);
        }

        self.store
            .extend(result.quotes.clone(), self.persistent.as_mut());
        self.display.notify(QUOTES_IMPORTED_MESSAGE);
        self.show_filtered();
        Ok(result)
    }

    /// Serialize the whole list as an export document
    pub fn export_document(&self) -> QuoteResult<String> {
        transfer::export_document(self.store.quotes())
    }

    /// Run one sync cycle now
    ///
    /// Identical to a scheduled tick. The view is refreshed only when the
    /// cycle appended something.
    pub async fn sync_now(&mut self) -> SyncOutcome {
        let outcome = self
            .engine
            .run_cycle(&mut self.store, self.persistent.as_mut())
            .await;

        if outcome.added() > 0 {
            self.display.notify(SYNC_UPDATED_MESSAGE);
            self.show_filtered();
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::presenter::RecordingDisplay;
    use crate::storage::{FileStorage, QUOTES_KEY, SELECTED_CATEGORY_KEY};
    use crate::sync::FakeRemote;
    use tempfile::TempDir;

    fn session_with(
        storage: Box<dyn KeyValueStore>,
        remote: Arc<FakeRemote>,
    ) -> Session<RecordingDisplay> {
        let engine = SyncEngine::new(remote, SyncSettings::default());
        Session::new(storage, engine, RecordingDisplay::default())
            .with_rng(StdRng::seed_from_u64(3))
    }

    fn memory_session() -> Session<RecordingDisplay> {
        session_with(
            Box::new(MemoryStorage::new()),
            Arc::new(FakeRemote::offline()),
        )
    }

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            data_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_open_over_unreadable_storage_keeps_running() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        std::fs::create_dir(config.storage_path()).unwrap();

        let mut session = Session::open(&config, RecordingDisplay::default()).unwrap();

        assert_eq!(session.quotes().len(), 3);
        assert!(matches!(
            session.storage_issue(),
            Some(StorageError::ReadError { .. })
        ));
        assert!(!session.storage_stats().is_persistent());

        let view = session.filter(FilterSelection::Category("Life".into()));
        assert_eq!(view.len(), 1);
        session
            .import_document(r#"[{"text":"A","category":"B"}]"#)
            .unwrap();
        assert_eq!(session.quotes().len(), 4);
    }

    #[test]
    fn test_open_over_corrupt_storage_reports_recovery() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        std::fs::write(config.storage_path(), "{broken").unwrap();

        let session = Session::open(&config, RecordingDisplay::default()).unwrap();

        assert_eq!(session.quotes().len(), 3);
        assert!(matches!(
            session.storage_issue(),
            Some(StorageError::CorruptStorage { .. })
        ));
        let stats = session.storage_stats();
        assert!(stats.is_persistent());
        assert!(!stats.exists);
    }

    #[tokio::test]
    async fn test_add_to_seed_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let remote = Arc::new(FakeRemote::default());
        let mut session = session_with(Box::new(FileStorage::open(&path).unwrap()), remote.clone());

        session.add_quote("X", "Y").await.unwrap();

        assert_eq!(session.quotes().len(), 4);
        assert!(session.categories().contains(&"Y".to_string()));

        let reopened = FileStorage::open(&path).unwrap();
        let stored = reopened.get(QUOTES_KEY).unwrap().unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
        assert_eq!(entries.len(), 4);

        assert_eq!(remote.pushed.lock().unwrap().len(), 1);
        assert_eq!(session.display().notices, vec![QUOTE_ADDED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_add_invalid_does_not_mutate_or_push() {
        let remote = Arc::new(FakeRemote::default());
        let mut session = session_with(Box::new(MemoryStorage::new()), remote.clone());

        let err = session.add_quote("   ", "Y").await.unwrap_err();

        assert!(matches!(err, QuoteError::Validation(_)));
        assert_eq!(session.quotes().len(), 3);
        assert!(remote.pushed.lock().unwrap().is_empty());
        assert!(session.display().notices.is_empty());
    }

    #[tokio::test]
    async fn test_add_survives_push_failure() {
        let remote = Arc::new(FakeRemote {
            reject_push: true,
            ..FakeRemote::default()
        });
        let mut session = session_with(Box::new(MemoryStorage::new()), remote);

        let quote = session.add_quote("X", "Y").await.unwrap();

        assert_eq!(session.quotes().last(), Some(&quote));
    }

    #[test]
    fn test_import_appends_valid_entries() {
        let mut session = memory_session();
        let raw = r#"[{"text":"A","category":"B"}, {"bad":1}, {"text":"C","category":"D"}]"#;

        let result = session.import_document(raw).unwrap();

        assert_eq!(result.quotes.len(), 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(session.quotes().len(), 5);
        assert_eq!(session.quotes()[3].text(), "A");
        assert_eq!(session.quotes()[4].text(), "C");
        assert_eq!(session.display().notices, vec![QUOTES_IMPORTED_MESSAGE]);
    }

    #[test]
    fn test_import_does_not_dedup() {
        let mut session = memory_session();
        let doc = session.export_document().unwrap();

        session.import_document(&doc).unwrap();

        assert_eq!(session.quotes().len(), 6);
    }

    #[test]
    fn test_import_errors_leave_list_untouched() {
        let mut session = memory_session();

        assert!(matches!(
            session.import_document("nope"),
            Err(QuoteError::Format(_))
        ));
        assert!(matches!(
            session.import_document(r#"{"quotes": []}"#),
            Err(QuoteError::Schema { .. })
        ));

        let result = session.import_document(r#"[{"bad":1}]"#).unwrap();
        assert!(result.is_empty());
        assert_eq!(session.quotes().len(), 3);
        assert_eq!(session.display().notices, vec![NOTHING_TO_IMPORT_MESSAGE]);
    }

    #[test]
    fn test_show_random_records_last_viewed() {
        let mut session = memory_session();
        assert!(session.last_viewed().is_none());

        let rendered = session.show_random();

        let Rendered::Quote { quote, index } = rendered else {
            panic!("seed list rendered as empty");
        };
        let (last_index, last_quote) = session.last_viewed().unwrap();
        assert_eq!(last_index, index);
        assert_eq!(last_quote.text(), quote.text);
        assert_eq!(session.display().shown.len(), 1);
    }

    #[test]
    fn test_show_random_empty_writes_no_index() {
        let mut storage = MemoryStorage::new();
        storage.set(QUOTES_KEY, "[]").unwrap();
        let mut session = session_with(Box::new(storage), Arc::new(FakeRemote::offline()));

        assert_eq!(session.show_random(), Rendered::Empty);
        assert!(session.last_viewed().is_none());
        assert!(session.session_storage.is_empty());
        assert_eq!(session.display().empty, vec![presenter::NO_QUOTES_MESSAGE]);
    }

    #[test]
    fn test_filter_persists_and_renders() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let mut session = session_with(
            Box::new(FileStorage::open(&path).unwrap()),
            Arc::new(FakeRemote::offline()),
        );

        let view = session.filter(FilterSelection::Category("Life".into()));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].category, "Life");

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get(SELECTED_CATEGORY_KEY).unwrap().as_deref(),
            Some("Life")
        );

        let session = session_with(Box::new(reopened), Arc::new(FakeRemote::offline()));
        assert_eq!(
            session.selection(),
            &FilterSelection::Category("Life".into())
        );
    }

    #[test]
    fn test_filter_unknown_category_is_empty_view() {
        let mut session = memory_session();

        let view = session.filter(FilterSelection::Category("Gone".into()));

        assert!(view.is_empty());
        assert!(!session.selection_available());
        assert_eq!(
            session.display().empty,
            vec![presenter::NO_CATEGORY_QUOTES_MESSAGE]
        );
    }

    #[tokio::test]
    async fn test_sync_now_merges_and_notifies() {
        let remote = Arc::new(FakeRemote::with_titles(&[
            "The best way to get started is to quit talking and begin doing.",
            "r2",
            "r3",
            "r4",
            "r5",
        ]));
        let mut session = session_with(Box::new(MemoryStorage::new()), remote);

        let outcome = session.sync_now().await;
        assert_eq!(outcome.added(), 4);
        assert_eq!(session.quotes().len(), 7);
        assert!(session.categories().contains(&"Server".to_string()));
        assert_eq!(session.display().notices, vec![SYNC_UPDATED_MESSAGE]);

        let again = session.sync_now().await;
        assert_eq!(again.added(), 0);
        assert_eq!(session.quotes().len(), 7);
        assert_eq!(session.display().notices.len(), 1);
    }

    #[tokio::test]
    async fn test_sync_failure_is_silent() {
        let mut session = memory_session();

        let outcome = session.sync_now().await;

        assert!(matches!(outcome, SyncOutcome::Failed(_)));
        assert_eq!(session.quotes().len(), 3);
        assert!(session.display().notices.is_empty());
    }
}
