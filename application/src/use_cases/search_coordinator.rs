//! Search coordinator
//!
//! Converts a rapid stream of keystrokes into at most one live title
//! lookup. Pipeline, in order: debounce (only the trailing value of a
//! burst proceeds), distinct suppression (unchanged input is not
//! re-issued), short-input short-circuit (fewer than the minimum trimmed
//! characters yields an empty list with no remote call), switch-latest
//! lookup (a newer submission abandons interest in the stale lookup), and
//! error absorption (a failed lookup is indistinguishable from an empty
//! one).
//!
//! The whole state machine lives in a single spawned driver task fed by a
//! submit channel; results are published on a watch channel, so a fresh
//! subscription can be established at any time.

use std::sync::Arc;

use randomizer_domain::{SearchQuery, Suggestion};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SearchConfig;
use crate::ports::title_search::TitleSearchBackend;

/// Handle to the autocomplete pipeline
///
/// Cheap to use from UI code: `submit` is synchronous and never fails,
/// results arrive on the subscription.
pub struct SearchCoordinator {
    submit_tx: mpsc::UnboundedSender<Input>,
    results: watch::Receiver<Vec<Suggestion>>,
    cancel: CancellationToken,
}

/// Messages accepted by the driver task
enum Input {
    /// Latest keystroke-driven text
    Text(String),
    /// Hide the list (a suggestion was chosen)
    Clear,
}

impl SearchCoordinator {
    /// Spawn the driver task
    pub fn spawn(backend: Arc<dyn TitleSearchBackend>, config: SearchConfig) -> Self {
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        let (results_tx, results) = watch::channel(Vec::new());
        let cancel = CancellationToken::new();

        let driver = Driver {
            backend,
            config,
            submit_rx,
            results_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(driver.run());

        Self {
            submit_tx,
            results,
            cancel,
        }
    }

    /// Accept the latest keystroke-driven text
    pub fn submit(&self, text: impl Into<String>) {
        // A send error only means the driver is gone (shutdown); nothing to do
        let _ = self.submit_tx.send(Input::Text(text.into()));
    }

    /// Clear the visible list, abandoning any lookup still in flight.
    /// Called after a suggestion is selected into the form.
    pub fn clear_suggestions(&self) {
        let _ = self.submit_tx.send(Input::Clear);
    }

    /// Subscribe to suggestion updates (latest value semantics)
    pub fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.results.clone()
    }

    /// Currently visible suggestions
    pub fn current(&self) -> Vec<Suggestion> {
        self.results.borrow().clone()
    }

    /// Stop the driver task
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Values copied into the pending "new movie" form when a suggestion is
/// chosen from the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSelection {
    pub title: String,
    pub year: Option<i32>,
}

impl From<&Suggestion> for SuggestionSelection {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            title: suggestion.title.clone(),
            year: suggestion.release_year(),
        }
    }
}

/// A lookup whose result is still allowed to reach the visible list
struct LiveLookup {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Driver {
    backend: Arc<dyn TitleSearchBackend>,
    config: SearchConfig,
    submit_rx: mpsc::UnboundedReceiver<Input>,
    results_tx: watch::Sender<Vec<Suggestion>>,
    cancel: CancellationToken,
}

impl Driver {
    async fn run(mut self) {
        // Value awaiting its debounce deadline
        let mut pending: Option<SearchQuery> = None;
        let mut deadline: Option<Instant> = None;
        // Raw text of the last value that made it past the debounce
        let mut last_processed: Option<String> = None;
        // Generation counter, bumped on every submission
        let mut generation: u64 = 0;
        let mut live: Option<LiveLookup> = None;
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, Vec<Suggestion>)>();

        loop {
            let debounce_fired = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                submitted = self.submit_rx.recv() => {
                    match submitted {
                        None => break,
                        Some(Input::Text(text)) => {
                            generation += 1;
                            pending = Some(SearchQuery::new(text, generation));
                            deadline = Some(Instant::now() + self.config.debounce);
                        }
                        Some(Input::Clear) => {
                            pending = None;
                            deadline = None;
                            if let Some(stale) = live.take() {
                                stale.handle.abort();
                            }
                            self.results_tx.send_replace(Vec::new());
                        }
                    }
                }
                _ = debounce_fired => {
                    deadline = None;
                    if let Some(query) = pending.take() {
                        self.process(query, &mut last_processed, &mut live, &done_tx);
                    }
                }
                Some((done_generation, suggestions)) = done_rx.recv() => {
                    // Only the most recently started lookup is live; stale
                    // completions are discarded unconditionally
                    if live.as_ref().is_some_and(|l| l.generation == done_generation) {
                        live = None;
                        self.results_tx.send_replace(suggestions);
                    }
                }
            }
        }

        if let Some(stale) = live.take() {
            stale.handle.abort();
        }
    }

    fn process(
        &self,
        query: SearchQuery,
        last_processed: &mut Option<String>,
        live: &mut Option<LiveLookup>,
        done_tx: &mpsc::UnboundedSender<(u64, Vec<Suggestion>)>,
    ) {
        // Distinct suppression: edited-and-reverted input is not re-issued
        if last_processed.as_deref() == Some(query.text()) {
            return;
        }
        *last_processed = Some(query.text().to_string());

        // Switch-latest: whatever was in flight no longer matters. The
        // abort is an optimization; the generation check alone guarantees
        // a stale result never lands.
        if let Some(stale) = live.take() {
            stale.handle.abort();
        }

        if !query.is_searchable(self.config.min_query_chars) {
            self.results_tx.send_replace(Vec::new());
            return;
        }

        let backend = Arc::clone(&self.backend);
        let max_suggestions = self.config.max_suggestions;
        let done_tx = done_tx.clone();
        let generation = query.generation();
        let trimmed = query.trimmed().to_string();
        let handle = tokio::spawn(async move {
            let mut suggestions = match backend.search(&trimmed).await {
                Ok(suggestions) => suggestions,
                Err(e) => {
                    // Lookup failures are indistinguishable from empty results
                    debug!(error = %e, query = %trimmed, "title lookup failed, yielding empty result");
                    Vec::new()
                }
            };
            suggestions.truncate(max_suggestions);
            let _ = done_tx.send((generation, suggestions));
        });
        *live = Some(LiveLookup { generation, handle });
    }
}
