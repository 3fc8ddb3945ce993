//! Debounced search-as-you-type suggestions.
//!
//! A [`DebouncedSuggest`] owns the state of one autocomplete field. Every
//! query change re-arms a debounce timer; when it fires, the configured
//! [`SuggestSource`] is queried and the result is re-filtered client-side
//! before being published.
//!
//! Supersession is tracked with a generation counter rather than by
//! cancelling lookups: a newer query aborts the pending *timer*, but a
//! lookup already in flight keeps running and its result is dropped when
//! it comes back carrying an old generation.
//!
//! ```text
//!  query ──▶ gen += 1 ──▶ [debounce timer] ──▶ lookup(query) ──▶ gen current? ──▶ publish
//!                              ▲ aborted by                           │ no
//!                              └ the next query                       ▼
//!                                                                  discard
//! ```
//!
//! Operations that spawn timers must be called from within a tokio runtime.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::{sync::watch, task::JoinHandle};

use crate::{error::Result, models::SuggestOption};

pub mod sources;


pub use sources::{DepartmentSource, LocationSource};

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Asynchronous lookup behind a suggest field.
#[async_trait]
pub trait SuggestSource: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Vec<SuggestOption>>;
}

/// Observable state of one suggest field.
///
/// `is_open` is only ever true while `options` is non-empty and `query`
/// differs from `last_accepted_label`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestState {
    pub query: String,
    pub options: Vec<SuggestOption>,
    pub is_loading: bool,
    pub has_error: bool,
    pub is_open: bool,
    pub last_accepted_label: Option<String>,
}

impl SuggestState {
    fn can_open(&self) -> bool {
        !self.options.is_empty() && self.last_accepted_label.as_deref() != Some(&self.query)
    }
}

struct Inner {
    source: Arc<dyn SuggestSource>,
    delay: Duration,
    state: watch::Sender<SuggestState>,
    generation: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Invalidates every pending timer and in-flight lookup.
    fn supersede(&self) -> u64 {
        self.cancel_timer();
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn cancel_timer(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }

    async fn run_lookup(self: Arc<Self>, generation: u64, query: String) {
        let started = self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_loading = true;
            state.has_error = false;
            true
        });
        if !started {
            return;
        }

        let result = self.source.lookup(&query).await;

        let applied = self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_loading = false;
            match &result {
                Ok(options) => {
                    let filtered = filter_options(options, &query);
                    let exact_match = filtered.iter().any(|option| option.label == query);
                    state.is_open = !filtered.is_empty() && !exact_match;
                    state.options = filtered;
                }
                Err(_) => {
                    state.has_error = true;
                    state.options.clear();
                    state.is_open = false;
                }
            }
            true
        });

        match result {
            Err(e) => warn!("Suggestion lookup for {query:?} failed: {e}"),
            Ok(_) if !applied => debug!("Discarding stale suggestions for {query:?}"),
            Ok(_) => {}
        }
    }
}

/// Case-insensitive substring filter applied on top of every remote result.
pub fn filter_options(options: &[SuggestOption], query: &str) -> Vec<SuggestOption> {
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// One debounced autocomplete field.
pub struct DebouncedSuggest {
    inner: Arc<Inner>,
}

impl DebouncedSuggest {
    /// Creates a field backed by `source` with the default debounce window.
    pub fn new(source: Arc<dyn SuggestSource>) -> Self {
        Self::with_delay(source, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(source: Arc<dyn SuggestSource>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SuggestState::default());
        Self {
            inner: Arc::new(Inner {
                source,
                delay,
                state,
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SuggestState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SuggestState> {
        self.inner.state.subscribe()
    }

    /// Handles a new query text, typed or set programmatically.
    ///
    /// - empty text closes the dropdown and clears options without fetching
    /// - text equal to the last accepted label does not fetch
    /// - anything else clears the accepted label and re-arms the timer
    pub fn on_query_change(&self, text: &str) {
        let inner = &self.inner;

        if text.is_empty() {
            inner.state.send_modify(|state| {
                inner.supersede();
                state.query.clear();
                state.options.clear();
                state.is_open = false;
                state.is_loading = false;
                state.last_accepted_label = None;
            });
            return;
        }

        let mut generation = None;
        inner.state.send_modify(|state| {
            state.query = text.to_string();
            if state.last_accepted_label.as_deref() == Some(text) {
                state.is_open = false;
                return;
            }
            state.last_accepted_label = None;
            generation = Some(inner.supersede());
        });

        let Some(generation) = generation else {
            debug!("Query {text:?} matches the accepted option; not fetching");
            return;
        };

        let timer_inner = Arc::clone(inner);
        let query = text.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timer_inner.delay).await;
            // The lookup runs in its own task so a later abort of this timer
            // never cancels a request that is already in flight.
            tokio::spawn(Arc::clone(&timer_inner).run_lookup(generation, query));
        });

        let mut timer = inner.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.is_current(generation) {
            *timer = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Accepts `option`: records it as the last accepted label, sets the
    /// query to it and closes the dropdown. Returns the committed option.
    pub fn select(&self, option: &SuggestOption) -> SuggestOption {
        let inner = &self.inner;
        inner.state.send_modify(|state| {
            inner.supersede();
            state.last_accepted_label = Some(option.label.clone());
            state.query = option.label.clone();
            state.is_open = false;
            state.is_loading = false;
        });
        option.clone()
    }

    /// Interaction outside the field: closes the dropdown without touching
    /// the query or options.
    pub fn dismiss(&self) {
        self.inner.state.send_if_modified(|state| {
            let was_open = state.is_open;
            state.is_open = false;
            was_open
        });
    }

    /// Focus on the field: re-opens the dropdown if there is something to
    /// show and the query is not the accepted value.
    pub fn focus(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.is_open || !state.can_open() {
                return false;
            }
            state.is_open = true;
            true
        });
    }
}

impl Drop for DebouncedSuggest {
    fn drop(&mut self) {
        self.inner.supersede();
    }
}
