//! Search controller: owns the input state and drives the debouncer and
//! query cache from the event-loop tick.
//!
//! The controller is deliberately terminal-free so the state machine is
//! testable without a TTY; the TUI shell feeds it keystrokes and ticks and
//! reads back phase, words, selection, and the derived status message.

use std::time::Duration;

use crate::config::LIMIT_OPTIONS;
use crate::debounce::Debouncer;
use crate::fetch::{QueryKey, QueryStatus, WordCache};

/// Observable search state, one variant at a time.
///
/// The debouncing interval between a keystroke and the committed query is
/// transient and intentionally absent here; `debounce_pending` exposes it
/// to the shell without affecting the status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Committed query is empty; no fetch attempted.
    Idle,
    /// Committed query non-empty, fetch in flight.
    Loading,
    /// Fetch resolved with at least one word.
    Success,
    /// Fetch resolved with zero words for a non-empty query.
    Empty,
    /// Fetch rejected.
    Error,
}

pub struct SearchController {
    raw_text: String,
    committed_query: String,
    limit: usize,
    selected: Option<usize>,
    debouncer: Debouncer<String>,
    cache: WordCache,
}

impl SearchController {
    pub fn new(cache: WordCache, debounce: Duration, limit: usize) -> Self {
        let mut controller = Self {
            raw_text: String::new(),
            committed_query: String::new(),
            limit,
            selected: None,
            debouncer: Debouncer::new(debounce),
            cache,
        };
        // Establish the initial (empty) key so the cache view starts Idle.
        controller
            .cache
            .request(QueryKey::new("", controller.limit));
        controller
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// True while a keystroke awaits its debounce commit.
    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn push_char(&mut self, c: char) {
        self.raw_text.push(c);
        self.schedule_commit();
    }

    pub fn backspace(&mut self) {
        self.raw_text.pop();
        self.schedule_commit();
    }

    pub fn clear_input(&mut self) {
        self.raw_text.clear();
        self.schedule_commit();
    }

    /// Replace the whole input, e.g. when loading a recent query.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.schedule_commit();
    }

    fn schedule_commit(&mut self) {
        self.debouncer.schedule(self.raw_text.clone());
    }

    /// Advance time-driven work: commit a debounced query and drain fetch
    /// completions. Returns true when visible state changed.
    pub fn on_tick(&mut self) -> bool {
        let mut changed = false;
        if let Some(query) = self.debouncer.take_ready() {
            if query != self.committed_query {
                tracing::debug!(from = %self.committed_query, to = %query, "query committed");
                self.committed_query = query;
                self.selected = None;
            }
            self.cache
                .request(QueryKey::new(self.committed_query.clone(), self.limit));
            changed = true;
        }
        if self.cache.poll() {
            changed = true;
        }
        changed
    }

    /// Switch to another limit from the closed option set. A changed limit
    /// clears the selection and issues a new query key; unknown values are
    /// ignored.
    pub fn set_limit(&mut self, limit: usize) {
        if limit == self.limit || !LIMIT_OPTIONS.contains(&limit) {
            return;
        }
        self.limit = limit;
        self.selected = None;
        self.cache
            .request(QueryKey::new(self.committed_query.clone(), self.limit));
    }

    /// Step to the next limit option, wrapping around.
    pub fn cycle_limit(&mut self) {
        let idx = LIMIT_OPTIONS
            .iter()
            .position(|l| *l == self.limit)
            .unwrap_or(0);
        self.set_limit(LIMIT_OPTIONS[(idx + 1) % LIMIT_OPTIONS.len()]);
    }

    /// Words of the current key, in backend order.
    pub fn words(&self) -> &[String] {
        self.cache.snapshot().words
    }

    /// Select a row by index; never triggers a fetch. Returns the
    /// (word, index) pair for rows that exist.
    pub fn select(&mut self, index: usize) -> Option<(String, usize)> {
        let word = self.words().get(index)?.clone();
        self.selected = Some(index);
        Some((word, index))
    }

    pub fn select_next(&mut self) {
        let len = self.words().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.words().is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    pub fn selected_word(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.words().get(i))
            .map(String::as_str)
    }

    /// Detail of the current key's failure, for the inline error line.
    pub fn error_detail(&self) -> Option<String> {
        self.cache.snapshot().error.map(|e| e.to_string())
    }

    pub fn phase(&self) -> SearchPhase {
        if self.committed_query.is_empty() {
            return SearchPhase::Idle;
        }
        let view = self.cache.snapshot();
        match view.status {
            QueryStatus::Idle | QueryStatus::Loading => SearchPhase::Loading,
            QueryStatus::Error => SearchPhase::Error,
            QueryStatus::Success => {
                if view.words.is_empty() {
                    SearchPhase::Empty
                } else {
                    SearchPhase::Success
                }
            }
        }
    }

    /// Derived message for the footer; first matching rule wins, updated
    /// synchronously with every transition.
    pub fn status_message(&self) -> String {
        match self.phase() {
            SearchPhase::Loading => "Loading search results.".to_string(),
            SearchPhase::Error => "Failed to fetch words.".to_string(),
            SearchPhase::Empty => "No matching word found.".to_string(),
            SearchPhase::Success => {
                format!("{} results found (Limit: {}).", self.words().len(), self.limit)
            }
            SearchPhase::Idle => String::new(),
        }
    }
}
