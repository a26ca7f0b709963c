//! Session-lifetime query cache with in-flight de-duplication.
//!
//! Entries are keyed by [`QueryKey`] and never evicted; freshness is zero,
//! so any key change re-fetches and only identical concurrent requests
//! collapse into one network call. Fetches run on short-lived worker
//! threads and come back as completions over an mpsc channel, drained by
//! [`WordCache::poll`] from the owner's event loop. Each outgoing request
//! is tagged with its key and a generation counter; a completion is only
//! "applied" (reported as a visible change) when its key is still the
//! current one — resolutions for abandoned keys update the cache silently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::fetch::client::{FetchError, FetchResult, WordFetcher};

/// Identity of one cacheable fetch. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub query: String,
    pub limit: usize,
}

impl QueryKey {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
        }
    }
}

/// Mutually exclusive fetch state for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug)]
pub struct CacheEntry {
    pub status: QueryStatus,
    pub words: Vec<String>,
    pub error: Option<FetchError>,
    pub fetched_at: Option<Instant>,
}

impl CacheEntry {
    fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            words: Vec::new(),
            error: None,
            fetched_at: None,
        }
    }
}

/// Read-only view of the current key's entry.
#[derive(Debug, Clone, Copy)]
pub struct QueryView<'a> {
    pub status: QueryStatus,
    pub words: &'a [String],
    pub error: Option<&'a FetchError>,
}

struct Completion {
    key: QueryKey,
    generation: u64,
    result: FetchResult,
}

pub struct WordCache {
    fetcher: Arc<dyn WordFetcher>,
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashSet<QueryKey>,
    current: Option<QueryKey>,
    generation: u64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl WordCache {
    pub fn new(fetcher: Arc<dyn WordFetcher>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher,
            entries: HashMap::new(),
            in_flight: HashSet::new(),
            current: None,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Make `key` the current key, fetching unless the query is empty or an
    /// identical request is already in flight.
    pub fn request(&mut self, key: QueryKey) {
        if self.current.as_ref() == Some(&key) {
            return;
        }
        self.generation += 1;
        tracing::debug!(
            query = %key.query,
            limit = key.limit,
            generation = self.generation,
            "query key changed"
        );
        self.current = Some(key.clone());

        if key.query.is_empty() {
            // Fetch is disabled for empty queries; the entry stays idle.
            self.entries.entry(key).or_insert_with(CacheEntry::idle);
            return;
        }

        let entry = self.entries.entry(key.clone()).or_insert_with(CacheEntry::idle);
        entry.status = QueryStatus::Loading;
        entry.error = None;

        if self.in_flight.contains(&key) {
            // Join the outstanding call instead of duplicating it.
            return;
        }
        self.in_flight.insert(key.clone());

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let generation = self.generation;
        thread::spawn(move || {
            let result = fetcher.fetch(&key.query, key.limit);
            // The receiver disappears on teardown; the worker just exits.
            let _ = tx.send(Completion {
                key,
                generation,
                result,
            });
        });
    }

    /// Drain completions. Returns true when the current key's state changed;
    /// resolutions for abandoned keys are cached but never applied.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok(done) = self.rx.try_recv() {
            self.in_flight.remove(&done.key);
            let is_current = self.current.as_ref() == Some(&done.key);
            let entry = self
                .entries
                .entry(done.key.clone())
                .or_insert_with(CacheEntry::idle);
            entry.fetched_at = Some(Instant::now());
            match done.result {
                Ok(words) => {
                    entry.status = QueryStatus::Success;
                    entry.words = words;
                    entry.error = None;
                }
                Err(err) => {
                    tracing::warn!(
                        query = %done.key.query,
                        limit = done.key.limit,
                        error = %err,
                        "fetch failed"
                    );
                    entry.status = QueryStatus::Error;
                    entry.words.clear();
                    entry.error = Some(err);
                }
            }
            if is_current {
                applied = true;
            } else {
                tracing::debug!(
                    query = %done.key.query,
                    limit = done.key.limit,
                    generation = done.generation,
                    "stale completion ignored for rendering"
                );
            }
        }
        applied
    }

    /// State of the most recently requested key.
    pub fn snapshot(&self) -> QueryView<'_> {
        match self.current.as_ref().and_then(|key| self.entries.get(key)) {
            Some(entry) => QueryView {
                status: entry.status,
                words: &entry.words,
                error: entry.error.as_ref(),
            },
            None => QueryView {
                status: QueryStatus::Idle,
                words: &[],
                error: None,
            },
        }
    }

    pub fn current_key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc::RecvTimeoutError;
    use std::time::Duration;

    /// Scripted fetcher: records calls, answers from a closure, and can
    /// hold responses for chosen queries behind a gate.
    struct ScriptedFetcher {
        calls: Mutex<Vec<(String, usize)>>,
        respond: Box<dyn Fn(&str, usize) -> FetchResult + Send + Sync>,
        gate: Option<(String, Mutex<Receiver<()>>)>,
    }

    impl ScriptedFetcher {
        fn new(respond: impl Fn(&str, usize) -> FetchResult + Send + Sync + 'static) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                respond: Box::new(respond),
                gate: None,
            }
        }

        fn gated_on(mut self, query: &str) -> (Self, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            self.gate = Some((query.to_string(), Mutex::new(rx)));
            (self, tx)
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl WordFetcher for ScriptedFetcher {
        fn fetch(&self, query: &str, limit: usize) -> FetchResult {
            self.calls.lock().unwrap().push((query.to_string(), limit));
            if let Some((gated_query, rx)) = &self.gate
                && gated_query == query
            {
                match rx.lock().unwrap().recv_timeout(Duration::from_secs(5)) {
                    Ok(()) => {}
                    Err(RecvTimeoutError::Timeout) => {
                        return Err(FetchError::Network("gate timed out".into()));
                    }
                    Err(RecvTimeoutError::Disconnected) => {}
                }
            }
            (self.respond)(query, limit)
        }
    }

    fn wait_applied(cache: &mut WordCache) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cache.poll() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("no completion applied before deadline");
    }

    #[test]
    fn empty_query_never_fetches() {
        let fetcher = Arc::new(ScriptedFetcher::new(|_, _| Ok(vec!["x".into()])));
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);
        cache.request(QueryKey::new("", 10));
        thread::sleep(Duration::from_millis(20));
        assert!(!cache.poll());
        assert_eq!(cache.snapshot().status, QueryStatus::Idle);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[test]
    fn successful_fetch_is_applied() {
        let fetcher = Arc::new(ScriptedFetcher::new(|q, _| Ok(vec![q.to_string()])));
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);
        cache.request(QueryKey::new("apple", 10));
        assert_eq!(cache.snapshot().status, QueryStatus::Loading);
        wait_applied(&mut cache);
        let view = cache.snapshot();
        assert_eq!(view.status, QueryStatus::Success);
        assert_eq!(view.words, ["apple"]);
    }

    #[test]
    fn duplicate_requests_share_one_network_call() {
        let (fetcher, release) = ScriptedFetcher::new(|_, _| Ok(vec!["slow".into()]))
            .gated_on("slow");
        let fetcher = Arc::new(fetcher);
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);

        cache.request(QueryKey::new("slow", 10));
        // Same key again while the first is in flight: de-duplicated.
        cache.request(QueryKey::new("other", 10));
        wait_applied(&mut cache);
        cache.request(QueryKey::new("slow", 10));
        assert_eq!(cache.snapshot().status, QueryStatus::Loading);

        release.send(()).unwrap();
        wait_applied(&mut cache);
        assert_eq!(cache.snapshot().status, QueryStatus::Success);
        assert_eq!(cache.snapshot().words, ["slow"]);
        let slow_calls = fetcher
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| q == "slow")
            .count();
        assert_eq!(slow_calls, 1);
    }

    #[test]
    fn revisited_key_refetches() {
        let fetcher = Arc::new(ScriptedFetcher::new(|q, _| Ok(vec![q.to_string()])));
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);

        cache.request(QueryKey::new("apple", 10));
        wait_applied(&mut cache);
        cache.request(QueryKey::new("pear", 10));
        wait_applied(&mut cache);
        // Freshness is zero: coming back to a resolved key hits the
        // network again rather than trusting the cached entry.
        cache.request(QueryKey::new("apple", 10));
        wait_applied(&mut cache);

        let apple_calls = fetcher
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| q == "apple")
            .count();
        assert_eq!(apple_calls, 2);
    }

    #[test]
    fn stale_completion_never_overwrites_current_key() {
        let (fetcher, release) = ScriptedFetcher::new(|q, limit| {
            Ok(vec![format!("{q}-{limit}")])
        })
        .gated_on("test");
        let fetcher = Arc::new(fetcher);
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);

        // Limit 10 hangs in flight; limit 50 supersedes it.
        cache.request(QueryKey::new("test", 10));
        cache.request(QueryKey::new("quick", 50));
        wait_applied(&mut cache);
        assert_eq!(cache.snapshot().words, ["quick-50"]);

        // The late limit-10 resolution lands in its own entry but is not
        // applied to the displayed key.
        release.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut applied_late = false;
        while !cache.in_flight.is_empty() && Instant::now() < deadline {
            applied_late |= cache.poll();
            thread::sleep(Duration::from_millis(2));
        }
        applied_late |= cache.poll();
        assert!(!applied_late);
        assert_eq!(cache.snapshot().words, ["quick-50"]);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[test]
    fn failure_transitions_to_error_without_retry() {
        let fetcher = Arc::new(ScriptedFetcher::new(|_, _| {
            Err(FetchError::Status(500))
        }));
        let dyn_fetcher: Arc<dyn WordFetcher> = fetcher.clone();
        let mut cache = WordCache::new(dyn_fetcher);
        cache.request(QueryKey::new("boom", 10));
        wait_applied(&mut cache);
        let view = cache.snapshot();
        assert_eq!(view.status, QueryStatus::Error);
        assert_eq!(view.error, Some(&FetchError::Status(500)));
        assert!(view.words.is_empty());
        thread::sleep(Duration::from_millis(20));
        assert_eq!(fetcher.call_count(), 1);
    }
}
