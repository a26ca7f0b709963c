//! Backend client for the word-suggestion endpoint.
//!
//! The [`WordFetcher`] trait is the seam between the query cache and the
//! network: production code talks to [`HttpWordFetcher`], tests script the
//! trait directly. The backend returns JSON that is either a single value
//! or an array; [`normalize_words`] flattens both shapes into an ordered
//! list of strings.

use std::fmt;
use std::time::Duration;

/// Errors from one backend request. All of them are scoped to the current
/// query and recoverable by typing again or changing the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure (unreachable host, timeout, broken connection).
    Network(String),
    /// The backend answered with a non-success status code.
    Status(u16),
    /// Response body was neither a scalar nor a sequence of scalars.
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status(code) => write!(f, "server returned status {code}"),
            FetchError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult = Result<Vec<String>, FetchError>;

/// One blocking request against the suggestion backend.
///
/// Implementations must be `Send + Sync`: the cache runs them on short-lived
/// worker threads.
pub trait WordFetcher: Send + Sync {
    /// Fetch suggestions for `query`, bounded by `limit`. An empty `query`
    /// means "no filter" — the `query` parameter is omitted from the
    /// request, `limit` is always sent.
    fn fetch(&self, query: &str, limit: usize) -> FetchResult;
}

/// `GET <url>?query=<q>&limit=<n>` over ureq.
pub struct HttpWordFetcher {
    url: String,
    timeout: Duration,
}

impl HttpWordFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl WordFetcher for HttpWordFetcher {
    fn fetch(&self, query: &str, limit: usize) -> FetchResult {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let mut request = agent.get(&self.url);
        if !query.is_empty() {
            request = request.query("query", query);
        }
        request = request.query("limit", &limit.to_string());

        let mut response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Network(other.to_string()),
        })?;

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Network(format!("failed to read response: {e}")))?;

        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| FetchError::Malformed(format!("invalid JSON: {e}")))?;

        normalize_words(json)
    }
}

/// Flatten the backend's response into an ordered list of words.
///
/// A scalar becomes a one-element list; array elements that are not strings
/// are coerced to their textual form. Objects and nulls cannot be coerced
/// and surface as [`FetchError::Malformed`].
pub fn normalize_words(value: serde_json::Value) -> FetchResult {
    use serde_json::Value;

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    match &value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar(item).ok_or_else(|| {
                    FetchError::Malformed(format!("non-scalar array element: {item}"))
                })
            })
            .collect(),
        other => scalar(other)
            .map(|word| vec![word])
            .ok_or_else(|| FetchError::Malformed(format!("unexpected shape: {other}"))),
    }
}
