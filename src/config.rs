use std::time::Duration;

/// Result-limit choices exposed to the user, in cycling order.
pub const LIMIT_OPTIONS: [usize; 4] = [5, 10, 50, 100];

/// Limit used when none is specified.
pub const DEFAULT_LIMIT: usize = 10;

/// Environment variable consulted when `--url` is not given.
pub const ENDPOINT_ENV: &str = "WORD_SEARCH_URL";

/// Fallback endpoint when neither flag nor env var is set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/words";

/// Quiet period between the last keystroke and the committed query.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Upper bound on a single backend request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub debounce: Duration,
    pub limit: usize,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Resolve the endpoint with flag > env > default precedence.
    pub fn resolve(url: Option<String>, debounce_ms: u64, limit: usize) -> Self {
        let endpoint = url
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self {
            endpoint,
            debounce: Duration::from_millis(debounce_ms),
            limit,
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

/// Clap value parser keeping `--limit` inside the closed option set.
pub fn parse_limit(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if LIMIT_OPTIONS.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "limit must be one of {}",
            LIMIT_OPTIONS.map(|l| l.to_string()).join(", ")
        ))
    }
}
