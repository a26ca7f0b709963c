//! Fetch layer: backend client and the query cache in front of it.
//!
//! - [`client`]: the `WordFetcher` seam, the ureq-backed HTTP client, and
//!   response normalization.
//! - [`cache`]: keep-forever cache keyed by (query, limit) with in-flight
//!   de-duplication and last-key-wins completion handling.

pub mod cache;
pub mod client;

pub use cache::{QueryKey, QueryStatus, QueryView, WordCache};
pub use client::{FetchError, FetchResult, HttpWordFetcher, WordFetcher};
