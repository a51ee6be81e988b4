//! Backend fetch layer
//!
//! [`Fetcher`] is the seam between views and the network. Views only ever
//! issue reads; caching, retries and deduplication are not done here.

mod http;

pub use http::HttpFetcher;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only access to backend URLs
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and decode the body as JSON. Non-2xx is an error.
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// GET `url` and return the body as text. Non-2xx is an error.
    async fn get_text(&self, url: &str) -> Result<String>;
}
