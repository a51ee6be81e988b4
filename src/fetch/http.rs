//! reqwest-backed fetcher

use super::Fetcher;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Fetcher talking to the backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher honoring the API timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("netfront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, accept: &'static str) -> Result<reqwest::Response> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.get(url, "application/json").await?;
        Ok(response.json().await?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url, "text/html").await?;
        Ok(response.text().await?)
    }
}
