use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// JSON-over-HTTP client that spaces out its requests
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        Ok(Self {
            client: Self::build_client(user_agent, timeout_secs)?,
            rate_limiter: RateLimiter::new(rate_limit_ms),
        })
    }

    /// GETs `url` and decodes the body. 404 and 204 map to `None`,
    /// any other non-success status is an error.
    pub async fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Result<Option<T>> {
        self.rate_limiter.wait().await;
        let response = self.send_get_request(url).await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => {
                let body = response
                    .json::<T>()
                    .await
                    .with_context(|| format!("Failed to decode response from {}", url))?;
                Ok(Some(body))
            }
            status => bail!("{} returned status: {}", url, status),
        }
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))
    }
}
