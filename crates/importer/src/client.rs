use std::time::Duration;

use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://results.grapplefed.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the federation's results pages. Any non-200 response or
/// transport error simply means "no data for this source id"; the caller
/// decides whether to continue.
pub struct FederationClient {
    base_url: String,
    client: reqwest::Client,
}

impl FederationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("SOURCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub async fn fetch_results_page(&self, source_id: &str) -> Result<String> {
        let url = format!("{}/championships/results/{}", self.base_url, source_id);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(body)
    }
}
