//! HTTP client for the provider's station board pages.

use tracing::debug;

use super::error::BoardError;

/// Default base URL for the provider's mobile station board page.
const DEFAULT_BASE_URL: &str = "https://mobile.viaggiatreno.it/vt_pax_internet/mobile/stazione";

/// Configuration for the board page client.
#[derive(Debug, Clone)]
pub struct BoardClientConfig {
    /// Base URL of the station board page
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BoardClientConfig {
    /// Create a config pointing at the provider's production page.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for BoardClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client fetching raw station board HTML.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    /// Create a new board page client.
    pub fn new(config: BoardClientConfig) -> Result<Self, BoardError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the board page for a station, by display name.
    ///
    /// Returns the raw HTML body; splitting it into departures and
    /// arrivals is [`BoardPage`](super::BoardPage)'s job.
    pub async fn fetch(&self, station: &str) -> Result<String, BoardError> {
        debug!(station, "fetching board page");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("stazione", station)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = BoardClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = BoardClientConfig::new().with_base_url("http://localhost:8080/stazione");
        assert_eq!(config.base_url, "http://localhost:8080/stazione");
    }
}
