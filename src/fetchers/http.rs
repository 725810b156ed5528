use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::fetchers::PageSource;
use std::time::Duration;

/// Fetches pages with a plain HTTP client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a client sending `user_agent` and giving up after `timeout`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, FetchError> {
        Self::new(&config.user_agent, config.request_timeout())
    }
}

impl PageSource for HttpSource {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        ::log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        ::log::debug!("{} answered {}", url, response.status());

        Ok(response.text().await?)
    }
}

/// Whether `url` answers a HEAD request (following redirects) with a status below 400
pub async fn check_url_reachable(url: &str, timeout: Duration) -> bool {
    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            ::log::warn!("Failed to build HTTP client: {}", e);
            return false;
        }
    };

    match client.head(url).send().await {
        Ok(response) => response.status().as_u16() < 400,
        Err(e) => {
            ::log::debug!("{} is not reachable: {}", url, e);
            false
        }
    }
}
