use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::fetchers::PageSource;
use crate::parsers::{self, ExtractOptions};
use crate::results::ExtractionResult;
use crate::search;
use std::time::Duration;

/// Sequential fetch-then-extract driver over a [`PageSource`]
pub struct Session<S: PageSource> {
    source: S,
    options: ExtractOptions,
    delay: Duration,
}

impl<S: PageSource> Session<S> {
    /// Create a session with default extraction options and a one second delay
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: ExtractOptions::default(),
            delay: Duration::from_secs(1),
        }
    }

    /// Create a session using the extraction options and delay from `config`
    pub fn from_config(source: S, config: &ScraperConfig) -> Self {
        Self::new(source)
            .with_options(config.extract_options())
            .with_delay(config.delay())
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the pause taken after each page in [`Session::scrape_multiple`]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fetch and extract a single page. Fetch errors become failure records.
    pub async fn scrape_page(&mut self, url: &str) -> ExtractionResult {
        match self.source.fetch(url).await {
            Ok(html) => parsers::extract(&html, url, &self.options),
            Err(e) => {
                ::log::error!("Error scraping {}: {}", url, e);
                ExtractionResult::failure(url, e)
            }
        }
    }

    /// Scrape `urls` one after another, pausing between requests
    pub async fn scrape_multiple(&mut self, urls: &[String]) -> Vec<ExtractionResult> {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            ::log::info!("Scraping ({}/{}): {}", i + 1, total, url);
            results.push(self.scrape_page(url).await);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        results
    }

    /// Run a search and return up to `num_results` result URLs
    pub async fn search(
        &mut self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<String>, FetchError> {
        let url = search::search_url(query, num_results)?;
        let html = self.source.fetch(url.as_str()).await?;
        Ok(search::parse_result_links(&html, &url, num_results))
    }

    /// Search for `query` and scrape every result found
    pub async fn search_and_scrape(
        &mut self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<ExtractionResult>, FetchError> {
        ::log::info!("Searching for: {}", query);
        let urls = self.search(query, num_results).await?;

        if urls.is_empty() {
            ::log::warn!("No URLs found from search");
            return Ok(Vec::new());
        }

        ::log::info!("Found {} URLs, starting to scrape...", urls.len());
        Ok(self.scrape_multiple(&urls).await)
    }

    /// Shut the session down, releasing the page source
    pub async fn close(self) {
        self.source.close().await;
    }
}
