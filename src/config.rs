use crate::error::ConfigError;
use crate::parsers::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header sent with plain HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout, also used when waiting for a browser page to load
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause after each page when scraping several URLs
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Cap on extracted text length (unlimited if absent)
    #[serde(default)]
    pub max_content_length: Option<usize>,

    /// Number of search results to scrape when none is given
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Directory that receives timestamped result files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Drive a browser through WebDriver instead of plain HTTP
    #[serde(default)]
    pub use_webdriver: bool,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_num_results() -> usize {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            delay_ms: default_delay_ms(),
            max_content_length: None,
            num_results: default_num_results(),
            output_dir: default_output_dir(),
            use_webdriver: false,
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn apply_env(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Extraction options derived from this configuration
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_content_length: self.max_content_length,
        }
    }
}
