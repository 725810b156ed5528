use clap::{Parser, Subcommand};
use std::path::PathBuf;
use web_harvest::config::ScraperConfig;
use web_harvest::utils::validate_url;

#[derive(Parser, Debug)]
#[command(name = "web-harvest")]
#[command(about = "Fetch web pages directly or through search results and save what they contain")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Drive a browser through WebDriver instead of plain HTTP
    #[arg(long, global = true)]
    pub webdriver: bool,

    /// Keep at most this many characters of page text
    #[arg(long, global = true)]
    pub max_content_length: Option<usize>,

    /// Pause between requests in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Directory for timestamped result files
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Search the web and scrape the top results
    Search {
        /// Search query
        query: String,

        /// Number of results to scrape (defaults to the configured value)
        num_results: Option<usize>,
    },

    /// Scrape one or more URLs
    Scrape {
        /// URLs to scrape
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Args {
    /// Layer command-line overrides on top of `config`
    pub fn apply_to(&self, mut config: ScraperConfig) -> ScraperConfig {
        if self.webdriver {
            config.use_webdriver = true;
        }
        if let Some(max) = self.max_content_length {
            config.max_content_length = Some(max);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config
    }
}

impl Command {
    /// URLs given to `scrape` that are not absolute http(s) addresses
    pub fn invalid_urls(&self) -> Vec<&str> {
        match self {
            Command::Scrape { urls, .. } => urls
                .iter()
                .map(String::as_str)
                .filter(|url| !validate_url(url))
                .collect(),
            Command::Search { .. } => Vec::new(),
        }
    }
}
