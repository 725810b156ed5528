use thiserror::Error;

/// Faults raised while turning markup into a [`crate::ExtractionResult`].
///
/// These never leave [`crate::parsers::extract`]; they are rendered into the
/// `error` field of a failure record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot resolve '{reference}' against base URL: {source}")]
    UnresolvableReference {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    #[error("extraction aborted: {0}")]
    Panicked(String),
}

/// Faults raised by a page source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("timed out after {secs}s loading {url}")]
    Timeout { url: String, secs: u64 },

    #[error("could not connect to any WebDriver server (tried {0})")]
    WebDriverUnavailable(String),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Faults raised while persisting results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Faults raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
