// Re-export modules
pub mod config;
pub mod error;
pub mod fetchers;
pub mod output;
pub mod parsers;
pub mod results;
pub mod search;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{ConfigError, ExtractError, FetchError, OutputError};
pub use parsers::{ExtractOptions, extract};
pub use results::{ExtractionResult, FailedPage, Image, Link, PageRecord};
pub use session::Session;
