use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a page has no usable `<title>` element
pub const NO_TITLE: &str = "No Title";

/// A hyperlink discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL of the link target
    pub url: String,

    /// Trimmed anchor text (may be empty)
    pub text: String,
}

/// An image discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute URL of the image source
    pub url: String,

    /// The `alt` attribute, verbatim
    pub alt: String,
}

/// Content extracted from a successfully processed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL the page was fetched from
    pub url: String,

    /// Page title, or [`NO_TITLE`]
    pub title: String,

    /// Whitespace-normalized visible text
    pub content: String,

    /// Links in document order
    pub links: Vec<Link>,

    /// Images in document order
    pub images: Vec<Image>,

    /// Capture time
    pub scraped_at: DateTime<Utc>,
}

/// A page that could not be fetched or extracted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedPage {
    /// URL the fetch was attempted for
    pub url: String,

    /// Human readable description of what went wrong
    pub error: String,

    /// Capture time
    pub scraped_at: DateTime<Utc>,
}

/// Outcome of processing one page.
///
/// Serialized untagged: a success is an object with `title`, `content`,
/// `links` and `images`; a failure carries only `url`, `error` and
/// `scraped_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Success(PageRecord),
    Failure(FailedPage),
}

impl ExtractionResult {
    /// Build a failure record stamped with the current time
    pub fn failure(url: impl Into<String>, error: impl ToString) -> Self {
        ExtractionResult::Failure(FailedPage {
            url: url.into(),
            error: error.to_string(),
            scraped_at: Utc::now(),
        })
    }

    /// URL the result belongs to, for either variant
    pub fn url(&self) -> &str {
        match self {
            ExtractionResult::Success(page) => &page.url,
            ExtractionResult::Failure(failed) => &failed.url,
        }
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        match self {
            ExtractionResult::Success(page) => page.scraped_at,
            ExtractionResult::Failure(failed) => failed.scraped_at,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success(_))
    }

    pub fn as_page(&self) -> Option<&PageRecord> {
        match self {
            ExtractionResult::Success(page) => Some(page),
            ExtractionResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success(_) => None,
            ExtractionResult::Failure(failed) => Some(&failed.error),
        }
    }
}
