pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::error::ExtractError;
use crate::results::{ExtractionResult, PageRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use url::Url;

/// Elements whose contents never count as visible text
const INVISIBLE_ELEMENTS: &str = "script, style";

/// Knobs for [`extract`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Cap on the number of characters kept in `content` (unlimited if None)
    #[serde(default)]
    pub max_content_length: Option<usize>,
}

impl ExtractOptions {
    /// Set the content length cap
    pub fn with_max_content_length(mut self, max: usize) -> Self {
        self.max_content_length = Some(max);
        self
    }
}

/// Turns raw markup fetched from `base_url` into an [`ExtractionResult`].
///
/// Never fails: anything that goes wrong, including a panic inside the
/// parser, comes back as a failure record carrying the error text.
pub fn extract(html: &str, base_url: &str, options: &ExtractOptions) -> ExtractionResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| try_extract(html, base_url, options)))
        .unwrap_or_else(|payload| Err(ExtractError::Panicked(panic_message(payload))));

    match outcome {
        Ok(page) => {
            ::log::debug!(
                "Extracted {} ({} chars, {} links, {} images)",
                base_url,
                page.content.chars().count(),
                page.links.len(),
                page.images.len()
            );
            ExtractionResult::Success(page)
        }
        Err(e) => {
            ::log::warn!("Extraction failed for {}: {}", base_url, e);
            ExtractionResult::failure(base_url, e)
        }
    }
}

/// Fallible core of [`extract`], for callers that want the typed error
pub fn try_extract(
    html: &str,
    base_url: &str,
    options: &ExtractOptions,
) -> Result<PageRecord, ExtractError> {
    let base = Url::parse(base_url).map_err(|source| ExtractError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    let mut doc = html::parse_document(html);
    if !doc.errors.is_empty() {
        ::log::trace!("{} tolerated parse errors in {}", doc.errors.len(), base_url);
    }

    let removed = html::remove_elements(&mut doc, INVISIBLE_ELEMENTS);
    ::log::trace!("Removed {} script/style elements from {}", removed, base_url);

    let title = html::title(&doc);
    let content = text::limit(
        text::normalize(&html::raw_text(&doc)),
        options.max_content_length,
    );
    let links = html::links(&doc, &base)?;
    let images = html::images(&doc, &base)?;

    Ok(PageRecord {
        url: base_url.to_string(),
        title,
        content,
        links,
        images,
        scraped_at: Utc::now(),
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
