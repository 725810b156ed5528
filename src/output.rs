use crate::error::OutputError;
use crate::parsers::text;
use crate::results::ExtractionResult;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Characters of content kept in the CSV preview column
const PREVIEW_CHARS: usize = 200;

/// Timestamp layout used in the CSV file
const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One flattened line of the CSV twin of a results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub url: String,
    pub title: String,
    pub content_preview: String,
    pub scraped_at: String,
    pub error: String,
    pub links_count: usize,
    pub images_count: usize,
}

impl From<&ExtractionResult> for CsvRow {
    fn from(result: &ExtractionResult) -> Self {
        let scraped_at = result
            .scraped_at()
            .format(CSV_TIMESTAMP_FORMAT)
            .to_string();

        match result {
            ExtractionResult::Success(page) => Self {
                url: page.url.clone(),
                title: page.title.clone(),
                content_preview: preview(&page.content),
                scraped_at,
                error: String::new(),
                links_count: page.links.len(),
                images_count: page.images.len(),
            },
            ExtractionResult::Failure(failed) => Self {
                url: failed.url.clone(),
                title: String::new(),
                content_preview: String::new(),
                scraped_at,
                error: failed.error.clone(),
                links_count: 0,
                images_count: 0,
            },
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `content` followed by `...`, or
/// nothing for empty content
fn preview(content: &str) -> String {
    if content.is_empty() {
        String::new()
    } else {
        format!("{}...", text::truncate_chars(content, PREVIEW_CHARS))
    }
}

/// Counts of how a batch of pages went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(results: &[ExtractionResult]) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
        }
    }
}

/// Timestamped file name for a batch written into `output_dir`
pub fn default_results_path(output_dir: &Path) -> PathBuf {
    output_dir.join(format!("scraping_results_{}.json", Utc::now().timestamp()))
}

/// Save `results` as a pretty-printed JSON array plus a flattened CSV twin.
///
/// Writes to `path`, or to a timestamped file in `output_dir` when no path is
/// given. The CSV goes next to the JSON file with a `.csv` extension; failing
/// to write it is logged and does not fail the save. Returns the JSON path.
pub fn save_results(
    results: &[ExtractionResult],
    path: Option<&Path>,
    output_dir: &Path,
) -> Result<PathBuf, OutputError> {
    let json_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_results_path(output_dir));

    write_json(&json_path, results)?;

    let csv_path = json_path.with_extension("csv");
    match write_csv(&csv_path, results) {
        Ok(()) => ::log::info!(
            "Results saved to {} and {}",
            json_path.display(),
            csv_path.display()
        ),
        Err(e) => {
            ::log::error!("Error saving CSV: {}", e);
            ::log::info!("Results saved to {}", json_path.display());
        }
    }

    Ok(json_path)
}

/// Save a single result as a pretty-printed JSON object
pub fn save_result(result: &ExtractionResult, path: &Path) -> Result<(), OutputError> {
    write_json(path, result)?;
    ::log::info!("Result saved to {}", path.display());
    Ok(())
}

/// Write the flattened CSV form of `results` to `path`
pub fn write_csv(path: &Path, results: &[ExtractionResult]) -> Result<(), OutputError> {
    create_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(CsvRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    create_parent_dir(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), OutputError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
