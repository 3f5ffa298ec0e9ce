//! Data models for the digest.
//!
//! - [`NewsRecord`]: one news item as supplied by a [`NewsSource`](crate::sources::NewsSource)
//! - [`RunContext`]: values derived once at the start of a run
//!
//! Records are read-only once provided; only their rendered projection (the
//! HTML report) outlives the process.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::DigestError;

/// A single news item with attribution and a plain-language restatement.
///
/// The JSON form uses the same snake_case field names, with
/// `published_date` as `YYYY-MM-DD`:
///
/// ```json
/// {
///   "published_date": "2026-02-19",
///   "title": "...",
///   "source": "Google",
///   "summary": "...",
///   "plain_explanation": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsRecord {
    /// Calendar date the story was published.
    pub published_date: NaiveDate,
    /// Headline.
    pub title: String,
    /// Attribution (company, outlet, or author).
    pub source: String,
    /// Technical summary paragraph.
    pub summary: String,
    /// Simplified restatement of `summary` for non-specialists.
    pub plain_explanation: String,
}

impl NewsRecord {
    pub fn new(
        published_date: NaiveDate,
        title: impl Into<String>,
        source: impl Into<String>,
        summary: impl Into<String>,
        plain_explanation: impl Into<String>,
    ) -> Self {
        Self {
            published_date,
            title: title.into(),
            source: source.into(),
            summary: summary.into(),
            plain_explanation: plain_explanation.into(),
        }
    }

    /// Check that every text field carries content.
    ///
    /// `index` is the record's position in its sequence and is only used for
    /// the error report.
    pub fn validate(&self, index: usize) -> Result<(), DigestError> {
        let fields = [
            ("title", &self.title),
            ("source", &self.source),
            ("summary", &self.summary),
            ("plain_explanation", &self.plain_explanation),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(DigestError::InvalidRecord { index, field });
            }
        }
        Ok(())
    }
}

/// Values computed once per run and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Local calendar date of the run; used as the report's date stamp.
    pub run_date: NaiveDate,
    /// Where the report is written.
    pub output_path: PathBuf,
    /// Webhook for the summary push, as configured. `None` disables
    /// notifications. Validated by the notifier, after the report is written.
    pub notify_endpoint: Option<String>,
    /// Public location of the published report, linked from the notification.
    pub report_url: String,
}
