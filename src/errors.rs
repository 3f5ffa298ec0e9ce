//! Error taxonomy for a digest run.
//!
//! Every variant here is fatal: it means the report could not be produced.
//! Notification problems are not errors; they surface as
//! [`NotifyOutcome::DeliveryFailed`](crate::notify::NotifyOutcome) and are
//! logged without aborting the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    /// The source provider could not produce any records.
    #[error("news source unavailable: {0}")]
    SourceUnavailable(String),

    /// A record is missing required content.
    #[error("record #{index} is malformed: field `{field}` is empty")]
    InvalidRecord { index: usize, field: &'static str },

    /// The report document could not be written to its destination.
    #[error("failed to write report to {}: {source}", path.display())]
    RenderFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DigestError {
    pub fn render_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DigestError::RenderFailure {
            path: path.into(),
            source,
        }
    }
}
