//! Records loaded from a JSON file.
//!
//! The file holds a JSON array of [`NewsRecord`] objects. This is the hook
//! for an external fetcher: anything that can drop a file before the run can
//! feed the digest.

use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument, warn};

use super::NewsSource;
use crate::errors::DigestError;
use crate::models::NewsRecord;
use crate::utils::truncate_for_log;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NewsSource for JsonFileSource {
    fn name(&self) -> &str {
        "json_file"
    }

    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    async fn provide(&self) -> Result<Vec<NewsRecord>, DigestError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(error = %e, "Failed to read records file");
            DigestError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        let records: Vec<NewsRecord> = serde_json::from_str(&raw).map_err(|e| {
            warn!(
                error = %e,
                preview = %truncate_for_log(&raw, 200),
                "Records file is not a valid record array"
            );
            DigestError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        info!(count = records.len(), "Loaded records from file");
        Ok(records)
    }
}
