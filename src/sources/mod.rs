//! News record providers.
//!
//! A run starts by asking a [`NewsSource`] for an ordered list of
//! [`NewsRecord`]s. Rendering and notification only see the records, so a
//! source can be swapped without touching the rest of the pipeline.
//!
//! # Available Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | Built-in list | [`fixed`] | Always available; used when no records file is configured |
//! | JSON file | [`json_file`] | Array of records; IO and parse errors become `SourceUnavailable` |

use crate::errors::DigestError;
use crate::models::NewsRecord;

pub mod fixed;
pub mod json_file;

pub use fixed::StaticSource;
pub use json_file::JsonFileSource;

/// Supplies the records for one run.
///
/// Implementations must report failures as [`DigestError::SourceUnavailable`]
/// rather than leaking transport or parse errors to callers.
pub trait NewsSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce records in presentation order (most recent first by convention).
    async fn provide(&self) -> Result<Vec<NewsRecord>, DigestError>;
}
