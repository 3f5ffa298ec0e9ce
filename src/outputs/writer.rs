//! Atomic report replacement.
//!
//! The document is written to a temporary file beside the destination, synced,
//! then renamed over the target. Readers (and concurrent runs) see either the
//! previous report or the new one, never a truncated file. On failure the
//! temporary file is removed and the previous report is left untouched.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{error, info, instrument};

use crate::errors::DigestError;
use crate::utils::ensure_parent_dir;

/// Write `contents` to `path`, replacing any previous report.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = contents.len()))]
pub async fn write_report(path: &Path, contents: String) -> Result<(), DigestError> {
    let target: PathBuf = path.to_path_buf();

    let result = tokio::task::spawn_blocking(move || replace_file(&target, contents.as_bytes()))
        .await
        .map_err(io::Error::other)
        .and_then(|inner| inner);

    match result {
        Ok(()) => {
            info!("Wrote report");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to write report");
            Err(DigestError::render_failure(path, e))
        }
    }
}

fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = Builder::new()
        .prefix(".digest-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    // Temp files are created owner-only; the report is meant to be served.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    // Dropping the PersistError deletes the temp file.
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("site/daily/index.html");

        write_report(&target, "<html></html>".to_string())
            .await
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "<html></html>");
        assert_eq!(entries(&dir.path().join("site/daily")), vec!["index.html"]);
    }

    #[tokio::test]
    async fn test_write_replaces_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("index.html");
        fs::write(&target, "old report with much longer content").unwrap();

        write_report(&target, "new".to_string()).await.unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_unwritable_parent_is_render_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let target = blocker.join("index.html");

        let err = write_report(&target, "x".to_string()).await.unwrap_err();

        assert!(matches!(err, DigestError::RenderFailure { .. }));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
        assert_eq!(entries(dir.path()), vec!["blocker"]);
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path cannot be replaced by a file.
        let target = dir.path().join("index.html");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = write_report(&target, "new".to_string()).await.unwrap_err();

        assert!(matches!(err, DigestError::RenderFailure { .. }));
        assert_eq!(entries(dir.path()), vec!["index.html"]);
        assert_eq!(entries(&target), vec!["keep"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_report_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("index.html");
        write_report(&target, "x".to_string()).await.unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
