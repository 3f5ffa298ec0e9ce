//! Run configuration.
//!
//! Settings come from three layers, highest precedence first:
//! 1. CLI flags (or their environment variables, resolved by clap)
//! 2. An optional YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! The result is an explicit [`DigestConfig`] handed to the pipeline, so
//! nothing below `main` reads process-wide environment state.
//!
//! Only report settings can fail a run here. Notification settings
//! (`webhook`, `report_url`, `timeout_secs`) are carried as given and checked
//! by the [`Notifier`](crate::notify::Notifier) after the report is written.
//!
//! # YAML format
//!
//! ```yaml
//! output_path: site/index.html
//! webhook: https://oapi.dingtalk.com/robot/send?access_token=abc
//! report_url: https://news.example.org/index.html
//! records: news.json
//! timeout_secs: 5
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, instrument};

use crate::cli::Cli;
use crate::errors::DigestError;
use crate::models::RunContext;

pub const DEFAULT_OUTPUT_PATH: &str = "ai-news-agent/index.html";
pub const DEFAULT_REPORT_URL: &str =
    "https://example.github.io/ai-news-agent/ai-news-agent/index.html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Optional settings read from a YAML file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output_path: Option<PathBuf>,
    pub webhook: Option<String>,
    pub report_url: Option<String>,
    pub records: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, DigestError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| DigestError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&raw)
            .map_err(|e| DigestError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub output_path: PathBuf,
    pub notify_endpoint: Option<String>,
    pub report_url: String,
    pub records_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl DigestConfig {
    /// Resolve configuration from the CLI, loading the YAML file it names.
    pub async fn load(cli: &Cli) -> Result<Self, DigestError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(cli, file))
    }

    /// Merge CLI values over file values over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let output_path = cli
            .output_path
            .clone()
            .or(file.output_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        // An empty webhook value means "not configured", same as an unset one.
        let notify_endpoint = cli
            .webhook
            .clone()
            .or(file.webhook)
            .filter(|w| !w.trim().is_empty());

        let report_url = cli
            .report_url
            .clone()
            .or(file.report_url)
            .unwrap_or_else(|| DEFAULT_REPORT_URL.to_string());

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = Self {
            output_path,
            notify_endpoint,
            report_url,
            records_path: cli.records.clone().or(file.records),
            timeout: Duration::from_secs(timeout_secs),
        };
        debug!(
            output_path = %config.output_path.display(),
            notifications = config.notify_endpoint.is_some(),
            ?config.records_path,
            "Resolved configuration"
        );
        config
    }

    pub fn run_context(&self, run_date: NaiveDate) -> RunContext {
        RunContext {
            run_date,
            output_path: self.output_path.clone(),
            notify_endpoint: self.notify_endpoint.clone(),
            report_url: self.report_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            output_path: None,
            webhook: None,
            report_url: None,
            records: None,
            timeout_secs: None,
            config: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = DigestConfig::resolve(&bare_cli(), FileConfig::default());

        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(config.notify_endpoint.is_none());
        assert_eq!(config.report_url, DEFAULT_REPORT_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.records_path.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::from_yaml(
            "output_path: from-file.html\ntimeout_secs: 9\nreport_url: https://file.example/r.html\n",
        )
        .unwrap();
        let mut cli = bare_cli();
        cli.output_path = Some(PathBuf::from("from-cli.html"));

        let config = DigestConfig::resolve(&cli, file);
        assert_eq!(config.output_path, PathBuf::from("from-cli.html"));
        assert_eq!(config.timeout, Duration::from_secs(9));
        assert_eq!(config.report_url, "https://file.example/r.html");
    }

    #[test]
    fn test_empty_webhook_disables_notifications() {
        let mut cli = bare_cli();
        cli.webhook = Some("  ".to_string());

        let config = DigestConfig::resolve(&cli, FileConfig::default());
        assert!(config.notify_endpoint.is_none());
    }

    #[test]
    fn test_malformed_notification_settings_do_not_fail_resolution() {
        let mut cli = bare_cli();
        cli.webhook = Some("oapi.dingtalk.com/robot/send?access_token=x".to_string());
        cli.report_url = Some("not a url".to_string());
        cli.timeout_secs = Some(0);

        let config = DigestConfig::resolve(&cli, FileConfig::default());
        assert_eq!(
            config.notify_endpoint.as_deref(),
            Some("oapi.dingtalk.com/robot/send?access_token=x")
        );
        assert_eq!(config.report_url, "not a url");
        assert_eq!(config.timeout, Duration::ZERO);
    }

    #[test]
    fn test_unknown_yaml_key_rejected() {
        assert!(FileConfig::from_yaml("outputpath: x.html\n").is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let file = FileConfig::from_yaml("\n").unwrap();
        assert!(file.output_path.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_config_error() {
        let err = FileConfig::load(Path::new("/definitely/not/here.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn test_run_context_carries_config() {
        let mut cli = bare_cli();
        cli.webhook = Some("https://oapi.dingtalk.com/robot/send?access_token=t".to_string());
        let config = DigestConfig::resolve(&cli, FileConfig::default());

        let date = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let ctx = config.run_context(date);
        assert_eq!(ctx.run_date, date);
        assert_eq!(
            ctx.notify_endpoint.as_deref(),
            Some("https://oapi.dingtalk.com/robot/send?access_token=t")
        );
    }
}
