//! Command-line interface definitions for the digest.
//!
//! Running the binary without arguments performs a full run with defaults.
//! Every option can also be supplied through an environment variable, which
//! is how a scheduled job usually configures the webhook.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the digest.
///
/// # Examples
///
/// ```sh
/// # Render the built-in digest, no notification
/// ai_news_digest
///
/// # Render records from a file and push to DingTalk
/// DINGTALK_WEBHOOK=https://oapi.dingtalk.com/robot/send?access_token=... \
///     ai_news_digest --records ./news.json -o ./site/index.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Where the HTML report is written
    #[arg(short, long, env = "DIGEST_OUTPUT_PATH")]
    pub output_path: Option<PathBuf>,

    /// DingTalk robot webhook; notifications are skipped when unset
    #[arg(long, env = "DINGTALK_WEBHOOK")]
    pub webhook: Option<String>,

    /// Public URL of the published report, linked from the notification
    #[arg(long, env = "DIGEST_REPORT_URL")]
    pub report_url: Option<String>,

    /// JSON file with news records (defaults to the built-in list)
    #[arg(short, long, env = "DIGEST_RECORDS")]
    pub records: Option<PathBuf>,

    /// Timeout for the webhook call, in seconds
    #[arg(long, env = "DIGEST_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "--output-path",
            "./site/index.html",
            "--timeout-secs",
            "3",
        ]);

        assert_eq!(cli.output_path, Some(PathBuf::from("./site/index.html")));
        assert_eq!(cli.timeout_secs, Some(3));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "-o",
            "/tmp/index.html",
            "-r",
            "/tmp/news.json",
            "-c",
            "/tmp/digest.yaml",
        ]);

        assert_eq!(cli.output_path, Some(PathBuf::from("/tmp/index.html")));
        assert_eq!(cli.records, Some(PathBuf::from("/tmp/news.json")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/digest.yaml")));
    }

    #[test]
    fn test_cli_accepts_no_arguments() {
        assert!(Cli::try_parse_from(["ai_news_digest"]).is_ok());
    }
}
