//! # AI News Digest
//!
//! Renders a daily AI news briefing to a static HTML page and pushes the top
//! story to a DingTalk robot webhook.
//!
//! ## Usage
//!
//! ```sh
//! # Built-in records, report at ai-news-agent/index.html, no push
//! ai_news_digest
//!
//! # Records from a file, pushed to DingTalk
//! DINGTALK_WEBHOOK=https://oapi.dingtalk.com/robot/send?access_token=... \
//!     ai_news_digest --records news.json
//! ```
//!
//! ## Architecture
//!
//! One sequential run per invocation:
//! 1. **Source**: a [`sources::NewsSource`] supplies the records
//! 2. **Render**: [`outputs::html::render`] builds the page, which is then
//!    atomically written by [`outputs::writer::write_report`]
//! 3. **Notify**: [`notify::Notifier`] pushes the headline (best-effort)
//!
//! The process exits non-zero only when the report cannot be produced; a
//! failed notification is logged and the run still succeeds.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod models;
mod notify;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use config::DigestConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "ai_news_digest starting up");

    let args = Cli::parse();
    debug!(?args.output_path, ?args.records, ?args.config, "Parsed CLI arguments");

    let config = match DigestConfig::load(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration rejected");
            return Err(e.into());
        }
    };

    let run_date = Local::now().date_naive();
    let report = match pipeline::execute(&config, run_date).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Digest run failed; no report was produced");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        records = report.record_count,
        path = %report.output_path.display(),
        notification = %report.notification,
        "Execution complete"
    );

    Ok(())
}
