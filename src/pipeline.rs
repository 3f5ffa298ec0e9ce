//! The provider → renderer → notifier run.
//!
//! Stages execute strictly in sequence. A failure before or during the report
//! write aborts the run; the notification outcome is recorded but never turns
//! a written report into a failed run.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::config::DigestConfig;
use crate::errors::DigestError;
use crate::models::RunContext;
use crate::notify::{Notifier, NotifyOutcome};
use crate::outputs::{html, writer};
use crate::sources::{JsonFileSource, NewsSource, StaticSource};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub record_count: usize,
    pub output_path: PathBuf,
    pub notification: NotifyOutcome,
}

/// Run the digest with the source selected by `config`.
pub async fn execute(config: &DigestConfig, run_date: NaiveDate) -> Result<RunReport, DigestError> {
    let ctx = config.run_context(run_date);
    let notifier = Notifier::new(&ctx, config.timeout);

    match &config.records_path {
        Some(path) => run(&JsonFileSource::new(path), &ctx, &notifier).await,
        None => run(&StaticSource::default(), &ctx, &notifier).await,
    }
}

/// Provide, render, write, then notify.
#[instrument(
    level = "info",
    skip_all,
    fields(source = source.name(), run_date = %ctx.run_date, path = %ctx.output_path.display())
)]
pub async fn run<S: NewsSource>(
    source: &S,
    ctx: &RunContext,
    notifier: &Notifier,
) -> Result<RunReport, DigestError> {
    let records = source.provide().await?;
    if records.is_empty() {
        return Err(DigestError::SourceUnavailable(format!(
            "source `{}` returned no records",
            source.name()
        )));
    }
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }
    info!(count = records.len(), "Records ready");

    let document = html::render(&records, ctx.run_date);
    writer::write_report(&ctx.output_path, document).await?;

    let notification = notifier
        .notify(&records, ctx.notify_endpoint.as_deref())
        .await;
    if let NotifyOutcome::DeliveryFailed(reason) = &notification {
        warn!(%reason, "Notification failed; report was still written");
    }

    Ok(RunReport {
        record_count: records.len(),
        output_path: ctx.output_path.clone(),
        notification,
    })
}
