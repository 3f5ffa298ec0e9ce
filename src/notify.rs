//! DingTalk webhook notification.
//!
//! After the report is written, the headline record is pushed to a DingTalk
//! robot as a markdown message linking back to the full report. Delivery is
//! best-effort: every failure, including a malformed webhook or report link
//! and an HTTP client that cannot be built, is folded into
//! [`NotifyOutcome::DeliveryFailed`] and never aborts the run.
//!
//! # Envelope
//!
//! ```json
//! {
//!   "msgtype": "markdown",
//!   "markdown": { "title": "今日 AI 简报", "text": "### ..." }
//! }
//! ```
//!
//! DingTalk acknowledges with HTTP 200 even for rejected messages and reports
//! the problem as a non-zero `errcode` in the body, so both the status and the
//! body are inspected.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

use crate::models::{NewsRecord, RunContext};
use crate::utils::{parse_http_url, truncate_for_log};

/// Title of the pushed message, shown in chat previews.
pub const MESSAGE_TITLE: &str = "今日 AI 简报";

/// Result of a single notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No endpoint configured; nothing was sent.
    Skipped,
    /// The endpoint accepted the message.
    Delivered,
    /// Bad notification settings, transport error, timeout, or rejection by
    /// the endpoint.
    DeliveryFailed(String),
}

impl fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyOutcome::Skipped => f.write_str("skipped"),
            NotifyOutcome::Delivered => f.write_str("delivered"),
            NotifyOutcome::DeliveryFailed(reason) => write!(f, "delivery failed: {reason}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DingTalkMessage {
    pub msgtype: &'static str,
    pub markdown: MarkdownBody,
}

#[derive(Debug, Serialize)]
pub struct MarkdownBody {
    pub title: &'static str,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct DingTalkReply {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// Pushes the run's headline to a webhook.
///
/// Construction never fails; the HTTP client is only built once there is an
/// endpoint to call.
#[derive(Debug, Clone)]
pub struct Notifier {
    timeout: Duration,
    run_date: NaiveDate,
    report_url: String,
}

impl Notifier {
    pub fn new(ctx: &RunContext, timeout: Duration) -> Self {
        Self {
            timeout,
            run_date: ctx.run_date,
            report_url: ctx.report_url.clone(),
        }
    }

    /// Build the condensed message for the first record, if any.
    pub fn build_message(&self, records: &[NewsRecord], report_url: &Url) -> Option<DingTalkMessage> {
        let first = records.first()?;
        let text = format!(
            "### 🤖 今日 AI 行业简报 ({date})\n\n\
             **🔥 核心消息：**\n> {headline}\n\n\
             **💡 大白话解释：**\n{explanation}\n\n\
             👉 [点击查看完整百科简报]({url})",
            date = self.run_date.format("%Y-%m-%d"),
            headline = first.title,
            explanation = first.plain_explanation,
            url = report_url,
        );
        Some(DingTalkMessage {
            msgtype: "markdown",
            markdown: MarkdownBody {
                title: MESSAGE_TITLE,
                text,
            },
        })
    }

    /// Send the headline to `endpoint`. Performs at most one HTTP call.
    #[instrument(level = "info", skip_all)]
    pub async fn notify(&self, records: &[NewsRecord], endpoint: Option<&str>) -> NotifyOutcome {
        let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) else {
            info!("No webhook configured; skipping notification");
            return NotifyOutcome::Skipped;
        };

        let endpoint = match parse_http_url("webhook", endpoint) {
            Ok(url) => url,
            Err(reason) => return failed(reason, "Webhook is not a usable URL"),
        };
        let report_url = match parse_http_url("report_url", &self.report_url) {
            Ok(url) => url,
            Err(reason) => return failed(reason, "Report link is not a usable URL"),
        };
        if self.timeout.is_zero() {
            return failed(
                "timeout_secs must be greater than zero".to_string(),
                "Webhook timeout is not usable",
            );
        }

        let Some(message) = self.build_message(records, &report_url) else {
            return failed("no records to announce".to_string(), "Nothing to announce");
        };

        let client = match Client::builder().timeout(self.timeout).build() {
            Ok(client) => client,
            Err(e) => return failed(format!("http client: {e}"), "Failed to build HTTP client"),
        };

        let host = endpoint.host_str().unwrap_or("-").to_string();
        let response = match client.post(endpoint).json(&message).send().await {
            Ok(response) => response,
            Err(e) => return failed(describe(e), "Webhook call failed"),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let reason = format!("failed to read response body: {}", describe(e));
                warn!(%status, %host, %reason, "Webhook response could not be read");
                return NotifyOutcome::DeliveryFailed(reason);
            }
        };

        if !status.is_success() {
            let reason = format!("HTTP {status}");
            warn!(
                %status,
                %host,
                body = %truncate_for_log(&body, 200),
                "Webhook rejected notification"
            );
            return NotifyOutcome::DeliveryFailed(reason);
        }

        match serde_json::from_str::<DingTalkReply>(&body) {
            Ok(reply) if reply.errcode != 0 => {
                let reason = format!("errcode {}: {}", reply.errcode, reply.errmsg);
                warn!(errcode = reply.errcode, errmsg = %reply.errmsg, %host, "Webhook reported an error");
                NotifyOutcome::DeliveryFailed(reason)
            }
            _ => {
                info!(%status, %host, "Notification delivered");
                NotifyOutcome::Delivered
            }
        }
    }
}

fn failed(reason: String, message: &str) -> NotifyOutcome {
    warn!(%reason, "{message}");
    NotifyOutcome::DeliveryFailed(reason)
}

fn describe(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else {
        // Strip the URL: it carries the robot's access token.
        e.without_url().to_string()
    }
}
