//! Compiled-in record list.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use super::NewsSource;
use crate::errors::DigestError;
use crate::models::NewsRecord;

/// Returns a fixed list of records. Never fails.
#[derive(Debug, Clone)]
pub struct StaticSource {
    records: Vec<NewsRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<NewsRecord>) -> Self {
        Self { records }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(builtin_records())
    }
}

impl NewsSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    #[instrument(level = "info", skip_all)]
    async fn provide(&self) -> Result<Vec<NewsRecord>, DigestError> {
        debug!(count = self.records.len(), "Providing built-in records");
        Ok(self.records.clone())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn builtin_records() -> Vec<NewsRecord> {
    vec![
        NewsRecord::new(
            date(2026, 2, 19),
            "谷歌发布了更聪明的“大脑”：Gemini 3.1 Pro",
            "Google",
            "谷歌最近升级了他们的 AI 模型。这个新版本比以前聪明了一倍，能听懂更难的指令了。",
            "就像你的手机系统从 1.0 升级到了 3.1，它现在不仅跑得快，而且能听懂更难的指令了。",
        ),
        NewsRecord::new(
            date(2026, 2, 17),
            "机器人也能自己买东西了？Agentic Commerce 协议发布",
            "Stripe & OpenAI",
            "支付巨头 Stripe 和 OpenAI 联手制定了一个新规。以后，你的 AI 助手可以被你授权，\
             直接去网上帮你下单买东西。",
            "以前 AI 只能告诉你哪双鞋好看，现在你可以直接跟它说“帮我买这双鞋”，\
             它就能自己付钱下单送到你家。",
        ),
    ]
}
