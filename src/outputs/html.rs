//! HTML report rendering.
//!
//! [`render`] is a pure function of the records and the run date: identical
//! input always yields byte-identical output. Every free-text field passes
//! through [`escape_html`], so a record containing markup characters cannot
//! change the structure of the page.
//!
//! # Layout
//!
//! ```text
//! header    run date
//! main
//!   section.records
//!     article.record × N   source, date, title, summary, plain explanation
//!   aside.glossary         fixed term/definition pairs
//! ```

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::models::NewsRecord;
use crate::utils::escape_html;

/// Heading shown in the masthead.
pub const REPORT_HEADING: &str = "AI 行业“大白话”日报";

/// Document title, followed by the run date.
pub const DOCUMENT_TITLE: &str = "AI 智能体百科简报";

/// Static glossary rendered beside the records.
pub const GLOSSARY: &[(&str, &str)] = &[
    ("Agent (智能体)", "不仅能说话，还能自主干活的 AI。"),
    ("Google (谷歌)", "全球搜索引擎老大。"),
    ("OpenAI", "开发了 ChatGPT 的公司。"),
];

const STYLE: &str = r#"
      body { margin: 0; font-family: "Noto Sans SC", system-ui, sans-serif; background: #f0f4f8; color: #1e293b; }
      .masthead { background: #fff; border-bottom: 4px solid #3b82f6; box-shadow: 0 2px 6px rgba(0,0,0,.08); }
      .masthead-inner { max-width: 72rem; margin: 0 auto; padding: 1rem; display: flex; align-items: center; justify-content: space-between; }
      .masthead h1 { margin: 0; font-size: 1.25rem; color: #1e3a8a; }
      .run-date { margin: 0; font-weight: bold; color: #334155; }
      main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; display: grid; grid-template-columns: 3fr 1fr; gap: 2rem; }
      @media (max-width: 64rem) { main { grid-template-columns: 1fr; } }
      .records { display: flex; flex-direction: column; gap: 2rem; }
      .record { background: #fff; border: 1px solid #e2e8f0; border-radius: 1rem; padding: 1.5rem; }
      .record-meta { display: flex; justify-content: space-between; align-items: center; margin-bottom: .75rem; }
      .record-source { background: #dbeafe; color: #2563eb; font-size: .75rem; font-weight: bold; padding: .25rem .5rem; border-radius: .25rem; }
      .record-date { color: #94a3b8; font-size: .75rem; }
      .record-title { margin: 0 0 .75rem; font-size: 1.25rem; color: #0f172a; }
      .record-summary { color: #475569; line-height: 1.6; }
      .explanation-box { border-left: 4px solid #3b82f6; background: #eff6ff; padding: 12px; margin: 10px 0; border-radius: 0 8px 8px 0; }
      .explanation-label { margin: 0 0 .25rem; font-size: .875rem; font-weight: bold; color: #1e40af; }
      .record-explanation { margin: 0; font-size: .875rem; color: #1d4ed8; }
      .glossary { background: #fff; border-top: 4px solid #3b82f6; border-radius: 1rem; padding: 1.5rem; align-self: start; position: sticky; top: 1rem; }
      .glossary h2 { margin-top: 0; font-size: 1.125rem; }
      .glossary dl { font-size: .75rem; }
      .glossary dt { font-weight: bold; margin-top: .75rem; }
      .glossary dd { margin: 0; }
"#;

/// Render the full report document.
#[instrument(level = "info", skip_all, fields(records = records.len(), run_date = %run_date))]
pub fn render(records: &[NewsRecord], run_date: NaiveDate) -> String {
    let date = run_date.format("%Y-%m-%d").to_string();
    let mut doc = String::with_capacity(8 * 1024 + records.len() * 1024);

    doc.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    doc.push_str("    <meta charset=\"UTF-8\">\n");
    doc.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    doc.push_str(&format!(
        "    <title>{} - {}</title>\n",
        DOCUMENT_TITLE, date
    ));
    doc.push_str(&format!("    <style>{}    </style>\n", STYLE));
    doc.push_str("</head>\n<body>\n");

    doc.push_str(&format!(
        concat!(
            "  <header class=\"masthead\">\n",
            "    <div class=\"masthead-inner\">\n",
            "      <h1>{}</h1>\n",
            "      <p class=\"run-date\">{}</p>\n",
            "    </div>\n",
            "  </header>\n",
        ),
        REPORT_HEADING, date
    ));

    doc.push_str("  <main>\n    <section class=\"records\">\n");
    for record in records {
        render_record(&mut doc, record);
    }
    doc.push_str("    </section>\n");

    render_glossary(&mut doc);
    doc.push_str("  </main>\n</body>\n</html>\n");

    debug!(bytes = doc.len(), "Rendered report");
    doc
}

fn render_record(doc: &mut String, record: &NewsRecord) {
    let date = record.published_date.format("%Y-%m-%d");
    doc.push_str(&format!(
        concat!(
            "      <article class=\"record\">\n",
            "        <div class=\"record-meta\">\n",
            "          <span class=\"record-source\">{source}</span>\n",
            "          <time class=\"record-date\" datetime=\"{date}\">{date}</time>\n",
            "        </div>\n",
            "        <h2 class=\"record-title\">{title}</h2>\n",
            "        <p class=\"record-summary\">{summary}</p>\n",
            "        <div class=\"explanation-box\">\n",
            "          <p class=\"explanation-label\">💡 通俗解释：</p>\n",
            "          <p class=\"record-explanation\">{explanation}</p>\n",
            "        </div>\n",
            "      </article>\n",
        ),
        source = escape_html(&record.source),
        date = date,
        title = escape_html(&record.title),
        summary = escape_html(&record.summary),
        explanation = escape_html(&record.plain_explanation),
    ));
}

fn render_glossary(doc: &mut String) {
    doc.push_str("    <aside class=\"glossary\">\n      <h2>📖 AI 小词典</h2>\n      <dl>\n");
    for (term, definition) in GLOSSARY {
        doc.push_str(&format!(
            "        <dt>{}</dt>\n        <dd>{}</dd>\n",
            escape_html(term),
            escape_html(definition)
        ));
    }
    doc.push_str("      </dl>\n    </aside>\n");
}
