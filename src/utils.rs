//! Small helpers shared across modules.
//!
//! - HTML escaping for free-text fields
//! - String truncation for log previews
//! - Output directory preparation
//! - Webhook/link URL validation

use quick_xml::escape::escape;
use std::borrow::Cow;
use std::io;
use std::path::Path;
use tracing::{debug, instrument};
use url::Url;

/// Escape `&`, `<`, `>`, `"` and `'` so text can sit inside element content or
/// a quoted attribute without changing the document structure.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Create the directory that will hold `path`, if it has one.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            debug!(dir = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Parse an absolute `http`/`https` URL.
///
/// The error is a human-readable reason prefixed with `key`, suitable for a
/// log line or a notification outcome.
pub fn parse_http_url(key: &str, raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("{key}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("{key}: unsupported scheme `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_reserved_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &apos;Jerry&apos;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_borrows_plain_text() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // Each of these characters is three bytes in UTF-8.
        let s = "智能体智能体";
        let result = truncate_for_log(s, 4);
        assert!(result.starts_with("智"));
        assert!(result.contains("…(+15 bytes)"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/index.html");

        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_parse_http_url_accepts_https() {
        let url = parse_http_url("webhook", " https://oapi.dingtalk.com/robot/send?access_token=t ")
            .unwrap();
        assert_eq!(url.host_str(), Some("oapi.dingtalk.com"));
    }

    #[test]
    fn test_parse_http_url_rejects_schemeless() {
        let err = parse_http_url("webhook", "oapi.dingtalk.com/robot/send").unwrap_err();
        assert!(err.starts_with("webhook: "));
    }

    #[test]
    fn test_parse_http_url_rejects_other_schemes() {
        assert_eq!(
            parse_http_url("report_url", "ftp://example.com/r.html").unwrap_err(),
            "report_url: unsupported scheme `ftp`"
        );
    }

    #[test]
    fn test_ensure_parent_dir_bare_filename() {
        assert!(ensure_parent_dir(Path::new("index.html")).is_ok());
    }
}
