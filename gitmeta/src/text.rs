//! Field rendering shared by the digest, thread and archive formatters.
//!
//! All helpers here are total: absent or malformed input renders as a
//! placeholder instead of failing.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of characters of a body kept in the digest.
pub const BODY_LIMIT: usize = 4000;

/// Appended to bodies cut at [`BODY_LIMIT`].
pub const TRUNCATION_MARKER: &str = "\n...[truncated]...";

/// Rendered for absent timestamps and descriptions.
pub const NOT_AVAILABLE: &str = "n/a";

/// Rendered for empty label/assignee lists and missing milestones.
pub const EMPTY_LIST: &str = "\u{2014}";

/// Rendered when no parent number can be found in a URL.
pub const UNKNOWN_NUMBER: &str = "?";

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)(?:$|[?#])").expect("trailing number pattern is valid"));

/// Extracts the trailing numeric path segment of an API URL.
///
/// Matches `/` followed by digits that end the string or precede a `?` or
/// `#`. Returns `"?"` when nothing matches.
///
/// # Examples
///
/// ```
/// use gitmeta::text::extract_number;
///
/// assert_eq!(extract_number("https://api.github.com/repos/o/r/issues/42"), "42");
/// assert_eq!(extract_number("https://api.github.com/repos/o/r"), "?");
/// ```
pub fn extract_number(url: &str) -> String {
    TRAILING_NUMBER
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNKNOWN_NUMBER.to_string(), |m| m.as_str().to_string())
}

/// Normalizes a GitHub timestamp to ISO-8601 UTC with milliseconds.
///
/// Absent or empty values render as `n/a`; values that are not RFC 3339 are
/// echoed unchanged.
pub fn format_timestamp(value: Option<&str>) -> String {
    match value {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| to_iso_millis(&parsed.with_timezone(&Utc)))
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Formats a UTC instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Cuts a body to [`BODY_LIMIT`] characters and appends the truncation marker.
///
/// Absent bodies render as the empty string.
pub fn truncate_body(body: Option<&str>) -> String {
    let Some(body) = body else {
        return String::new();
    };
    match body.char_indices().nth(BODY_LIMIT) {
        Some((cut, _)) => format!("{}{}", &body[..cut], TRUNCATION_MARKER),
        None => body.to_string(),
    }
}

/// Joins list items with `", "`, or renders an em dash when empty.
pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        items.join(", ")
    }
}

/// Returns the first `limit` characters of `text`.
pub(crate) fn clip(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_number_variants() {
        assert_eq!(extract_number("https://api.github.com/repos/o/r/pulls/7"), "7");
        assert_eq!(
            extract_number("https://api.github.com/repos/o/r/issues/15?foo=bar"),
            "15"
        );
        assert_eq!(extract_number("https://github.com/o/r/pull/3#discussion"), "3");
        assert_eq!(extract_number("https://api.github.com/repos/o/r/pulls/x"), "?");
        assert_eq!(extract_number(""), "?");
    }

    #[test]
    fn format_timestamp_normalizes_to_millis() {
        assert_eq!(
            format_timestamp(Some("2024-03-05T07:08:09Z")),
            "2024-03-05T07:08:09.000Z"
        );
        assert_eq!(
            format_timestamp(Some("2024-03-05T09:08:09+02:00")),
            "2024-03-05T07:08:09.000Z"
        );
    }

    #[test]
    fn format_timestamp_placeholders() {
        assert_eq!(format_timestamp(None), "n/a");
        assert_eq!(format_timestamp(Some("")), "n/a");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    }

    #[test]
    fn truncate_body_keeps_limit_verbatim() {
        let body = "a".repeat(BODY_LIMIT);
        assert_eq!(truncate_body(Some(&body)), body);
    }

    #[test]
    fn truncate_body_cuts_one_past_limit() {
        let body = format!("{}b", "a".repeat(BODY_LIMIT));
        let expected = format!("{}{}", "a".repeat(BODY_LIMIT), TRUNCATION_MARKER);
        assert_eq!(truncate_body(Some(&body)), expected);
    }

    #[test]
    fn truncate_body_counts_characters_not_bytes() {
        let body = "\u{e9}".repeat(BODY_LIMIT);
        assert_eq!(truncate_body(Some(&body)), body);
    }

    #[test]
    fn truncate_body_absent_is_empty() {
        assert_eq!(truncate_body(None), "");
    }

    #[test]
    fn join_or_dash_renders_placeholder() {
        assert_eq!(join_or_dash(&[]), "\u{2014}");
        assert_eq!(
            join_or_dash(&["bug".to_string(), "ui".to_string()]),
            "bug, ui"
        );
    }

    #[test]
    fn clip_respects_char_boundaries() {
        assert_eq!(clip("h\u{e9}llo", 2), "h\u{e9}");
        assert_eq!(clip("hi", 10), "hi");
    }
}
