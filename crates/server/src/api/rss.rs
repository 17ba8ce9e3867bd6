//! RSS 2.0 feed of recently seen results.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use scholar_watcher_core::SeenResult;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Restrict the feed to one keyword.
    #[serde(default)]
    pub kw: Option<String>,
    /// Max items; defaults to the configured feed size, clamped to 1..=1000.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/v1/rss
pub async fn feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let limit = params
        .limit
        .unwrap_or(state.config().watcher.rss_limit)
        .clamp(1, 1000);

    let results = state
        .store()
        .recent(params.kw.as_deref(), limit)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    let xml = build_feed(&results, params.kw.as_deref());
    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}

fn build_feed(results: &[SeenResult], kw: Option<&str>) -> String {
    let title = match kw {
        Some(kw) => format!("Scholar Watcher - {}", kw),
        None => "Scholar Watcher".to_string(),
    };

    let mut xml = String::with_capacity(512 + results.len() * 512);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\">\n<channel>\n");
    xml.push_str(&format!("<title>{}</title>\n", xml_escape(&title)));
    xml.push_str("<link>https://scholar.google.com/</link>\n");
    xml.push_str("<description>New academic results for watched keywords</description>\n");

    for result in results {
        xml.push_str("<item>\n");
        xml.push_str(&format!(
            "<title>{}</title>\n",
            xml_escape(&result.title)
        ));
        xml.push_str(&format!("<link>{}</link>\n", xml_escape(&result.url)));
        xml.push_str(&format!(
            "<description>{} ({}) [{}]</description>\n",
            xml_escape(&result.authors),
            xml_escape(&result.year),
            xml_escape(&result.kw_term),
        ));
        xml.push_str(&format!(
            "<guid isPermaLink=\"false\">{}</guid>\n",
            item_guid(result)
        ));
        xml.push_str(&format!(
            "<pubDate>{}</pubDate>\n",
            format_rfc2822(&result.first_seen)
        ));
        xml.push_str("</item>\n");
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

/// Stable per-item GUID, derived from the dedup identity of the row.
fn item_guid(result: &SeenResult) -> String {
    format!(
        "{:x}",
        md5::compute(format!("{}|{}", result.kw_term, result.fingerprint))
    )
}

fn format_rfc2822(ts: &DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_result(title: &str) -> SeenResult {
        SeenResult {
            kw_term: "graphs".to_string(),
            fingerprint: "abc123".to_string(),
            title: title.to_string(),
            url: "https://example.org/p1".to_string(),
            authors: "A. Author".to_string(),
            year: "2024".to_string(),
            first_seen: Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape("a & b < c > \"d\" 'e'"),
            "a &amp; b &lt; c &gt; &quot;d&quot; &apos;e&apos;"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn test_pub_date_format() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_rfc2822(&ts), "Wed, 15 Jan 2025 10:30:00 GMT");
    }

    #[test]
    fn test_guid_is_stable() {
        let result = sample_result("P1");
        assert_eq!(item_guid(&result), item_guid(&result));
        assert_eq!(item_guid(&result).len(), 32);
    }

    #[test]
    fn test_build_feed_structure() {
        let results = vec![sample_result("Attention & Graphs")];
        let xml = build_feed(&results, Some("graphs"));

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>Scholar Watcher - graphs</title>"));
        assert!(xml.contains("<title>Attention &amp; Graphs</title>"));
        assert!(xml.contains("<link>https://example.org/p1</link>"));
        assert!(xml.contains("<pubDate>Wed, 15 Jan 2025 10:30:00 GMT</pubDate>"));
        assert!(xml.ends_with("</channel>\n</rss>\n"));
    }

    #[test]
    fn test_build_feed_empty() {
        let xml = build_feed(&[], None);
        assert!(xml.contains("<title>Scholar Watcher</title>"));
        assert!(!xml.contains("<item>"));
    }
}
