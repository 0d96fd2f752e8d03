//! Article record as served by the backend.
//!
//! The backend is not consistent about which field carries the summary
//! text or the byline. Resolution happens once, at deserialization:
//!
//! - description: `description`, then `summary`, then `content`
//! - authors: `authors`, then `author`, then `writer`
//!
//! Blank strings count as absent everywhere.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNTITLED: &str = "No Title";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawArticle", rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub authors: Option<String>,
    /// Creation time exactly as the server sent it (normalised to a string).
    pub created_at: Option<String>,
}

impl Article {
    /// Title for display, falling back to a placeholder.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Creation time as epoch milliseconds. Missing or unparseable values
    /// sort as epoch 0.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at_in(&Local)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }

    /// Creation time seen from `tz`. Zone-less values are wall-clock time
    /// in `tz`.
    pub fn created_at_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.created_at
            .as_deref()
            .and_then(|raw| parse_timestamp_in(raw, tz))
    }

    /// Local calendar date of creation, if known.
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at_in(&Local).map(|dt| dt.date_naive())
    }

    /// Case-insensitive substring match on title, description and authors.
    ///
    /// `needle` must already be lowercased. An empty needle matches.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [
            self.title.as_deref(),
            self.description.as_deref(),
            self.authors.as_deref(),
        ]
        .into_iter()
        .any(|field| field.unwrap_or("").to_lowercase().contains(needle))
    }
}

/// Human readable creation time in local time.
pub fn format_date(raw: Option<&str>) -> String {
    format_date_in(raw, &Local)
}

pub fn format_date_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match raw.and_then(|raw| parse_timestamp_in(raw, tz)) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "Unknown".to_string(),
    }
}

/// Parse the timestamp shapes the backend has been seen to produce.
///
/// The backend stores `LocalDateTime`, so zone-less date-times are wall-clock
/// time in `tz`. Values carrying an offset keep their instant.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    // Wall-clock times skipped by a DST jump have no instant; treat as unknown.
    tz.from_local_datetime(&naive).earliest()
}

/// [`parse_timestamp_in`] for the local time zone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    parse_timestamp_in(raw, &Local)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    authors: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    writer: Option<String>,
    #[serde(default)]
    created_at: Option<Value>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Self {
            id: raw.id,
            title: non_blank(raw.title),
            link: non_blank(raw.link),
            description: first_non_blank([raw.description, raw.summary, raw.content]),
            authors: first_non_blank([raw.authors, raw.author, raw.writer]),
            created_at: raw.created_at.as_ref().and_then(normalize_timestamp),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(non_blank)
}

/// Jackson may emit `LocalDateTime` as a string, as epoch millis, or as a
/// `[y, m, d, h, min, s, nanos]` array depending on server settings.
fn normalize_timestamp(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(Some(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339()),
        Value::Array(parts) => {
            let nums: Vec<u32> = parts
                .iter()
                .map(|p| p.as_u64().and_then(|n| u32::try_from(n).ok()))
                .collect::<Option<_>>()?;
            let part = |i: usize| nums.get(i).copied().unwrap_or(0);
            if nums.len() < 3 {
                return None;
            }
            Some(format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
                part(0),
                part(1),
                part(2),
                part(3),
                part(4),
                part(5),
                part(6)
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn parse(json: &str) -> Article {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn blank_fields_are_absent() {
        let article = parse(r#"{"id": 1, "title": "  ", "authors": "", "createdAt": null}"#);
        assert_eq!(article.title, None);
        assert_eq!(article.authors, None);
        assert_eq!(article.created_at, None);
        assert_eq!(article.display_title(), UNTITLED);
    }

    #[test]
    fn description_falls_back_to_summary_then_content() {
        let article = parse(r#"{"id": 1, "description": " ", "summary": "", "content": "body"}"#);
        assert_eq!(article.description.as_deref(), Some("body"));

        let article = parse(r#"{"id": 1, "summary": "short", "content": "body"}"#);
        assert_eq!(article.description.as_deref(), Some("short"));
    }

    #[test]
    fn authors_fall_back_to_author_then_writer() {
        let article = parse(r#"{"id": 1, "writer": "W. Riter"}"#);
        assert_eq!(article.authors.as_deref(), Some("W. Riter"));

        let article = parse(r#"{"id": 1, "authors": "A, B", "author": "C"}"#);
        assert_eq!(article.authors.as_deref(), Some("A, B"));
    }

    #[test]
    fn missing_created_at_is_epoch_zero() {
        let article = parse(r#"{"id": 7}"#);
        assert_eq!(article.created_at_millis(), 0);
    }

    #[test]
    fn parses_local_date_time_without_zone() {
        let article = parse(r#"{"id": 1, "createdAt": "2024-05-01T10:00:00.123456"}"#);
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 123)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .timestamp_millis();
        assert_eq!(article.created_at_millis(), expected);
    }

    #[test]
    fn zone_less_time_is_wall_clock_in_target_zone() {
        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        let article = parse(r#"{"id": 1, "createdAt": "2024-05-10T00:30:00"}"#);

        let dt = article.created_at_in(&new_york).unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(
            format_date_in(article.created_at.as_deref(), &new_york),
            "2024-05-10 00:30"
        );
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp_in("2024-05-01T12:00:00+02:00", &Utc).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:00:00+00:00");

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(
            format_date_in(Some("2024-05-10T00:30:00Z"), &new_york),
            "2024-05-09 20:30"
        );
    }

    #[test]
    fn array_timestamp_is_normalized() {
        let article = parse(r#"{"id": 1, "createdAt": [2024, 5, 1, 10, 30]}"#);
        assert_eq!(
            article.created_at.as_deref(),
            Some("2024-05-01T10:30:00.000000000")
        );
        assert!(article.created_at_millis() > 0);
    }

    #[test]
    fn garbage_timestamp_sorts_as_epoch() {
        let article = parse(r#"{"id": 1, "createdAt": "yesterday-ish"}"#);
        assert_eq!(article.created_at_millis(), 0);
        assert_eq!(format_date(article.created_at.as_deref()), "Unknown");
    }

    #[test]
    fn matches_is_case_insensitive_over_three_fields() {
        let article = Article {
            id: 1,
            title: Some("Quantum Dots".into()),
            description: Some("A study of light".into()),
            authors: Some("Jane Smith".into()),
            ..Default::default()
        };
        assert!(article.matches("quantum"));
        assert!(article.matches("light"));
        assert!(article.matches("smith"));
        assert!(!article.matches("nature"));
        assert!(article.matches(""));
    }

    #[test]
    fn link_is_not_searched() {
        let article = Article {
            id: 1,
            link: Some("https://example.com/smith".into()),
            ..Default::default()
        };
        assert!(!article.matches("smith"));
    }
}
