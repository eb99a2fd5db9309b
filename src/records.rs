//! Spreadsheet-sourced records.
//!
//! The content API returns one JSON object per spreadsheet row. Cells come back
//! as whatever type the sheet holds (a numeric `id`, a date cell, an empty
//! cell), so every field decodes leniently into `Option<String>` and nothing is
//! rejected at decode time. Validation happens later, at the render gate, via
//! [`PostRecord::validate`] and [`ProjectRecord::validate`]: a record missing
//! its identity fields is skipped on its own without affecting its siblings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("{kind} record is missing {}", .missing.join(", "))]
    MissingFields {
        kind: RecordKind,
        missing: Vec<&'static str>,
    },
    #[error("{kind} record #{index} is not an object")]
    NotAnObject { kind: RecordKind, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Post,
    Project,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Post => f.write_str("blog post"),
            RecordKind::Project => f.write_str("project"),
        }
    }
}

/// One row of the `Blogs` sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    /// Trusted HTML body, rendered verbatim on the detail page.
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    /// Comma-separated category names.
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_published: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
}

/// A post that passed the render gate. Borrowed fields are non-blank.
#[derive(Debug, Clone, Copy)]
pub struct ValidPost<'a> {
    /// Trimmed slug, ready for URL construction.
    pub slug: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub record: &'a PostRecord,
}

impl PostRecord {
    pub fn trimmed_slug(&self) -> Option<&str> {
        non_blank(&self.slug).map(str::trim)
    }

    /// Publication timestamp, `None` when absent or unparseable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.date_published.as_deref().and_then(parse_date)
    }

    /// Trimmed, non-empty category tokens in field order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        split_list(self.category.as_deref())
    }

    pub fn validate(&self) -> Result<ValidPost<'_>, RecordError> {
        match (
            self.trimmed_slug(),
            non_blank(&self.title),
            non_blank(&self.summary),
        ) {
            (Some(slug), Some(title), Some(summary)) => Ok(ValidPost {
                slug,
                title,
                summary,
                record: self,
            }),
            (slug, title, summary) => {
                let missing = [("slug", slug), ("title", title), ("summary", summary)]
                    .into_iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(RecordError::MissingFields {
                    kind: RecordKind::Post,
                    missing,
                })
            }
        }
    }
}

/// One row of the `Projects` sheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Comma-separated tag names.
    #[serde(default, deserialize_with = "lenient_string")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidProject<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub record: &'a ProjectRecord,
}

impl ProjectRecord {
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        split_list(self.tags.as_deref())
    }

    /// Trimmed live demo URL, if one is set.
    pub fn live_link(&self) -> Option<&str> {
        non_blank(&self.live_url).map(str::trim)
    }

    /// Trimmed repository URL, if one is set.
    pub fn repo_link(&self) -> Option<&str> {
        non_blank(&self.repo_url).map(str::trim)
    }

    pub fn validate(&self) -> Result<ValidProject<'_>, RecordError> {
        match (non_blank(&self.id), non_blank(&self.title)) {
            (Some(id), Some(title)) => Ok(ValidProject {
                id: id.trim(),
                title,
                record: self,
            }),
            (id, title) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("id");
                }
                if title.is_none() {
                    missing.push("title");
                }
                Err(RecordError::MissingFields {
                    kind: RecordKind::Project,
                    missing,
                })
            }
        }
    }
}

/// Decode the elements of an API array into records.
///
/// Elements that are not JSON objects are logged and dropped; everything else
/// decodes, since every field is optional.
pub fn decode_all<T: DeserializeOwned>(items: Vec<Value>, kind: RecordKind) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!("{}", RecordError::NotAnObject { kind, index });
                return None;
            }
            match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("skipping {kind} record #{index}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Split a comma-separated cell into trimmed, non-empty tokens.
pub fn split_list(field: Option<&str>) -> impl Iterator<Item = &str> {
    field
        .into_iter()
        .flat_map(|f| f.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Parse a spreadsheet date cell.
///
/// Accepts RFC 3339, naive ISO date-times and dates, slash-separated dates,
/// RFC 2822, and long-form English dates. Naive values are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y",
    ];

    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn post_decodes_camel_case_fields() {
        let post: PostRecord = serde_json::from_value(json!({
            "slug": "hello",
            "title": "Hello",
            "summary": "Hi",
            "datePublished": "2024-03-01",
            "imageUrl": "a.png",
            "unknownColumn": 42
        }))
        .unwrap();
        assert_eq!(post.slug.as_deref(), Some("hello"));
        assert_eq!(post.date_published.as_deref(), Some("2024-03-01"));
        assert_eq!(post.image_url.as_deref(), Some("a.png"));
        assert_eq!(post.category, None);
    }

    #[test]
    fn numeric_and_null_cells_decode_leniently() {
        let project: ProjectRecord = serde_json::from_value(json!({
            "id": 7,
            "title": "Seven",
            "liveUrl": null,
            "tags": true
        }))
        .unwrap();
        assert_eq!(project.id.as_deref(), Some("7"));
        assert_eq!(project.live_url, None);
        assert_eq!(project.tags.as_deref(), Some("true"));
    }

    #[test]
    fn validate_post_reports_every_missing_field() {
        let post = PostRecord {
            slug: Some("  ".into()),
            summary: Some("s".into()),
            ..Default::default()
        };
        let err = post.validate().unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingFields {
                kind: RecordKind::Post,
                missing: vec!["slug", "title"],
            }
        );
        assert_eq!(err.to_string(), "blog post record is missing slug, title");
    }

    #[test]
    fn validate_post_trims_slug() {
        let post = PostRecord {
            slug: Some(" my-post \n".into()),
            title: Some("T".into()),
            summary: Some("S".into()),
            ..Default::default()
        };
        assert_eq!(post.validate().unwrap().slug, "my-post");
    }

    #[test]
    fn validate_project_requires_id_and_title() {
        let project = ProjectRecord {
            title: Some("T".into()),
            ..Default::default()
        };
        assert!(matches!(
            project.validate(),
            Err(RecordError::MissingFields { kind: RecordKind::Project, ref missing }) if missing == &vec!["id"]
        ));
    }

    #[test]
    fn project_links_skip_blank_values() {
        let project = ProjectRecord {
            live_url: Some("   ".into()),
            repo_url: Some(" https://git.example/r ".into()),
            ..Default::default()
        };
        assert_eq!(project.live_link(), None);
        assert_eq!(project.repo_link(), Some("https://git.example/r"));
    }

    #[test]
    fn decode_all_skips_non_objects() {
        let items = vec![json!({"slug": "a"}), json!("junk"), json!(3), json!({"slug": "b"})];
        let posts: Vec<PostRecord> = decode_all(items, RecordKind::Post);
        let slugs: Vec<_> = posts.iter().filter_map(|p| p.slug.as_deref()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn split_list_drops_empty_tokens() {
        let tokens: Vec<_> = split_list(Some("A,, B ,")).collect();
        assert_eq!(tokens, vec!["A", "B"]);
        assert_eq!(split_list(Some("   ")).count(), 0);
        assert_eq!(split_list(None).count(), 0);
    }

    #[test]
    fn parse_date_accepts_sheet_formats() {
        for raw in [
            "2024-01-05",
            "2024-01-05T10:30:00.000Z",
            "2024-01-05T10:30:00+06:00",
            "2024-01-05 10:30:00",
            "2024/01/05",
            "01/05/2024",
            "January 05, 2024",
            "Fri, 05 Jan 2024 10:30:00 +0000",
        ] {
            let dt = parse_date(raw).unwrap_or_else(|| panic!("failed to parse {raw}"));
            assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 5), "{raw}");
        }
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }
}
