use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default reviewer name when the store omits one
pub const DEFAULT_USER_NAME: &str = "Anonymous User";

/// Default app version recorded against a review
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Review record as delivered by the store collaborator.
///
/// Deserialization never fails on a single bad field: a score that is not an
/// integral number within `i64` range is treated as absent, and so is
/// non-string content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(default, alias = "id", deserialize_with = "lenient_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, alias = "thumbsUp", deserialize_with = "lenient_count")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbs_up_count: Option<u64>,
    #[serde(default, alias = "date", deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    #[serde(default, alias = "version", deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_created_version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<String>,
}

/// Normalized review row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    pub id: String,
    pub content: String,
    pub score: Option<i64>, // None rows are skipped by every score statistic
    pub user_name: String,
    pub thumbs_up: u64,
    pub date: Option<String>,
    pub version: String,
    pub reply_content: String,
}

impl From<&RawReview> for ReviewRow {
    fn from(raw: &RawReview) -> Self {
        Self {
            id: raw.review_id.clone().unwrap_or_default(),
            content: raw.content.clone().unwrap_or_default(),
            score: raw.score,
            user_name: raw
                .user_name
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            thumbs_up: raw.thumbs_up_count.unwrap_or(0),
            date: raw.at.clone(),
            version: raw
                .review_created_version
                .clone()
                .unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            reply_content: raw.reply_content.clone().unwrap_or_default(),
        }
    }
}

/// Order in which the store is asked to return reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Rating,
    Relevance,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Rating => "rating",
            SortOrder::Relevance => "relevance",
        }
    }
}

impl From<&str> for SortOrder {
    /// Unknown names fall back to `Newest`
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "rating" => SortOrder::Rating,
            "relevance" => SortOrder::Relevance,
            _ => SortOrder::Newest,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a store timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.fff]` and a
/// bare `YYYY-MM-DD` (read as midnight). Offsets are dropped after conversion
/// to the local wall time the store reported.
pub fn parse_review_timestamp(raw: &str) -> crate::Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_score<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        _ => None,
    })
}
