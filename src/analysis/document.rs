//! Analysis document assembly

use std::collections::BTreeMap;

use serde::Serialize;

use super::ratings::RatingSummary;
use super::sentiment::Sentiment;
use super::table::ReviewTable;
use super::themes::ThemeResult;
use crate::Result;

/// Result of one review analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub average_rating: f64,
    pub rating_counts: BTreeMap<i64, usize>,
    pub sentiment_counts: BTreeMap<Sentiment, usize>,
    pub total_reviews: usize,
    pub themes: Vec<ThemeResult>,
}

impl AnalysisDocument {
    #[must_use]
    pub fn assemble(
        table: &ReviewTable,
        ratings: RatingSummary,
        sentiment_counts: BTreeMap<Sentiment, usize>,
        themes: Vec<ThemeResult>,
    ) -> Self {
        Self {
            average_rating: ratings.average_rating,
            rating_counts: ratings.rating_counts,
            sentiment_counts,
            total_reviews: table.len(),
            themes,
        }
    }

    /// Look up an emitted theme by its definition id (`performance`) or result id (`theme-performance`)
    #[must_use]
    pub fn theme(&self, id: &str) -> Option<&ThemeResult> {
        self.themes
            .iter()
            .find(|theme| theme.id == id || theme.id.strip_prefix("theme-") == Some(id))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
