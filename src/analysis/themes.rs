//! Keyword theme detection
//!
//! A theme is an ordered, declarative record: an id, a display name, a set of
//! lowercase keywords and a fixed confidence. A review belongs to a theme when
//! its lowercased content contains any keyword as a plain substring, so
//! "crash" also matches "crashed" and "ui" matches "build". Themes overlap
//! freely and are emitted in definition order.

use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ratings::mean_score;
use super::table::ReviewTable;
use crate::errors::ReviewScopeError;
use crate::models::ReviewRow;
use crate::Result;

lazy_static! {
    /// Built-in themes: performance, ui, features
    static ref BUILTIN_THEMES: Vec<ThemeDefinition> = vec![
        ThemeDefinition::new(
            "performance",
            "Performance",
            &["slow", "fast", "crash", "bug", "freeze", "loading"],
            0.8,
        ),
        ThemeDefinition::new(
            "ui",
            "User Interface",
            &["design", "interface", "ui", "layout", "look", "beautiful", "ugly"],
            0.7,
        ),
        ThemeDefinition::new(
            "features",
            "Features",
            &["feature", "functionality", "option", "missing", "need", "add"],
            0.75,
        ),
    ];
}

/// Mean score below which a theme counts as a pain point
pub const PAIN_THRESHOLD: f64 = 3.0;

/// Copy of the built-in theme definitions
#[must_use]
pub fn builtin_themes() -> Vec<ThemeDefinition> {
    BUILTIN_THEMES.clone()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub id: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub confidence: f64,
}

impl ThemeDefinition {
    pub fn new(id: &str, name: &str, keywords: &[&str], confidence: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            confidence,
        }
    }

    /// Whether already-lowercased content contains any keyword
    #[must_use]
    pub fn matches_folded(&self, folded_content: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| folded_content.contains(keyword.as_str()))
    }

    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        self.matches_folded(&content.to_lowercase())
    }

    /// Check the definition and lowercase its keywords
    pub fn normalized(mut self) -> Result<Self> {
        if self.id.trim().is_empty() {
            return Err(ReviewScopeError::InvalidConfig(
                "theme id must not be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ReviewScopeError::InvalidConfig(format!(
                "theme '{}' has an empty name",
                self.id
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ReviewScopeError::InvalidConfig(format!(
                "theme '{}' confidence {} is outside [0, 1]",
                self.id, self.confidence
            )));
        }
        if self.keywords.is_empty() {
            return Err(ReviewScopeError::InvalidConfig(format!(
                "theme '{}' has no keywords",
                self.id
            )));
        }
        for keyword in &mut self.keywords {
            if keyword.is_empty() || !keyword.is_ascii() {
                return Err(ReviewScopeError::InvalidConfig(format!(
                    "theme '{}' keyword {:?} must be non-empty ASCII",
                    self.id, keyword
                )));
            }
            keyword.make_ascii_lowercase();
        }
        Ok(self)
    }
}

/// Validate an ordered list of theme definitions
pub fn validate_themes(themes: Vec<ThemeDefinition>) -> Result<Vec<ThemeDefinition>> {
    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(themes.len());

    for theme in themes {
        let theme = theme.normalized()?;
        if !seen.insert(theme.id.clone()) {
            return Err(ReviewScopeError::InvalidConfig(format!(
                "duplicate theme id '{}'",
                theme.id
            )));
        }
        validated.push(theme);
    }

    Ok(validated)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Pain,
    Wow,
}

impl ThemeType {
    /// A theme without any scored review has no mean and is reported as `Wow`
    #[must_use]
    pub fn from_mean(mean: Option<f64>) -> Self {
        match mean {
            Some(mean) if mean < PAIN_THRESHOLD => ThemeType::Pain,
            _ => ThemeType::Wow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    pub confidence: f64,
    pub review_count: usize,
    pub summary: String,
    pub reviews: Vec<String>,
}

/// Runs an ordered set of theme definitions over a review table
#[derive(Debug, Clone)]
pub struct ThemeDetector {
    definitions: Vec<ThemeDefinition>,
}

impl Default for ThemeDetector {
    fn default() -> Self {
        Self::new(builtin_themes())
    }
}

impl ThemeDetector {
    #[must_use]
    pub const fn new(definitions: Vec<ThemeDefinition>) -> Self {
        Self { definitions }
    }

    #[must_use]
    pub fn definitions(&self) -> &[ThemeDefinition] {
        &self.definitions
    }

    /// Detect themes in definition order, omitting themes with no match
    #[must_use]
    pub fn detect(&self, table: &ReviewTable) -> Vec<ThemeResult> {
        let folded: Vec<String> = table
            .rows()
            .iter()
            .map(|row| row.content.to_lowercase())
            .collect();

        self.definitions
            .iter()
            .filter_map(|definition| {
                let matched: Vec<&ReviewRow> = table
                    .rows()
                    .iter()
                    .zip(&folded)
                    .filter(|(_, content)| definition.matches_folded(content))
                    .map(|(row, _)| row)
                    .collect();

                debug!(
                    "Theme '{}' matched {} of {} reviews",
                    definition.id,
                    matched.len(),
                    table.len()
                );

                if matched.is_empty() {
                    None
                } else {
                    Some(summarize(definition, &matched))
                }
            })
            .collect()
    }
}

fn summarize(definition: &ThemeDefinition, matched: &[&ReviewRow]) -> ThemeResult {
    let mean = mean_score(matched.iter().copied());

    let summary = match mean {
        Some(mean) => format!(
            "Users are discussing {} with average rating {:.1}/5",
            definition.name, mean
        ),
        None => format!(
            "Users are discussing {} but none of these reviews carry a rating",
            definition.name
        ),
    };

    ThemeResult {
        id: format!("theme-{}", definition.id),
        name: definition.name.clone(),
        theme_type: ThemeType::from_mean(mean),
        confidence: definition.confidence,
        review_count: matched.len(),
        summary,
        reviews: matched.iter().map(|row| row.id.clone()).collect(),
    }
}
