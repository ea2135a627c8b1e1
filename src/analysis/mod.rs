//! Review analysis engine
//!
//! A single synchronous pipeline over a freshly built review table:
//! - table construction from store records
//! - rating aggregation (the only stage that can fail)
//! - score-based sentiment counts
//! - keyword theme detection
//! - document assembly
//!
//! The analyzer holds only its theme definitions, so one instance can serve
//! any number of concurrent analyses.
//!
//! # Examples
//!
//! ```rust
//! use reviewscope::analysis::ReviewAnalyzer;
//! use reviewscope::models::RawReview;
//!
//! let records: Vec<RawReview> = serde_json::from_str(
//!     r#"[{"reviewId": "r1", "score": 5, "content": "fast and beautiful"}]"#,
//! )?;
//! let document = ReviewAnalyzer::new().analyze(&records)?;
//! assert_eq!(document.total_reviews, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod document;
pub mod ratings;
pub mod sentiment;
pub mod table;
pub mod themes;
pub mod trend;

pub use document::AnalysisDocument;
pub use ratings::aggregate_ratings;
pub use ratings::RatingSummary;
pub use sentiment::sentiment_counts;
pub use sentiment::Sentiment;
pub use table::ReviewTable;
pub use themes::builtin_themes;
pub use themes::ThemeDefinition;
pub use themes::ThemeDetector;
pub use themes::ThemeResult;
pub use themes::ThemeType;
pub use trend::rating_trend;
pub use trend::TrendPoint;

use tracing::info;

use crate::config::AppConfig;
use crate::models::RawReview;
use crate::source::FetchQuery;
use crate::source::ReviewSource;
use crate::Result;

/// Review analyzer configured with an ordered set of themes
#[derive(Debug, Clone, Default)]
pub struct ReviewAnalyzer {
    detector: ThemeDetector,
}

impl ReviewAnalyzer {
    /// Analyzer using the built-in themes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer using custom theme definitions, validated and keyword-lowercased
    pub fn with_themes(themes: Vec<ThemeDefinition>) -> Result<Self> {
        Ok(Self {
            detector: ThemeDetector::new(themes::validate_themes(themes)?),
        })
    }

    /// Analyzer using the themes of a configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_themes(config.theme_definitions())
    }

    #[must_use]
    pub fn themes(&self) -> &[ThemeDefinition] {
        self.detector.definitions()
    }

    /// Analyze a list of store records
    pub fn analyze(&self, records: &[RawReview]) -> Result<AnalysisDocument> {
        self.analyze_table(&ReviewTable::from_records(records))
    }

    /// Analyze an already built table
    pub fn analyze_table(&self, table: &ReviewTable) -> Result<AnalysisDocument> {
        let ratings = aggregate_ratings(table)?;
        let sentiments = sentiment_counts(table);
        let themes = self.detector.detect(table);

        info!(
            "Analyzed {} reviews - average={:.2}, themes={}",
            table.len(),
            ratings.average_rating,
            themes.len()
        );

        Ok(AnalysisDocument::assemble(table, ratings, sentiments, themes))
    }

    /// Fetch one page from a source and analyze it
    pub fn analyze_from_source<S>(&self, source: &S, query: &FetchQuery) -> Result<AnalysisDocument>
    where
        S: ReviewSource + ?Sized,
    {
        let page = source.fetch_reviews(query)?;
        self.analyze(&page.reviews)
    }
}
