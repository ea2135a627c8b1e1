//! Review sources
//!
//! The analysis engine never fetches anything itself. A `ReviewSource` hands it
//! one page of store records for an app; failures surface as errors before any
//! analysis stage runs.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;
use tracing::info;

use crate::models::parse_review_timestamp;
use crate::models::RawReview;
use crate::models::SortOrder;
use crate::Result;

/// Default number of reviews requested for an analysis
pub const DEFAULT_REVIEW_COUNT: usize = 100;

/// Default store country
pub const DEFAULT_COUNTRY: &str = "us";

/// Parameters of a review fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub app_id: String,
    pub country: String,
    pub sort: SortOrder,
    pub count: usize,
}

impl FetchQuery {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            country: DEFAULT_COUNTRY.to_string(),
            sort: SortOrder::Newest,
            count: DEFAULT_REVIEW_COUNT,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// One page of fetched reviews
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub reviews: Vec<RawReview>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

/// Anything that can fetch store reviews for an app
pub trait ReviewSource {
    fn fetch_reviews(&self, query: &FetchQuery) -> Result<ReviewPage>;
}

/// Reviews held in memory, ordered and truncated per query
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    reviews: Vec<RawReview>,
}

impl MemorySource {
    #[must_use]
    pub const fn new(reviews: Vec<RawReview>) -> Self {
        Self { reviews }
    }
}

impl ReviewSource for MemorySource {
    fn fetch_reviews(&self, query: &FetchQuery) -> Result<ReviewPage> {
        Ok(select_page(self.reviews.clone(), None, query))
    }
}

/// Reviews exported to a JSON file, either a bare array of records or a
/// `{"reviews": [...], "continuationToken": ...}` page
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceFile {
    List(Vec<RawReview>),
    Page(ReviewPage),
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewSource for JsonFileSource {
    fn fetch_reviews(&self, query: &FetchQuery) -> Result<ReviewPage> {
        info!(
            "Loading reviews for {} from {} (sort={}, count={})",
            query.app_id,
            self.path.display(),
            query.sort,
            query.count
        );

        let content = std::fs::read_to_string(&self.path)?;
        let page = match serde_json::from_str::<SourceFile>(&content)? {
            SourceFile::List(reviews) => select_page(reviews, None, query),
            SourceFile::Page(page) => select_page(page.reviews, page.continuation_token, query),
        };

        debug!("Loaded {} reviews from {}", page.reviews.len(), self.path.display());
        Ok(page)
    }
}

/// Apply the query's ordering and count to a full list of reviews
fn select_page(
    mut reviews: Vec<RawReview>,
    continuation_token: Option<String>,
    query: &FetchQuery,
) -> ReviewPage {
    match query.sort {
        SortOrder::Newest => {
            // Stable sort keeps file order among equal or undated reviews
            reviews.sort_by_cached_key(|review| {
                std::cmp::Reverse(
                    review
                        .at
                        .as_deref()
                        .and_then(|at| parse_review_timestamp(at).ok()),
                )
            });
        }
        SortOrder::Rating => {
            reviews.sort_by_key(|review| std::cmp::Reverse(review.score));
        }
        SortOrder::Relevance => {}
    }

    reviews.truncate(query.count);

    ReviewPage {
        reviews,
        continuation_token,
    }
}
