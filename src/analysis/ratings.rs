//! Rating aggregation

use std::collections::BTreeMap;

use tracing::debug;

use super::table::ReviewTable;
use crate::errors::ReviewScopeError;
use crate::models::ReviewRow;
use crate::Result;

/// Average rating and per-value counts over scored rows
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub rating_counts: BTreeMap<i64, usize>,
}

/// Aggregate the scores of a table.
///
/// Fails with `InsufficientData` when no row carries a score.
pub fn aggregate_ratings(table: &ReviewTable) -> Result<RatingSummary> {
    let average_rating = mean_score(table.rows()).ok_or(ReviewScopeError::InsufficientData)?;

    let mut rating_counts = BTreeMap::new();
    for score in table.scores() {
        *rating_counts.entry(score).or_insert(0) += 1;
    }

    debug!(
        "Ratings aggregated - average={:.3}, distinct_values={}",
        average_rating,
        rating_counts.len()
    );

    Ok(RatingSummary {
        average_rating,
        rating_counts,
    })
}

/// Arithmetic mean over the rows that have a score, `None` if there are none
///
/// Scores are summed as `f64` so raw out-of-range values cannot overflow.
pub fn mean_score<'a, I>(rows: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a ReviewRow>,
{
    let (sum, count) = rows
        .into_iter()
        .filter_map(|row| row.score)
        .fold((0f64, 0usize), |(sum, count), score| (sum + score as f64, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
