//! Review table construction

use tracing::debug;

use crate::models::RawReview;
use crate::models::ReviewRow;

/// In-memory table of normalized reviews, in fetch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    rows: Vec<ReviewRow>,
}

impl ReviewTable {
    /// Build a table from store records. Every record becomes a row.
    #[must_use]
    pub fn from_records(records: &[RawReview]) -> Self {
        let rows: Vec<ReviewRow> = records.iter().map(ReviewRow::from).collect();

        let unscored = rows.iter().filter(|row| row.score.is_none()).count();
        debug!(
            "Review table built - rows={}, unscored={}",
            rows.len(),
            unscored
        );

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scores of rows that have one, in table order
    pub fn scores(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().filter_map(|row| row.score)
    }

    /// Number of rows with a present score
    #[must_use]
    pub fn scored_len(&self) -> usize {
        self.scores().count()
    }
}

impl FromIterator<ReviewRow> for ReviewTable {
    fn from_iter<I: IntoIterator<Item = ReviewRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(value: serde_json::Value) -> Vec<RawReview> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_row_is_dropped() {
        let table = ReviewTable::from_records(&records(json!([
            {"reviewId": "r1", "score": 5, "content": "good"},
            {"reviewId": "r2"},
            {"content": null, "score": "bad"},
        ])));

        assert_eq!(table.len(), 3);
        assert_eq!(table.scored_len(), 1);
        assert_eq!(table.rows()[1].content, "");
        assert_eq!(table.rows()[2].id, "");
    }

    #[test]
    fn test_duplicates_pass_through_in_order() {
        let table = ReviewTable::from_records(&records(json!([
            {"reviewId": "dup", "score": 1},
            {"reviewId": "other", "score": 2},
            {"reviewId": "dup", "score": 3},
        ])));

        let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "other", "dup"]);
        assert_eq!(table.scores().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_table() {
        let table = ReviewTable::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.scored_len(), 0);
    }
}
