//! Daily rating trend

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::table::ReviewTable;
use crate::models::parse_review_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub average_rating: f64,
    pub review_count: usize,
}

/// Average rating per calendar day, oldest first.
///
/// Rows without a score or without a parseable date are left out.
#[must_use]
pub fn rating_trend(table: &ReviewTable) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in table.rows() {
        let (Some(score), Some(raw_date)) = (row.score, row.date.as_deref()) else {
            skipped += 1;
            continue;
        };
        match parse_review_timestamp(raw_date) {
            Ok(timestamp) => {
                let day = days.entry(timestamp.date()).or_insert((0.0, 0));
                day.0 += score as f64;
                day.1 += 1;
            }
            Err(e) => {
                debug!("Skipping review '{}' with unreadable date: {}", row.id, e);
                skipped += 1;
            }
        }
    }

    debug!("Rating trend - days={}, skipped_rows={}", days.len(), skipped);

    days.into_iter()
        .map(|(date, (sum, count))| TrendPoint {
            date,
            average_rating: round_one_decimal(sum / count as f64),
            review_count: count,
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawReview;

    fn review(score: Option<i64>, at: Option<&str>) -> RawReview {
        RawReview {
            score,
            at: at.map(str::to_string),
            ..RawReview::default()
        }
    }

    #[test]
    fn test_groups_by_day_in_date_order() {
        let table = ReviewTable::from_records(&[
            review(Some(5), Some("2024-03-02T09:00:00")),
            review(Some(2), Some("2024-03-01 23:59:59")),
            review(Some(4), Some("2024-03-02T18:30:00Z")),
            review(Some(3), Some("2024-03-01")),
        ]);
        let trend = rating_trend(&table);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(trend[0].review_count, 2);
        assert!((trend[0].average_rating - 2.5).abs() < 1e-9);
        assert_eq!(trend[1].review_count, 2);
        assert!((trend[1].average_rating - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_skips_unscored_and_undated_rows() {
        let table = ReviewTable::from_records(&[
            review(None, Some("2024-03-01")),
            review(Some(4), None),
            review(Some(4), Some("yesterday")),
        ]);
        assert!(rating_trend(&table).is_empty());
    }

    #[test]
    fn test_average_rounded_to_one_decimal() {
        let table = ReviewTable::from_records(&[
            review(Some(5), Some("2024-01-01")),
            review(Some(4), Some("2024-01-01")),
            review(Some(4), Some("2024-01-01")),
        ]);
        assert!((rating_trend(&table)[0].average_rating - 4.3).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_scores_on_one_day() {
        let table = ReviewTable::from_records(&[
            review(Some(i64::MAX), Some("2024-01-01")),
            review(Some(i64::MAX), Some("2024-01-01")),
        ]);
        let trend = rating_trend(&table);
        assert_eq!(trend[0].review_count, 2);
        assert!(trend[0].average_rating.is_finite());
    }

    #[test]
    fn test_date_serializes_as_iso_day() {
        let table = ReviewTable::from_records(&[review(Some(1), Some("2024-02-29"))]);
        let json = serde_json::to_value(rating_trend(&table)).unwrap();
        assert_eq!(json[0]["date"], "2024-02-29");
        assert_eq!(json[0]["reviewCount"], 1);
    }
}
