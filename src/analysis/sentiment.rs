//! Score-based sentiment labels

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::table::ReviewTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// 4 and above is positive, 3 is neutral, anything lower is negative
    #[must_use]
    pub const fn from_score(score: i64) -> Self {
        if score >= 4 {
            Sentiment::Positive
        } else if score == 3 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count sentiment labels over scored rows. Labels with no rows are absent.
#[must_use]
pub fn sentiment_counts(table: &ReviewTable) -> BTreeMap<Sentiment, usize> {
    let mut counts = BTreeMap::new();
    for score in table.scores() {
        *counts.entry(Sentiment::from_score(score)).or_insert(0) += 1;
    }
    counts
}
