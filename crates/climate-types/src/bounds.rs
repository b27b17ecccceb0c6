//! First and last observation dates of the dataset.
//!
//! These are facts about the shipped data, not schema constraints. The
//! temperature routes reject windows reaching outside them.

use serde::{Deserialize, Serialize};

/// Default first date of the dataset.
pub const DEFAULT_EARLIEST: &str = "2010-01-01";

/// Default last date of the dataset.
pub const DEFAULT_LATEST: &str = "2017-08-23";

/// Inclusive date bounds of the dataset, as `yyyy-mm-dd` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetBounds {
    /// First date with observations.
    pub earliest: String,
    /// Last date with observations.
    pub latest: String,
}

impl Default for DatasetBounds {
    fn default() -> Self {
        Self {
            earliest: DEFAULT_EARLIEST.to_owned(),
            latest: DEFAULT_LATEST.to_owned(),
        }
    }
}

impl DatasetBounds {
    /// Whether `start` is not earlier than the first date.
    ///
    /// Comparison is lexicographic on the raw strings.
    pub fn admits_start(&self, start: &str) -> bool {
        start >= self.earliest.as_str()
    }

    /// Whether `end` is not later than the last date.
    pub fn admits_end(&self, end: &str) -> bool {
        end <= self.latest.as_str()
    }

    /// Message returned with a 404 when a requested window is rejected.
    pub fn invalid_date_message(&self) -> String {
        format!(
            "Invalid date. Please select a dates between {} and {}. \
             Make sure date entered matches format yyyy-mm-dd",
            self.earliest, self.latest
        )
    }
}
