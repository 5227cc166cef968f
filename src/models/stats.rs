//! Weekly aggregate produced from an activity dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sum of one numeric column over a Monday-to-Sunday calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Monday that opens the week
    #[serde(with = "crate::time_utils::slash_date")]
    pub week_start: NaiveDate,
    /// Sunday that closes the week; charts label the week with it
    #[serde(with = "crate::time_utils::slash_date")]
    pub week_end: NaiveDate,
    pub total: f64,
    /// Number of dataset rows folded into `total`
    pub rows: u32,
}
