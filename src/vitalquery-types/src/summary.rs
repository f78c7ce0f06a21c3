use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a date-range comparison. Totals are `None` for dates without hourly data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_steps: Option<u32>,
    pub average_heart_rate: Option<u32>,
    pub sleep_hours: f64,
}
