use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Steps,
    HeartRate,
    Sleep,
    Comparison,
}

/// Classified purpose of a free-text query, built per query and then discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub intent: Intent,
    pub date: Option<NaiveDate>,
}

impl QueryIntent {
    pub fn new(intent: Intent, date: Option<NaiveDate>) -> Self {
        Self { intent, date }
    }
}
