use serde::{Deserialize, Serialize};

use crate::series::format_hour;

/// Heart rate observed in the same hour as one of the day's step peaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakCorrelation {
    pub hour: u8,
    pub primary_value: u32,
    pub secondary_value: u32,
}

impl PeakCorrelation {
    pub fn label(&self) -> String {
        format_hour(self.hour)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub peak_correlations: Vec<PeakCorrelation>,
    pub baseline_min: u32,
    pub baseline_max: u32,
    pub delta: u32,
    pub narrative: String,
}
