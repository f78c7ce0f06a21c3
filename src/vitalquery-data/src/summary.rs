use chrono::NaiveDate;
use vitalquery_types::DailySummary;

use crate::MetricsProvider;

impl MetricsProvider {
    /// One summary per calendar date in `start..=end`; empty when `start > end`.
    pub fn daily_summaries(&self, start: NaiveDate, end: NaiveDate) -> Vec<DailySummary> {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| DailySummary {
                date,
                total_steps: self.total_steps(date).ok(),
                average_heart_rate: self.average_heart_rate(date).ok(),
                sleep_hours: self.sleep(date).asleep_hours(),
            })
            .collect()
    }
}
