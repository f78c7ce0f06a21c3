use std::collections::BTreeMap;

use chrono::NaiveDate;
use vitalquery_algos::{
    SAMPLE_DATE, SleepMinute, SleepStageCounter,
    helpers::series_math::{min_value, rounded_mean, total},
};
use vitalquery_types::{HourlySeries, SleepAggregate};

use crate::{
    DataError, SleepLog,
    sample::{SAMPLE_HEART_RATE, SAMPLE_STEPS},
};

#[derive(Clone, Debug)]
struct DayMetrics {
    steps: HourlySeries,
    heart_rate: HourlySeries,
}

/// In-memory source of daily health metrics.
///
/// Built explicitly and handed to whoever needs it; lookups for dates the
/// provider has no hourly data for fail with [`DataError::NoDataForDate`].
#[derive(Clone, Debug, Default)]
pub struct MetricsProvider {
    days: BTreeMap<NaiveDate, DayMetrics>,
    sleep: Vec<SleepMinute>,
}

impl MetricsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_data() -> Self {
        let mut provider = Self::new();
        provider.load_sample_data();
        provider
    }

    /// Loads the bundled sample day. Calling it again overwrites the same day.
    pub fn load_sample_data(&mut self) {
        self.days.insert(
            SAMPLE_DATE,
            DayMetrics {
                steps: HourlySeries::full_day(SAMPLE_STEPS),
                heart_rate: HourlySeries::full_day(SAMPLE_HEART_RATE),
            },
        );
        info!("loaded sample data for {SAMPLE_DATE}");
    }

    pub fn insert_day(
        &mut self,
        date: NaiveDate,
        steps: HourlySeries,
        heart_rate: HourlySeries,
    ) -> Result<(), DataError> {
        if !steps.is_full_day() || !heart_rate.is_full_day() {
            return Err(DataError::IncompleteDay {
                date,
                steps: steps.len(),
                heart_rate: heart_rate.len(),
            });
        }

        self.days.insert(date, DayMetrics { steps, heart_rate });
        Ok(())
    }

    /// Replaces the minute-level sleep records.
    pub fn load_sleep_log(&mut self, log: SleepLog) {
        self.sleep = log.into_minutes();
        info!("loaded {} sleep minutes", self.sleep.len());
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    fn day(&self, date: NaiveDate) -> Result<&DayMetrics, DataError> {
        self.days.get(&date).ok_or_else(|| {
            debug!("no hourly data for {date}");
            DataError::NoDataForDate(date)
        })
    }

    pub fn steps(&self, date: NaiveDate) -> Result<&HourlySeries, DataError> {
        Ok(&self.day(date)?.steps)
    }

    pub fn heart_rate(&self, date: NaiveDate) -> Result<&HourlySeries, DataError> {
        Ok(&self.day(date)?.heart_rate)
    }

    /// Zeroed when no sleep minutes fall on `date`.
    pub fn sleep(&self, date: NaiveDate) -> SleepAggregate {
        SleepStageCounter::aggregate(&self.sleep, date)
    }

    pub fn total_steps(&self, date: NaiveDate) -> Result<u32, DataError> {
        self.steps(date).map(total)
    }

    pub fn average_heart_rate(&self, date: NaiveDate) -> Result<u32, DataError> {
        self.heart_rate(date).map(rounded_mean)
    }

    pub fn resting_heart_rate(&self, date: NaiveDate) -> Result<u32, DataError> {
        Ok(min_value(self.heart_rate(date)?).unwrap_or_default())
    }
}
