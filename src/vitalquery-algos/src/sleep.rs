use chrono::{Datelike, NaiveDate, NaiveDateTime};
use vitalquery_types::{SleepAggregate, SleepStage};

/// One minute of a sleep recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepMinute {
    pub time: NaiveDateTime,
    pub stage: SleepStage,
}

pub struct SleepStageCounter;

impl SleepStageCounter {
    /// Counts minutes per stage for every record falling on `date`.
    ///
    /// Records are matched on month and day only; the year is ignored.
    pub fn aggregate(records: &[SleepMinute], date: NaiveDate) -> SleepAggregate {
        let mut aggregate = SleepAggregate::default();
        for record in records
            .iter()
            .filter(|r| r.time.month() == date.month() && r.time.day() == date.day())
        {
            aggregate.record(record.stage);
        }

        debug!(
            "{} sleep minutes matched {}",
            aggregate.total_minutes(),
            date.format("%m/%d")
        );
        aggregate
    }
}
