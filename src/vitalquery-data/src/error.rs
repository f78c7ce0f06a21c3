use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data for {0}")]
    NoDataForDate(NaiveDate),
    #[error("incomplete day {date}: {steps} step points, {heart_rate} heart rate points")]
    IncompleteDay {
        date: NaiveDate,
        steps: usize,
        heart_rate: usize,
    },
    #[error("sleep log header has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("failed to read sleep log")]
    Io(#[from] std::io::Error),
}
