#[macro_use]
extern crate log;

mod error;
pub use error::DataError;

mod provider;
pub use provider::MetricsProvider;

mod sample;
pub use sample::{SAMPLE_HEART_RATE, SAMPLE_STEPS};

mod sleep_log;
pub use sleep_log::SleepLog;

mod summary;
