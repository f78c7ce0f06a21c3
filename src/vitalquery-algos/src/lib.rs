#[macro_use]
extern crate log;

pub(crate) mod query;
pub use query::{QueryAnalyzer, SAMPLE_DATE, SAMPLE_YEAR};

pub(crate) mod impact;
pub use impact::{ImpactError, ImpactNarrator};

pub(crate) mod sleep;
pub use sleep::{SleepMinute, SleepStageCounter};

pub mod helpers;
