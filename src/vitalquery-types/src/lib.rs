pub mod series;
pub use series::{HourlyPoint, HourlySeries, SeriesError};

pub mod sleep;
pub use sleep::{SleepAggregate, SleepStage};

pub mod intent;
pub use intent::{Intent, QueryIntent};

pub mod impact;
pub use impact::{ImpactResult, PeakCorrelation};

pub mod summary;
pub use summary::DailySummary;
