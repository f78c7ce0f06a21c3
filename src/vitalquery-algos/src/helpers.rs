pub mod series_math;
