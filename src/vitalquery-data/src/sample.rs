use vitalquery_types::series::HOURS_PER_DAY;

/// Hand-authored step counts for the sample day: quiet night, a morning
/// commute, a lunch walk and an evening workout.
pub const SAMPLE_STEPS: [u32; HOURS_PER_DAY] = [
    50, 20, 10, 5, 15, 30, 500, 1200, 800, 400, 300, 450, 1000, 600, 400, 350, 800, 1500, 1200,
    600, 400, 200, 100, 70,
];

/// Heart rate tracking the same day; peaks line up with the step peaks.
pub const SAMPLE_HEART_RATE: [u32; HOURS_PER_DAY] = [
    62, 60, 58, 57, 59, 65, 85, 110, 95, 75, 72, 78, 94, 85, 76, 75, 88, 115, 105, 88, 78, 72, 68,
    64,
];
