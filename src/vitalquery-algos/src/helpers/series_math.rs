use vitalquery_types::HourlySeries;

pub fn total(series: &HourlySeries) -> u32 {
    series.values().fold(0_u32, u32::saturating_add)
}

/// Arithmetic mean rounded half away from zero; `0` for an empty series.
pub fn rounded_mean(series: &HourlySeries) -> u32 {
    if series.is_empty() {
        return 0;
    }

    let sum = series.values().map(u64::from).sum::<u64>();
    (sum as f64 / series.len() as f64).round() as u32
}

pub fn min_value(series: &HourlySeries) -> Option<u32> {
    series.values().min()
}

pub fn max_value(series: &HourlySeries) -> Option<u32> {
    series.values().max()
}
