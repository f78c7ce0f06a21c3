use thiserror::Error;
use vitalquery_types::{HourlySeries, ImpactResult, PeakCorrelation};

use crate::helpers::series_math::{max_value, min_value};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImpactError {
    #[error("need at least 2 hourly points to find activity peaks, got {0}")]
    InsufficientPeaks(usize),
    #[error("steps ({steps} points) and heart rate ({heart_rate} points) are not aligned")]
    MisalignedSeries { steps: usize, heart_rate: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intensity {
    Significant,
    Moderate,
    Modest,
}

impl Intensity {
    const SIGNIFICANT_DELTA: u32 = 50;
    const MODERATE_DELTA: u32 = 30;

    fn from_delta(delta: u32) -> Self {
        if delta > Self::SIGNIFICANT_DELTA {
            Self::Significant
        } else if delta > Self::MODERATE_DELTA {
            Self::Moderate
        } else {
            Self::Modest
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            Self::Significant => {
                "This significant heart rate variation indicates an effective cardio workout."
            }
            Self::Moderate => {
                "This moderate heart rate increase suggests light to moderate exercise intensity."
            }
            Self::Modest => "The modest heart rate increase suggests low-intensity physical activity.",
        }
    }
}

/// Relates the busiest step hours of a day to the heart rate seen in the same hours.
///
/// Both series are aligned by position, not by hour label.
#[derive(Clone, Copy, Debug)]
pub struct ImpactNarrator {
    peak_count: usize,
}

impl Default for ImpactNarrator {
    fn default() -> Self {
        Self { peak_count: 3 }
    }
}

impl ImpactNarrator {
    /// Number of peaks kept is clamped to at least the two the narrative names.
    pub fn with_peak_count(peak_count: usize) -> Self {
        Self {
            peak_count: peak_count.max(2),
        }
    }

    pub fn analyze(
        &self,
        steps: &HourlySeries,
        heart_rate: &HourlySeries,
    ) -> Result<ImpactResult, ImpactError> {
        if steps.len() != heart_rate.len() {
            return Err(ImpactError::MisalignedSeries {
                steps: steps.len(),
                heart_rate: heart_rate.len(),
            });
        }

        let peak_correlations = self.peaks(steps, heart_rate);
        // peak_count is at least 2, so this only fails for series shorter than 2 points
        let [main, second, ..] = peak_correlations.as_slice() else {
            return Err(ImpactError::InsufficientPeaks(steps.len()));
        };

        let baseline_min = min_value(heart_rate).unwrap_or_default();
        let baseline_max = max_value(heart_rate).unwrap_or_default();
        let delta = baseline_max - baseline_min;

        let narrative = narrate(main, second, baseline_min, baseline_max, delta);

        Ok(ImpactResult {
            peak_correlations,
            baseline_min,
            baseline_max,
            delta,
            narrative,
        })
    }

    fn peaks(&self, steps: &HourlySeries, heart_rate: &HourlySeries) -> Vec<PeakCorrelation> {
        let mut ranked = steps.points().iter().enumerate().collect::<Vec<_>>();
        // stable: equal step counts keep ascending hour order
        ranked.sort_by(|(_, a), (_, b)| b.value.cmp(&a.value));

        let heart_rate = heart_rate.points();
        ranked
            .into_iter()
            .take(self.peak_count)
            .map(|(index, point)| PeakCorrelation {
                hour: point.hour,
                primary_value: point.value,
                secondary_value: heart_rate[index].value,
            })
            .collect()
    }
}

fn narrate(
    main: &PeakCorrelation,
    second: &PeakCorrelation,
    resting: u32,
    max: u32,
    delta: u32,
) -> String {
    let mut narrative = String::from(
        "Your physical activity had a significant impact on your heart rate throughout the day. ",
    );
    narrative.push_str(&format!(
        "During your most active period at {}, taking {} steps raised your heart rate to {} BPM. ",
        main.label(),
        main.primary_value,
        main.secondary_value
    ));
    narrative.push_str(&format!(
        "Another notable peak occurred at {} with {} steps and a heart rate of {} BPM. ",
        second.label(),
        second.primary_value,
        second.secondary_value
    ));
    narrative.push_str(&format!(
        "Your heart rate varied from a resting rate of {resting} BPM to a maximum of {max} BPM, \
         showing a healthy increase of {delta} BPM during exercise. "
    ));
    narrative.push_str(Intensity::from_delta(delta).sentence());
    narrative
}
