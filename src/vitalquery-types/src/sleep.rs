use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStage {
    Light,
    Deep,
    Rem,
    Wake,
}

impl SleepStage {
    /// Maps the per-minute stage code of a sleep recording.
    /// `1` is light, `2` deep, `3` REM; every other code counts as awake.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Light,
            "2" => Self::Deep,
            "3" => Self::Rem,
            _ => Self::Wake,
        }
    }
}

/// Minutes spent in each sleep stage over one date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepAggregate {
    pub deep_minutes: u32,
    pub light_minutes: u32,
    pub rem_minutes: u32,
    pub awake_minutes: u32,
}

impl SleepAggregate {
    pub fn record(&mut self, stage: SleepStage) {
        let slot = match stage {
            SleepStage::Deep => &mut self.deep_minutes,
            SleepStage::Light => &mut self.light_minutes,
            SleepStage::Rem => &mut self.rem_minutes,
            SleepStage::Wake => &mut self.awake_minutes,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total_minutes(&self) -> u32 {
        self.deep_minutes + self.light_minutes + self.rem_minutes + self.awake_minutes
    }

    pub fn is_empty(&self) -> bool {
        self.total_minutes() == 0
    }

    pub fn deep_hours(&self) -> f64 {
        minutes_to_hours(self.deep_minutes)
    }

    pub fn light_hours(&self) -> f64 {
        minutes_to_hours(self.light_minutes)
    }

    pub fn rem_hours(&self) -> f64 {
        minutes_to_hours(self.rem_minutes)
    }

    pub fn awake_hours(&self) -> f64 {
        minutes_to_hours(self.awake_minutes)
    }

    pub fn asleep_hours(&self) -> f64 {
        minutes_to_hours(self.deep_minutes + self.light_minutes + self.rem_minutes)
    }
}

fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_codes() {
        assert_eq!(SleepStage::from_code("1"), SleepStage::Light);
        assert_eq!(SleepStage::from_code("2"), SleepStage::Deep);
        assert_eq!(SleepStage::from_code(" 3 "), SleepStage::Rem);
        assert_eq!(SleepStage::from_code("4"), SleepStage::Wake);
        assert_eq!(SleepStage::from_code(""), SleepStage::Wake);
    }

    #[test]
    fn record_and_convert() {
        let mut aggregate = SleepAggregate::default();
        for _ in 0..90 {
            aggregate.record(SleepStage::Deep);
        }
        for _ in 0..30 {
            aggregate.record(SleepStage::Wake);
        }

        assert_eq!(aggregate.total_minutes(), 120);
        assert_eq!(aggregate.deep_hours(), 1.5);
        assert_eq!(aggregate.awake_hours(), 0.5);
        assert_eq!(aggregate.asleep_hours(), 1.5);
    }

    #[test]
    fn default_is_zeroed() {
        let aggregate = SleepAggregate::default();
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.light_hours(), 0.0);
        assert_eq!(aggregate.rem_hours(), 0.0);
    }
}
