use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{self:?}")]
pub enum SeriesError {
    TooManyPoints(usize),
    InvalidHour(u8),
    InvalidHourLabel(String),
    OutOfOrder { previous: u8, hour: u8 },
}

/// One hourly sample of a daily metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
    #[serde(with = "hour_label")]
    pub hour: u8,
    pub value: u32,
}

impl HourlyPoint {
    pub fn new(hour: u8, value: u32) -> Self {
        Self { hour, value }
    }

    pub fn label(&self) -> String {
        format_hour(self.hour)
    }
}

pub fn format_hour(hour: u8) -> String {
    format!("{:02}:00", hour)
}

pub fn parse_hour(label: &str) -> Result<u8, SeriesError> {
    let invalid = || SeriesError::InvalidHourLabel(label.to_owned());
    let (hour, minute) = label.split_once(':').ok_or_else(invalid)?;
    if minute != "00" || hour.len() != 2 {
        return Err(invalid());
    }

    let hour = hour.parse::<u8>().map_err(|_| invalid())?;
    if usize::from(hour) >= HOURS_PER_DAY {
        return Err(SeriesError::InvalidHour(hour));
    }
    Ok(hour)
}

/// Per-hour series for a single calendar day, hours strictly ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HourlySeries {
    points: Vec<HourlyPoint>,
}

impl HourlySeries {
    pub fn new(points: Vec<HourlyPoint>) -> Result<Self, SeriesError> {
        if points.len() > HOURS_PER_DAY {
            return Err(SeriesError::TooManyPoints(points.len()));
        }

        let mut previous: Option<u8> = None;
        for point in &points {
            if usize::from(point.hour) >= HOURS_PER_DAY {
                return Err(SeriesError::InvalidHour(point.hour));
            }
            if let Some(previous) = previous {
                if point.hour <= previous {
                    return Err(SeriesError::OutOfOrder {
                        previous,
                        hour: point.hour,
                    });
                }
            }
            previous = Some(point.hour);
        }

        Ok(Self { points })
    }

    pub fn full_day(values: [u32; HOURS_PER_DAY]) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(hour, value)| HourlyPoint::new(hour as u8, value))
            .collect();
        Self { points }
    }

    pub fn is_full_day(&self) -> bool {
        self.points.len() == HOURS_PER_DAY
    }

    pub fn points(&self) -> &[HourlyPoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'de> Deserialize<'de> for HourlySeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<HourlyPoint>::deserialize(deserializer)?;
        HourlySeries::new(points).map_err(serde::de::Error::custom)
    }
}

mod hour_label {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(hour: &u8, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hour(*hour))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        super::parse_hour(&label).map_err(serde::de::Error::custom)
    }
}
