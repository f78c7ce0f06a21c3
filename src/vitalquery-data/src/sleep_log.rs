use std::{fs::File, io::BufRead, io::BufReader, path::Path};

use chrono::NaiveDateTime;
use vitalquery_algos::SleepMinute;
use vitalquery_types::SleepStage;

const TIME_FORMATS: [&str; 2] = ["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %H:%M:%S"];

/// Minute-by-minute sleep stages, as exported by wearable trackers
/// (`Id,date,value,logId` with one row per minute).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SleepLog {
    minutes: Vec<SleepMinute>,
}

impl SleepLog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, crate::DataError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv(BufReader::new(file))
    }

    /// Rows that cannot be read are skipped with a warning.
    pub fn from_csv<R: BufRead>(reader: R) -> Result<Self, crate::DataError> {
        let mut rows = reader.split(b'\n');
        let Some(header) = rows.next().transpose()? else {
            return Ok(Self::default());
        };
        let header = String::from_utf8_lossy(&header);

        let columns = header.split(',').map(str::trim).collect::<Vec<_>>();
        let column = |name: &'static str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or(crate::DataError::MissingColumn(name))
        };
        let date_column = column("date")?;
        let value_column = column("value")?;

        let mut minutes = Vec::new();
        let mut skipped = 0_usize;
        for (index, row) in rows.enumerate() {
            // header is line 1
            let line_number = index + 2;
            let line = match String::from_utf8(row?) {
                Ok(line) => line,
                Err(error) => {
                    warn!("skipping sleep record on line {line_number}: {error}");
                    skipped += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let cells = line.split(',').map(str::trim).collect::<Vec<_>>();
            let record = cells
                .get(date_column)
                .and_then(|date| parse_time(date))
                .zip(cells.get(value_column));

            match record {
                Some((time, code)) => minutes.push(SleepMinute {
                    time,
                    stage: SleepStage::from_code(code),
                }),
                None => {
                    warn!("skipping malformed sleep record on line {line_number}: {line:?}");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("skipped {skipped} malformed sleep records");
        }
        Ok(Self { minutes })
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    pub fn minutes(&self) -> &[SleepMinute] {
        &self.minutes
    }

    pub fn into_minutes(self) -> Vec<SleepMinute> {
        self.minutes
    }
}

fn parse_time(value: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
