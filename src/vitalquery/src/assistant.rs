use std::fmt::Display;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use vitalquery_algos::{ImpactError, ImpactNarrator, QueryAnalyzer};
use vitalquery_data::{DataError, MetricsProvider};
use vitalquery_types::{HourlySeries, ImpactResult, Intent, SleepAggregate};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Impact(#[from] ImpactError),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum QueryAnswer {
    Steps {
        date: NaiveDate,
        series: HourlySeries,
        total: u32,
    },
    HeartRate {
        date: NaiveDate,
        series: HourlySeries,
        average: u32,
    },
    Sleep {
        date: NaiveDate,
        aggregate: SleepAggregate,
    },
    Comparison {
        date: NaiveDate,
        impact: ImpactResult,
    },
}

impl QueryAnswer {
    pub fn intent(&self) -> Intent {
        match self {
            QueryAnswer::Steps { .. } => Intent::Steps,
            QueryAnswer::HeartRate { .. } => Intent::HeartRate,
            QueryAnswer::Sleep { .. } => Intent::Sleep,
            QueryAnswer::Comparison { .. } => Intent::Comparison,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            QueryAnswer::Steps { date, .. }
            | QueryAnswer::HeartRate { date, .. }
            | QueryAnswer::Sleep { date, .. }
            | QueryAnswer::Comparison { date, .. } => *date,
        }
    }
}

impl Display for QueryAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryAnswer::Steps { date, total, .. } => {
                write!(f, "Total steps on {date}: {total}")
            }
            QueryAnswer::HeartRate { date, average, .. } => {
                write!(f, "Average heart rate on {date}: {average} BPM")
            }
            QueryAnswer::Sleep { date, aggregate } => write!(
                f,
                "Sleep on {date}: deep {:.2}h, light {:.2}h, REM {:.2}h, awake {:.2}h",
                aggregate.deep_hours(),
                aggregate.light_hours(),
                aggregate.rem_hours(),
                aggregate.awake_hours()
            ),
            QueryAnswer::Comparison { impact, .. } => f.write_str(&impact.narrative),
        }
    }
}

/// Answers free-text health questions: analyzer, then provider, then narrator.
pub struct HealthAssistant {
    analyzer: QueryAnalyzer,
    provider: MetricsProvider,
    narrator: ImpactNarrator,
}

impl HealthAssistant {
    pub fn new(analyzer: QueryAnalyzer, provider: MetricsProvider, narrator: ImpactNarrator) -> Self {
        Self {
            analyzer,
            provider,
            narrator,
        }
    }

    pub fn with_sample_data() -> Self {
        Self::new(
            QueryAnalyzer::default(),
            MetricsProvider::with_sample_data(),
            ImpactNarrator::default(),
        )
    }

    pub fn provider(&self) -> &MetricsProvider {
        &self.provider
    }

    pub fn steps(&self, date: NaiveDate) -> Result<HourlySeries, AssistantError> {
        Ok(self.provider.steps(date)?.clone())
    }

    pub fn heart_rate(&self, date: NaiveDate) -> Result<HourlySeries, AssistantError> {
        Ok(self.provider.heart_rate(date)?.clone())
    }

    pub fn sleep(&self, date: NaiveDate) -> SleepAggregate {
        self.provider.sleep(date)
    }

    pub fn impact(&self, date: NaiveDate) -> Result<ImpactResult, AssistantError> {
        let steps = self.provider.steps(date)?;
        let heart_rate = self.provider.heart_rate(date)?;
        Ok(self.narrator.analyze(steps, heart_rate)?)
    }

    /// Queries without a recognisable date are answered for the analyzer's fallback date.
    pub fn answer(&self, query: &str) -> Result<QueryAnswer, AssistantError> {
        let intent = self.analyzer.analyze(query);
        let date = intent.date.unwrap_or_else(|| self.analyzer.fallback_date());
        info!("answering {} query for {date}", intent.intent);

        let answer = match intent.intent {
            Intent::Steps => QueryAnswer::Steps {
                date,
                series: self.steps(date)?,
                total: self.provider.total_steps(date)?,
            },
            Intent::HeartRate => QueryAnswer::HeartRate {
                date,
                series: self.heart_rate(date)?,
                average: self.provider.average_heart_rate(date)?,
            },
            Intent::Sleep => QueryAnswer::Sleep {
                date,
                aggregate: self.sleep(date),
            },
            Intent::Comparison => QueryAnswer::Comparison {
                date,
                impact: self.impact(date)?,
            },
        };

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use vitalquery_algos::SAMPLE_DATE;

    use super::*;

    #[test]
    fn answers_steps_question() {
        let assistant = HealthAssistant::with_sample_data();
        let answer = assistant.answer("What were my steps on April 9th?").unwrap();

        assert_eq!(answer.intent(), Intent::Steps);
        assert_eq!(answer.date(), SAMPLE_DATE);
        match &answer {
            QueryAnswer::Steps { series, total, .. } => {
                assert_eq!(series.len(), 24);
                assert_eq!(*total, 11_000);
            }
            other => panic!("unexpected answer: {other:?}"),
        }
        assert_eq!(answer.to_string(), "Total steps on 2016-04-09: 11000");
    }

    #[test]
    fn answers_heart_rate_without_date() {
        let assistant = HealthAssistant::with_sample_data();
        let answer = assistant.answer("how was my heart?").unwrap();

        assert_eq!(answer.date(), SAMPLE_DATE);
        assert!(matches!(answer, QueryAnswer::HeartRate { average: 79, .. }));
    }

    #[test]
    fn answers_impact_question() {
        let assistant = HealthAssistant::with_sample_data();
        let answer = assistant.answer("heart rate impact on April 9").unwrap();

        let QueryAnswer::Comparison { impact, .. } = &answer else {
            panic!("expected comparison, got {answer:?}");
        };
        assert_eq!(impact.delta, 58);
        assert_eq!(answer.to_string(), impact.narrative);
    }

    #[test]
    fn answers_sleep_with_zeroed_aggregate() {
        let assistant = HealthAssistant::with_sample_data();
        let answer = assistant.answer("how did I sleep?").unwrap();

        assert_eq!(
            answer,
            QueryAnswer::Sleep {
                date: SAMPLE_DATE,
                aggregate: SleepAggregate::default(),
            }
        );
    }

    #[test]
    fn unsupported_date_is_an_error() {
        let assistant = HealthAssistant::with_sample_data();
        let result = assistant.answer("steps on May 1st");

        assert!(matches!(
            result,
            Err(AssistantError::Data(DataError::NoDataForDate(date)))
                if date == NaiveDate::from_ymd_opt(2016, 5, 1).unwrap()
        ));
    }

    #[test]
    fn answer_serializes_with_intent_tag() {
        let assistant = HealthAssistant::with_sample_data();
        let answer = assistant.answer("heart rate").unwrap();

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["intent"], "heart_rate");
        assert_eq!(json["date"], "2016-04-09");
        assert_eq!(json["average"], 79);
        assert_eq!(json["series"][7]["hour"], "07:00");
    }
}
