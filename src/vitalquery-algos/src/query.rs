use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use vitalquery_types::{Intent, QueryIntent};

/// Year every extracted date is anchored to; the bundled dataset covers a single year.
pub const SAMPLE_YEAR: i32 = 2016;

/// The one day of fabricated data the app ships with.
pub const SAMPLE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(SAMPLE_YEAR, 4, 9) {
    Some(date) => date,
    None => panic!("invalid sample date"),
};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s+(\d{1,2})(?:st|nd|rd|th)?").unwrap());

/// Rule-based classifier turning free text into an [`Intent`] and an optional date.
#[derive(Clone, Copy, Debug)]
pub struct QueryAnalyzer {
    anchor_year: i32,
    fallback_date: NaiveDate,
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new(SAMPLE_YEAR, SAMPLE_DATE)
    }
}

impl QueryAnalyzer {
    pub fn new(anchor_year: i32, fallback_date: NaiveDate) -> Self {
        Self {
            anchor_year,
            fallback_date,
        }
    }

    pub fn fallback_date(&self) -> NaiveDate {
        self.fallback_date
    }

    /// Never fails: unrecognised text falls through to [`Intent::Steps`] with no date.
    pub fn analyze(&self, query: &str) -> QueryIntent {
        let date = self.extract_date(query);
        let lower = query.to_lowercase();

        if lower.contains("impact") || lower.contains("correlation") {
            return QueryIntent::new(Intent::Comparison, date.or(Some(self.fallback_date)));
        }

        let intent = if lower.contains("steps") {
            Intent::Steps
        } else if lower.contains("heart") || lower.contains("heartrate") {
            Intent::HeartRate
        } else if lower.contains("sleep") {
            Intent::Sleep
        } else {
            debug!("no intent keyword in {query:?}, defaulting to steps");
            Intent::Steps
        };

        QueryIntent::new(intent, date)
    }

    /// Only the first `<word> <day>[st|nd|rd|th]` pair is considered; when its
    /// word is not a month name there is no date.
    pub fn extract_date(&self, query: &str) -> Option<NaiveDate> {
        let captures = DATE_PATTERN.captures(query)?;
        let month = month_number(&captures[1])?;
        let day = captures[2].parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(self.anchor_year, month, day)
    }
}

fn month_number(word: &str) -> Option<u32> {
    let word = word.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == word)
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2016, month, day)
    }

    #[test]
    fn steps_with_ordinal_date() {
        let result = QueryAnalyzer::default().analyze("What were my steps on April 9th?");
        assert_eq!(result, QueryIntent::new(Intent::Steps, date(4, 9)));
    }

    #[test]
    fn impact_query_is_comparison() {
        let result = QueryAnalyzer::default().analyze("heart rate impact on April 9");
        assert_eq!(result, QueryIntent::new(Intent::Comparison, date(4, 9)));
    }

    #[test]
    fn comparison_falls_back_to_sample_date() {
        let result = QueryAnalyzer::default().analyze("Show the correlation between steps and HR");
        assert_eq!(result.intent, Intent::Comparison);
        assert_eq!(result.date, Some(SAMPLE_DATE));
    }

    #[test]
    fn unknown_text_defaults_to_steps_without_date() {
        let result = QueryAnalyzer::default().analyze("random text");
        assert_eq!(result, QueryIntent::new(Intent::Steps, None));
    }

    #[test]
    fn impact_outranks_steps() {
        let result = QueryAnalyzer::default().analyze("What is the impact of my steps?");
        assert_eq!(result.intent, Intent::Comparison);
    }

    #[test]
    fn steps_outrank_heart() {
        let result = QueryAnalyzer::default().analyze("steps and heart rate on May 2nd");
        assert_eq!(result, QueryIntent::new(Intent::Steps, date(5, 2)));
    }

    #[test]
    fn heart_rate_keywords() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.analyze("My HEART today").intent, Intent::HeartRate);
        assert_eq!(analyzer.analyze("heartrate please").intent, Intent::HeartRate);
    }

    #[test]
    fn sleep_keyword() {
        let result = QueryAnalyzer::default().analyze("How did I sleep on March 3rd?");
        assert_eq!(result, QueryIntent::new(Intent::Sleep, date(3, 3)));
    }

    #[test]
    fn month_is_case_insensitive_and_day_padded() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.extract_date("on DECEMBER 1st"), date(12, 1));
        assert_eq!(analyzer.extract_date("june 21"), date(6, 21));
    }

    #[test]
    fn non_month_word_yields_no_date() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.extract_date("walked 9 times"), None);
        assert_eq!(analyzer.extract_date("Aprl 9"), None);
    }

    #[test]
    fn leading_non_month_pair_yields_no_date() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.extract_date("at 10 on April 9"), None);

        let result = analyzer.analyze("steps at 10 on April 9");
        assert_eq!(result, QueryIntent::new(Intent::Steps, None));
    }

    #[test]
    fn day_may_run_into_following_text() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.extract_date("steps on April 9am"), date(4, 9));
        assert_eq!(analyzer.extract_date("April 2016"), date(4, 20));
    }

    #[test]
    fn impossible_day_yields_no_date() {
        let analyzer = QueryAnalyzer::default();
        assert_eq!(analyzer.extract_date("February 31st"), None);
        assert_eq!(analyzer.extract_date("June 0"), None);
    }

    #[test]
    fn custom_anchor_year() {
        let fallback = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let analyzer = QueryAnalyzer::new(2024, fallback);
        assert_eq!(
            analyzer.extract_date("February 29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(analyzer.analyze("impact").date, Some(fallback));
    }
}
