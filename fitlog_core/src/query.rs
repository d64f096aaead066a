//! Log query engine: date-range and count filtering of one user's log.
//!
//! Pure and in-memory, no side effects. Filtering preserves whatever
//! order the log was passed in (insertion order), applies inclusive
//! `from`/`to` calendar-date bounds and an optional prefix limit, then
//! renders dates in the fixed wire form.

use crate::{format_date, Exercise};
use chrono::NaiveDate;
use serde::Serialize;

/// One formatted log entry as returned to clients
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExerciseView {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// An optional date bound parsed from request text.
///
/// Malformed text becomes `Invalid`, and every comparison against an
/// invalid bound is false: an unparsable bound filters out all entries
/// rather than erroring. Clients rely on this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum DateBound {
    #[default]
    Absent,
    Invalid,
    At(NaiveDate),
}

impl DateBound {
    /// Parse a bound from raw query text. Empty or missing text means no
    /// bound at all; anything else must be a `YYYY-MM-DD` date.
    fn parse(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            None | Some("") => Self::Absent,
            Some(t) => match t.parse::<NaiveDate>() {
                Ok(date) => Self::At(date),
                Err(_) => Self::Invalid,
            },
        }
    }

    /// True when `date` satisfies this as an inclusive lower bound
    fn admits_from(self, date: NaiveDate) -> bool {
        match self {
            Self::Absent => true,
            Self::Invalid => false,
            Self::At(bound) => date >= bound,
        }
    }

    /// True when `date` satisfies this as an inclusive upper bound
    fn admits_to(self, date: NaiveDate) -> bool {
        match self {
            Self::Absent => true,
            Self::Invalid => false,
            Self::At(bound) => date <= bound,
        }
    }
}

/// Query filter narrowing a log view without mutating stored data
#[derive(Clone, Debug, Default)]
pub struct LogQuery {
    from: DateBound,
    to: DateBound,
    limit: Option<usize>,
}

impl LogQuery {
    /// Build a query from already-parsed values
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>, limit: Option<usize>) -> Self {
        Self {
            from: from.map_or(DateBound::Absent, DateBound::At),
            to: to.map_or(DateBound::Absent, DateBound::At),
            limit,
        }
    }

    /// Build a query from raw request text.
    ///
    /// Malformed `from`/`to` text yields an invalid bound (see
    /// [`DateBound`]); malformed `limit` text coerces to a limit of 0,
    /// so an unparsable limit yields an empty result. Clients rely on
    /// both coercions.
    pub fn from_raw(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> Self {
        let limit = limit
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<usize>().unwrap_or(0));

        Self {
            from: DateBound::parse(from),
            to: DateBound::parse(to),
            limit,
        }
    }

    /// Apply the filter to a log, preserving input order.
    ///
    /// A `limit` of 0 yields an empty result; no filters at all returns
    /// the whole log.
    pub fn apply(&self, log: &[Exercise]) -> Vec<Exercise> {
        let mut entries: Vec<Exercise> = log
            .iter()
            .filter(|e| self.from.admits_from(e.date) && self.to.admits_to(e.date))
            .cloned()
            .collect();

        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }

        entries
    }
}

/// Format filtered entries for the wire; description and duration pass
/// through unchanged
pub fn format_log(entries: &[Exercise]) -> Vec<ExerciseView> {
    entries
        .iter()
        .map(|e| ExerciseView {
            description: e.description.clone(),
            duration: e.duration,
            date: format_date(e.date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(description: &str, duration: i64, date: &str) -> Exercise {
        Exercise {
            description: description.into(),
            duration,
            date: date.parse().unwrap(),
        }
    }

    fn sample_log() -> Vec<Exercise> {
        vec![
            exercise("run", 30, "2024-03-01"),
            exercise("swim", 45, "2024-03-05"),
            exercise("row", 20, "2024-03-05"),
            exercise("walk", 60, "2024-03-10"),
        ]
    }

    #[test]
    fn test_no_filters_returns_whole_log_in_order() {
        let log = sample_log();
        let result = LogQuery::default().apply(&log);

        assert_eq!(result.len(), 4);
        assert_eq!(result, log);
    }

    #[test]
    fn test_from_bound_is_inclusive() {
        let log = sample_log();
        let query = LogQuery::from_raw(Some("2024-03-05"), None, None);
        let result = query.apply(&log);

        let names: Vec<&str> = result.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["swim", "row", "walk"]);
    }

    #[test]
    fn test_to_bound_is_inclusive() {
        let log = sample_log();
        let query = LogQuery::from_raw(None, Some("2024-03-05"), None);
        let result = query.apply(&log);

        let names: Vec<&str> = result.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["run", "swim", "row"]);
    }

    #[test]
    fn test_from_equal_to_selects_single_day() {
        let log = sample_log();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let query = LogQuery::new(Some(day), Some(day), None);
        let result = query.apply(&log);

        let names: Vec<&str> = result.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["swim", "row"]);
    }

    #[test]
    fn test_limit_keeps_prefix_of_filtered_sequence() {
        let log = sample_log();
        let query = LogQuery::from_raw(Some("2024-03-05"), None, Some("2"));
        let result = query.apply(&log);

        let names: Vec<&str> = result.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["swim", "row"]);
    }

    #[test]
    fn test_limit_larger_than_log_is_harmless() {
        let log = sample_log();
        let result = LogQuery::from_raw(None, None, Some("100")).apply(&log);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_limit_zero_yields_empty_result() {
        let log = sample_log();
        assert!(LogQuery::from_raw(None, None, Some("0")).apply(&log).is_empty());
        assert!(LogQuery::new(None, None, Some(0)).apply(&log).is_empty());
    }

    #[test]
    fn test_malformed_from_filters_out_everything() {
        let log = sample_log();
        let result = LogQuery::from_raw(Some("not-a-date"), None, None).apply(&log);
        assert!(result.is_empty());
    }

    #[test]
    fn test_malformed_to_filters_out_everything() {
        let log = sample_log();
        let result = LogQuery::from_raw(None, Some("garbage"), None).apply(&log);
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_bound_text_means_absent() {
        let log = sample_log();
        let result = LogQuery::from_raw(Some(""), Some("  "), None).apply(&log);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_malformed_limit_yields_empty_result() {
        let log = sample_log();
        let result = LogQuery::from_raw(None, None, Some("abc")).apply(&log);
        assert!(
            result.is_empty(),
            "unparsable limit must coerce to an empty result, got {} entries",
            result.len()
        );
    }

    #[test]
    fn test_format_log_renders_dates() {
        let log = vec![exercise("run", 30, "2024-01-15")];
        let views = format_log(&log);

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].description, "run");
        assert_eq!(views[0].duration, 30);
        assert_eq!(views[0].date, "Mon Jan 15 2024");
    }

    #[test]
    fn test_insertion_order_is_never_resorted() {
        // Entries deliberately out of chronological order
        let log = vec![
            exercise("late", 10, "2024-03-09"),
            exercise("early", 10, "2024-03-02"),
        ];
        let result = LogQuery::from_raw(Some("2024-03-01"), Some("2024-03-31"), None).apply(&log);

        let names: Vec<&str> = result.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["late", "early"]);
    }
}
