//! Core domain types for the fitlog exercise tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Users and their exercise logs
//! - Exercise entries
//! - Projections returned by the store and the API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format for calendar dates on the wire (e.g. "Mon Jan 15 2024")
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// One logged activity entry.
///
/// Always embedded in a user's log; an exercise has no identity of its own
/// outside its parent user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub description: String,
    /// Duration in minutes. Positivity is not enforced.
    pub duration: i64,
    pub date: NaiveDate,
}

/// An account owning an ordered exercise log.
///
/// The log is append-only: entries are never updated or removed, and
/// insertion order is preserved. Usernames are not required to be unique.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub log: Vec<Exercise>,
}

/// Projection of a user without the log (list and create responses)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

/// Input for appending one exercise to a user's log
#[derive(Clone, Debug)]
pub struct NewExercise {
    pub description: String,
    pub duration: i64,
    /// Defaults to today (UTC) when absent.
    pub date: Option<NaiveDate>,
}

/// Merged view returned after a successful append: the owning user's
/// identity plus the entry that was just stored, date already formatted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AppendedExercise {
    pub id: Uuid,
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// Render a calendar date in the fixed human-readable wire form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_display_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(date), "Mon Jan 15 2024");
    }

    #[test]
    fn test_date_display_format_pads_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(date), "Fri Mar 01 2024");
    }

    #[test]
    fn test_user_document_roundtrip() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            log: vec![Exercise {
                description: "run".into(),
                duration: 30,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            }],
        };

        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, user.id);
        assert_eq!(parsed.username, "alice");
        assert_eq!(parsed.log, user.log);
    }

    #[test]
    fn test_user_document_log_defaults_to_empty() {
        let json = format!(r#"{{"id":"{}","username":"bob"}}"#, Uuid::new_v4());
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert!(parsed.log.is_empty());
    }
}
