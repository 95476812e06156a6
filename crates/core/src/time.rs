//! Date and time parsing utilities
//!
//! Record stores hand over date-times in a handful of loose formats, and
//! times are often typed by hand (`2pm`, `14:30`, `9:00 a`). These helpers
//! reduce them to the hour-granular slots the aggregator works with.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// An hour-granular point in time. Orders by date, then hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotTime {
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl SlotTime {
    pub fn new(date: NaiveDate, hour: u32) -> Self {
        Self { date, hour }
    }
}

impl From<NaiveDateTime> for SlotTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self::new(dt.date(), dt.hour())
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.date, self.hour)
    }
}

/// A hand-typed time resolved into hour, minute and half of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTime {
    pub hour: u32,
    pub minute: u32,
    pub is_am: bool,
}

impl fmt::Display for ResolvedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Resolve a loosely formatted time such as `2pm`, `14:30` or `9:00 a`.
///
/// An `a` or `p` marker decides the half of day; without one, hours from 12
/// up are PM. In 12-hour output `0` becomes `12` and afternoon hours drop by
/// 12. In military output PM hours before noon gain 12 and `12 AM` is `0`.
pub fn resolve_ambiguous_time(text: &str, military: bool) -> Result<ResolvedTime> {
    let lower = text.to_lowercase();
    let invalid = || Error::InvalidTime(text.to_string());

    let (hour_text, minute_text) = match lower.split_once(':') {
        Some((hour, rest)) => (digits(hour), digits(rest.split(':').next().unwrap_or(""))),
        None => (digits(&lower), String::new()),
    };
    if hour_text.is_empty() {
        return Err(invalid());
    }

    let mut hour: u32 = hour_text.parse().map_err(|_| invalid())?;
    let minute: u32 = if minute_text.is_empty() {
        0
    } else {
        minute_text.parse().map_err(|_| invalid())?
    };
    if hour >= 24 || minute >= 60 {
        return Err(invalid());
    }

    let is_am = if lower.contains('a') {
        true
    } else if lower.contains('p') {
        false
    } else {
        hour < 12
    };

    if military {
        if hour < 12 && !is_am {
            hour += 12;
        } else if hour == 12 && is_am {
            hour = 0;
        }
    } else if hour > 12 {
        hour -= 12;
    } else if hour == 0 {
        hour = 12;
    }

    Ok(ResolvedTime {
        hour,
        minute,
        is_am,
    })
}

/// Resolve both ends of a `start - end` time range
pub fn resolve_time_range(range: &str) -> Result<Vec<ResolvedTime>> {
    range
        .split('-')
        .map(|time| resolve_ambiguous_time(time.trim(), false))
        .collect()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Split a stored date-time into its date and hour.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, and a date followed by a
/// free-form time (`03/14/2024 2pm`).
pub fn split_date_time(text: &str) -> Result<SlotTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local().into());
    }

    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Ok(dt.into());
    }

    let (date, time) = text
        .split_once(' ')
        .ok_or_else(|| Error::InvalidTime(text.to_string()))?;
    let date = parse_date(date).ok_or_else(|| Error::InvalidTime(text.to_string()))?;
    let time = resolve_ambiguous_time(time.trim(), true)?;

    Ok(SlotTime::new(date, time.hour))
}

/// Parse an optional date-time, treating a blank string as absent
pub fn split_date_time_opt(text: Option<&str>) -> Result<Option<SlotTime>> {
    text.filter(|t| !t.trim().is_empty())
        .map(split_date_time)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_twelve_hour_resolution() {
        let t = resolve_ambiguous_time("14:30", false).unwrap();
        assert_eq!((t.hour, t.minute, t.is_am), (2, 30, false));

        let t = resolve_ambiguous_time("0:05", false).unwrap();
        assert_eq!((t.hour, t.minute, t.is_am), (12, 5, true));

        let t = resolve_ambiguous_time("9", false).unwrap();
        assert_eq!((t.hour, t.minute, t.is_am), (9, 0, true));
        assert_eq!(t.to_string(), "9:00");
    }

    #[test]
    fn test_markers_decide_half_of_day() {
        let t = resolve_ambiguous_time("2PM", false).unwrap();
        assert!(!t.is_am);
        assert_eq!(t.hour, 2);

        let t = resolve_ambiguous_time("9:15 a", false).unwrap();
        assert!(t.is_am);
        assert_eq!(t.minute, 15);
    }

    #[test]
    fn test_military_resolution() {
        assert_eq!(resolve_ambiguous_time("2pm", true).unwrap().hour, 14);
        assert_eq!(resolve_ambiguous_time("12am", true).unwrap().hour, 0);
        assert_eq!(resolve_ambiguous_time("12pm", true).unwrap().hour, 12);
        assert_eq!(resolve_ambiguous_time("17:00", true).unwrap().hour, 17);
        assert_eq!(resolve_ambiguous_time("8:00 am", true).unwrap().hour, 8);
    }

    #[test]
    fn test_invalid_times() {
        assert!(matches!(
            resolve_ambiguous_time("25:00", false),
            Err(Error::InvalidTime(_))
        ));
        assert!(resolve_ambiguous_time("10:75", false).is_err());
        assert!(resolve_ambiguous_time("noon", false).is_err());
    }

    #[test]
    fn test_time_range() {
        let range = resolve_time_range("9am - 5pm").unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].hour, 9);
        assert_eq!(range[1].hour, 5);
        assert!(!range[1].is_am);
    }

    #[test]
    fn test_split_date_time_formats() {
        let expected = SlotTime::new(date(2024, 3, 14), 14);
        assert_eq!(split_date_time("2024-03-14T14:00:00Z").unwrap(), expected);
        assert_eq!(split_date_time("2024-03-14T14:30:00-05:00").unwrap(), expected);
        assert_eq!(split_date_time("2024-03-14 14:00").unwrap(), expected);
        assert_eq!(split_date_time("2024-03-14 14:45:10").unwrap(), expected);
        assert_eq!(split_date_time("03/14/2024 2pm").unwrap(), expected);
        assert_eq!(split_date_time("03-14-2024 2:15 p").unwrap(), expected);
    }

    #[test]
    fn test_split_date_time_rejects_garbage() {
        assert!(split_date_time("2024-03-14").is_err());
        assert!(split_date_time("tomorrow 2pm").is_err());
        assert!(split_date_time("").is_err());
    }

    #[test]
    fn test_optional_date_time() {
        assert_eq!(split_date_time_opt(None).unwrap(), None);
        assert_eq!(split_date_time_opt(Some("  ")).unwrap(), None);
        assert!(split_date_time_opt(Some("2024-03-14 09:00")).unwrap().is_some());
    }

    #[test]
    fn test_slot_ordering() {
        let morning = SlotTime::new(date(2024, 3, 14), 9);
        let evening = SlotTime::new(date(2024, 3, 14), 20);
        let next_day = SlotTime::new(date(2024, 3, 15), 1);
        assert!(morning < evening);
        assert!(evening < next_day);
        assert_eq!(morning.to_string(), "2024-03-14 09:00");
    }
}
