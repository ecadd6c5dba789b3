//! Date and time normalization for user-typed fragments.
//!
//! Dates travel through the bot in two shapes:
//! - the canonical form `day.month.year` without padding (`5.3.2024`), used in
//!   drafts, menu labels and replies;
//! - the storage form `YYYY.MM.DD` (`2024.03.05`), year first and padded so
//!   that plain string comparison in SQL follows the calendar.
//!
//! Times are always `HH:MM`, 24-hour, zero padded.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

const STORAGE_DATE_FORMAT: &str = "%Y.%m.%d";
const DISPLAY_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The current date on the host clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Builds a canonical date from the captured day, month and year fragments.
///
/// Missing parts are resolved against `today`: without a month the current
/// month is used (or the next one if the day already passed), without a year
/// the current year is used (or the next one if the month already passed).
/// A year with two significant digits (10 to 99) is taken to be in the 2000s.
///
/// Returns `None` when the day is missing, the date does not exist, or it
/// lies before `today`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use planner_bot::utils::datetime::build_date;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(build_date(Some("5"), None, None, today).as_deref(), Some("5.4.2024"));
/// assert_eq!(build_date(Some("12"), Some("3"), Some("24"), today).as_deref(), Some("12.3.2024"));
/// ```
pub fn build_date(
    day: Option<&str>,
    month: Option<&str>,
    year: Option<&str>,
    today: NaiveDate,
) -> Option<String> {
    let day: u32 = day?.parse().ok()?;
    let month: Option<u32> = match month {
        Some(m) => Some(m.parse().ok()?),
        None => None,
    };

    let (month, year) = match month {
        None => {
            let mut month = today.month();
            let mut year = today.year();
            if day < today.day() {
                month += 1;
                if month == 13 {
                    month = 1;
                    year += 1;
                }
            }
            (month, year)
        }
        Some(month) => {
            let year = match year {
                Some(raw) => parse_year(raw)?,
                None if month < today.month() => today.year() + 1,
                None => today.year(),
            };
            (month, year)
        }
    };

    let selected = NaiveDate::from_ymd_opt(year, month, day)?;
    if selected < today {
        return None;
    }
    Some(format_canonical_date(selected))
}

fn parse_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    // leading zeros do not count: "024" is 24
    if (10..100).contains(&year) {
        Some(year + 2000)
    } else {
        Some(year)
    }
}

/// Builds an `HH:MM` time from an hour and an optional minute.
///
/// Hours run from 0 to 24 and minutes default to `00`.
pub fn build_time(hour: Option<&str>, minute: Option<&str>) -> Option<String> {
    let hour: u32 = hour?.parse().ok()?;
    let minute: u32 = match minute {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hour > 24 || minute > 59 {
        return None;
    }
    Some(format!("{hour:02}:{minute:02}"))
}

pub fn format_canonical_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

pub fn parse_canonical_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('.');
    let day = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Converts a date to its year-first storage form.
pub fn to_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

pub fn parse_storage_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, STORAGE_DATE_FORMAT).ok()
}

/// Reverses a canonical `day.month.year` date into storage form.
pub fn reverse_date(canonical: &str) -> Option<String> {
    parse_canonical_date(canonical).map(to_storage_date)
}

/// Combines a date with an `HH:MM` time. `24:00` rolls over to the next day.
pub fn compose_timestamp(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    let (hour, minute) = time.split_once(':')?;
    let hour: i64 = hour.parse().ok()?;
    let minute: i64 = minute.parse().ok()?;
    if !(0..=24).contains(&hour) || !(0..60).contains(&minute) {
        return None;
    }
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight + Duration::hours(hour) + Duration::minutes(minute))
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}
