//! Date arithmetic, formatting and calendar boundaries over `DateTime<Utc>`.

use crate::utils::error::{Result, UtilkitError};
use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Timelike, Utc, Weekday,
};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses RFC 3339, a zone-less `YYYY-MM-DD[T ]HH:MM:SS` (read as UTC) or a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

const FORMAT_TOKENS: [&str; 11] = [
    "YYYY", "SSS", "YY", "MM", "DD", "HH", "mm", "ss", "M", "D", "H",
];

/// Formats `date` with moment-style tokens
/// (`YYYY YY MM M DD D HH H mm ss SSS`); any other text is copied as is.
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        for token in FORMAT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                let rendered = match token {
                    "YYYY" => format!("{:04}", date.year()),
                    "YY" => format!("{:02}", date.year().rem_euclid(100)),
                    "MM" => format!("{:02}", date.month()),
                    "M" => date.month().to_string(),
                    "DD" => format!("{:02}", date.day()),
                    "D" => date.day().to_string(),
                    "HH" => format!("{:02}", date.hour()),
                    "H" => date.hour().to_string(),
                    "mm" => format!("{:02}", date.minute()),
                    "ss" => format!("{:02}", date.second()),
                    _ => format!("{:03}", date.timestamp_subsec_millis()),
                };
                out.push_str(&rendered);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

fn out_of_range(field: &str) -> UtilkitError {
    UtilkitError::invalid_input(field, "resulting date is out of range")
}

fn add_delta(
    date: &DateTime<Utc>,
    field: &str,
    delta: Option<TimeDelta>,
) -> Result<DateTime<Utc>> {
    delta
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| out_of_range(field))
}

pub fn add_days(date: &DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    add_delta(date, "days", TimeDelta::try_days(days))
}

pub fn add_hours(date: &DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>> {
    add_delta(date, "hours", TimeDelta::try_hours(hours))
}

pub fn add_minutes(date: &DateTime<Utc>, minutes: i64) -> Result<DateTime<Utc>> {
    add_delta(date, "minutes", TimeDelta::try_minutes(minutes))
}

/// Adds calendar months, clamping to the last day when the target month is
/// shorter (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: &DateTime<Utc>, months: i32) -> Result<DateTime<Utc>> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range("months"))
}

pub fn add_years(date: &DateTime<Utc>, years: i32) -> Result<DateTime<Utc>> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| out_of_range("years"))?;
    add_months(date, months)
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn diff_days(from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
    (*to - *from).num_days()
}

fn at_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(time))
}

fn last_millisecond() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

pub fn start_of_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    at_time(date.date_naive(), NaiveTime::MIN)
}

pub fn end_of_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    at_time(date.date_naive(), last_millisecond())
}

/// Midnight of the Monday on or before `date`.
pub fn start_of_week(date: &DateTime<Utc>) -> DateTime<Utc> {
    let day = date.date_naive();
    let back = day.weekday().num_days_from_monday() as u64;
    let monday = day.checked_sub_days(chrono::Days::new(back)).unwrap_or(day);
    at_time(monday, NaiveTime::MIN)
}

pub fn start_of_month(date: &DateTime<Utc>) -> DateTime<Utc> {
    let day = date.date_naive();
    at_time(day.with_day(1).unwrap_or(day), NaiveTime::MIN)
}

pub fn end_of_month(date: &DateTime<Utc>) -> DateTime<Utc> {
    let day = date.date_naive();
    let last = days_in_month(day.year(), day.month())
        .ok()
        .and_then(|n| day.with_day(n))
        .unwrap_or(day);
    at_time(last, last_millisecond())
}

pub fn is_weekend(date: &DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    if !(1..=12).contains(&month) {
        return Err(UtilkitError::invalid_input(
            "month",
            format!("expected 1-12, got {}", month),
        ));
    }
    let days = match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    Ok(days)
}

const TIME_UNITS: [(&str, i64); 6] = [
    ("year", 365 * 86_400),
    ("month", 30 * 86_400),
    ("week", 7 * 86_400),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Human readable distance between `date` and `now`, e.g. `3 days ago` or
/// `in 2 hours`. Anything under a minute is `just now`.
pub fn time_ago(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *date).num_seconds();
    let future = seconds < 0;
    let seconds = seconds.abs();

    for (unit, unit_seconds) in TIME_UNITS {
        if seconds >= unit_seconds {
            let n = seconds / unit_seconds;
            let plural = if n == 1 { "" } else { "s" };
            return if future {
                format!("in {} {}{}", n, unit, plural)
            } else {
                format!("{} {}{} ago", n, unit, plural)
            };
        }
    }

    "just now".to_string()
}
