use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::errors::{AppError, AppResult};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a visit date typed by the user: `YYYY-MM-DD`, optionally followed
/// by `HH:MM`, in local time. `today` is accepted as a shortcut.
pub fn parse_visit(input: &str) -> AppResult<DateTime<Utc>> {
    let s = input.trim();
    let naive = if s.eq_ignore_ascii_case("today") {
        today().and_time(NaiveTime::MIN)
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        dt
    } else if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        d.and_time(NaiveTime::MIN)
    } else {
        return Err(AppError::Validation(format!(
            "invalid date '{}' (expected YYYY-MM-DD or 'YYYY-MM-DD HH:MM')",
            input
        )));
    };

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::Validation(format!("'{}' does not exist in local time", input)))
}

/// `2025-10-03 12:30` in local time.
pub fn format_local(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// `12:30`, or the full date when `dt` is not today.
pub fn format_until(dt: &DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    if local.date_naive() == today() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%m-%d %H:%M").to_string()
    }
}
