// Date utility functions
// Calendar-day and calendar-month arithmetic in host local time

use chrono::{DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone};

/// Resolves a wall-clock time to a local instant.
///
/// Ambiguous times (DST fall-back) pick the earlier instant; times that do
/// not exist locally (DST spring-forward gap) yield `None`.
pub fn from_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

/// Local midnight at the start of `date`.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    from_local(date.and_hms_opt(0, 0, 0)?)
}

/// Converts epoch seconds to local time.
pub fn from_timestamp(timestamp: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(timestamp, 0).single()
}

/// Moves forward by whole calendar days, keeping the wall-clock time.
pub fn add_days(date: DateTime<Local>, days: u64) -> Option<DateTime<Local>> {
    let naive = date.naive_local().checked_add_days(Days::new(days))?;
    from_local(naive)
}

/// Moves backward by whole calendar days, keeping the wall-clock time.
pub fn sub_days(date: DateTime<Local>, days: u64) -> Option<DateTime<Local>> {
    let naive = date.naive_local().checked_sub_days(Days::new(days))?;
    from_local(naive)
}

/// Moves backward by calendar months. The day of month is clamped to the
/// length of the target month (31 March minus one month is 29 February in
/// a leap year).
pub fn sub_months(date: DateTime<Local>, months: u32) -> Option<DateTime<Local>> {
    let naive = date.naive_local().checked_sub_months(Months::new(months))?;
    from_local(naive)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
