//!
//! Pure calendar arithmetic.
//!

use crate::locale::Locale;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::cmp::Ordering;

/// Days in the given month. Month is 0-based.
///
/// February has 29 days in years divisible by 4 but not by 100,
/// and in years divisible by 400.
pub fn days_in_month(month: u32, year: i32, locale: &Locale) -> u32 {
    let month = month as usize % 12;
    if month == 1 && is_leap_year(year) {
        29
    } else {
        locale.days_in_month[month]
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Shape of one month panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i32,
    /// 0-based
    pub month: u32,
    /// Days of the previous month shown before the first.
    pub leading: u32,
    /// Days in this month.
    pub days: u32,
    /// Days of the next month shown after the last.
    pub trailing: u32,
}

impl MonthLayout {
    /// Total number of cells. Always a multiple of 7.
    pub fn cells(&self) -> u32 {
        self.leading + self.days + self.trailing
    }

    /// Number of week rows.
    pub fn weeks(&self) -> u32 {
        self.cells() / 7
    }

    /// Date for a cell index.
    pub fn date_at(&self, idx: u32) -> Option<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?;
        if idx < self.leading {
            first.checked_sub_days(Days::new((self.leading - idx) as u64))
        } else {
            first.checked_add_days(Days::new((idx - self.leading) as u64))
        }
    }
}

/// Leading and trailing overflow days for a month.
///
/// The leading count is the weekday of the first, shifted by the
/// locale's first day of week. The trailing count fills the last
/// row to a full week.
pub fn month_layout(year: i32, month: u32, locale: &Locale) -> MonthLayout {
    let first_weekday = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let leading = (first_weekday + 7 - locale.first_day_of_week % 7) % 7;
    let days = days_in_month(month, year, locale);
    let trailing = (7 - (leading + days) % 7) % 7;
    MonthLayout {
        year,
        month,
        leading,
        days,
        trailing,
    }
}

/// ISO-8601 week number.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Time of day as used for defaults and clamping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn of(date: NaiveDateTime) -> Self {
        Self::new(date.hour(), date.minute(), date.second())
    }

    pub fn to_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours.min(23), self.minutes.min(59), self.seconds.min(59))
            .unwrap_or(NaiveTime::MIN)
    }
}

/// Clamp a default time of day to the bounds.
///
/// Clamped upward to `min` and downward to `max`. Minutes only
/// follow the bound when the hours tie, seconds only when hours
/// and minutes tie.
pub fn clamp_time_of_day(
    time: TimeOfDay,
    min: Option<TimeOfDay>,
    max: Option<TimeOfDay>,
) -> TimeOfDay {
    let mut t = time;
    if let Some(min) = min {
        t.hours = t.hours.max(min.hours);
        if t.hours == min.hours {
            t.minutes = t.minutes.max(min.minutes);
        }
        if t.hours == min.hours && t.minutes == min.minutes {
            t.seconds = t.seconds.max(min.seconds);
        }
    }
    if let Some(max) = max {
        t.hours = t.hours.min(max.hours);
        if t.hours == max.hours {
            t.minutes = t.minutes.min(max.minutes);
        }
        if t.hours == max.hours && t.minutes == max.minutes {
            t.seconds = t.seconds.min(max.seconds);
        }
    }
    t
}

/// Compare two dates, optionally ignoring the time of day.
pub fn compare_dates(a: NaiveDateTime, b: NaiveDateTime, timeless: bool) -> Ordering {
    if timeless {
        a.date().cmp(&b.date())
    } else {
        a.cmp(&b)
    }
}

/// Compare only the time of day.
pub fn compare_times(a: NaiveDateTime, b: NaiveDateTime) -> Ordering {
    a.time().cmp(&b.time())
}

/// Strictly between the two bounds, in either order.
pub fn is_between<T: PartialOrd>(v: T, a: T, b: T) -> bool {
    (v > a && v < b) || (v > b && v < a)
}

/// Midnight of the given day.
pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Date from possibly out of range parts.
///
/// Overflowing months roll into years, overflowing days into months,
/// and so on, like calendar arithmetic does. Month is 0-based, day
/// is 1-based.
pub fn compose(
    year: i64,
    month: i64,
    day: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
) -> Option<NaiveDateTime> {
    let year = year.checked_add(month.div_euclid(12))?;
    let month = month.rem_euclid(12);
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month as u32 + 1, 1)?;
    let date = first.and_time(NaiveTime::MIN);

    let delta = TimeDelta::try_days(day - 1)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)?
        .checked_add(&TimeDelta::try_milliseconds(millis)?)?;
    date.checked_add_signed(delta)
}

/// Parts of a date, as used by [compose].
pub fn decompose(date: NaiveDateTime) -> [i64; 7] {
    [
        date.year() as i64,
        date.month0() as i64,
        date.day() as i64,
        date.hour() as i64,
        date.minute() as i64,
        date.second() as i64,
        (date.nanosecond() / 1_000_000) as i64,
    ]
}

/// 12h clock to 24h clock.
pub fn ampm_to_military(hour: u32, pm: bool) -> u32 {
    (hour % 12) + 12 * (pm as u32)
}

/// 24h clock to 12h clock.
pub fn military_to_ampm(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Default date: now, or min_date if now is before it.
pub fn default_date(now: NaiveDateTime, min_date: Option<NaiveDateTime>) -> NaiveDateTime {
    match min_date {
        Some(min) if compare_dates(now, min, true) == Ordering::Less => min,
        _ => now,
    }
}
