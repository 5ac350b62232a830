//!
//! String tables for formatting and parsing.
//!
//! The picker uses its own table instead of `chrono::Locale` directly,
//! because it needs the names as data for parsing and a few extras
//! chrono doesn't know about. A table can be derived from any
//! chrono locale though.
//!

use crate::error::PickerError;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use std::fmt::{Debug, Formatter};

/// Locale data used by the picker.
#[derive(Clone, PartialEq, Eq)]
pub struct Locale {
    /// Short weekday names, starting with Sunday.
    pub weekdays_short: [String; 7],
    /// Long weekday names, starting with Sunday.
    pub weekdays_long: [String; 7],
    /// Short month names.
    pub months_short: [String; 12],
    /// Long month names.
    pub months_long: [String; 12],
    /// Days per month for a non-leap year.
    pub days_in_month: [u32; 12],
    /// 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u32,
    /// Suffix for the `J` token.
    pub ordinal: Option<fn(u32) -> &'static str>,
    /// Joins the two endpoints of a range.
    pub range_separator: String,
    /// Header for the week-number column.
    pub week_abbreviation: String,
    /// AM and PM.
    pub am_pm: [String; 2],
    /// Prefers a 24h clock.
    pub time_24hr: bool,
}

/// Locale selection for the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleSetting {
    /// English.
    #[default]
    Default,
    /// Lookup by name, e.g. `de_AT` or `fr`.
    Key(String),
    /// Explicit table.
    Custom(Box<Locale>),
}

impl From<&str> for LocaleSetting {
    fn from(value: &str) -> Self {
        LocaleSetting::Key(value.to_string())
    }
}

impl From<Locale> for LocaleSetting {
    fn from(value: Locale) -> Self {
        LocaleSetting::Custom(Box::new(value))
    }
}

impl From<chrono::Locale> for LocaleSetting {
    fn from(value: chrono::Locale) -> Self {
        LocaleSetting::Custom(Box::new(Locale::from_chrono(value)))
    }
}

impl Debug for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locale")
            .field("weekdays_short", &self.weekdays_short)
            .field("months_long", &self.months_long)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("range_separator", &self.range_separator)
            .field("am_pm", &self.am_pm)
            .field("time_24hr", &self.time_24hr)
            .finish()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn english_ordinal(nth: u32) -> &'static str {
    let s = nth % 100;
    if s > 3 && s < 21 {
        return "th";
    }
    match s % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn strings<const N: usize>(s: [&str; N]) -> [String; N] {
    s.map(|v| v.to_string())
}

impl Locale {
    /// The built-in english table.
    pub fn english() -> Self {
        Self {
            weekdays_short: strings(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            weekdays_long: strings([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            months_short: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            months_long: strings([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            days_in_month: DAYS_IN_MONTH,
            first_day_of_week: 0,
            ordinal: Some(english_ordinal),
            range_separator: " to ".to_string(),
            week_abbreviation: "Wk".to_string(),
            am_pm: strings(["AM", "PM"]),
            time_24hr: false,
        }
    }

    /// Derive the tables from a chrono locale.
    pub fn from_chrono(loc: chrono::Locale) -> Self {
        // 2023-01-01 is a sunday.
        let weekday = |i: usize, fmt: &str| {
            NaiveDate::from_ymd_opt(2023, 1, 1 + i as u32)
                .map(|d| d.format_localized(fmt, loc).to_string())
                .unwrap_or_default()
        };
        let month = |i: usize, fmt: &str| {
            NaiveDate::from_ymd_opt(2023, 1 + i as u32, 1)
                .map(|d| d.format_localized(fmt, loc).to_string())
                .unwrap_or_default()
        };
        let am_pm = |hour: u32| {
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .map(|d| Utc.from_utc_datetime(&d).format_localized("%p", loc).to_string())
                .unwrap_or_default()
        };

        let am = am_pm(1);
        let pm = am_pm(13);
        let time_24hr = am.is_empty() || pm.is_empty();

        Self {
            weekdays_short: std::array::from_fn(|i| weekday(i, "%a")),
            weekdays_long: std::array::from_fn(|i| weekday(i, "%A")),
            months_short: std::array::from_fn(|i| month(i, "%b")),
            months_long: std::array::from_fn(|i| month(i, "%B")),
            days_in_month: DAYS_IN_MONTH,
            first_day_of_week: match loc {
                chrono::Locale::POSIX | chrono::Locale::en_US => 0,
                _ => 1,
            },
            ordinal: match loc {
                chrono::Locale::POSIX | chrono::Locale::en_US | chrono::Locale::en_GB => {
                    Some(english_ordinal)
                }
                _ => None,
            },
            range_separator: " - ".to_string(),
            week_abbreviation: "#".to_string(),
            am_pm: if time_24hr {
                strings(["AM", "PM"])
            } else {
                [am, pm]
            },
            time_24hr,
        }
    }

    /// Resolve a locale key.
    ///
    /// Accepts `default` and `en` for the built-in table, full names
    /// like `de_AT` and bare languages like `fr`, which are tried
    /// as `fr_FR`.
    pub fn from_key(key: &str) -> Result<Self, PickerError> {
        match key {
            "" | "default" | "en" => return Ok(Self::english()),
            _ => {}
        }
        if let Ok(loc) = pure_rust_locales::Locale::try_from(key) {
            return Ok(Self::from_chrono(loc));
        }
        if !key.contains('_') {
            let full = format!("{}_{}", key, key.to_uppercase());
            if let Ok(loc) = pure_rust_locales::Locale::try_from(full.as_str()) {
                return Ok(Self::from_chrono(loc));
            }
        }
        Err(PickerError::InvalidConfiguration(format!(
            "invalid locale {}",
            key
        )))
    }

    /// Ordinal suffix for a day, empty if the locale has none.
    pub fn ordinal_suffix(&self, day: u32) -> &'static str {
        self.ordinal.map(|f| f(day)).unwrap_or("")
    }

    /// Weekday names in display order, honoring first_day_of_week.
    pub fn weekdays_ordered(&self) -> impl Iterator<Item = &str> + '_ {
        (0..7).map(move |i| self.weekdays_short[(i + self.first_day_of_week as usize) % 7].as_str())
    }

    /// Short weekday name of a date.
    pub fn weekday_short(&self, date: NaiveDate) -> &str {
        &self.weekdays_short[date.weekday().num_days_from_sunday() as usize]
    }
}
