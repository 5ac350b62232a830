//!
//! Token based date formatting and parsing.
//!
//! A format is a string of single-char tokens. Any other char is
//! copied as is. A backslash escapes the following char and is
//! never part of the output.
//!
//! | token | meaning |
//! |---|---|
//! | d | day of month, 2 digits |
//! | j | day of month |
//! | J | day of month with ordinal suffix |
//! | D | short weekday |
//! | l | long weekday |
//! | w | weekday, 0 = sunday |
//! | W | ISO week number |
//! | F | long month name |
//! | M | short month name |
//! | m | month, 2 digits |
//! | n | month |
//! | Y | year, 4 digits |
//! | y | year, 2 digits |
//! | H | hours 00-23 |
//! | h | hours 1-12 |
//! | G | hours 1-12, 2 digits |
//! | K | AM/PM |
//! | i | minutes, 2 digits |
//! | S | seconds, 2 digits |
//! | s | seconds |
//! | U | unix seconds |
//! | u | unix milliseconds |
//! | Z | ISO-8601 |
//!

use crate::calendar_math::{compose, decompose, iso_week_number, start_of_day};
use crate::error::{ErrorHandler, PickerError};
use crate::locale::Locale;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Default date format.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";
/// Default format for the alternate input.
pub const DEFAULT_ALT_FORMAT: &str = "F j, Y";

/// Anything that can be turned into a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Used as is.
    DateTime(NaiveDateTime),
    /// Parsed with the given or the configured format.
    /// The text `today` is always the current day.
    Text(String),
    /// Milliseconds since the unix epoch.
    Timestamp(i64),
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        DateInput::Text(value.clone())
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::Timestamp(value)
    }
}

/// Replaces the token formatter.
#[derive(Clone)]
pub struct FormatFn(Rc<dyn Fn(NaiveDateTime, &str, &Locale) -> String>);

impl FormatFn {
    pub fn new(f: impl Fn(NaiveDateTime, &str, &Locale) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, date: NaiveDateTime, format: &str, locale: &Locale) -> String {
        (self.0)(date, format, locale)
    }
}

impl Debug for FormatFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("FormatFn")
    }
}

/// Replaces the token parser.
#[derive(Clone)]
pub struct ParseFn(Rc<dyn Fn(&str, &str) -> Option<NaiveDateTime>>);

impl ParseFn {
    pub fn new(f: impl Fn(&str, &str) -> Option<NaiveDateTime> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, text: &str, format: &str) -> Option<NaiveDateTime> {
        (self.0)(text, format)
    }
}

impl Debug for ParseFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ParseFn")
    }
}

/// Formats and parses dates with the token table.
///
/// Holds everything the conversions depend on: locale, the current
/// time, overrides and the error handler.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pub locale: Locale,
    /// Current time. Used for `today` and as base date.
    pub now: NaiveDateTime,
    /// No calendar, only a time picker. Parsing starts
    /// from today instead of the first of the current year.
    pub no_calendar: bool,
    /// Default format for parsing.
    pub date_format: String,
    pub format_date: Option<FormatFn>,
    pub parse_date: Option<ParseFn>,
    pub error_handler: ErrorHandler,

    regex_cache: RefCell<RegexCache>,
}

/// Compiled parse steps per format. Only valid for one locale.
#[derive(Debug, Clone, Default)]
struct RegexCache {
    locale: Option<Locale>,
    formats: HashMap<String, Rc<Vec<TokenStep>>>,
}

/// A capturing token and the regex for the format up to
/// and including it.
#[derive(Debug)]
struct TokenStep {
    token: char,
    regex: Option<Regex>,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            locale: Default::default(),
            now: Local::now().naive_local(),
            no_calendar: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            format_date: None,
            parse_date: None,
            error_handler: Default::default(),
            regex_cache: Default::default(),
        }
    }
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Format a date. Uses the custom formatter if one is set.
    pub fn format(&self, date: NaiveDateTime, format: &str) -> String {
        if let Some(format_date) = &self.format_date {
            format_date.call(date, format, &self.locale)
        } else {
            format_tokens(date, format, &self.locale)
        }
    }

    /// Parse anything into a date.
    ///
    /// Uses the given format or the configured default format.
    /// With timeless the time of day is reset to midnight.
    ///
    /// Returns None for empty input. Input that doesn't parse or results
    /// in an invalid date is reported to the error handler and
    /// returns None.
    pub fn parse(
        &self,
        input: &DateInput,
        format: Option<&str>,
        timeless: bool,
    ) -> Option<NaiveDateTime> {
        let format = format.unwrap_or(&self.date_format);

        let mut timeless = timeless;
        let parsed = match input {
            DateInput::DateTime(d) => Some(*d),
            DateInput::Timestamp(ms) => from_epoch_millis(*ms as f64),
            DateInput::Text(text) => {
                if text.is_empty() {
                    return None;
                } else if text == "today" {
                    timeless = true;
                    Some(self.now)
                } else if let Some(parse_date) = &self.parse_date {
                    parse_date.call(text, format)
                } else if text.ends_with('Z') || text.ends_with("GMT") {
                    parse_native(text)
                } else {
                    match self.parse_tokens(text, format) {
                        TokenParse::Date(d) => Some(d),
                        TokenParse::NoMatch | TokenParse::Invalid => None,
                    }
                }
            }
        };

        match parsed {
            Some(d) if timeless => Some(start_of_day(d)),
            Some(d) => Some(d),
            None => {
                self.error_handler
                    .report(&PickerError::InvalidDate(format!("{:?}", input)));
                None
            }
        }
    }

    /// Parse a string with the given format.
    pub fn parse_str(&self, text: &str, format: &str) -> Option<NaiveDateTime> {
        self.parse(&DateInput::Text(text.to_string()), Some(format), false)
    }

    fn base_date(&self) -> NaiveDateTime {
        if self.no_calendar {
            start_of_day(self.now)
        } else {
            NaiveDate::from_ymd_opt(self.now.year(), 1, 1)
                .unwrap_or(self.now.date())
                .and_time(chrono::NaiveTime::MIN)
        }
    }

    /// Parse steps for the format, compiled once per format and locale.
    fn token_steps(&self, format: &str) -> Rc<Vec<TokenStep>> {
        let mut cache = self.regex_cache.borrow_mut();
        if cache.locale.as_ref() != Some(&self.locale) {
            cache.locale = Some(self.locale.clone());
            cache.formats.clear();
        }
        if let Some(steps) = cache.formats.get(format) {
            return steps.clone();
        }
        let steps = Rc::new(compile_format(format, &self.locale));
        cache.formats.insert(format.to_string(), steps.clone());
        steps
    }

    fn parse_tokens(&self, text: &str, format: &str) -> TokenParse {
        let mut parts = decompose(self.base_date());
        let mut ops: Vec<(char, String)> = Vec::new();
        let mut matched = false;
        let mut match_index = 0;

        for step in self.token_steps(format).iter() {
            let Some(re) = &step.regex else {
                return TokenParse::Invalid;
            };
            if let Some(caps) = re.captures(text) {
                matched = true;
                match_index += 1;
                if let Some(val) = caps.get(match_index) {
                    // the year goes first, everything else depends on it.
                    if step.token == 'Y' {
                        ops.insert(0, (step.token, val.as_str().to_string()));
                    } else {
                        ops.push((step.token, val.as_str().to_string()));
                    }
                }
            }
        }

        if !matched {
            return TokenParse::NoMatch;
        }

        for (token, val) in ops {
            match apply_token(&mut parts, token, &val, &self.locale) {
                Some(()) => {}
                None => return TokenParse::Invalid,
            }
        }

        match compose(
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6],
        ) {
            Some(d) => TokenParse::Date(d),
            None => TokenParse::Invalid,
        }
    }
}

/// Each token extends the regex of the previous one.
/// Unknown chars match any single char.
fn compile_format(format: &str, locale: &Locale) -> Vec<TokenStep> {
    let mut steps = Vec::new();
    let mut regex_str = String::new();

    let chars = format.chars().collect::<Vec<_>>();
    for (i, token) in chars.iter().copied().enumerate() {
        let is_backslash = token == '\\';
        let escaped = is_backslash || (i > 0 && chars[i - 1] == '\\');

        match token_regex(token, locale) {
            Some(re) if !escaped => {
                regex_str.push_str(&re);
                steps.push(TokenStep {
                    token,
                    regex: Regex::new(&regex_str).ok(),
                });
            }
            _ => {
                if !is_backslash {
                    regex_str.push('.');
                }
            }
        }
    }
    steps
}

enum TokenParse {
    Date(NaiveDateTime),
    NoMatch,
    Invalid,
}

fn alternation(names: &[String]) -> String {
    let alt = names
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|");
    format!("({})", alt)
}

/// Regex fragment for a token.
fn token_regex(token: char, locale: &Locale) -> Option<String> {
    let re = match token {
        'D' => alternation(&locale.weekdays_short),
        'l' => alternation(&locale.weekdays_long),
        'M' => alternation(&locale.months_short),
        'F' => alternation(&locale.months_long),
        'K' => {
            let am = regex::escape(&locale.am_pm[0]);
            let pm = regex::escape(&locale.am_pm[1]);
            format!(
                "({}|{}|{}|{})",
                am,
                pm,
                am.to_lowercase(),
                pm.to_lowercase()
            )
        }
        'Y' => r"(\d{4})".to_string(),
        'y' => r"(\d{2})".to_string(),
        'J' => r"(\d\d|\d)\w+".to_string(),
        'U' | 'u' | 'Z' => r"(.+)".to_string(),
        'G' | 'H' | 'S' | 'W' | 'd' | 'h' | 'i' | 'j' | 'm' | 'n' | 's' | 'w' => {
            r"(\d\d|\d)".to_string()
        }
        _ => return None,
    };
    Some(re)
}

fn num(val: &str) -> Option<i64> {
    val.trim().parse::<i64>().ok()
}

fn set_parts(parts: &mut [i64; 7], d: NaiveDateTime) {
    *parts = decompose(d);
}

/// Apply a parsed token to the date parts.
///
/// Each setter normalizes immediately, so a day that overflows the
/// current month already moves the month, before a later token sets
/// the month.
fn apply_token(parts: &mut [i64; 7], token: char, val: &str, locale: &Locale) -> Option<()> {
    let set = |parts: &mut [i64; 7], idx: usize, v: i64| -> Option<()> {
        let mut p = *parts;
        p[idx] = v;
        let d = compose(p[0], p[1], p[2], p[3], p[4], p[5], p[6])?;
        set_parts(parts, d);
        Some(())
    };

    match token {
        'D' | 'l' | 'w' => Some(()),
        'F' => {
            let idx = locale.months_long.iter().position(|v| v == val)?;
            set(parts, 1, idx as i64)
        }
        'M' => {
            let idx = locale.months_short.iter().position(|v| v == val)?;
            set(parts, 1, idx as i64)
        }
        'G' | 'h' => {
            let pm = if parts[3] >= 12 { 12 } else { 0 };
            set(parts, 3, pm + num(val)?)
        }
        'H' => set(parts, 3, num(val)?),
        'J' | 'd' | 'j' => set(parts, 2, num(val)?),
        'K' => {
            let pm = val.to_lowercase() == locale.am_pm[1].to_lowercase();
            set(parts, 3, (parts[3] % 12) + if pm { 12 } else { 0 })
        }
        'S' | 's' => set(parts, 5, num(val)?),
        'U' => {
            let secs = val.trim().parse::<f64>().ok()?;
            set_parts(parts, from_epoch_millis(secs * 1000.0)?);
            Some(())
        }
        'u' => {
            let ms = val.trim().parse::<f64>().ok()?;
            set_parts(parts, from_epoch_millis(ms)?);
            Some(())
        }
        'W' => {
            let week = num(val)?;
            let jan = compose(parts[0], 0, 2 + (week - 1) * 7, 0, 0, 0, 0)?;
            let wd = jan.weekday().num_days_from_sunday() as i64;
            let d = compose(
                jan.year() as i64,
                jan.month0() as i64,
                jan.day() as i64 - wd + locale.first_day_of_week as i64,
                0,
                0,
                0,
                0,
            )?;
            set_parts(parts, d);
            Some(())
        }
        'Y' => set(parts, 0, num(val)?),
        'Z' => {
            set_parts(parts, parse_native(val)?);
            Some(())
        }
        'i' => set(parts, 4, num(val)?),
        'm' | 'n' => set(parts, 1, num(val)? - 1),
        'y' => set(parts, 0, 2000 + num(val)?),
        _ => Some(()),
    }
}

/// Local time for an epoch timestamp in milliseconds.
fn from_epoch_millis(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    Local
        .timestamp_millis_opt(ms.trunc() as i64)
        .single()
        .map(|d| d.naive_local())
}

fn to_epoch_millis(date: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&date).earliest() {
        Some(d) => d.timestamp_millis(),
        None => date.and_utc().timestamp_millis(),
    }
}

/// Strings with an explicit zone, as local time.
fn parse_native(text: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Some(d.with_timezone(&Local).naive_local());
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(text) {
        return Some(d.with_timezone(&Local).naive_local());
    }
    None
}

fn pad(v: impl Into<i64>, len: usize) -> String {
    format!("{:0len$}", v.into(), len = len)
}

/// Format with the token table.
pub fn format_tokens(date: NaiveDateTime, format: &str, locale: &Locale) -> String {
    let chars = format.chars().collect::<Vec<_>>();
    let mut out = String::new();
    for (i, c) in chars.iter().copied().enumerate() {
        let escaped = i > 0 && chars[i - 1] == '\\';
        match format_token(date, c, locale) {
            Some(s) if !escaped => out.push_str(&s),
            _ => {
                if c != '\\' {
                    out.push(c);
                }
            }
        }
    }
    out
}

fn format_token(date: NaiveDateTime, token: char, locale: &Locale) -> Option<String> {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let s = match token {
        'Z' => {
            let utc = match Local.from_local_datetime(&date).earliest() {
                Some(d) => d.with_timezone(&Utc),
                None => date.and_utc(),
            };
            utc.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        }
        'D' => locale.weekdays_short[weekday].clone(),
        'F' => locale.months_long[date.month0() as usize].clone(),
        'G' => pad(crate::calendar_math::military_to_ampm(date.hour()), 2),
        'H' => pad(date.hour(), 2),
        'J' => format!("{}{}", date.day(), locale.ordinal_suffix(date.day())),
        'K' => locale.am_pm[(date.hour() > 11) as usize].clone(),
        'M' => locale.months_short[date.month0() as usize].clone(),
        'S' => pad(date.second(), 2),
        'U' => {
            let ms = to_epoch_millis(date);
            if ms % 1000 == 0 {
                (ms / 1000).to_string()
            } else {
                (ms as f64 / 1000.0).to_string()
            }
        }
        'W' => iso_week_number(date.date()).to_string(),
        'Y' => pad(date.year(), 4),
        'd' => pad(date.day(), 2),
        'h' => crate::calendar_math::military_to_ampm(date.hour()).to_string(),
        'i' => pad(date.minute(), 2),
        'j' => date.day().to_string(),
        'l' => locale.weekdays_long[weekday].clone(),
        'm' => pad(date.month(), 2),
        'n' => date.month().to_string(),
        's' => date.second().to_string(),
        'u' => to_epoch_millis(date).to_string(),
        'w' => weekday.to_string(),
        'y' => date.year().to_string().chars().skip(2).collect(),
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .expect("date")
            .and_hms_opt(h, mi, s)
            .expect("time")
    }

    fn formatter() -> DateFormatter {
        DateFormatter::new().now(dt(2024, 6, 15, 10, 30, 0))
    }

    #[test]
    fn test_format() {
        let l = Locale::english();
        let d = dt(2024, 3, 5, 14, 7, 9);
        assert_eq!(format_tokens(d, "Y-m-d", &l), "2024-03-05");
        assert_eq!(format_tokens(d, "F j, Y", &l), "March 5, 2024");
        assert_eq!(format_tokens(d, "D, M J", &l), "Tue, Mar 5th");
        assert_eq!(format_tokens(d, "l", &l), "Tuesday");
        assert_eq!(format_tokens(d, "H:i:S", &l), "14:07:09");
        assert_eq!(format_tokens(d, "h:i K", &l), "2:07 PM");
        assert_eq!(format_tokens(d, "G s w n y", &l), "02 9 2 3 24");
        assert_eq!(format_tokens(d, "W", &l), "10");
        assert_eq!(format_tokens(dt(2024, 3, 5, 0, 0, 0), "h K", &l), "12 AM");
    }

    #[test]
    fn test_format_escape() {
        let l = Locale::english();
        let d = dt(2024, 3, 5, 0, 0, 0);
        assert_eq!(format_tokens(d, "\\Y Y", &l), "Y 2024");
        assert_eq!(format_tokens(d, "d\\.m", &l), "05.03");
    }

    #[test]
    fn test_parse() {
        let f = formatter();
        assert_eq!(f.parse_str("2024-03-05", "Y-m-d"), Some(dt(2024, 3, 5, 0, 0, 0)));
        assert_eq!(f.parse_str("5.3.2024", "j.n.Y"), Some(dt(2024, 3, 5, 0, 0, 0)));
        assert_eq!(
            f.parse_str("2024-03-05 14:07", "Y-m-d H:i"),
            Some(dt(2024, 3, 5, 14, 7, 0))
        );
        assert_eq!(
            f.parse_str("March 5, 2024", "F j, Y"),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
        assert_eq!(
            f.parse_str("03/05/24 2:07 PM", "m/d/y h:i K"),
            Some(dt(2024, 3, 5, 14, 7, 0))
        );
        assert_eq!(
            f.parse_str("12:30 am", "h:i K"),
            Some(dt(2024, 1, 1, 0, 30, 0))
        );
    }

    #[test]
    fn test_parse_day_before_month() {
        let f = formatter();
        // day 31 applied in january, then the month.
        assert_eq!(f.parse_str("31.03.2024", "d.m.Y"), Some(dt(2024, 3, 31, 0, 0, 0)));
        // day 30 overflows february.
        assert_eq!(f.parse_str("30.02.2023", "d.m.Y"), Some(dt(2023, 3, 2, 0, 0, 0)));
    }

    #[test]
    fn test_parse_time_only() {
        let mut f = formatter();
        assert_eq!(f.parse_str("14:20", "H:i"), Some(dt(2024, 1, 1, 14, 20, 0)));
        f.no_calendar = true;
        assert_eq!(f.parse_str("14:20", "H:i"), Some(dt(2024, 6, 15, 14, 20, 0)));
    }

    #[test]
    fn test_parse_special() {
        let f = formatter();
        assert_eq!(
            f.parse(&"today".into(), None, false),
            Some(dt(2024, 6, 15, 0, 0, 0))
        );
        assert_eq!(
            f.parse(&dt(2024, 6, 15, 10, 0, 0).into(), None, true),
            Some(dt(2024, 6, 15, 0, 0, 0))
        );
        assert_eq!(f.parse(&"".into(), None, false), None);

        let d = dt(2024, 6, 15, 10, 0, 0);
        let ms = to_epoch_millis(d);
        assert_eq!(f.parse(&ms.into(), None, false), Some(d));
        let u = format_tokens(d, "U", &f.locale);
        assert_eq!(f.parse_str(&u, "U"), Some(d));
        let z = format_tokens(d, "Z", &f.locale);
        assert_eq!(f.parse(&z.into(), None, false), Some(d));
    }

    #[test]
    fn test_parse_invalid() {
        let seen = Rc::new(RefCell::new(0));
        let seen2 = seen.clone();
        let mut f = formatter();
        f.error_handler = ErrorHandler::new(move |_| *seen2.borrow_mut() += 1);

        assert_eq!(f.parse_str("hello", "Y-m-d"), None);
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(f.parse(&"bad GMT".into(), None, false), None);
        assert_eq!(*seen.borrow(), 2);
        // empty is no date, not an error.
        assert_eq!(f.parse(&"".into(), None, false), None);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_steps_cached() {
        let mut f = formatter();
        assert_eq!(
            f.parse_str("5. March 2024", "j. F Y"),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
        let first = f.token_steps("j. F Y");
        assert!(Rc::ptr_eq(&first, &f.token_steps("j. F Y")));
        assert_eq!(first.len(), 3);

        // a new locale drops the compiled steps.
        f.locale = Locale::from_key("de").expect("de");
        assert!(!Rc::ptr_eq(&first, &f.token_steps("j. F Y")));
        assert_eq!(
            f.parse_str("5. März 2024", "j. F Y"),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
        assert_ne!(
            f.parse_str("5. March 2024", "j. F Y"),
            Some(dt(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_am_pm() {
        let f = formatter();
        assert_eq!(
            f.parse_str("03:10 pm", "h:i K"),
            Some(dt(2024, 1, 1, 15, 10, 0))
        );
        assert_eq!(
            f.parse_str("12:10 AM", "h:i K"),
            Some(dt(2024, 1, 1, 0, 10, 0))
        );
    }

    #[test]
    fn test_custom() {
        let mut f = formatter();
        f.format_date = Some(FormatFn::new(|d, _, _| format!("day {}", d.day())));
        f.parse_date = Some(ParseFn::new(|_, _| {
            NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }));
        assert_eq!(f.format(dt(2024, 3, 5, 0, 0, 0), "Y"), "day 5");
        assert_eq!(f.parse_str("x", "Y"), Some(dt(2000, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_week() {
        let f = formatter();
        let d = f.parse_str("2024 10", "Y W").expect("week");
        assert_eq!(d.weekday().num_days_from_sunday(), 0);
    }
}
