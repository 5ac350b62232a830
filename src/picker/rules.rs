//!
//! Enable/disable policy.
//!

use crate::calendar_math::compare_dates;
use crate::date_format::{DateFormatter, DateInput};
use crate::picker::config::PickerConfig;
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Predicate for a date rule.
#[derive(Clone)]
pub struct DatePredicate(Rc<dyn Fn(NaiveDateTime) -> bool>);

impl DatePredicate {
    pub fn new(f: impl Fn(NaiveDateTime) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn test(&self, date: NaiveDateTime) -> bool {
        (self.0)(date)
    }
}

impl Debug for DatePredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("DatePredicate")
    }
}

/// Rule as given in the configuration.
#[derive(Debug, Clone)]
pub enum DateLimit {
    /// A single day.
    Date(DateInput),
    /// Both ends inclusive.
    Range { from: DateInput, to: DateInput },
    /// Matches whatever the predicate says.
    Predicate(DatePredicate),
}

impl DateLimit {
    pub fn range(from: impl Into<DateInput>, to: impl Into<DateInput>) -> Self {
        DateLimit::Range {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn predicate(f: impl Fn(NaiveDateTime) -> bool + 'static) -> Self {
        DateLimit::Predicate(DatePredicate::new(f))
    }
}

impl From<&str> for DateLimit {
    fn from(value: &str) -> Self {
        DateLimit::Date(value.into())
    }
}

impl From<NaiveDate> for DateLimit {
    fn from(value: NaiveDate) -> Self {
        DateLimit::Date(value.into())
    }
}

impl From<NaiveDateTime> for DateLimit {
    fn from(value: NaiveDateTime) -> Self {
        DateLimit::Date(value.into())
    }
}

/// Parsed rule.
#[derive(Debug, Clone)]
pub enum DateRule {
    /// Matches the day.
    Exact(NaiveDate),
    /// Matches the day. Was given as text.
    ///
    /// Evaluation stops at the first rule of this kind,
    /// whether it matches or not.
    Text(NaiveDate),
    /// Matches `from <= date <= to`.
    Range {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    Predicate(DatePredicate),
}

/// Parse the configured rules. Invalid entries are dropped.
pub fn parse_date_rules(limits: &[DateLimit], fmt: &DateFormatter) -> Vec<DateRule> {
    limits
        .iter()
        .filter_map(|limit| match limit {
            DateLimit::Date(input @ DateInput::Text(_)) => {
                fmt.parse(input, None, true).map(|d| DateRule::Text(d.date()))
            }
            DateLimit::Date(input) => fmt.parse(input, None, true).map(|d| DateRule::Exact(d.date())),
            DateLimit::Range { from, to } => {
                let from = fmt.parse(from, None, false)?;
                let to = fmt.parse(to, None, false)?;
                Some(DateRule::Range { from, to })
            }
            DateLimit::Predicate(p) => Some(DateRule::Predicate(p.clone())),
        })
        .collect()
}

/// Policy check for a date.
///
/// `timeless` compares the min/max bounds by day only. If not given,
/// a bound is compared by day unless it carries a time of day itself.
/// The date is expected to be normalized by the caller already.
pub fn is_enabled(config: &PickerConfig, date: NaiveDateTime, timeless: Option<bool>) -> bool {
    if let Some(min) = config.min_date {
        let timeless = timeless.unwrap_or(!config.min_date_has_time);
        if compare_dates(date, min, timeless) == Ordering::Less {
            return false;
        }
    }
    if let Some(max) = config.max_date {
        let timeless = timeless.unwrap_or(!config.max_date_has_time);
        if compare_dates(date, max, timeless) == Ordering::Greater {
            return false;
        }
    }

    let (polarity, rules) = match &config.enable {
        Some(enable) => (true, enable.as_slice()),
        None if config.disable.is_empty() => return true,
        None => (false, config.disable.as_slice()),
    };

    for rule in rules {
        match rule {
            DateRule::Predicate(p) => {
                if p.test(date) {
                    return polarity;
                }
            }
            DateRule::Exact(d) => {
                if *d == date.date() {
                    return polarity;
                }
            }
            DateRule::Text(d) => {
                return if *d == date.date() {
                    polarity
                } else {
                    !polarity
                };
            }
            DateRule::Range { from, to } => {
                if *from <= date && date <= *to {
                    return polarity;
                }
            }
        }
    }

    !polarity
}
