//!
//! Syncing the selection to the bound text input.
//!

use crate::date_format::{DateFormatter, DateInput, FormatFn};
use crate::picker::selection::SelectionMode;
use chrono::{NaiveDate, NaiveDateTime};

/// The text input a picker is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputElement {
    /// Current text.
    pub value: String,
    /// Text of the alternate, human readable input.
    /// Only used with alt_input.
    pub alt_value: String,
    pub placeholder: Option<String>,
    /// A disabled input never opens the calendar.
    pub disabled: bool,
    /// Set while the picker owns the input and typing is not allowed.
    pub read_only: bool,
}

impl InputElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Text that can be used as preloaded value.
    pub fn preload_value(&self) -> Option<&str> {
        if self.value.is_empty() || Some(&self.value) == self.placeholder.as_ref() {
            None
        } else {
            Some(self.value.as_str())
        }
    }
}

/// One or more dates for set_date and default_date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    One(DateInput),
    Many(Vec<DateInput>),
}

impl DateValue {
    /// Empty text or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            DateValue::One(DateInput::Text(s)) => s.is_empty(),
            DateValue::One(_) => false,
            DateValue::Many(v) => v.is_empty(),
        }
    }

    /// Split into single inputs. Text is split at the separator,
    /// if one is given.
    pub fn split(&self, separator: Option<&str>) -> Vec<DateInput> {
        match self {
            DateValue::One(DateInput::Text(s)) => match separator {
                Some(sep) if !sep.is_empty() => {
                    s.split(sep).map(|v| DateInput::Text(v.to_string())).collect()
                }
                _ => vec![DateInput::Text(s.clone())],
            },
            DateValue::One(v) => vec![v.clone()],
            DateValue::Many(v) => v.clone(),
        }
    }
}

impl From<DateInput> for DateValue {
    fn from(value: DateInput) -> Self {
        DateValue::One(value)
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::One(value.into())
    }
}

impl From<String> for DateValue {
    fn from(value: String) -> Self {
        DateValue::One(value.into())
    }
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        DateValue::One(value.into())
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(value: NaiveDateTime) -> Self {
        DateValue::One(value.into())
    }
}

impl From<i64> for DateValue {
    fn from(value: i64) -> Self {
        DateValue::One(value.into())
    }
}

impl<T: Into<DateInput>> From<Vec<T>> for DateValue {
    fn from(value: Vec<T>) -> Self {
        DateValue::Many(value.into_iter().map(|v| v.into()).collect())
    }
}

/// Join the formatted dates.
///
/// Range mode uses the range separator and, without time, shows
/// a single-day range only once. Everything else is joined with the
/// conjunction.
pub fn date_str(
    dates: &[NaiveDateTime],
    mode: SelectionMode,
    enable_time: bool,
    conjunction: &str,
    formatter: &DateFormatter,
    format_override: Option<&FormatFn>,
    format: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for d in dates {
        let s = match format_override {
            Some(f) => f.call(*d, format, &formatter.locale),
            None => formatter.format(*d, format),
        };
        if mode == SelectionMode::Range && !enable_time && parts.contains(&s) {
            continue;
        }
        parts.push(s);
    }

    if mode == SelectionMode::Range {
        parts.join(&formatter.locale.range_separator)
    } else {
        parts.join(conjunction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, day)
            .and_then(|v| v.and_hms_opt(0, 0, 0))
            .expect("date")
    }

    #[test]
    fn test_date_str() {
        let f = DateFormatter::new();
        let s = date_str(
            &[d(2024, 1, 5), d(2024, 1, 6)],
            SelectionMode::Multiple,
            false,
            "; ",
            &f,
            None,
            "Y-m-d",
        );
        assert_eq!(s, "2024-01-05; 2024-01-06");

        let s = date_str(
            &[d(2024, 1, 5), d(2024, 1, 6)],
            SelectionMode::Range,
            false,
            ", ",
            &f,
            None,
            "Y-m-d",
        );
        assert_eq!(s, "2024-01-05 to 2024-01-06");

        let s = date_str(
            &[d(2024, 1, 5), d(2024, 1, 5)],
            SelectionMode::Range,
            false,
            ", ",
            &f,
            None,
            "Y-m-d",
        );
        assert_eq!(s, "2024-01-05");
    }

    #[test]
    fn test_split() {
        let v = DateValue::from("2024-01-05; 2024-01-06");
        assert_eq!(
            v.split(Some("; ")),
            vec![
                DateInput::from("2024-01-05"),
                DateInput::from("2024-01-06")
            ]
        );
        assert!(DateValue::from("").is_empty());
        assert!(DateValue::from(Vec::<&str>::new()).is_empty());
    }
}
