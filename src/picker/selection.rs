//!
//! Selection state and the rules for changing it.
//!

use crate::calendar_math::{compare_dates, is_between};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde_derive::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SelectionMode {
    /// One date.
    #[default]
    Single,
    /// Any number of dates, toggled.
    Multiple,
    /// Start and end date.
    Range,
    /// Only a time, no calendar.
    Time,
}

/// Where a day sits in a complete range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    Start,
    Middle,
    End,
}

/// Selected dates and viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected dates. Sorted ascending in range mode,
    /// with at most two entries.
    pub selected_dates: Vec<NaiveDateTime>,
    /// Most recently selected date. Always one of selected_dates
    /// if there is a selection.
    pub latest_selected: Option<NaiveDateTime>,
    /// Viewport year.
    pub current_year: i32,
    /// Viewport month, 0-based.
    pub current_month: u32,
    /// Initial viewport, used as target for a reset.
    pub initial_date: NaiveDateTime,
}

/// Result of applying a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectResult {
    /// The date is in another year than the viewport.
    pub new_year: bool,
    /// The date is in another month than the viewport.
    pub new_month: bool,
}

impl SelectionState {
    pub fn new(initial_date: NaiveDateTime) -> Self {
        Self {
            selected_dates: Vec::new(),
            latest_selected: None,
            current_year: initial_date.year(),
            current_month: initial_date.month0(),
            initial_date,
        }
    }

    /// Index of the selected date on the same day.
    pub fn selected_index(&self, date: NaiveDate) -> Option<usize> {
        self.selected_dates.iter().position(|d| d.date() == date)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected_index(date).is_some()
    }

    /// Inside a complete range, both ends included.
    pub fn is_in_range(&self, mode: SelectionMode, date: NaiveDate) -> bool {
        if mode != SelectionMode::Range || self.selected_dates.len() < 2 {
            return false;
        }
        date >= self.selected_dates[0].date() && date <= self.selected_dates[1].date()
    }

    pub fn range_position(&self, mode: SelectionMode, date: NaiveDate) -> Option<RangePosition> {
        if !self.is_in_range(mode, date) {
            None
        } else if date == self.selected_dates[0].date() {
            Some(RangePosition::Start)
        } else if date == self.selected_dates[1].date() {
            Some(RangePosition::End)
        } else {
            Some(RangePosition::Middle)
        }
    }

    /// Apply a date to the selection. The date must be enabled.
    ///
    /// * single: replaces the selection.
    /// * multiple: toggles the day.
    /// * range: a third date starts a new range. The two dates
    ///   are kept in order.
    pub fn apply(&mut self, mode: SelectionMode, date: NaiveDateTime) -> SelectResult {
        let result = SelectResult {
            new_year: date.year() != self.current_year,
            new_month: date.month0() != self.current_month,
        };

        self.latest_selected = Some(date);
        match mode {
            SelectionMode::Single | SelectionMode::Time => {
                self.selected_dates = vec![date];
            }
            SelectionMode::Multiple => {
                if let Some(idx) = self.selected_index(date.date()) {
                    self.selected_dates.remove(idx);
                    self.latest_selected = self.selected_dates.last().copied();
                } else {
                    self.selected_dates.push(date);
                }
            }
            SelectionMode::Range => {
                if self.selected_dates.len() == 2 {
                    self.selected_dates.clear();
                }
                self.selected_dates.push(date);
                if compare_dates(date, self.selected_dates[0], true) != Ordering::Equal {
                    self.selected_dates.sort();
                }
            }
        }

        result
    }

    /// Replace the selection.
    pub fn replace(&mut self, mode: SelectionMode, mut dates: Vec<NaiveDateTime>) {
        if mode == SelectionMode::Range {
            dates.sort();
        }
        self.latest_selected = dates.last().copied();
        self.selected_dates = dates;
    }

    /// Drop dates. Keeps latest_selected consistent.
    pub fn retain(&mut self, f: impl FnMut(&NaiveDateTime) -> bool) {
        self.selected_dates.retain(f);
        if let Some(latest) = self.latest_selected {
            if !self.selected_dates.contains(&latest) {
                self.latest_selected = self.selected_dates.last().copied();
            }
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self, to_initial: bool) {
        self.selected_dates.clear();
        self.latest_selected = None;
        if to_initial {
            self.current_year = self.initial_date.year();
            self.current_month = self.initial_date.month0();
        }
    }

    /// Change the time of the latest selected date.
    pub fn set_latest(&mut self, date: NaiveDateTime) {
        if let Some(latest) = self.latest_selected {
            if let Some(idx) = self.selected_dates.iter().rposition(|d| *d == latest) {
                self.selected_dates[idx] = date;
            }
        }
        self.latest_selected = Some(date);
    }

    /// Move the viewport to the month of the date.
    pub fn set_viewport(&mut self, date: NaiveDateTime) {
        self.current_year = date.year();
        self.current_month = date.month0();
    }
}

/// Highlight of a day while hovering over a possible range end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMark {
    /// Nothing to show.
    None,
    /// Keep whatever is shown already.
    Keep,
    StartRange,
    EndRange,
    InRange,
    /// Beyond a disabled day, cannot be part of the range.
    NotAllowed,
}

/// Range preview between the first selected date and the hovered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePreview {
    pub start: NaiveDate,
    pub hover: NaiveDate,
    /// Nearest disabled day before start.
    pub min_range: Option<NaiveDate>,
    /// Nearest disabled day after start.
    pub max_range: Option<NaiveDate>,
    /// Some disabled day lies between start and hover.
    pub contains_disabled: bool,
}

impl RangePreview {
    /// Scan the days between start and hover.
    pub fn new(start: NaiveDate, hover: NaiveDate, is_enabled: impl Fn(NaiveDate) -> bool) -> Self {
        let (lo, hi) = if start <= hover {
            (start, hover)
        } else {
            (hover, start)
        };

        let mut preview = Self {
            start,
            hover,
            min_range: None,
            max_range: None,
            contains_disabled: false,
        };

        let mut t = lo.checked_add_days(Days::new(1));
        while let Some(day) = t {
            if day >= hi {
                break;
            }
            if !is_enabled(day) {
                preview.contains_disabled = true;
                if day < start && preview.min_range.map_or(true, |m| day > m) {
                    preview.min_range = Some(day);
                } else if day > start && preview.max_range.map_or(true, |m| day < m) {
                    preview.max_range = Some(day);
                }
            }
            t = day.checked_add_days(Days::new(1));
        }

        preview
    }

    /// Classify a visible day.
    pub fn mark(&self, day: NaiveDate) -> PreviewMark {
        let out_of_range = self.min_range.is_some_and(|m| day < m)
            || self.max_range.is_some_and(|m| day > m);
        if out_of_range {
            return PreviewMark::NotAllowed;
        }
        if self.contains_disabled {
            return PreviewMark::Keep;
        }

        let forward = self.start < self.hover;
        if day == self.hover {
            if self.hover <= self.start {
                PreviewMark::StartRange
            } else {
                PreviewMark::EndRange
            }
        } else if day == self.start {
            if forward {
                PreviewMark::StartRange
            } else {
                PreviewMark::EndRange
            }
        } else if self.min_range.map_or(true, |m| day >= m)
            && self.max_range.map_or(true, |m| day <= m)
            && is_between(day, self.start, self.hover)
        {
            PreviewMark::InRange
        } else {
            PreviewMark::None
        }
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

    fn nd(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("date")
    }

    #[test]
    fn test_range_order() {
        let mut s = SelectionState::new(d(2024, 1, 1));
        s.apply(SelectionMode::Range, d(2024, 1, 20));
        s.apply(SelectionMode::Range, d(2024, 1, 5));
        assert_eq!(s.selected_dates, vec![d(2024, 1, 5), d(2024, 1, 20)]);
        assert_eq!(s.latest_selected, Some(d(2024, 1, 5)));

        s.apply(SelectionMode::Range, d(2024, 1, 10));
        assert_eq!(s.selected_dates, vec![d(2024, 1, 10)]);
    }

    #[test]
    fn test_multiple_toggle() {
        let mut s = SelectionState::new(d(2024, 1, 1));
        s.apply(SelectionMode::Multiple, d(2024, 1, 20));
        s.apply(SelectionMode::Multiple, d(2024, 1, 5));
        s.apply(SelectionMode::Multiple, d(2024, 1, 20));
        assert_eq!(s.selected_dates, vec![d(2024, 1, 5)]);
        s.apply(SelectionMode::Multiple, d(2024, 1, 5));
        assert!(s.selected_dates.is_empty());
        assert_eq!(s.latest_selected, None);
    }

    #[test]
    fn test_new_month() {
        let mut s = SelectionState::new(d(2024, 1, 1));
        let r = s.apply(SelectionMode::Single, d(2024, 2, 1));
        assert!(r.new_month);
        assert!(!r.new_year);
        let r = s.apply(SelectionMode::Single, d(2023, 12, 31));
        assert!(r.new_month);
        assert!(r.new_year);
    }

    #[test]
    fn test_range_position() {
        let mut s = SelectionState::new(d(2024, 1, 1));
        s.replace(SelectionMode::Range, vec![d(2024, 1, 20), d(2024, 1, 5)]);
        assert_eq!(
            s.range_position(SelectionMode::Range, nd(2024, 1, 5)),
            Some(RangePosition::Start)
        );
        assert_eq!(
            s.range_position(SelectionMode::Range, nd(2024, 1, 7)),
            Some(RangePosition::Middle)
        );
        assert_eq!(
            s.range_position(SelectionMode::Range, nd(2024, 1, 20)),
            Some(RangePosition::End)
        );
        assert_eq!(s.range_position(SelectionMode::Range, nd(2024, 1, 21)), None);
    }

    #[test]
    fn test_set_latest() {
        let mut s = SelectionState::new(d(2024, 1, 1));
        s.apply(SelectionMode::Multiple, d(2024, 1, 5));
        s.apply(SelectionMode::Multiple, d(2024, 1, 6));
        let t = d(2024, 1, 6) + chrono::TimeDelta::hours(3);
        s.set_latest(t);
        assert_eq!(s.selected_dates, vec![d(2024, 1, 5), t]);
    }

    #[test]
    fn test_preview() {
        let p = RangePreview::new(nd(2024, 1, 10), nd(2024, 1, 14), |_| true);
        assert_eq!(p.mark(nd(2024, 1, 10)), PreviewMark::StartRange);
        assert_eq!(p.mark(nd(2024, 1, 12)), PreviewMark::InRange);
        assert_eq!(p.mark(nd(2024, 1, 14)), PreviewMark::EndRange);
        assert_eq!(p.mark(nd(2024, 1, 15)), PreviewMark::None);

        let p = RangePreview::new(nd(2024, 1, 10), nd(2024, 1, 6), |_| true);
        assert_eq!(p.mark(nd(2024, 1, 6)), PreviewMark::StartRange);
        assert_eq!(p.mark(nd(2024, 1, 10)), PreviewMark::EndRange);
        assert_eq!(p.mark(nd(2024, 1, 8)), PreviewMark::InRange);
    }

    #[test]
    fn test_preview_disabled() {
        let disabled = nd(2024, 1, 13);
        let p = RangePreview::new(nd(2024, 1, 10), nd(2024, 1, 20), |d| d != disabled);
        assert!(p.contains_disabled);
        assert_eq!(p.max_range, Some(disabled));
        assert_eq!(p.mark(nd(2024, 1, 14)), PreviewMark::NotAllowed);
        assert_eq!(p.mark(nd(2024, 1, 20)), PreviewMark::NotAllowed);
        assert_eq!(p.mark(nd(2024, 1, 12)), PreviewMark::Keep);
    }
}
