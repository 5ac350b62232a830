//!
//! Grid of visible days and the search for the next focusable day.
//!

use crate::calendar_math::{month_layout, MonthLayout};
use crate::locale::Locale;
use chrono::NaiveDate;

/// What has the keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Nothing of the picker.
    #[default]
    None,
    /// The bound input.
    Input,
    /// A day cell.
    Day(NaiveDate),
    Hour,
    Minute,
    Second,
    AmPm,
}

impl FocusTarget {
    /// One of the time fields.
    pub fn is_time(&self) -> bool {
        matches!(
            self,
            FocusTarget::Hour | FocusTarget::Minute | FocusTarget::Second | FocusTarget::AmPm
        )
    }

    /// Some part of the calendar popup.
    pub fn is_calendar(&self) -> bool {
        matches!(self, FocusTarget::Day(_)) || self.is_time()
    }
}

/// Where a cell comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    PrevMonth,
    Current,
    NextMonth,
}

/// One cell of a month panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub kind: DayKind,
    /// Overflow days are hidden when more than one month is shown.
    pub hidden: bool,
    pub enabled: bool,
}

impl DayCell {
    /// Can take the focus.
    pub fn is_available(&self) -> bool {
        !self.hidden && self.enabled
    }
}

/// One month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPanel {
    pub layout: MonthLayout,
    pub days: Vec<DayCell>,
}

/// Address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub panel: usize,
    pub index: usize,
}

/// All visible month panels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarGrid {
    pub panels: Vec<MonthPanel>,
}

impl CalendarGrid {
    /// Build the panels starting with the given month.
    pub fn build(
        year: i32,
        month: u32,
        show_months: u32,
        locale: &Locale,
        is_enabled: impl Fn(NaiveDate) -> bool,
    ) -> Self {
        let show_months = show_months.max(1);
        let multi = show_months > 1;

        let mut panels = Vec::new();
        for i in 0..show_months {
            let m = month as i64 + i as i64;
            let y = year + m.div_euclid(12) as i32;
            let m = m.rem_euclid(12) as u32;

            let layout = month_layout(y, m, locale);
            let mut days = Vec::with_capacity(layout.cells() as usize);
            for idx in 0..layout.cells() {
                let Some(date) = layout.date_at(idx) else {
                    continue;
                };
                let kind = if idx < layout.leading {
                    DayKind::PrevMonth
                } else if idx < layout.leading + layout.days {
                    DayKind::Current
                } else {
                    DayKind::NextMonth
                };
                days.push(DayCell {
                    date,
                    kind,
                    hidden: multi && kind != DayKind::Current,
                    enabled: is_enabled(date),
                });
            }
            panels.push(MonthPanel { layout, days });
        }

        Self { panels }
    }

    pub fn cell(&self, r: CellRef) -> Option<&DayCell> {
        self.panels.get(r.panel).and_then(|p| p.days.get(r.index))
    }

    /// Find a visible cell for the date.
    pub fn find(&self, date: NaiveDate) -> Option<CellRef> {
        for (p, panel) in self.panels.iter().enumerate() {
            for (i, cell) in panel.days.iter().enumerate() {
                if cell.date == date && !cell.hidden {
                    return Some(CellRef { panel: p, index: i });
                }
            }
        }
        None
    }

    /// Visible and enabled.
    pub fn in_view(&self, date: NaiveDate) -> Option<CellRef> {
        self.find(date)
            .filter(|r| self.cell(*r).is_some_and(|c| c.is_available()))
    }

    /// First available cell of the first panel when searching forward,
    /// last available cell of the last panel when searching backward.
    pub fn first_available(&self, delta: i32) -> Option<CellRef> {
        if delta >= 0 {
            (0..self.panels.len()).find_map(|p| self.first_available_in_panel(p, delta))
        } else {
            (0..self.panels.len())
                .rev()
                .find_map(|p| self.first_available_in_panel(p, delta))
        }
    }

    /// First available cell of one panel in the given direction.
    pub fn first_available_in_panel(&self, panel: usize, delta: i32) -> Option<CellRef> {
        let days = &self.panels.get(panel)?.days;
        let pos = if delta >= 0 {
            days.iter().position(|c| c.is_available())
        } else {
            days.iter().rposition(|c| c.is_available())
        };
        pos.map(|index| CellRef { panel, index })
    }

    /// Next available cell at least `|delta|` cells away.
    ///
    /// Starts `delta` cells from the current cell and walks
    /// one cell at a time in the direction of delta. Continues with
    /// the following panels. None if the visible panels are exhausted.
    pub fn next_available(&self, current: CellRef, delta: i32) -> Option<CellRef> {
        let dir: isize = if delta < 0 { -1 } else { 1 };
        let dist = delta.unsigned_abs() as usize;

        let mut p = current.panel as isize;
        while p >= 0 && (p as usize) < self.panels.len() {
            let days = &self.panels[p as usize].days;
            let len = days.len() as isize;

            let mut i = if p as usize == current.panel {
                current.index as isize + delta as isize
            } else if dir < 0 {
                len - 1
            } else {
                0
            };
            while i >= 0 && i < len {
                let cell = &days[i as usize];
                let far_enough =
                    p as usize != current.panel || current.index.abs_diff(i as usize) >= dist;
                if cell.is_available() && far_enough {
                    return Some(CellRef {
                        panel: p as usize,
                        index: i as usize,
                    });
                }
                i += dir;
            }
            p += dir;
        }
        None
    }
}
