use crate::picker::DatePickerState;
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::KeyEvent;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Initialization is complete.
    Ready,
    Open,
    Close,
    /// The selection changed.
    Change,
    /// The bound input got a new value.
    ValueUpdate,
    MonthChange,
    YearChange,
    /// A day cell was built.
    DayCreate,
    Destroy,
    /// Configuration has been parsed, before anything else is set up.
    ParseConfig,
    /// The popup is about to be positioned.
    PreCalendarPosition,
    /// Keyboard event on the input or the calendar.
    KeyDown,
}

/// Extra payload for some hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookData {
    None,
    /// Day of a DayCreate.
    Day(NaiveDate),
    /// Key of a KeyDown.
    Key(KeyEvent),
}

type HookFn = dyn Fn(&[NaiveDateTime], &str, &DatePickerState, &HookData);

/// A single callback.
///
/// Called with the selected dates, the current input text,
/// the picker and extra data.
#[derive(Clone)]
pub struct Hook(Rc<HookFn>);

impl Hook {
    pub fn new(f: impl Fn(&[NaiveDateTime], &str, &DatePickerState, &HookData) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(
        &self,
        dates: &[NaiveDateTime],
        date_str: &str,
        picker: &DatePickerState,
        data: &HookData,
    ) {
        (self.0)(dates, date_str, picker, data)
    }
}

impl Debug for Hook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hook")
    }
}

/// Callback lists per kind. Called in order.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    hooks: HashMap<HookKind, Vec<Hook>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append.
    pub fn add(&mut self, kind: HookKind, hook: Hook) {
        self.hooks.entry(kind).or_default().push(hook);
    }

    /// Replace all hooks of this kind.
    pub fn replace(&mut self, kind: HookKind, hooks: Vec<Hook>) {
        self.hooks.insert(kind, hooks);
    }

    /// Insert other before the existing hooks.
    pub fn prepend(&mut self, other: &Hooks) {
        for (kind, hooks) in &other.hooks {
            let list = self.hooks.entry(*kind).or_default();
            let mut new_list = hooks.clone();
            new_list.append(list);
            *list = new_list;
        }
    }

    /// Append other after the existing hooks.
    pub fn append(&mut self, other: &Hooks) {
        for (kind, hooks) in &other.hooks {
            self.hooks.entry(*kind).or_default().extend(hooks.iter().cloned());
        }
    }

    pub fn get(&self, kind: HookKind) -> &[Hook] {
        self.hooks.get(&kind).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self, kind: HookKind) -> bool {
        self.get(kind).is_empty()
    }
}
