use crate::picker::DatePickerState;
use log::debug;
use rat_event::util::item_at;
use rat_event::{ct_event, flow, ConsumedEvent, HandleEvent, MouseOnly, Outcome, Regular};
use std::time::Instant;

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PickerOutcome {
    /// The given event has not been used at all.
    Continue,
    /// The event has been recognized, but the result was nil.
    /// Further processing for this event may stop.
    Unchanged,
    /// The event has been recognized and there is some change
    /// due to it.
    /// Further processing for this event may stop.
    /// Rendering the ui is advised.
    Changed,
    /// The selection has changed.
    Selected,
}

impl ConsumedEvent for PickerOutcome {
    fn is_consumed(&self) -> bool {
        *self != PickerOutcome::Continue
    }
}

impl From<bool> for PickerOutcome {
    fn from(value: bool) -> Self {
        if value {
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }
}

impl From<Outcome> for PickerOutcome {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Continue => PickerOutcome::Continue,
            Outcome::Unchanged => PickerOutcome::Unchanged,
            Outcome::Changed => PickerOutcome::Changed,
        }
    }
}

impl From<PickerOutcome> for Outcome {
    fn from(value: PickerOutcome) -> Self {
        match value {
            PickerOutcome::Continue => Outcome::Continue,
            PickerOutcome::Unchanged => Outcome::Unchanged,
            PickerOutcome::Changed => Outcome::Changed,
            PickerOutcome::Selected => Outcome::Changed,
        }
    }
}

/// Event sources the picker listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Focus/click on the input opens the calendar.
    InputOpen,
    /// Keyboard navigation.
    KeyDown,
    /// Clicks outside close the calendar.
    OutsideClick,
    /// Terminal resize repositions the popup.
    Resize,
    /// Hovering shows the range preview.
    RangeHover,
    /// Leaving the input commits typed text.
    InputBlur,
}

/// Currently bound listeners, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listeners {
    bound: Vec<Listener>,
}

impl Listeners {
    pub fn bind(&mut self, l: Listener) {
        if !self.bound.contains(&l) {
            self.bound.push(l);
        }
    }

    pub fn unbind(&mut self, l: Listener) {
        self.bound.retain(|v| *v != l);
    }

    /// Bind or unbind.
    pub fn set(&mut self, l: Listener, bound: bool) {
        if bound {
            self.bind(l)
        } else {
            self.unbind(l)
        }
    }

    pub fn is_bound(&self, l: Listener) -> bool {
        self.bound.contains(&l)
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Unbind everything, last bound first.
    pub fn unbind_all(&mut self) {
        while let Some(l) = self.bound.pop() {
            debug!("unbind {:?}", l);
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, PickerOutcome> for DatePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> PickerOutcome {
        if self.is_destroyed() {
            return PickerOutcome::Continue;
        }

        if let crossterm::event::Event::Resize(_, _) = event {
            self.resize(Instant::now());
        }

        if self.focus != Default::default() {
            if let crossterm::event::Event::Key(key) = event {
                flow!(self.on_key_down(key));
            }
        }

        self.handle(event, MouseOnly)
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, PickerOutcome> for DatePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> PickerOutcome {
        if self.is_destroyed() {
            return PickerOutcome::Continue;
        }
        let visible = self.is_open || self.config.inline;

        match event {
            ct_event!(mouse down Left for x, y) => {
                let pos = (*x, *y).into();
                if self.area_input.contains(pos) {
                    if self.listeners.is_bound(Listener::InputOpen) {
                        self.focus = crate::picker::FocusTarget::Input;
                        self.open()
                    } else {
                        PickerOutcome::Continue
                    }
                } else if !visible {
                    PickerOutcome::Continue
                } else if self.area_prev.contains(pos) {
                    self.change_month(-1, true)
                } else if self.area_next.contains(pos) {
                    self.change_month(1, true)
                } else if let Some(idx) = item_at(&self.area_days, *x, *y) {
                    match self.area_cells.get(idx).and_then(|c| self.grid.cell(*c)).copied() {
                        Some(cell) if cell.is_available() => self.on_date_select(cell.date),
                        _ => PickerOutcome::Unchanged,
                    }
                } else if self.area.contains(pos) {
                    PickerOutcome::Unchanged
                } else if self.listeners.is_bound(Listener::OutsideClick) {
                    self.outside_click()
                } else {
                    PickerOutcome::Continue
                }
            }
            ct_event!(mouse moved for x, y) if visible => {
                if let Some(idx) = item_at(&self.area_days, *x, *y) {
                    match self.area_cells.get(idx).and_then(|c| self.grid.cell(*c)).copied() {
                        Some(cell) => self.hover(cell.date),
                        None => PickerOutcome::Continue,
                    }
                } else {
                    PickerOutcome::Continue
                }
            }
            ct_event!(scroll up for x, y) if visible && self.area.contains((*x, *y).into()) => {
                self.change_month(-1, true)
            }
            ct_event!(scroll down for x, y) if visible && self.area.contains((*x, *y).into()) => {
                self.change_month(1, true)
            }
            _ => PickerOutcome::Continue,
        }
    }
}

/// Handle all events.
pub fn handle_events(
    state: &mut DatePickerState,
    event: &crossterm::event::Event,
) -> PickerOutcome {
    state.handle(event, Regular)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(
    state: &mut DatePickerState,
    event: &crossterm::event::Event,
) -> PickerOutcome {
    state.handle(event, MouseOnly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners() {
        let mut l = Listeners::default();
        l.bind(Listener::KeyDown);
        l.bind(Listener::KeyDown);
        l.set(Listener::RangeHover, true);
        assert!(l.is_bound(Listener::KeyDown));
        assert!(l.is_bound(Listener::RangeHover));
        l.set(Listener::RangeHover, false);
        assert!(!l.is_bound(Listener::RangeHover));
        l.unbind_all();
        assert!(l.is_empty());
    }

    #[test]
    fn test_outcome() {
        assert!(PickerOutcome::Selected > PickerOutcome::Changed);
        assert!(!PickerOutcome::Continue.is_consumed());
        assert_eq!(Outcome::from(PickerOutcome::Selected), Outcome::Changed);
        assert_eq!(PickerOutcome::from(false), PickerOutcome::Unchanged);
    }
}
