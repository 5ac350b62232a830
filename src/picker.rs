//!
//! Date picker.
//!
//! [DatePickerState] holds configuration, selection and viewport of
//! one picker and does all the event-handling. [DatePicker] renders
//! the calendar popup from that state.
//!
//! The parts are usable on their own:
//!
//! * [rules] decides whether a date can be selected.
//! * [selection] is the selection state machine and the range preview.
//! * [navigation] is the grid of visible days for keyboard navigation.
//! * [config] is the configuration and its side effects.
//! * [value] writes the selection to the input.
//! * [hooks] are the lifecycle callbacks.
//! * [timer] are the debounce timers.
//!

pub mod config;
pub(crate) mod event;
pub mod hooks;
mod month;
pub mod navigation;
#[allow(clippy::module_inception)]
mod picker;
pub mod rules;
pub mod selection;
mod style;
pub mod timer;
pub mod value;

pub use config::{ConfigOption, ConfigPatch, Options, Plugin, Position};
pub use event::{handle_events, handle_mouse_events, Listener, Listeners};
pub use hooks::{HookData, HookKind};
pub use month::*;
pub use navigation::FocusTarget;
pub use picker::*;
pub use selection::SelectionMode;
pub use style::*;
pub use value::{DateValue, InputElement};
