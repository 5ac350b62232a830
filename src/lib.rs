#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::clone_on_copy)]
#![allow(clippy::assigning_clones)]

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!
    //! See [rat-event](https://docs.rs/rat-event/latest/rat_event/)
    //!
    pub use rat_event::*;

    pub use crate::picker::event::PickerOutcome;
}

pub mod calendar_math;
pub mod date_format;
pub mod error;
pub mod locale;
pub mod picker;
pub mod registry;

pub use error::{ErrorHandler, PickerError};
pub use locale::Locale;

mod _private {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct NonExhaustive;
}
