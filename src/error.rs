use log::warn;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Errors reported by the date picker.
///
/// Neither of these stops the picker. Invalid dates are dropped,
/// invalid configuration falls back to a default. Both are reported
/// via the configured [ErrorHandler].
///
/// Rejecting a date or a navigation because it is outside min/max
/// is not an error at all, the operation simply doesn't happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// Unparseable or invalid date input.
    InvalidDate(String),
    /// Unknown locale key, missing input element and the like.
    InvalidConfiguration(String),
}

impl Display for PickerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::InvalidDate(s) => write!(f, "Invalid date provided: {}", s),
            PickerError::InvalidConfiguration(s) => write!(f, "Invalid configuration: {}", s),
        }
    }
}

impl Error for PickerError {}

/// Receives non-fatal errors.
///
/// The default writes them to the log.
#[derive(Clone)]
pub struct ErrorHandler(Rc<dyn Fn(&PickerError)>);

impl ErrorHandler {
    pub fn new(f: impl Fn(&PickerError) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Report an error.
    pub fn report(&self, err: &PickerError) {
        (self.0)(err)
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(|e| warn!("{}", e))
    }
}

impl Debug for ErrorHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ErrorHandler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_report() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let h = ErrorHandler::new(move |e| seen2.borrow_mut().push(e.clone()));
        h.report(&PickerError::InvalidDate("xx".into()));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(
            seen.borrow()[0].to_string(),
            "Invalid date provided: xx".to_string()
        );
    }
}
