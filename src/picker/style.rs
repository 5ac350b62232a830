use crate::_private::NonExhaustive;
use ratatui::style::Style;
use ratatui::widgets::Block;

/// Composite style for the date picker.
#[derive(Debug, Clone)]
pub struct DatePickerStyle {
    pub style: Style,
    pub title: Option<Style>,
    /// Navigation arrows.
    pub nav: Option<Style>,
    pub weekday: Option<Style>,
    pub week: Option<Style>,
    pub day: Option<Style>,
    /// Days of the neighbouring months.
    pub other_month: Option<Style>,
    pub today: Option<Style>,
    pub select: Option<Style>,
    /// Days inside a selected range.
    pub range: Option<Style>,
    pub disabled: Option<Style>,
    pub focus: Option<Style>,
    /// Days inside the hover preview.
    pub preview: Option<Style>,
    /// Days that can't be part of the previewed range.
    pub not_allowed: Option<Style>,
    pub time: Option<Style>,
    pub block: Option<Block<'static>>,
    pub non_exhaustive: NonExhaustive,
}

impl Default for DatePickerStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            title: None,
            nav: None,
            weekday: None,
            week: None,
            day: None,
            other_month: None,
            today: None,
            select: None,
            range: None,
            disabled: None,
            focus: None,
            preview: None,
            not_allowed: None,
            time: None,
            block: None,
            non_exhaustive: NonExhaustive,
        }
    }
}
