use crate::calendar_math::{iso_week_number, military_to_ampm};
use crate::picker::navigation::{CellRef, DayCell, DayKind, FocusTarget};
use crate::picker::picker::{PANEL_WIDTH, WEEK_WIDTH};
use crate::picker::selection::{PreviewMark, RangePosition};
use crate::picker::style::DatePickerStyle;
use crate::picker::DatePickerState;
use chrono::Datelike;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::mem;

/// Renders the calendar popup of a [DatePickerState].
///
/// Shows `show_months` months side by side and the time row if
/// time is enabled. The screen areas of the day cells are stored
/// in the state for mouse handling.
#[derive(Debug, Default, Clone)]
pub struct DatePicker<'a> {
    style: Style,
    title_style: Option<Style>,
    nav_style: Option<Style>,
    weekday_style: Option<Style>,
    week_style: Option<Style>,
    day_style: Option<Style>,
    other_month_style: Option<Style>,
    today_style: Option<Style>,
    select_style: Option<Style>,
    range_style: Option<Style>,
    disabled_style: Option<Style>,
    focus_style: Option<Style>,
    preview_style: Option<Style>,
    not_allowed_style: Option<Style>,
    time_style: Option<Style>,
    block: Option<Block<'a>>,
}

impl<'a> DatePicker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    pub fn styles(mut self, styles: DatePickerStyle) -> Self {
        self.style = styles.style;
        if styles.title.is_some() {
            self.title_style = styles.title;
        }
        if styles.nav.is_some() {
            self.nav_style = styles.nav;
        }
        if styles.weekday.is_some() {
            self.weekday_style = styles.weekday;
        }
        if styles.week.is_some() {
            self.week_style = styles.week;
        }
        if styles.day.is_some() {
            self.day_style = styles.day;
        }
        if styles.other_month.is_some() {
            self.other_month_style = styles.other_month;
        }
        if styles.today.is_some() {
            self.today_style = styles.today;
        }
        if styles.select.is_some() {
            self.select_style = styles.select;
        }
        if styles.range.is_some() {
            self.range_style = styles.range;
        }
        if styles.disabled.is_some() {
            self.disabled_style = styles.disabled;
        }
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.preview.is_some() {
            self.preview_style = styles.preview;
        }
        if styles.not_allowed.is_some() {
            self.not_allowed_style = styles.not_allowed;
        }
        if styles.time.is_some() {
            self.time_style = styles.time;
        }
        if let Some(block) = styles.block {
            self.block = Some(block);
        }
        self
    }

    /// Base style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Month title.
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = Some(style);
        self
    }

    /// Navigation arrows.
    pub fn nav_style(mut self, style: Style) -> Self {
        self.nav_style = Some(style);
        self
    }

    pub fn weekday_style(mut self, style: Style) -> Self {
        self.weekday_style = Some(style);
        self
    }

    /// Week numbers.
    pub fn week_style(mut self, style: Style) -> Self {
        self.week_style = Some(style);
        self
    }

    pub fn day_style(mut self, style: Style) -> Self {
        self.day_style = Some(style);
        self
    }

    pub fn other_month_style(mut self, style: Style) -> Self {
        self.other_month_style = Some(style);
        self
    }

    pub fn today_style(mut self, style: Style) -> Self {
        self.today_style = Some(style);
        self
    }

    pub fn select_style(mut self, style: Style) -> Self {
        self.select_style = Some(style);
        self
    }

    pub fn range_style(mut self, style: Style) -> Self {
        self.range_style = Some(style);
        self
    }

    pub fn disabled_style(mut self, style: Style) -> Self {
        self.disabled_style = Some(style);
        self
    }

    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = Some(style);
        self
    }

    pub fn preview_style(mut self, style: Style) -> Self {
        self.preview_style = Some(style);
        self
    }

    pub fn not_allowed_style(mut self, style: Style) -> Self {
        self.not_allowed_style = Some(style);
        self
    }

    pub fn time_style(mut self, style: Style) -> Self {
        self.time_style = Some(style);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl StatefulWidgetRef for DatePicker<'_> {
    type State = DatePickerState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for DatePicker<'_> {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &DatePicker<'_>, area: Rect, buf: &mut Buffer, state: &mut DatePickerState) {
    state.area = area;
    state.screen = buf.area;

    // reset areas
    state.area_days.clear();
    state.area_cells.clear();
    state.area_prev = Rect::default();
    state.area_next = Rect::default();
    state.area_time = Rect::default();

    if state.is_destroyed() {
        return;
    }

    let block = if let Some(block) = widget.block.clone() {
        block
    } else {
        Block::new().style(widget.style)
    };
    state.inner = block.inner(area);
    block.render(area, buf);
    let inner = state.inner;

    let title_style = widget.title_style.unwrap_or(widget.style);
    let nav_style = widget.nav_style.unwrap_or(title_style);
    let weekday_style = widget.weekday_style.unwrap_or(widget.style);
    let week_style = widget.week_style.unwrap_or(widget.style);

    let week_width = if state.config.week_numbers {
        WEEK_WIDTH
    } else {
        0
    };
    let panel_width = PANEL_WIDTH + week_width;

    let mut y = inner.y;
    if !state.config.no_calendar {
        let mut area_days = Vec::new();
        let mut area_cells = Vec::new();
        let last_panel = state.grid.panels.len().saturating_sub(1);

        for (p, panel) in state.grid.panels.iter().enumerate() {
            let x0 = inner.x + p as u16 * (panel_width + 1);

            let title = format!(
                "{} {}",
                state.locale().months_long[panel.layout.month as usize],
                panel.layout.year
            );
            Line::from(title)
                .alignment(Alignment::Center)
                .style(title_style)
                .render(Rect::new(x0, y, panel_width, 1).intersection(inner), buf);

            if p == 0 {
                let area_prev = Rect::new(x0, y, 1, 1).intersection(inner);
                if !state.prev_month_disabled() {
                    Span::from("<").style(nav_style).render(area_prev, buf);
                    state.area_prev = area_prev;
                }
            }
            if p == last_panel {
                let area_next = Rect::new(x0 + panel_width - 1, y, 1, 1).intersection(inner);
                if !state.next_month_disabled() {
                    Span::from(">").style(nav_style).render(area_next, buf);
                    state.area_next = area_next;
                }
            }

            // week days
            if week_width > 0 {
                let area = Rect::new(x0, y + 1, 2, 1).intersection(inner);
                Span::from(state.locale().week_abbreviation.as_str())
                    .style(week_style)
                    .render(area, buf);
            }
            let mut x = x0 + week_width;
            for name in state.locale().weekdays_ordered() {
                let area = Rect::new(x, y + 1, 2, 1).intersection(inner);
                let name = name.chars().take(2).collect::<String>();
                Span::from(name).style(weekday_style).render(area, buf);
                x += 3;
            }

            for (i, cell) in panel.days.iter().enumerate() {
                let row = (i / 7) as u16;
                let col = (i % 7) as u16;
                let cy = y + 2 + row;

                if col == 0 && week_width > 0 {
                    // the thursday decides the iso week.
                    let thursday = panel.days.get(i + 3).unwrap_or(cell);
                    let area = Rect::new(x0, cy, 2, 1).intersection(inner);
                    Span::from(format!("{:>2}", iso_week_number(thursday.date)))
                        .style(week_style)
                        .render(area, buf);
                }
                if cell.hidden {
                    continue;
                }

                let cell_area = Rect::new(x0 + week_width + col * 3, cy, 2, 1).intersection(inner);
                let day_style = calc_day_style(widget, state, cell);
                Span::from(format!("{:>2}", cell.date.day()))
                    .style(day_style)
                    .render(cell_area, buf);

                area_days.push(cell_area);
                area_cells.push(CellRef { panel: p, index: i });
            }
        }

        state.area_days = area_days;
        state.area_cells = area_cells;
        y += 8;
    }

    if state.config.enable_time {
        state.area_time = Rect::new(inner.x, y, inner.width, 1).intersection(inner);
        render_time(widget, state, buf);
    }
}

fn render_time(widget: &DatePicker<'_>, state: &DatePickerState, buf: &mut Buffer) {
    let time_style = widget.time_style.unwrap_or(widget.style);
    let focus_style = widget.focus_style.unwrap_or(revert_style(time_style));
    let field_style = |field: FocusTarget| {
        if state.focus == field {
            focus_style
        } else {
            time_style
        }
    };

    let t = state.time;
    let hours = if state.time_24hr() {
        t.hours
    } else {
        military_to_ampm(t.hours)
    };

    let mut spans = vec![
        Span::from(format!("{:02}", hours)).style(field_style(FocusTarget::Hour)),
        Span::from(":").style(time_style),
        Span::from(format!("{:02}", t.minutes)).style(field_style(FocusTarget::Minute)),
    ];
    if state.config.enable_seconds {
        spans.push(Span::from(":").style(time_style));
        spans.push(Span::from(format!("{:02}", t.seconds)).style(field_style(FocusTarget::Second)));
    }
    if !state.time_24hr() {
        let am_pm = &state.locale().am_pm[if t.hours >= 12 { 1 } else { 0 }];
        spans.push(Span::from(" ").style(time_style));
        spans.push(Span::from(am_pm.clone()).style(field_style(FocusTarget::AmPm)));
    }

    Line::from(spans)
        .alignment(Alignment::Center)
        .style(time_style)
        .render(state.area_time, buf);
}

fn calc_day_style(widget: &DatePicker<'_>, state: &DatePickerState, cell: &DayCell) -> Style {
    let date = cell.date;
    let select_style = widget.select_style.unwrap_or(revert_style(widget.style));
    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));

    let mut style = widget.day_style.unwrap_or(widget.style);
    if cell.kind != DayKind::Current {
        if let Some(other_month) = widget.other_month_style {
            style = style.patch(other_month);
        }
    }
    if date == state.now().date() {
        if let Some(today) = widget.today_style {
            style = style.patch(today);
        }
    }
    if !cell.enabled {
        if let Some(disabled) = widget.disabled_style {
            style = style.patch(disabled);
        }
    }

    match state.range_position(date) {
        Some(RangePosition::Middle) => {
            style = style.patch(widget.range_style.unwrap_or(select_style));
        }
        Some(RangePosition::Start | RangePosition::End) => {
            style = style.patch(select_style);
        }
        None => {
            if state.is_selected(date) {
                style = style.patch(select_style);
            }
        }
    }

    if let Some(preview) = &state.preview {
        match preview.mark(date) {
            PreviewMark::StartRange | PreviewMark::EndRange => {
                style = style.patch(select_style);
            }
            PreviewMark::InRange => {
                style = style.patch(widget.preview_style.unwrap_or(select_style));
            }
            PreviewMark::NotAllowed => {
                if let Some(not_allowed) = widget.not_allowed_style {
                    style = style.patch(not_allowed);
                }
            }
            PreviewMark::None | PreviewMark::Keep => {}
        }
    }

    if state.focus == FocusTarget::Day(date) {
        style = style.patch(focus_style);
    }
    style
}

/// Swap fg and bg, or black on white.
fn revert_style(mut style: Style) -> Style {
    if style.fg.is_some() && style.bg.is_some() {
        mem::swap(&mut style.fg, &mut style.bg);
        style
    } else {
        style.black().on_white()
    }
}
