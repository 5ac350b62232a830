use crate::_private::NonExhaustive;
use crate::calendar_math::{
    ampm_to_military, clamp_time_of_day, compare_dates, default_date, military_to_ampm,
    start_of_day, TimeOfDay,
};
use crate::date_format::{DateFormatter, DateInput};
use crate::error::PickerError;
use crate::locale::{Locale, LocaleSetting};
use crate::picker::config::{side_effects, ConfigPatch, Options, PickerConfig};
use crate::picker::config::{Position, SideEffect};
use crate::picker::event::{Listener, Listeners, PickerOutcome};
use crate::picker::hooks::{HookData, HookKind};
use crate::picker::navigation::{CalendarGrid, CellRef, FocusTarget};
use crate::picker::rules;
use crate::picker::selection::{RangePosition, RangePreview, SelectionMode, SelectionState};
use crate::picker::timer::{Debounce, CHANGE_DELAY, RESIZE_DELAY};
use crate::picker::value::{self, DateValue, InputElement};
use crate::registry::{ElementId, PickerElement};
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::layout::Rect;
use std::cmp::Ordering;
use std::time::{Duration, Instant};

/// Width of one month panel without week numbers.
pub(crate) const PANEL_WIDTH: u16 = 20;
/// Width of the week number column.
pub(crate) const WEEK_WIDTH: u16 = 3;

/// State & event-handling.
///
/// Owns the configuration, the selection and the viewport of one
/// picker instance. All changes go through the methods here, the
/// [DatePicker](crate::picker::DatePicker) widget only reads.
#[derive(Debug)]
pub struct DatePickerState {
    /// Element the picker is attached to.
    pub element: ElementId,
    /// Effective configuration.
    /// __readonly__. use [DatePickerState::set]
    pub config: PickerConfig,
    /// Parser/formatter with the current locale.
    /// __readonly__.
    pub formatter: DateFormatter,
    /// Selected dates and viewport.
    pub selection: SelectionState,
    /// The bound input.
    /// __read+write__ the host writes typed text here.
    pub input: InputElement,
    /// Days of the visible months.
    /// __readonly__. renewed with each redraw.
    pub grid: CalendarGrid,
    /// Values of the time fields.
    pub time: TimeOfDay,
    /// Keyboard focus.
    /// __read+write__
    pub focus: FocusTarget,
    /// Popup is shown.
    pub is_open: bool,
    /// Range preview while hovering.
    pub preview: Option<RangePreview>,
    /// Element the popup is positioned at.
    pub position_anchor: ElementId,
    /// Bound listeners.
    pub listeners: Listeners,

    /// Size of the terminal. Updated with each render and resize.
    pub screen: Rect,
    /// Computed popup area.
    /// __readonly__. renewed with each position_calendar.
    pub popup: Rect,
    /// Total area.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area inside the border.
    /// __readonly__. renewed for each render.
    pub inner: Rect,
    /// Area of the bound input.
    /// __read+write__ set by the host.
    pub area_input: Rect,
    /// Previous month arrow.
    /// __readonly__. renewed for each render.
    pub area_prev: Rect,
    /// Next month arrow.
    /// __readonly__. renewed for each render.
    pub area_next: Rect,
    /// Areas of the rendered day cells.
    /// __readonly__. renewed for each render.
    pub area_days: Vec<Rect>,
    /// Cell for each entry of area_days.
    /// __readonly__. renewed for each render.
    pub area_cells: Vec<CellRef>,
    /// Time row.
    /// __readonly__. renewed for each render.
    pub area_time: Rect,

    /// Coalesces change notifications from the time fields.
    pub change_timer: Debounce,
    /// Repositioning after a resize.
    pub resize_timer: Debounce,

    destroyed: bool,

    pub non_exhaustive: NonExhaustive,
}

impl DatePickerState {
    /// New picker for the element.
    ///
    /// Fails only if the element has no input.
    pub fn new(element: PickerElement, options: Options) -> Result<Self, PickerError> {
        let Some(input) = element.input else {
            return Err(PickerError::InvalidConfiguration(format!(
                "missing input element for {:?}",
                element.id
            )));
        };
        let options = element.dataset.merge(options);

        let formatter = DateFormatter::new();
        let now = formatter.now;
        let mut state = Self {
            element: element.id.clone(),
            config: Default::default(),
            formatter,
            selection: SelectionState::new(now),
            input,
            grid: Default::default(),
            time: Default::default(),
            focus: Default::default(),
            is_open: false,
            preview: None,
            position_anchor: element.id,
            listeners: Default::default(),
            screen: Default::default(),
            popup: Default::default(),
            area: Default::default(),
            inner: Default::default(),
            area_input: Default::default(),
            area_prev: Default::default(),
            area_next: Default::default(),
            area_days: Default::default(),
            area_cells: Default::default(),
            area_time: Default::default(),
            change_timer: Debounce::new(CHANGE_DELAY),
            resize_timer: Debounce::new(RESIZE_DELAY),
            destroyed: false,
            non_exhaustive: NonExhaustive,
        };

        state.parse_config(options);
        state.setup_inputs();
        state.setup_dates();
        state.bind_events();

        if !state.selection.selected_dates.is_empty() || state.config.no_calendar {
            if state.config.enable_time {
                state.set_hours_from_date(None);
            }
            state.update_value(false);
        }

        state.redraw();
        debug!("ready {:?}", state.element);
        state.trigger(HookKind::Ready, &HookData::None);

        Ok(state)
    }

    fn parse_config(&mut self, options: Options) {
        let mut explicit = Options::new();
        let mut dated = Vec::new();

        // date values need the locale and the parser settings.
        for opt in options.options.iter().cloned() {
            if opt.key().is_date_valued() {
                dated.push(opt.clone());
            } else {
                self.config.assign(opt.clone(), &self.formatter);
            }
            explicit = explicit.option(opt);
        }
        self.config.hooks.append(&options.hooks);

        for plugin in &options.plugins {
            let plugin_options = plugin.config(self);
            self.config.hooks.prepend(&plugin_options.hooks);
            for opt in plugin_options.options {
                if options.is_set(opt.key()) {
                    continue;
                }
                if opt.key().is_date_valued() {
                    dated.push(opt.clone());
                } else {
                    self.config.assign(opt.clone(), &self.formatter);
                }
                explicit = explicit.option(opt);
            }
        }

        self.config.derive_formats(&explicit);
        self.setup_locale();
        self.sync_formatter();

        for opt in dated {
            self.config.assign(opt, &self.formatter);
        }

        self.trigger(HookKind::ParseConfig, &HookData::None);
    }

    fn setup_locale(&mut self) {
        let locale = match &self.config.locale {
            LocaleSetting::Default => Locale::english(),
            LocaleSetting::Key(key) => match Locale::from_key(key) {
                Ok(v) => v,
                Err(e) => {
                    self.config.error_handler.report(&e);
                    Locale::english()
                }
            },
            LocaleSetting::Custom(v) => v.as_ref().clone(),
        };
        self.formatter.locale = locale;
    }

    fn sync_formatter(&mut self) {
        self.formatter.date_format = self.config.date_format.clone();
        self.formatter.format_date = self.config.format_date.clone();
        self.formatter.parse_date = self.config.parse_date.clone();
        self.formatter.error_handler = self.config.error_handler.clone();
        self.formatter.no_calendar = self.config.no_calendar;
        self.formatter.now = self
            .config
            .now
            .unwrap_or_else(|| Local::now().naive_local());
    }

    fn setup_inputs(&mut self) {
        self.input.read_only = !self.config.allow_input;
        self.position_anchor = self
            .config
            .position_element
            .clone()
            .unwrap_or_else(|| self.element.clone());
    }

    fn setup_dates(&mut self) {
        let preload = match &self.config.default_date {
            Some(v) => Some(v.clone()),
            None => self.input.preload_value().map(DateValue::from),
        };
        if let Some(preload) = preload {
            self.set_selected_date(&preload, None);
        }

        let initial = match self.selection.selected_dates.first() {
            Some(v) => *v,
            None => self.initial_target(),
        };
        self.selection.initial_date = initial;
        self.selection.set_viewport(initial);
        self.selection.latest_selected = self.selection.selected_dates.first().copied();

        self.time = self.default_time_of_day();
    }

    fn bind_events(&mut self) {
        self.listeners.bind(Listener::KeyDown);
        if !self.config.inline {
            self.listeners.bind(Listener::OutsideClick);
            self.listeners.bind(Listener::Resize);
        }
        self.rebind_listeners();
    }

    /// Listeners that depend on click_opens, mode and allow_input.
    fn rebind_listeners(&mut self) {
        let config = &self.config;
        self.listeners.set(Listener::InputOpen, config.click_opens);
        self.listeners
            .set(Listener::RangeHover, config.mode == SelectionMode::Range);
        self.listeners.set(Listener::InputBlur, config.allow_input);
        self.input.read_only = !config.allow_input;
    }

    /// Viewport date if there is no selection.
    fn initial_target(&self) -> NaiveDateTime {
        let now = self.formatter.now;
        match (self.config.min_date, self.config.max_date) {
            (Some(min), _) if min > now => min,
            (_, Some(max)) if max < now => max,
            _ => now,
        }
    }
}

impl DatePickerState {
    /// Has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current time as seen by the picker.
    pub fn now(&self) -> NaiveDateTime {
        self.formatter.now
    }

    pub fn locale(&self) -> &Locale {
        &self.formatter.locale
    }

    pub fn selected_dates(&self) -> &[NaiveDateTime] {
        &self.selection.selected_dates
    }

    pub fn latest_selected(&self) -> Option<NaiveDateTime> {
        self.selection.latest_selected
    }

    /// Viewport year.
    pub fn current_year(&self) -> i32 {
        self.selection.current_year
    }

    /// Viewport month, 0-based.
    pub fn current_month(&self) -> u32 {
        self.selection.current_month
    }

    /// 24h clock for the time fields.
    pub fn time_24hr(&self) -> bool {
        self.config.time_24hr.unwrap_or(self.formatter.locale.time_24hr)
    }

    /// Call the hooks of one kind.
    pub fn trigger(&self, kind: HookKind, data: &HookData) {
        let hooks = self.config.hooks.get(kind);
        if hooks.is_empty() {
            return;
        }
        for hook in hooks {
            hook.call(&self.selection.selected_dates, &self.input.value, self, data);
        }
    }

    /// Change configuration at runtime.
    ///
    /// Each option is assigned and its side effects run right after.
    /// Ends with a redraw and a value update.
    pub fn set(&mut self, patch: impl Into<ConfigPatch>) {
        if self.destroyed {
            return;
        }
        let patch = patch.into();
        for opt in patch.0 {
            let key = opt.key();
            debug!("set {:?}", key);
            self.config.assign(opt, &self.formatter);
            for effect in side_effects(key) {
                self.run_side_effect(*effect);
            }
        }
        self.redraw();
        self.update_value(true);
    }

    fn run_side_effect(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::SetupLocale => self.setup_locale(),
            SideEffect::SyncFormatter => self.sync_formatter(),
            SideEffect::RevalidateMin | SideEffect::RevalidateMax => {
                let config = &self.config;
                self.selection
                    .retain(|d| rules::is_enabled(config, *d, None));
            }
            SideEffect::JumpToDate => {
                let (year, month) = (self.selection.current_year, self.selection.current_month);
                if !self.viewport_in_bounds(year, month) {
                    self.jump_to_date(None, false);
                }
            }
            SideEffect::UpdatePositionElement => {
                self.position_anchor = self
                    .config
                    .position_element
                    .clone()
                    .unwrap_or_else(|| self.element.clone());
                if self.is_open {
                    self.position_calendar();
                }
            }
            SideEffect::RebindListeners => self.rebind_listeners(),
        }
    }

    /// Parse with the current settings.
    pub fn parse_date(
        &self,
        date: impl Into<DateInput>,
        format: Option<&str>,
        timeless: bool,
    ) -> Option<NaiveDateTime> {
        self.formatter.parse(&date.into(), format, timeless)
    }

    /// Format with the current settings.
    pub fn format_date(&self, date: NaiveDateTime, format: &str) -> String {
        self.formatter.format(date, format)
    }

    /// Selected dates as text.
    ///
    /// Uses the given format, or the alt format with alt input and
    /// the date format otherwise.
    pub fn date_str(&self, format: Option<&str>) -> String {
        let c = &self.config;
        let (format, format_override) = match format {
            Some(f) => (f, None),
            None if c.alt_input => (c.alt_format.as_str(), c.format_alt_date.as_ref()),
            None => (c.date_format.as_str(), None),
        };
        value::date_str(
            &self.selection.selected_dates,
            c.mode,
            c.enable_time,
            &c.conjunction,
            &self.formatter,
            format_override,
            format,
        )
    }

    /// Write the selection to the input.
    pub fn update_value(&mut self, trigger_change: bool) {
        let c = &self.config;
        self.input.value = value::date_str(
            &self.selection.selected_dates,
            c.mode,
            c.enable_time,
            &c.conjunction,
            &self.formatter,
            None,
            &c.date_format,
        );
        if c.alt_input {
            self.input.alt_value = value::date_str(
                &self.selection.selected_dates,
                c.mode,
                c.enable_time,
                &c.conjunction,
                &self.formatter,
                c.format_alt_date.as_ref(),
                &c.alt_format,
            );
        }
        if trigger_change {
            self.trigger(HookKind::ValueUpdate, &HookData::None);
        }
    }

    /// Rebuild the visible months.
    pub fn redraw(&mut self) {
        if self.config.no_calendar {
            self.grid = Default::default();
            return;
        }

        let config = &self.config;
        self.grid = CalendarGrid::build(
            self.selection.current_year,
            self.selection.current_month,
            config.show_months,
            &self.formatter.locale,
            |d| rules::is_enabled(config, d.and_time(NaiveTime::MIN), Some(true)),
        );

        if !self.config.hooks.is_empty(HookKind::DayCreate) {
            for panel in &self.grid.panels {
                for cell in panel.days.iter().filter(|v| !v.hidden) {
                    self.trigger(HookKind::DayCreate, &HookData::Day(cell.date));
                }
            }
        }
    }

    /// Policy check.
    ///
    /// With `timeless` the min/max bounds are compared by day. If it
    /// is None the bounds decide for themselves.
    pub fn is_enabled(&self, date: impl Into<DateInput>, timeless: Option<bool>) -> bool {
        match self
            .formatter
            .parse(&date.into(), None, timeless.unwrap_or(false))
        {
            Some(d) => rules::is_enabled(&self.config, d, timeless),
            None => false,
        }
    }

    fn enabled(&self, date: NaiveDateTime, timeless: Option<bool>) -> bool {
        let date = if timeless == Some(true) {
            start_of_day(date)
        } else {
            date
        };
        rules::is_enabled(&self.config, date, timeless)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selection.is_selected(date)
    }

    /// Position inside a complete range.
    pub fn range_position(&self, date: NaiveDate) -> Option<RangePosition> {
        self.selection.range_position(self.config.mode, date)
    }
}

impl DatePickerState {
    /// Replace the selection.
    ///
    /// Text is split at the conjunction in multiple mode and at the
    /// range separator in range mode. Disabled dates are dropped unless
    /// allow_invalid_preload is set. Empty input clears.
    pub fn set_date(
        &mut self,
        date: impl Into<DateValue>,
        trigger_change: bool,
        format: Option<&str>,
    ) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        let date = date.into();
        if date.is_empty() {
            return self.clear(trigger_change, true);
        }

        self.set_selected_date(&date, format);
        self.selection.latest_selected = self.selection.selected_dates.last().copied();
        self.redraw();
        self.jump_to_date(None, trigger_change);
        self.set_hours_from_date(None);

        if self.selection.selected_dates.is_empty() {
            self.clear(false, true);
        }
        self.update_value(trigger_change);
        if trigger_change {
            self.trigger(HookKind::Change, &HookData::None);
        }
        PickerOutcome::Changed
    }

    fn set_selected_date(&mut self, date: &DateValue, format: Option<&str>) {
        let mode = self.config.mode;
        let inputs = match mode {
            SelectionMode::Multiple => date.split(Some(self.config.conjunction.as_str())),
            SelectionMode::Range => date.split(Some(self.formatter.locale.range_separator.as_str())),
            SelectionMode::Single | SelectionMode::Time => date.split(None),
        };

        let mut dates = inputs
            .iter()
            .filter_map(|v| self.formatter.parse(v, format, false))
            .collect::<Vec<_>>();
        if !self.config.allow_invalid_preload {
            dates.retain(|d| self.enabled(*d, Some(false)));
        }
        match mode {
            SelectionMode::Single | SelectionMode::Time => dates.truncate(1),
            SelectionMode::Range => dates.truncate(2),
            SelectionMode::Multiple => {}
        }

        self.selection.replace(mode, dates);
    }

    /// Clear the selection and the input.
    pub fn clear(&mut self, trigger_change: bool, to_initial: bool) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        self.input.value.clear();
        self.input.alt_value.clear();
        self.selection.clear(to_initial);
        self.preview = None;
        if self.config.enable_time {
            let t = self.default_time_of_day();
            self.set_hours(t.hours, t.minutes, t.seconds);
        }
        self.redraw();
        if trigger_change {
            self.trigger(HookKind::Change, &HookData::None);
        }
        PickerOutcome::Changed
    }

    /// Show the popup.
    pub fn open(&mut self) -> PickerOutcome {
        if self.destroyed || self.input.disabled || self.config.inline {
            return PickerOutcome::Unchanged;
        }
        let was_open = self.is_open;
        self.is_open = true;
        if !was_open {
            self.trigger(HookKind::Open, &HookData::None);
            self.position_calendar();
        }
        if self.config.enable_time && self.config.no_calendar && !self.config.allow_input {
            self.focus = FocusTarget::Hour;
        }
        PickerOutcome::Changed
    }

    /// Hide the popup.
    pub fn close(&mut self) -> PickerOutcome {
        if self.destroyed || !self.is_open {
            return PickerOutcome::Unchanged;
        }
        self.is_open = false;
        self.preview = None;
        if self.focus.is_calendar() && !self.config.inline {
            self.focus = FocusTarget::Input;
        }
        self.trigger(HookKind::Close, &HookData::None);
        PickerOutcome::Changed
    }

    pub fn toggle(&mut self) -> PickerOutcome {
        if self.is_open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Focus the input and close the popup.
    pub fn focus_and_close(&mut self) -> PickerOutcome {
        self.focus = FocusTarget::Input;
        self.close();
        PickerOutcome::Changed
    }

    /// Size of the calendar popup.
    pub fn calendar_size(&self) -> (u16, u16) {
        let months = self.config.show_months.max(1) as u16;
        let panel = PANEL_WIDTH + if self.config.week_numbers { WEEK_WIDTH } else { 0 };
        let width = panel * months + months.saturating_sub(1) + 2;
        let height = if self.config.no_calendar { 0 } else { 8 }
            + if self.config.enable_time { 1 } else { 0 }
            + 2;
        (width, height)
    }

    /// Place the popup relative to the input.
    pub fn position_calendar(&mut self) {
        self.trigger(HookKind::PreCalendarPosition, &HookData::None);

        let (width, height) = self.calendar_size();
        let anchor = self.area_input;
        let screen = self.screen;

        let space_below = screen.bottom().saturating_sub(anchor.bottom());
        let space_above = anchor.y.saturating_sub(screen.y);
        let above = match self.config.position {
            Position::Above => true,
            Position::Below => false,
            Position::Auto => space_below < height && space_above >= height,
        };

        let y = if above {
            anchor.y.saturating_sub(height)
        } else {
            anchor.bottom()
        };
        let x = anchor.x.min(screen.right().saturating_sub(width));
        self.popup = Rect::new(x, y, width, height).intersection(screen);
    }
}

impl DatePickerState {
    /// Move the viewport to the date.
    ///
    /// Without a date this is the latest selected date, or the
    /// initial target.
    pub fn jump_to_date(&mut self, date: Option<DateInput>, trigger_change: bool) -> PickerOutcome {
        let target = match date {
            Some(v) => self.formatter.parse(&v, None, false),
            None => Some(
                self.selection
                    .latest_selected
                    .unwrap_or_else(|| self.initial_target()),
            ),
        };
        let Some(target) = target else {
            return PickerOutcome::Unchanged;
        };

        let old_year = self.selection.current_year;
        let old_month = self.selection.current_month;
        self.selection.set_viewport(target);
        self.redraw();

        let year_changed = old_year != self.selection.current_year;
        let month_changed = year_changed || old_month != self.selection.current_month;
        if trigger_change && year_changed {
            self.trigger(HookKind::YearChange, &HookData::None);
        }
        if trigger_change && month_changed {
            self.trigger(HookKind::MonthChange, &HookData::None);
        }
        if month_changed {
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }

    /// The viewport starts at or before the month of min_date.
    pub fn prev_month_disabled(&self) -> bool {
        match self.config.min_date {
            Some(min) => {
                (self.selection.current_year, self.selection.current_month)
                    <= (min.year(), min.month0())
            }
            None => false,
        }
    }

    /// The last visible month is at or after the month of max_date.
    pub fn next_month_disabled(&self) -> bool {
        match self.config.max_date {
            Some(max) => {
                let m = self.selection.current_month as i64 + self.config.show_months as i64 - 1;
                let year = self.selection.current_year + m.div_euclid(12) as i32;
                let month = m.rem_euclid(12) as u32;
                (year, month) >= (max.year(), max.month0())
            }
            None => false,
        }
    }

    /// Some visible day lies within min_date..max_date.
    fn viewport_in_bounds(&self, year: i32, month: u32) -> bool {
        let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
            return false;
        };
        let Some(last) = first
            .checked_add_months(Months::new(self.config.show_months.max(1)))
            .and_then(|v| v.pred_opt())
        else {
            return false;
        };
        if let Some(min) = self.config.min_date {
            if last < min.date() {
                return false;
            }
        }
        if let Some(max) = self.config.max_date {
            if first > max.date() {
                return false;
            }
        }
        true
    }

    /// Change the viewport month.
    ///
    /// With is_offset the value is added to the current month,
    /// otherwise it is the new 0-based month. Refuses to move past
    /// min_date/max_date.
    pub fn change_month(&mut self, value: i32, is_offset: bool) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        let delta = if is_offset {
            value as i64
        } else {
            value as i64 - self.selection.current_month as i64
        };
        if delta == 0 {
            return PickerOutcome::Unchanged;
        }
        if (delta < 0 && self.prev_month_disabled()) || (delta > 0 && self.next_month_disabled())
        {
            return PickerOutcome::Unchanged;
        }

        let m = self.selection.current_month as i64 + delta;
        let year = self.selection.current_year + m.div_euclid(12) as i32;
        let month = m.rem_euclid(12) as u32;
        if !self.viewport_in_bounds(year, month) {
            return PickerOutcome::Unchanged;
        }

        let year_changed = year != self.selection.current_year;
        self.selection.current_year = year;
        self.selection.current_month = month;
        debug!("change month {}-{}", year, month + 1);
        self.redraw();

        if year_changed {
            self.trigger(HookKind::YearChange, &HookData::None);
        }
        self.trigger(HookKind::MonthChange, &HookData::None);
        PickerOutcome::Changed
    }

    /// Change the viewport year.
    ///
    /// Years outside min_date/max_date are refused. Landing on the
    /// year of a bound moves the month inside the bound.
    pub fn change_year(&mut self, year: i32) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        if self.config.min_date.is_some_and(|v| year < v.year())
            || self.config.max_date.is_some_and(|v| year > v.year())
        {
            return PickerOutcome::Unchanged;
        }

        let year_changed = self.selection.current_year != year;
        self.selection.current_year = year;
        match (self.config.min_date, self.config.max_date) {
            (_, Some(max)) if year == max.year() => {
                self.selection.current_month = self.selection.current_month.min(max.month0());
            }
            (Some(min), _) if year == min.year() => {
                self.selection.current_month = self.selection.current_month.max(min.month0());
            }
            _ => {}
        }

        if year_changed {
            self.redraw();
            self.trigger(HookKind::YearChange, &HookData::None);
            PickerOutcome::Changed
        } else {
            PickerOutcome::Unchanged
        }
    }

    /// Close after a select, except while the time is still to be
    /// set for a single date or the second end of a range.
    fn after_select_should_close(&self) -> bool {
        let c = &self.config;
        let single_time = c.mode == SelectionMode::Single && c.enable_time;
        let range_time = c.mode == SelectionMode::Range
            && self.selection.selected_dates.len() == 1
            && c.enable_time;
        c.close_on_select && !single_time && !range_time
    }

    /// Select a day.
    ///
    /// Disabled days are ignored. With time enabled the day gets the
    /// time of the time fields.
    pub fn on_date_select(&mut self, day: NaiveDate) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        let mode = self.config.mode;
        let date = if self.config.enable_time {
            day.and_time(self.time.to_time())
        } else {
            day.and_time(NaiveTime::MIN)
        };
        if !self.enabled(date, Some(!self.config.enable_time)) {
            return PickerOutcome::Unchanged;
        }

        let offset = (date.year() as i64 - self.selection.current_year as i64) * 12
            + date.month0() as i64
            - self.selection.current_month as i64;
        let should_change_month = mode != SelectionMode::Range
            && (offset < 0 || offset > self.config.show_months as i64 - 1);

        let result = self.selection.apply(mode, date);
        self.preview = None;
        if self.config.enable_time {
            self.apply_time_fields();
        }

        if should_change_month {
            self.selection.set_viewport(date);
        }
        self.redraw();
        // crossings are relative to the viewport before the select.
        if result.new_year {
            self.trigger(HookKind::YearChange, &HookData::None);
        }
        if result.new_year || result.new_month {
            self.trigger(HookKind::MonthChange, &HookData::None);
        }
        self.update_value(true);

        self.focus = if self.config.enable_time {
            FocusTarget::Hour
        } else {
            FocusTarget::Day(day)
        };
        if self.after_select_should_close() {
            self.focus_and_close();
        }

        self.trigger(HookKind::Change, &HookData::None);
        PickerOutcome::Selected
    }
}

impl DatePickerState {
    /// Default time of day.
    ///
    /// Starts with default_hour/minute/seconds and is clamped to
    /// min_date/max_date if those carry a time of day, or
    /// to min_time/max_time.
    pub fn default_time_of_day(&self) -> TimeOfDay {
        let c = &self.config;
        let time = TimeOfDay::new(c.default_hour, c.default_minute, c.default_seconds);
        let min = c
            .min_date
            .filter(|_| c.min_date_has_time)
            .or(c.min_time)
            .map(TimeOfDay::of);
        let max = c
            .max_date
            .filter(|_| c.max_date_has_time)
            .or(c.max_time)
            .map(TimeOfDay::of);
        clamp_time_of_day(time, min, max)
    }

    /// Default date for the time picker.
    pub fn default_date(&self, with_hours: bool) -> NaiveDateTime {
        let date = default_date(self.formatter.now, self.config.min_date);
        if with_hours {
            date.date().and_time(self.default_time_of_day().to_time())
        } else {
            date
        }
    }

    /// Set the time fields and the time of the latest selected date.
    pub fn set_hours(&mut self, hours: u32, minutes: u32, seconds: u32) {
        let t = TimeOfDay::new(hours % 24, minutes.min(59), seconds.min(59));
        self.time = t;
        if let Some(latest) = self.selection.latest_selected {
            self.selection.set_latest(latest.date().and_time(t.to_time()));
        }
    }

    /// Set the time fields from the date or the latest selected date.
    pub fn set_hours_from_date(&mut self, date: Option<NaiveDateTime>) {
        if let Some(date) = date.or(self.selection.latest_selected) {
            self.set_hours(date.hour(), date.minute(), date.second());
        }
    }

    /// Apply the time fields to the latest selected date,
    /// clamped to the bounds.
    fn apply_time_fields(&mut self) {
        let c = &self.config;
        let latest = self.selection.latest_selected;
        let same_day = |bound: NaiveDateTime| {
            latest.is_some_and(|v| compare_dates(v, bound, true) == Ordering::Equal)
        };

        let min = c
            .min_time
            .or(c.min_date.filter(|v| c.min_date_has_time && same_day(*v)))
            .map(TimeOfDay::of);
        let max = c
            .max_time
            .or(c.max_date.filter(|v| c.max_date_has_time && same_day(*v)))
            .map(TimeOfDay::of);

        let mut t = self.time;
        match (c.min_time, c.max_time) {
            (Some(lo), Some(hi)) if lo.time() > hi.time() => {
                // allowed window wraps around midnight.
                let cur = t.to_time();
                if cur > hi.time() && cur < lo.time() {
                    t = TimeOfDay::of(lo);
                }
            }
            _ => t = clamp_time_of_day(t, min, max),
        }
        self.set_hours(t.hours, t.minutes, t.seconds);
    }

    /// Time fields have been changed.
    ///
    /// Creates a default selection if there is none, clamps the time
    /// to the bounds and writes the value. The change notification
    /// is debounced.
    pub fn on_time_update(&mut self, time: TimeOfDay, now: Instant) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        if self.selection.selected_dates.is_empty() {
            let date = self.default_date(true);
            self.selection.replace(self.config.mode, vec![date]);
        }

        let prev_value = self.input.value.clone();
        let prev_selection = self.selection.clone();
        let prev_time = self.time;

        self.time = time;
        self.apply_time_fields();

        if let Some(latest) = self.selection.latest_selected {
            if !self.enabled(latest, Some(false)) {
                self.selection = prev_selection;
                self.time = prev_time;
                return PickerOutcome::Unchanged;
            }
            if self.grid.find(latest.date()).is_none() && !self.config.no_calendar {
                self.jump_to_date(None, true);
            }
        }

        self.update_value(true);
        if self.input.value != prev_value {
            self.change_timer.schedule(now);
        }
        PickerOutcome::Changed
    }

    /// Switch between am and pm.
    pub fn set_am_pm(&mut self, pm: bool, now: Instant) -> PickerOutcome {
        let mut time = self.time;
        time.hours = ampm_to_military(military_to_ampm(time.hours), pm);
        if time == self.time {
            return PickerOutcome::Unchanged;
        }
        self.on_time_update(time, now)
    }

    /// Step the focused time field.
    fn step_time(&mut self, steps: i32, now: Instant) -> PickerOutcome {
        let steps = steps as i64;
        let delta = match self.focus {
            FocusTarget::Hour => steps * self.config.hour_increment as i64 * 3600,
            FocusTarget::Minute => steps * self.config.minute_increment as i64 * 60,
            FocusTarget::Second => steps,
            FocusTarget::AmPm => 12 * 3600,
            _ => return PickerOutcome::Continue,
        };
        let t = self.time;
        let secs = (t.hours as i64 * 3600 + t.minutes as i64 * 60 + t.seconds as i64 + delta)
            .rem_euclid(86400);
        let time = TimeOfDay::new(
            (secs / 3600) as u32,
            (secs % 3600 / 60) as u32,
            (secs % 60) as u32,
        );
        self.on_time_update(time, now)
    }

    /// Visible time fields in tab order.
    pub fn time_fields(&self) -> Vec<FocusTarget> {
        if !self.config.enable_time {
            return Vec::new();
        }
        let mut fields = vec![FocusTarget::Hour, FocusTarget::Minute];
        if self.config.enable_seconds {
            fields.push(FocusTarget::Second);
        }
        if !self.time_24hr() {
            fields.push(FocusTarget::AmPm);
        }
        fields
    }

    fn cycle_time_field(&mut self, forward: bool) -> PickerOutcome {
        let fields = self.time_fields();
        let Some(idx) = fields.iter().position(|v| *v == self.focus) else {
            return PickerOutcome::Continue;
        };
        let next = if forward {
            fields.get(idx + 1)
        } else {
            idx.checked_sub(1).and_then(|v| fields.get(v))
        };
        self.focus = next.copied().unwrap_or(FocusTarget::Input);
        PickerOutcome::Changed
    }
}

impl DatePickerState {
    /// Text typed into the input and the format to read it.
    fn typed_text(&self) -> (String, String) {
        if self.config.alt_input {
            (self.input.alt_value.clone(), self.config.alt_format.clone())
        } else {
            (self.input.value.clone(), self.config.date_format.clone())
        }
    }

    /// Keyboard handling for the input and the calendar.
    pub fn on_key_down(&mut self, key: &KeyEvent) -> PickerOutcome {
        if self.destroyed || key.kind == KeyEventKind::Release {
            return PickerOutcome::Continue;
        }

        let focus = self.focus;
        let is_input = focus == FocusTarget::Input;
        let is_time = focus.is_time();
        let is_day = matches!(focus, FocusTarget::Day(_));
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let allow_input = self.config.allow_input;
        let visible = self.is_open || self.config.inline;

        let calendar_elem = focus.is_calendar() && visible;
        let allow_keydown = self.is_open && (!allow_input || !is_input);
        let allow_inline_keydown = self.config.inline && is_input && !allow_input;

        let r = if key.code == KeyCode::Enter && is_input {
            if allow_input {
                let (text, format) = self.typed_text();
                self.set_date(text, true, Some(&format));
                self.close();
                self.focus = FocusTarget::None;
                PickerOutcome::Changed
            } else {
                self.open()
            }
        } else if calendar_elem || allow_keydown || allow_inline_keydown {
            match key.code {
                KeyCode::Enter => match focus {
                    FocusTarget::Day(day) => self.on_date_select(day),
                    _ if is_time => {
                        self.on_time_update(self.time, Instant::now());
                        self.focus_and_close()
                    }
                    _ => PickerOutcome::Continue,
                },
                KeyCode::Esc => self.focus_and_close(),
                KeyCode::Backspace | KeyCode::Delete => {
                    if is_input && !allow_input {
                        self.clear(true, true)
                    } else {
                        PickerOutcome::Continue
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    let delta = if key.code == KeyCode::Right { 1 } else { -1 };
                    if is_time {
                        self.cycle_time_field(delta > 0)
                    } else if is_input {
                        if self.config.enable_time {
                            self.focus = FocusTarget::Hour;
                            PickerOutcome::Changed
                        } else {
                            PickerOutcome::Continue
                        }
                    } else if self.config.no_calendar {
                        PickerOutcome::Continue
                    } else if ctrl {
                        self.change_month(delta, true);
                        let first = self.grid.first_available(1);
                        self.focus_on_day(first, 0)
                    } else {
                        self.focus_on_day(None, delta)
                    }
                }
                KeyCode::Up | KeyCode::Down => {
                    let delta = if key.code == KeyCode::Down { 1 } else { -1 };
                    if (is_day || is_input) && !self.config.no_calendar {
                        if ctrl {
                            self.change_year(self.selection.current_year - delta);
                            let first = self.grid.first_available(1);
                            self.focus_on_day(first, 0)
                        } else {
                            self.focus_on_day(None, delta * 7)
                        }
                    } else if is_time {
                        self.step_time(-delta, Instant::now())
                    } else if self.config.enable_time {
                        self.focus = FocusTarget::Hour;
                        PickerOutcome::Changed
                    } else {
                        PickerOutcome::Continue
                    }
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    let back = shift || key.code == KeyCode::BackTab;
                    if is_time {
                        self.cycle_time_field(!back)
                    } else if !self.config.no_calendar && is_day && back {
                        self.focus = FocusTarget::Input;
                        PickerOutcome::Changed
                    } else {
                        PickerOutcome::Continue
                    }
                }
                KeyCode::Char(c) if focus == FocusTarget::AmPm => {
                    let c = c.to_lowercase().next();
                    let am = self.formatter.locale.am_pm[0].to_lowercase().chars().next();
                    let pm = self.formatter.locale.am_pm[1].to_lowercase().chars().next();
                    if c.is_some() && c == am {
                        self.set_am_pm(false, Instant::now())
                    } else if c.is_some() && c == pm {
                        self.set_am_pm(true, Instant::now())
                    } else {
                        PickerOutcome::Unchanged
                    }
                }
                _ => PickerOutcome::Continue,
            }
        } else {
            PickerOutcome::Continue
        };

        if is_input || focus.is_calendar() {
            self.trigger(HookKind::KeyDown, &HookData::Key(*key));
        }
        r
    }

    /// Move the focus by offset days.
    ///
    /// Starts at the given cell, the focused day, the latest selected
    /// day, today or the first available day in that order.
    /// If no day can take the focus it goes back to the input.
    pub fn focus_on_day(&mut self, current: Option<CellRef>, offset: i32) -> PickerOutcome {
        let focused = match self.focus {
            FocusTarget::Day(d) => self.grid.in_view(d),
            _ => None,
        };
        let start = current
            .or(focused)
            .or_else(|| {
                self.selection
                    .latest_selected
                    .and_then(|d| self.grid.in_view(d.date()))
            })
            .or_else(|| self.grid.in_view(self.formatter.now.date()))
            .or_else(|| self.grid.first_available(if offset > 0 { 1 } else { -1 }));

        let Some(start) = start else {
            self.focus = FocusTarget::Input;
            return PickerOutcome::Changed;
        };

        if focused.is_none() {
            self.focus_on_cell(start)
        } else {
            self.next_available_day(start, offset)
        }
    }

    /// Focus the next available day at least delta cells away.
    ///
    /// Changes the month if the visible months have nothing left
    /// and focuses the first available day of the new month.
    /// If the month can't change the focus goes back to the input.
    pub fn next_available_day(&mut self, current: CellRef, delta: i32) -> PickerOutcome {
        if let Some(next) = self.grid.next_available(current, delta) {
            return self.focus_on_cell(next);
        }

        let dir = if delta < 0 { -1 } else { 1 };
        if self.change_month(dir, true) != PickerOutcome::Changed {
            self.focus = FocusTarget::Input;
            return PickerOutcome::Changed;
        }

        let panel = if dir > 0 {
            self.grid.panels.len().saturating_sub(1)
        } else {
            0
        };
        match self.grid.first_available_in_panel(panel, dir) {
            Some(cell) => self.focus_on_cell(cell),
            None => {
                self.focus = FocusTarget::Input;
                PickerOutcome::Changed
            }
        }
    }

    fn focus_on_cell(&mut self, cell: CellRef) -> PickerOutcome {
        let Some(day) = self.grid.cell(cell).map(|v| v.date) else {
            return PickerOutcome::Unchanged;
        };
        self.focus = FocusTarget::Day(day);
        if self.config.mode == SelectionMode::Range {
            self.update_preview(day);
        }
        PickerOutcome::Changed
    }

    /// Pointer over a day.
    pub fn hover(&mut self, day: NaiveDate) -> PickerOutcome {
        if !self.listeners.is_bound(Listener::RangeHover) {
            return PickerOutcome::Continue;
        }
        self.update_preview(day)
    }

    fn update_preview(&mut self, day: NaiveDate) -> PickerOutcome {
        if self.selection.selected_dates.len() != 1 {
            return match self.preview.take() {
                Some(_) => PickerOutcome::Changed,
                None => PickerOutcome::Continue,
            };
        }
        if !self.enabled(day.and_time(NaiveTime::MIN), Some(true)) {
            return PickerOutcome::Unchanged;
        }

        let config = &self.config;
        let start = self.selection.selected_dates[0].date();
        let preview = RangePreview::new(start, day, |d| {
            rules::is_enabled(config, d.and_time(NaiveTime::MIN), Some(true))
        });
        if self.preview == Some(preview) {
            PickerOutcome::Unchanged
        } else {
            self.preview = Some(preview);
            PickerOutcome::Changed
        }
    }

    /// A click outside of input and calendar.
    ///
    /// Commits typed text, closes the popup and drops a half
    /// finished range.
    pub fn outside_click(&mut self) -> PickerOutcome {
        if self.destroyed || !self.is_open || self.config.inline {
            return PickerOutcome::Continue;
        }
        if self.config.allow_input {
            let (text, format) = self.typed_text();
            self.set_date(text, false, Some(&format));
        }
        if self.config.enable_time && !self.input.value.is_empty() {
            self.apply_time_fields();
            self.update_value(true);
        }
        self.close();
        if self.config.mode == SelectionMode::Range && self.selection.selected_dates.len() == 1 {
            self.clear(false, true);
        }
        self.focus = FocusTarget::None;
        PickerOutcome::Changed
    }

    /// The input lost the focus.
    ///
    /// Typed text that differs from the current value is committed,
    /// unless the focus moves into the calendar.
    pub fn blur_input(&mut self, to_calendar: bool) -> PickerOutcome {
        if self.destroyed || !self.listeners.is_bound(Listener::InputBlur) {
            return PickerOutcome::Continue;
        }
        let (text, format) = self.typed_text();
        let changed = text.trim_end() != self.date_str(None);
        if to_calendar {
            return PickerOutcome::Unchanged;
        }
        if self.focus == FocusTarget::Input {
            self.focus = FocusTarget::None;
        }
        if changed {
            self.set_date(text, true, Some(&format))
        } else {
            PickerOutcome::Unchanged
        }
    }

    /// The terminal has been resized.
    pub fn resize(&mut self, now: Instant) {
        if self.listeners.is_bound(Listener::Resize) {
            self.resize_timer.schedule(now);
        }
    }

    /// Run due timers.
    pub fn tick(&mut self, now: Instant) -> PickerOutcome {
        if self.destroyed {
            return PickerOutcome::Continue;
        }
        let mut r = PickerOutcome::Continue;
        if self.change_timer.read(now) {
            self.trigger(HookKind::Change, &HookData::None);
            r = PickerOutcome::Changed;
        }
        if self.resize_timer.read(now) {
            if self.is_open {
                self.position_calendar();
            }
            r = PickerOutcome::Changed;
        }
        r
    }

    /// Time until the next timer is due.
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        match (
            self.change_timer.sleep_time(now),
            self.resize_timer.sleep_time(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Tear down.
    ///
    /// Notifies destroy, unbinds all listeners and cancels the
    /// timers before the state is dropped. Calling it again does
    /// nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.trigger(HookKind::Destroy, &HookData::None);

        self.listeners.unbind_all();
        self.change_timer.cancel();
        self.resize_timer.cancel();

        self.is_open = false;
        self.focus = FocusTarget::None;
        self.preview = None;
        self.selection.clear(false);
        self.grid = Default::default();
        self.input.read_only = false;
        self.area_days.clear();
        self.area_cells.clear();
        self.config.hooks = Default::default();
        self.destroyed = true;
        debug!("destroyed {:?}", self.element);
    }
}

