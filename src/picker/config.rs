//!
//! Configuration.
//!
//! [Options] collects what the user wants, [PickerConfig] is what the
//! picker actually runs with. Options are applied one [ConfigOption]
//! at a time, both at startup and with [DatePickerState::set](crate::picker::DatePickerState::set).
//! Some options need more than an assignment. Those are listed
//! in [side_effects].
//!

use crate::date_format::{
    DateFormatter, DateInput, FormatFn, ParseFn, DEFAULT_ALT_FORMAT, DEFAULT_DATE_FORMAT,
};
use crate::error::ErrorHandler;
use crate::locale::LocaleSetting;
use crate::picker::hooks::{Hook, HookData, HookKind, Hooks};
use crate::picker::rules::{parse_date_rules, DateLimit, DateRule};
use crate::picker::selection::SelectionMode;
use crate::picker::value::DateValue;
use crate::picker::DatePickerState;
use crate::registry::ElementId;
use chrono::{NaiveDateTime, Timelike};
use crossterm::event::KeyEvent;
use std::fmt::Debug;
use std::rc::Rc;

/// Placement of the popup relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde_derive::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Below if there is room, above otherwise.
    #[default]
    Auto,
    Above,
    Below,
}

/// Extension that contributes configuration.
///
/// Hooks of a plugin run before the hooks of the user. Other
/// options only apply if the user didn't set them.
pub trait Plugin: Debug {
    fn config(&self, picker: &DatePickerState) -> Options;
}

/// A single configuration value.
#[derive(Debug, Clone)]
pub enum ConfigOption {
    Mode(SelectionMode),
    DateFormat(String),
    AltFormat(String),
    /// Maintain a second, human readable value.
    AltInput(bool),
    /// The input can be edited directly.
    AllowInput(bool),
    /// Keep disabled dates when preloading.
    AllowInvalidPreload(bool),
    ClickOpens(bool),
    CloseOnSelect(bool),
    /// Separator for multiple dates.
    Conjunction(String),
    DefaultDate(Option<DateValue>),
    DefaultHour(u32),
    DefaultMinute(u32),
    DefaultSeconds(u32),
    /// Allow-list. Replaces the disable list while set.
    Enable(Option<Vec<DateLimit>>),
    Disable(Vec<DateLimit>),
    EnableSeconds(bool),
    EnableTime(bool),
    HourIncrement(u32),
    MinuteIncrement(u32),
    /// Always open, no popup.
    Inline(bool),
    Locale(LocaleSetting),
    MinDate(Option<DateInput>),
    MaxDate(Option<DateInput>),
    MinTime(Option<DateInput>),
    MaxTime(Option<DateInput>),
    NoCalendar(bool),
    /// Current time. Defaults to the clock.
    Now(Option<DateInput>),
    Position(Position),
    PositionElement(Option<ElementId>),
    ShowMonths(u32),
    Time24hr(bool),
    WeekNumbers(bool),
    FormatDate(Option<FormatFn>),
    ParseDate(Option<ParseFn>),
    FormatAltDate(Option<FormatFn>),
    ErrorHandler(ErrorHandler),
    /// Replace the hooks of one kind.
    Hook(HookKind, Vec<Hook>),
}

/// Identifies a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Mode,
    DateFormat,
    AltFormat,
    AltInput,
    AllowInput,
    AllowInvalidPreload,
    ClickOpens,
    CloseOnSelect,
    Conjunction,
    DefaultDate,
    DefaultHour,
    DefaultMinute,
    DefaultSeconds,
    Enable,
    Disable,
    EnableSeconds,
    EnableTime,
    HourIncrement,
    MinuteIncrement,
    Inline,
    Locale,
    MinDate,
    MaxDate,
    MinTime,
    MaxTime,
    NoCalendar,
    Now,
    Position,
    PositionElement,
    ShowMonths,
    Time24hr,
    WeekNumbers,
    FormatDate,
    ParseDate,
    FormatAltDate,
    ErrorHandler,
    Hook(HookKind),
}

impl ConfigKey {
    /// The value is parsed with the date parser.
    pub fn is_date_valued(&self) -> bool {
        matches!(
            self,
            ConfigKey::Enable
                | ConfigKey::Disable
                | ConfigKey::MinDate
                | ConfigKey::MaxDate
                | ConfigKey::MinTime
                | ConfigKey::MaxTime
        )
    }
}

impl ConfigOption {
    pub fn key(&self) -> ConfigKey {
        match self {
            ConfigOption::Mode(_) => ConfigKey::Mode,
            ConfigOption::DateFormat(_) => ConfigKey::DateFormat,
            ConfigOption::AltFormat(_) => ConfigKey::AltFormat,
            ConfigOption::AltInput(_) => ConfigKey::AltInput,
            ConfigOption::AllowInput(_) => ConfigKey::AllowInput,
            ConfigOption::AllowInvalidPreload(_) => ConfigKey::AllowInvalidPreload,
            ConfigOption::ClickOpens(_) => ConfigKey::ClickOpens,
            ConfigOption::CloseOnSelect(_) => ConfigKey::CloseOnSelect,
            ConfigOption::Conjunction(_) => ConfigKey::Conjunction,
            ConfigOption::DefaultDate(_) => ConfigKey::DefaultDate,
            ConfigOption::DefaultHour(_) => ConfigKey::DefaultHour,
            ConfigOption::DefaultMinute(_) => ConfigKey::DefaultMinute,
            ConfigOption::DefaultSeconds(_) => ConfigKey::DefaultSeconds,
            ConfigOption::Enable(_) => ConfigKey::Enable,
            ConfigOption::Disable(_) => ConfigKey::Disable,
            ConfigOption::EnableSeconds(_) => ConfigKey::EnableSeconds,
            ConfigOption::EnableTime(_) => ConfigKey::EnableTime,
            ConfigOption::HourIncrement(_) => ConfigKey::HourIncrement,
            ConfigOption::MinuteIncrement(_) => ConfigKey::MinuteIncrement,
            ConfigOption::Inline(_) => ConfigKey::Inline,
            ConfigOption::Locale(_) => ConfigKey::Locale,
            ConfigOption::MinDate(_) => ConfigKey::MinDate,
            ConfigOption::MaxDate(_) => ConfigKey::MaxDate,
            ConfigOption::MinTime(_) => ConfigKey::MinTime,
            ConfigOption::MaxTime(_) => ConfigKey::MaxTime,
            ConfigOption::NoCalendar(_) => ConfigKey::NoCalendar,
            ConfigOption::Now(_) => ConfigKey::Now,
            ConfigOption::Position(_) => ConfigKey::Position,
            ConfigOption::PositionElement(_) => ConfigKey::PositionElement,
            ConfigOption::ShowMonths(_) => ConfigKey::ShowMonths,
            ConfigOption::Time24hr(_) => ConfigKey::Time24hr,
            ConfigOption::WeekNumbers(_) => ConfigKey::WeekNumbers,
            ConfigOption::FormatDate(_) => ConfigKey::FormatDate,
            ConfigOption::ParseDate(_) => ConfigKey::ParseDate,
            ConfigOption::FormatAltDate(_) => ConfigKey::FormatAltDate,
            ConfigOption::ErrorHandler(_) => ConfigKey::ErrorHandler,
            ConfigOption::Hook(kind, _) => ConfigKey::Hook(*kind),
        }
    }
}

/// Extra work after an option has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Resolve the locale and update everything that depends on it.
    SetupLocale,
    /// Copy parser relevant settings to the date parser.
    SyncFormatter,
    /// Drop selected dates that violate the new lower bound.
    RevalidateMin,
    /// Drop selected dates that violate the new upper bound.
    RevalidateMax,
    /// Move the viewport into the bounds.
    JumpToDate,
    /// Anchor the popup at another element.
    UpdatePositionElement,
    /// Bind/unbind listeners that depend on the option.
    RebindListeners,
}

/// Side effects for an option, in execution order.
pub fn side_effects(key: ConfigKey) -> &'static [SideEffect] {
    match key {
        ConfigKey::Locale => &[SideEffect::SetupLocale],
        ConfigKey::MinDate => &[SideEffect::RevalidateMin, SideEffect::JumpToDate],
        ConfigKey::MaxDate => &[SideEffect::RevalidateMax, SideEffect::JumpToDate],
        ConfigKey::PositionElement => &[SideEffect::UpdatePositionElement],
        ConfigKey::ClickOpens | ConfigKey::Mode | ConfigKey::AllowInput => {
            &[SideEffect::RebindListeners]
        }
        ConfigKey::DateFormat
        | ConfigKey::FormatDate
        | ConfigKey::ParseDate
        | ConfigKey::ErrorHandler
        | ConfigKey::NoCalendar
        | ConfigKey::Now => &[SideEffect::SyncFormatter],
        _ => &[],
    }
}

/// One option or a list of them.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch(pub Vec<ConfigOption>);

impl From<ConfigOption> for ConfigPatch {
    fn from(value: ConfigOption) -> Self {
        ConfigPatch(vec![value])
    }
}

impl From<Vec<ConfigOption>> for ConfigPatch {
    fn from(value: Vec<ConfigOption>) -> Self {
        ConfigPatch(value)
    }
}

/// The effective configuration.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    pub mode: SelectionMode,
    pub date_format: String,
    pub alt_format: String,
    pub alt_input: bool,
    pub allow_input: bool,
    pub allow_invalid_preload: bool,
    pub click_opens: bool,
    pub close_on_select: bool,
    pub conjunction: String,
    pub default_date: Option<DateValue>,
    pub default_hour: u32,
    pub default_minute: u32,
    pub default_seconds: u32,
    /// Allow-list. If set, the disable list is ignored.
    pub enable: Option<Vec<DateRule>>,
    pub disable: Vec<DateRule>,
    pub enable_seconds: bool,
    pub enable_time: bool,
    pub hour_increment: u32,
    pub minute_increment: u32,
    pub inline: bool,
    pub locale: LocaleSetting,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    /// min_date has a time of day other than midnight.
    pub min_date_has_time: bool,
    /// max_date has a time of day other than midnight.
    pub max_date_has_time: bool,
    pub min_time: Option<NaiveDateTime>,
    pub max_time: Option<NaiveDateTime>,
    pub no_calendar: bool,
    pub now: Option<NaiveDateTime>,
    pub position: Position,
    pub position_element: Option<ElementId>,
    pub show_months: u32,
    /// Overrides the locale.
    pub time_24hr: Option<bool>,
    pub week_numbers: bool,
    pub format_date: Option<FormatFn>,
    pub parse_date: Option<ParseFn>,
    pub format_alt_date: Option<FormatFn>,
    pub error_handler: ErrorHandler,
    pub hooks: Hooks,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: Default::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            alt_format: DEFAULT_ALT_FORMAT.to_string(),
            alt_input: false,
            allow_input: false,
            allow_invalid_preload: false,
            click_opens: true,
            close_on_select: true,
            conjunction: ", ".to_string(),
            default_date: None,
            default_hour: 12,
            default_minute: 0,
            default_seconds: 0,
            enable: None,
            disable: Vec::new(),
            enable_seconds: false,
            enable_time: false,
            hour_increment: 1,
            minute_increment: 5,
            inline: false,
            locale: Default::default(),
            min_date: None,
            max_date: None,
            min_date_has_time: false,
            max_date_has_time: false,
            min_time: None,
            max_time: None,
            no_calendar: false,
            now: None,
            position: Default::default(),
            position_element: None,
            show_months: 1,
            time_24hr: None,
            week_numbers: false,
            format_date: None,
            parse_date: None,
            format_alt_date: None,
            error_handler: Default::default(),
            hooks: Default::default(),
        }
    }
}

fn has_time(d: NaiveDateTime) -> bool {
    d.hour() > 0 || d.minute() > 0 || d.second() > 0
}

impl PickerConfig {
    /// Assign one option. Date values are parsed with the given parser.
    pub fn assign(&mut self, opt: ConfigOption, fmt: &DateFormatter) {
        match opt {
            ConfigOption::Mode(v) => self.mode = v,
            ConfigOption::DateFormat(v) => self.date_format = v,
            ConfigOption::AltFormat(v) => self.alt_format = v,
            ConfigOption::AltInput(v) => self.alt_input = v,
            ConfigOption::AllowInput(v) => self.allow_input = v,
            ConfigOption::AllowInvalidPreload(v) => self.allow_invalid_preload = v,
            ConfigOption::ClickOpens(v) => self.click_opens = v,
            ConfigOption::CloseOnSelect(v) => self.close_on_select = v,
            ConfigOption::Conjunction(v) => self.conjunction = v,
            ConfigOption::DefaultDate(v) => self.default_date = v,
            ConfigOption::DefaultHour(v) => self.default_hour = v.min(23),
            ConfigOption::DefaultMinute(v) => self.default_minute = v.min(59),
            ConfigOption::DefaultSeconds(v) => self.default_seconds = v.min(59),
            ConfigOption::Enable(v) => self.enable = v.map(|v| parse_date_rules(&v, fmt)),
            ConfigOption::Disable(v) => self.disable = parse_date_rules(&v, fmt),
            ConfigOption::EnableSeconds(v) => self.enable_seconds = v,
            ConfigOption::EnableTime(v) => self.enable_time = v,
            ConfigOption::HourIncrement(v) => self.hour_increment = v.max(1),
            ConfigOption::MinuteIncrement(v) => self.minute_increment = v.max(1),
            ConfigOption::Inline(v) => self.inline = v,
            ConfigOption::Locale(v) => self.locale = v,
            ConfigOption::MinDate(v) => {
                self.min_date = v.and_then(|v| fmt.parse(&v, None, false));
                self.min_date_has_time = self.min_date.is_some_and(has_time);
            }
            ConfigOption::MaxDate(v) => {
                self.max_date = v.and_then(|v| fmt.parse(&v, None, false));
                self.max_date_has_time = self.max_date.is_some_and(has_time);
            }
            ConfigOption::MinTime(v) => {
                self.min_time = v.and_then(|v| fmt.parse(&v, Some("H:i"), false));
            }
            ConfigOption::MaxTime(v) => {
                self.max_time = v.and_then(|v| fmt.parse(&v, Some("H:i"), false));
            }
            ConfigOption::NoCalendar(v) => self.no_calendar = v,
            ConfigOption::Now(v) => self.now = v.and_then(|v| fmt.parse(&v, None, false)),
            ConfigOption::Position(v) => self.position = v,
            ConfigOption::PositionElement(v) => self.position_element = v,
            ConfigOption::ShowMonths(v) => self.show_months = v.max(1),
            ConfigOption::Time24hr(v) => self.time_24hr = Some(v),
            ConfigOption::WeekNumbers(v) => self.week_numbers = v,
            ConfigOption::FormatDate(v) => self.format_date = v,
            ConfigOption::ParseDate(v) => self.parse_date = v,
            ConfigOption::FormatAltDate(v) => self.format_alt_date = v,
            ConfigOption::ErrorHandler(v) => self.error_handler = v,
            ConfigOption::Hook(kind, v) => self.hooks.replace(kind, v),
        }
    }

    /// The operative rule list and its polarity.
    ///
    /// true for the allow-list, false for the deny-list.
    pub fn operative_rules(&self) -> (bool, &[DateRule]) {
        match &self.enable {
            Some(v) => (true, v.as_slice()),
            None => (false, self.disable.as_slice()),
        }
    }

    /// Formats used when time is enabled and no format was given.
    pub(crate) fn derive_formats(&mut self, user: &Options) {
        let time_mode = self.mode == SelectionMode::Time;
        let with_seconds = self.enable_seconds;

        if !user.is_set(ConfigKey::DateFormat) && (self.enable_time || time_mode) {
            self.date_format = if self.no_calendar || time_mode {
                format!("H:i{}", if with_seconds { ":S" } else { "" })
            } else {
                format!(
                    "{} H:i{}",
                    DEFAULT_DATE_FORMAT,
                    if with_seconds { ":S" } else { "" }
                )
            };
        }

        if self.alt_input && (self.enable_time || time_mode) && !user.is_set(ConfigKey::AltFormat)
        {
            self.alt_format = if self.no_calendar || time_mode {
                format!("h:i{}", if with_seconds { ":S K" } else { " K" })
            } else {
                format!(
                    "{} h:i{} K",
                    DEFAULT_ALT_FORMAT,
                    if with_seconds { ":S" } else { "" }
                )
            };
        }

        if time_mode {
            self.no_calendar = true;
            self.enable_time = true;
        }
    }
}

/// User configuration.
///
/// All values are optional. Later values override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) options: Vec<ConfigOption>,
    pub(crate) hooks: Hooks,
    pub(crate) plugins: Vec<Rc<dyn Plugin>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Has a value for this key.
    pub fn is_set(&self, key: ConfigKey) -> bool {
        self.options.iter().any(|v| v.key() == key)
    }

    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Append the other options. They override these.
    pub fn merge(mut self, other: Options) -> Self {
        self.options.extend(other.options);
        self.hooks.append(&other.hooks);
        self.plugins.extend(other.plugins);
        self
    }

    /// Set any option.
    pub fn option(mut self, opt: ConfigOption) -> Self {
        self.options.push(opt);
        self
    }

    pub fn mode(self, mode: SelectionMode) -> Self {
        self.option(ConfigOption::Mode(mode))
    }

    pub fn date_format(self, format: impl Into<String>) -> Self {
        self.option(ConfigOption::DateFormat(format.into()))
    }

    pub fn alt_format(self, format: impl Into<String>) -> Self {
        self.option(ConfigOption::AltFormat(format.into()))
    }

    pub fn alt_input(self, alt_input: bool) -> Self {
        self.option(ConfigOption::AltInput(alt_input))
    }

    pub fn allow_input(self, allow: bool) -> Self {
        self.option(ConfigOption::AllowInput(allow))
    }

    pub fn allow_invalid_preload(self, allow: bool) -> Self {
        self.option(ConfigOption::AllowInvalidPreload(allow))
    }

    pub fn click_opens(self, click_opens: bool) -> Self {
        self.option(ConfigOption::ClickOpens(click_opens))
    }

    pub fn close_on_select(self, close: bool) -> Self {
        self.option(ConfigOption::CloseOnSelect(close))
    }

    pub fn conjunction(self, conjunction: impl Into<String>) -> Self {
        self.option(ConfigOption::Conjunction(conjunction.into()))
    }

    pub fn default_date(self, date: impl Into<DateValue>) -> Self {
        self.option(ConfigOption::DefaultDate(Some(date.into())))
    }

    pub fn default_hour(self, hour: u32) -> Self {
        self.option(ConfigOption::DefaultHour(hour))
    }

    pub fn default_minute(self, minute: u32) -> Self {
        self.option(ConfigOption::DefaultMinute(minute))
    }

    pub fn default_seconds(self, seconds: u32) -> Self {
        self.option(ConfigOption::DefaultSeconds(seconds))
    }

    pub fn enable(self, rules: Vec<DateLimit>) -> Self {
        self.option(ConfigOption::Enable(Some(rules)))
    }

    pub fn disable(self, rules: Vec<DateLimit>) -> Self {
        self.option(ConfigOption::Disable(rules))
    }

    pub fn enable_seconds(self, enable: bool) -> Self {
        self.option(ConfigOption::EnableSeconds(enable))
    }

    pub fn enable_time(self, enable: bool) -> Self {
        self.option(ConfigOption::EnableTime(enable))
    }

    pub fn hour_increment(self, inc: u32) -> Self {
        self.option(ConfigOption::HourIncrement(inc))
    }

    pub fn minute_increment(self, inc: u32) -> Self {
        self.option(ConfigOption::MinuteIncrement(inc))
    }

    pub fn inline(self, inline: bool) -> Self {
        self.option(ConfigOption::Inline(inline))
    }

    pub fn locale(self, locale: impl Into<LocaleSetting>) -> Self {
        self.option(ConfigOption::Locale(locale.into()))
    }

    pub fn min_date(self, date: impl Into<DateInput>) -> Self {
        self.option(ConfigOption::MinDate(Some(date.into())))
    }

    pub fn max_date(self, date: impl Into<DateInput>) -> Self {
        self.option(ConfigOption::MaxDate(Some(date.into())))
    }

    pub fn min_time(self, time: impl Into<DateInput>) -> Self {
        self.option(ConfigOption::MinTime(Some(time.into())))
    }

    pub fn max_time(self, time: impl Into<DateInput>) -> Self {
        self.option(ConfigOption::MaxTime(Some(time.into())))
    }

    pub fn no_calendar(self, no_calendar: bool) -> Self {
        self.option(ConfigOption::NoCalendar(no_calendar))
    }

    pub fn now(self, now: impl Into<DateInput>) -> Self {
        self.option(ConfigOption::Now(Some(now.into())))
    }

    pub fn position(self, position: Position) -> Self {
        self.option(ConfigOption::Position(position))
    }

    pub fn position_element(self, id: impl Into<ElementId>) -> Self {
        self.option(ConfigOption::PositionElement(Some(id.into())))
    }

    pub fn show_months(self, n: u32) -> Self {
        self.option(ConfigOption::ShowMonths(n))
    }

    pub fn time_24hr(self, time_24hr: bool) -> Self {
        self.option(ConfigOption::Time24hr(time_24hr))
    }

    pub fn week_numbers(self, week_numbers: bool) -> Self {
        self.option(ConfigOption::WeekNumbers(week_numbers))
    }

    pub fn format_date(self, f: FormatFn) -> Self {
        self.option(ConfigOption::FormatDate(Some(f)))
    }

    pub fn parse_date(self, f: ParseFn) -> Self {
        self.option(ConfigOption::ParseDate(Some(f)))
    }

    pub fn format_alt_date(self, f: FormatFn) -> Self {
        self.option(ConfigOption::FormatAltDate(Some(f)))
    }

    pub fn error_handler(self, h: ErrorHandler) -> Self {
        self.option(ConfigOption::ErrorHandler(h))
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Rc::new(plugin));
        self
    }

    /// Add a hook.
    pub fn on(
        mut self,
        kind: HookKind,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState, &HookData) + 'static,
    ) -> Self {
        self.hooks.add(kind, Hook::new(f));
        self
    }

    pub fn on_change(self, f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::Change, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_value_update(
        self,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::ValueUpdate, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_open(self, f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::Open, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_close(self, f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::Close, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_ready(self, f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::Ready, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_month_change(
        self,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::MonthChange, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_year_change(
        self,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::YearChange, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_destroy(self, f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::Destroy, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_parse_config(
        self,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::ParseConfig, move |d, s, p, _| f(d, s, p))
    }

    pub fn on_pre_calendar_position(
        self,
        f: impl Fn(&[NaiveDateTime], &str, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::PreCalendarPosition, move |d, s, p, _| f(d, s, p))
    }

    /// Called for every day cell built.
    pub fn on_day_create(
        self,
        f: impl Fn(chrono::NaiveDate, &DatePickerState) + 'static,
    ) -> Self {
        self.on(HookKind::DayCreate, move |_, _, p, data| {
            if let HookData::Day(day) = data {
                f(*day, p)
            }
        })
    }

    pub fn on_key_down(self, f: impl Fn(&KeyEvent, &DatePickerState) + 'static) -> Self {
        self.on(HookKind::KeyDown, move |_, _, p, data| {
            if let HookData::Key(key) = data {
                f(key, p)
            }
        })
    }
}
