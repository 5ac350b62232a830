//!
//! Pickers by element.
//!
//! Attaching a picker to an element is an insert into a
//! [PickerRegistry]. The registry also carries global defaults
//! that apply to every picker created afterwards.
//!

use crate::error::PickerError;
use crate::picker::event::PickerOutcome;
use crate::picker::{DatePickerState, InputElement, Options};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Identity of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        ElementId(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        ElementId(value)
    }
}

/// Element a picker can be attached to.
#[derive(Debug, Clone, Default)]
pub struct PickerElement {
    pub id: ElementId,
    /// The text input. Required.
    pub input: Option<InputElement>,
    /// Options stored with the element.
    /// Options given when attaching override these.
    pub dataset: Options,
    /// Skipped by [PickerRegistry::attach_all].
    pub omit: bool,
}

impl PickerElement {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn input(mut self, input: InputElement) -> Self {
        self.input = Some(input);
        self
    }

    pub fn dataset(mut self, dataset: impl Into<Options>) -> Self {
        self.dataset = dataset.into();
        self
    }

    pub fn omit(mut self, omit: bool) -> Self {
        self.omit = omit;
        self
    }
}

/// Pickers by element.
#[derive(Debug, Default)]
pub struct PickerRegistry {
    defaults: Options,
    pickers: HashMap<ElementId, DatePickerState>,
}

impl PickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for all pickers attached later.
    pub fn set_defaults(&mut self, defaults: Options) {
        self.defaults = defaults;
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    /// Attach a new picker to the element.
    ///
    /// A picker already attached to the element is destroyed first.
    /// Defaults are overridden by the element's dataset, the dataset
    /// by the given options.
    pub fn attach(
        &mut self,
        element: PickerElement,
        options: Options,
    ) -> Result<&mut DatePickerState, PickerError> {
        if let Some(mut old) = self.pickers.remove(&element.id) {
            debug!("replace picker {}", element.id);
            old.destroy();
        }

        let mut element = element;
        element.dataset = self.defaults.clone().merge(element.dataset);
        let id = element.id.clone();
        let state = DatePickerState::new(element, options)?;

        Ok(match self.pickers.entry(id) {
            Entry::Occupied(mut v) => {
                v.insert(state);
                v.into_mut()
            }
            Entry::Vacant(v) => v.insert(state),
        })
    }

    /// Attach pickers to all elements.
    ///
    /// Elements marked omit are skipped. Failures are logged and
    /// skipped too. Returns the elements that got a picker.
    pub fn attach_all(
        &mut self,
        elements: impl IntoIterator<Item = PickerElement>,
        options: &Options,
    ) -> Vec<ElementId> {
        let mut attached = Vec::new();
        for element in elements {
            if element.omit {
                debug!("omit {}", element.id);
                continue;
            }
            let id = element.id.clone();
            match self.attach(element, options.clone()) {
                Ok(_) => attached.push(id),
                Err(e) => warn!("{}: {}", id, e),
            }
        }
        attached
    }

    pub fn get(&self, id: &ElementId) -> Option<&DatePickerState> {
        self.pickers.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut DatePickerState> {
        self.pickers.get_mut(id)
    }

    /// Destroy and remove the picker of the element.
    pub fn detach(&mut self, id: &ElementId) -> bool {
        if let Some(mut state) = self.pickers.remove(id) {
            state.destroy();
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &DatePickerState)> {
        self.pickers.iter()
    }

    /// Run the timers of all pickers.
    pub fn tick(&mut self, now: Instant) -> PickerOutcome {
        self.pickers
            .values_mut()
            .map(|v| v.tick(now))
            .max()
            .unwrap_or(PickerOutcome::Continue)
    }
}

#[cfg(feature = "serde")]
pub use dataset::*;

#[cfg(feature = "serde")]
mod dataset {
    use crate::picker::config::Position;
    use crate::picker::rules::DateLimit;
    use crate::picker::{Options, SelectionMode};

    /// Boolean attribute. Accepts `true` and `"true"`.
    #[derive(Debug, Clone, PartialEq, Eq, serde_derive::Deserialize)]
    #[serde(untagged)]
    pub enum BoolOpt {
        Bool(bool),
        Text(String),
    }

    impl BoolOpt {
        pub fn value(&self) -> bool {
            match self {
                BoolOpt::Bool(v) => *v,
                BoolOpt::Text(v) => v == "true",
            }
        }
    }

    /// Options as stored with an element.
    #[derive(Debug, Clone, Default, serde_derive::Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct DatasetOptions {
        pub mode: Option<SelectionMode>,
        pub date_format: Option<String>,
        pub alt_format: Option<String>,
        pub alt_input: Option<BoolOpt>,
        pub allow_input: Option<BoolOpt>,
        pub allow_invalid_preload: Option<BoolOpt>,
        pub click_opens: Option<BoolOpt>,
        pub close_on_select: Option<BoolOpt>,
        pub conjunction: Option<String>,
        pub default_date: Option<String>,
        pub default_hour: Option<u32>,
        pub default_minute: Option<u32>,
        pub default_seconds: Option<u32>,
        pub enable: Option<Vec<String>>,
        pub disable: Option<Vec<String>>,
        pub enable_seconds: Option<BoolOpt>,
        pub enable_time: Option<BoolOpt>,
        pub hour_increment: Option<u32>,
        pub minute_increment: Option<u32>,
        pub inline: Option<BoolOpt>,
        pub locale: Option<String>,
        pub min_date: Option<String>,
        pub max_date: Option<String>,
        pub min_time: Option<String>,
        pub max_time: Option<String>,
        pub no_calendar: Option<BoolOpt>,
        pub position: Option<Position>,
        pub show_months: Option<u32>,
        #[serde(alias = "time_24hr")]
        pub time_24hr: Option<BoolOpt>,
        pub week_numbers: Option<BoolOpt>,
    }

    fn limits(v: Vec<String>) -> Vec<DateLimit> {
        v.iter().map(|v| DateLimit::from(v.as_str())).collect()
    }

    impl From<DatasetOptions> for Options {
        fn from(d: DatasetOptions) -> Self {
            let mut o = Options::new();
            if let Some(v) = d.mode {
                o = o.mode(v);
            }
            if let Some(v) = d.date_format {
                o = o.date_format(v);
            }
            if let Some(v) = d.alt_format {
                o = o.alt_format(v);
            }
            if let Some(v) = d.alt_input {
                o = o.alt_input(v.value());
            }
            if let Some(v) = d.allow_input {
                o = o.allow_input(v.value());
            }
            if let Some(v) = d.allow_invalid_preload {
                o = o.allow_invalid_preload(v.value());
            }
            if let Some(v) = d.click_opens {
                o = o.click_opens(v.value());
            }
            if let Some(v) = d.close_on_select {
                o = o.close_on_select(v.value());
            }
            if let Some(v) = d.conjunction {
                o = o.conjunction(v);
            }
            if let Some(v) = d.default_date {
                o = o.default_date(v);
            }
            if let Some(v) = d.default_hour {
                o = o.default_hour(v);
            }
            if let Some(v) = d.default_minute {
                o = o.default_minute(v);
            }
            if let Some(v) = d.default_seconds {
                o = o.default_seconds(v);
            }
            if let Some(v) = d.enable {
                o = o.enable(limits(v));
            }
            if let Some(v) = d.disable {
                o = o.disable(limits(v));
            }
            if let Some(v) = d.enable_seconds {
                o = o.enable_seconds(v.value());
            }
            if let Some(v) = d.enable_time {
                o = o.enable_time(v.value());
            }
            if let Some(v) = d.hour_increment {
                o = o.hour_increment(v);
            }
            if let Some(v) = d.minute_increment {
                o = o.minute_increment(v);
            }
            if let Some(v) = d.inline {
                o = o.inline(v.value());
            }
            if let Some(v) = d.locale {
                o = o.locale(v.as_str());
            }
            if let Some(v) = d.min_date {
                o = o.min_date(v);
            }
            if let Some(v) = d.max_date {
                o = o.max_date(v);
            }
            if let Some(v) = d.min_time {
                o = o.min_time(v);
            }
            if let Some(v) = d.max_time {
                o = o.max_time(v);
            }
            if let Some(v) = d.no_calendar {
                o = o.no_calendar(v.value());
            }
            if let Some(v) = d.position {
                o = o.position(v);
            }
            if let Some(v) = d.show_months {
                o = o.show_months(v);
            }
            if let Some(v) = d.time_24hr {
                o = o.time_24hr(v.value());
            }
            if let Some(v) = d.week_numbers {
                o = o.week_numbers(v.value());
            }
            o
        }
    }
}
