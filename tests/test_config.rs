use chrono::{NaiveDate, NaiveDateTime};
use rat_datepicker::calendar_math::TimeOfDay;
use rat_datepicker::event::PickerOutcome;
use rat_datepicker::locale::LocaleSetting;
use rat_datepicker::picker::{
    ConfigOption, DatePickerState, HookKind, InputElement, Listener, Options, Plugin,
    SelectionMode,
};
use rat_datepicker::registry::PickerElement;
use rat_datepicker::{ErrorHandler, PickerError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn picker(options: Options) -> DatePickerState {
    DatePickerState::new(
        PickerElement::new("date").input(InputElement::new()),
        options.now(now()),
    )
    .unwrap()
}

type Log = Rc<RefCell<Vec<String>>>;

fn push(log: &Log, s: &str) {
    log.borrow_mut().push(s.to_string());
}

#[test]
fn test_set_min_date() {
    let log: Log = Default::default();
    let log1 = log.clone();
    let mut p = picker(
        Options::new()
            .default_date("2024-03-05")
            .on_value_update(move |_, v, _| push(&log1, v)),
    );
    assert_eq!(p.selected_dates(), &[dt(2024, 3, 5)]);

    p.set(ConfigOption::MinDate(Some("2024-03-10".into())));
    assert!(p.selected_dates().is_empty());
    assert_eq!(p.input.value, "");
    assert_eq!(&*log.borrow(), &[""]);
    assert!(!p.is_enabled("2024-03-09", Some(true)));
    assert!(p.is_enabled("2024-03-10", Some(true)));
}

#[test]
fn test_set_max_date_jump() {
    let mut p = picker(Options::new());
    p.change_month(6, true);
    assert_eq!(p.current_month(), 8);

    // back to today.
    p.set(ConfigOption::MaxDate(Some("2024-05-20".into())));
    assert_eq!(p.current_month(), 2);

    // viewport in bounds stays.
    p.change_month(1, true);
    p.set(ConfigOption::MaxDate(Some("2024-06-20".into())));
    assert_eq!(p.current_month(), 3);
}

#[test]
fn test_set_many() {
    let mut p = picker(Options::new());
    p.set(vec![
        ConfigOption::DateFormat("d.m.Y".into()),
        ConfigOption::ShowMonths(3),
    ]);
    assert_eq!(p.config.show_months, 3);
    assert_eq!(p.grid.panels.len(), 3);

    p.set_date("01.04.2024", false, None);
    assert_eq!(p.selected_dates(), &[dt(2024, 4, 1)]);
    assert_eq!(p.input.value, "01.04.2024");
}

#[test]
fn test_set_mode_listeners() {
    let mut p = picker(Options::new());
    assert!(!p.listeners.is_bound(Listener::RangeHover));
    assert!(p.listeners.is_bound(Listener::InputOpen));
    assert!(p.input.read_only);

    p.set(vec![
        ConfigOption::Mode(SelectionMode::Range),
        ConfigOption::ClickOpens(false),
        ConfigOption::AllowInput(true),
    ]);
    assert!(p.listeners.is_bound(Listener::RangeHover));
    assert!(!p.listeners.is_bound(Listener::InputOpen));
    assert!(p.listeners.is_bound(Listener::InputBlur));
    assert!(!p.input.read_only);
}

#[test]
fn test_inline_listeners() {
    let mut p = picker(Options::new().inline(true));
    assert!(p.listeners.is_bound(Listener::KeyDown));
    assert!(!p.listeners.is_bound(Listener::OutsideClick));
    assert!(!p.listeners.is_bound(Listener::Resize));
    assert_eq!(p.open(), PickerOutcome::Unchanged);
}

#[test]
fn test_locale() {
    let mut p = picker(Options::new().locale("de"));
    assert_eq!(p.locale().months_long[2], "März");

    p.set(ConfigOption::Locale(LocaleSetting::Default));
    assert_eq!(p.locale().months_long[2], "March");
}

#[test]
fn test_locale_invalid() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let errors1 = errors.clone();
    let p = picker(
        Options::new()
            .error_handler(ErrorHandler::new(move |e| errors1.borrow_mut().push(e.clone())))
            .locale("xx_YY"),
    );
    assert_eq!(p.locale().months_long[2], "March");
    assert!(matches!(
        errors.borrow().first(),
        Some(PickerError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_derived_formats() {
    let p = picker(Options::new().enable_time(true));
    assert_eq!(p.config.date_format, "Y-m-d H:i");

    let p = picker(Options::new().enable_time(true).enable_seconds(true));
    assert_eq!(p.config.date_format, "Y-m-d H:i:S");

    let p = picker(Options::new().enable_time(true).date_format("d.m.Y H:i"));
    assert_eq!(p.config.date_format, "d.m.Y H:i");

    let p = picker(Options::new().enable_time(true).alt_input(true));
    assert_eq!(p.config.alt_format, "F j, Y h:i K");

    let p = picker(Options::new().mode(SelectionMode::Time));
    assert!(p.config.no_calendar);
    assert!(p.config.enable_time);
    assert_eq!(p.config.date_format, "H:i");
    assert!(p.grid.panels.is_empty());
}

#[test]
fn test_hooks_order() {
    #[derive(Debug)]
    struct Marker(Log);

    impl Plugin for Marker {
        fn config(&self, _picker: &DatePickerState) -> Options {
            let log = self.0.clone();
            Options::new()
                .date_format("d.m.Y")
                .week_numbers(true)
                .on_ready(move |_, _, _| push(&log, "plugin"))
        }
    }

    let log: Log = Default::default();
    let log1 = log.clone();
    let log2 = log.clone();
    let p = picker(
        Options::new()
            .date_format("Y/m/d")
            .on_parse_config(move |_, _, _| push(&log1, "parse"))
            .on_ready(move |_, _, _| push(&log2, "user"))
            .plugin(Marker(log.clone())),
    );

    assert_eq!(&*log.borrow(), &["parse", "plugin", "user"]);
    assert_eq!(p.config.date_format, "Y/m/d");
    assert!(p.config.week_numbers);
}

#[test]
fn test_hooks() {
    let log: Log = Default::default();
    let log1 = log.clone();
    let log2 = log.clone();
    let log3 = log.clone();
    let mut p = picker(
        Options::new()
            .on_open(move |_, _, _| push(&log1, "open"))
            .on_close(move |_, _, _| push(&log2, "close"))
            .on_change(move |d, v, _| push(&log3, &format!("change {} {}", d.len(), v))),
    );

    p.open();
    p.open();
    p.on_date_select(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    p.close();

    assert_eq!(
        &*log.borrow(),
        &["open", "close", "change 1 2024-03-20"]
    );
}

#[test]
fn test_day_create() {
    let count = Rc::new(RefCell::new(0));
    let count1 = count.clone();
    let _p = picker(Options::new().on_day_create(move |_, _| *count1.borrow_mut() += 1));
    // march 2024 shows 6 weeks.
    assert_eq!(*count.borrow(), 42);
}

#[test]
fn test_destroy() {
    let count = Rc::new(RefCell::new(0));
    let count1 = count.clone();
    let mut p = picker(
        Options::new()
            .default_date("2024-03-05")
            .on_destroy(move |_, _, _| *count1.borrow_mut() += 1),
    );
    p.open();
    p.destroy();
    p.destroy();

    assert_eq!(*count.borrow(), 1);
    assert!(p.is_destroyed());
    assert!(p.listeners.is_empty());
    assert!(!p.is_open);
    assert!(p.selected_dates().is_empty());
    assert!(p.config.hooks.is_empty(HookKind::Destroy));
    assert_eq!(p.open(), PickerOutcome::Unchanged);
    assert_eq!(p.change_month(1, true), PickerOutcome::Continue);
}

#[test]
fn test_time_clamp() {
    let mut p = picker(
        Options::new()
            .enable_time(true)
            .min_time("09:00")
            .max_time("17:00"),
    );
    assert_eq!(p.time, TimeOfDay::new(12, 0, 0));

    p.on_time_update(TimeOfDay::new(20, 0, 0), Instant::now());
    assert_eq!(p.time, TimeOfDay::new(17, 0, 0));
    assert_eq!(p.input.value, "2024-03-15 17:00");

    p.on_time_update(TimeOfDay::new(7, 30, 0), Instant::now());
    assert_eq!(p.time, TimeOfDay::new(9, 0, 0));
}

#[test]
fn test_time_default_clamp() {
    let p = picker(
        Options::new()
            .enable_time(true)
            .default_hour(6)
            .min_date("2024-03-01 08:30"),
    );
    assert_eq!(p.time, TimeOfDay::new(8, 30, 0));
}

#[test]
fn test_am_pm() {
    let mut p = picker(Options::new().mode(SelectionMode::Time));
    assert!(!p.time_24hr());
    p.on_time_update(TimeOfDay::new(9, 15, 0), Instant::now());
    assert_eq!(p.input.value, "09:15");
    p.set_am_pm(true, Instant::now());
    assert_eq!(p.time, TimeOfDay::new(21, 15, 0));
    assert_eq!(p.input.value, "21:15");
    assert_eq!(p.set_am_pm(true, Instant::now()), PickerOutcome::Unchanged);
}

#[test]
fn test_change_debounce() {
    let count = Rc::new(RefCell::new(0));
    let count1 = count.clone();
    let mut p = picker(
        Options::new()
            .enable_time(true)
            .on_change(move |_, _, _| *count1.borrow_mut() += 1),
    );

    let t0 = Instant::now();
    assert_eq!(
        p.on_time_update(TimeOfDay::new(14, 30, 0), t0),
        PickerOutcome::Changed
    );
    assert_eq!(p.input.value, "2024-03-15 14:30");
    assert_eq!(*count.borrow(), 0);
    assert_eq!(p.sleep_time(t0), Some(Duration::from_millis(300)));

    p.on_time_update(TimeOfDay::new(14, 35, 0), t0 + Duration::from_millis(200));
    assert_eq!(p.tick(t0 + Duration::from_millis(400)), PickerOutcome::Continue);
    assert_eq!(*count.borrow(), 0);

    assert_eq!(p.tick(t0 + Duration::from_millis(500)), PickerOutcome::Changed);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(p.tick(t0 + Duration::from_millis(900)), PickerOutcome::Continue);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_resize_timer() {
    let mut p = picker(Options::new());
    p.screen = ratatui::layout::Rect::new(0, 0, 80, 24);
    p.area_input = ratatui::layout::Rect::new(0, 20, 10, 1);
    p.open();
    assert_eq!(p.popup.y, 10);

    p.area_input = ratatui::layout::Rect::new(0, 2, 10, 1);
    let t0 = Instant::now();
    p.resize(t0);
    assert_eq!(p.popup.y, 10);
    assert_eq!(p.tick(t0 + Duration::from_millis(100)), PickerOutcome::Changed);
    assert_eq!(p.popup.y, 3);
}
