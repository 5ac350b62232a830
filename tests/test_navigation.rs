use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rat_datepicker::calendar_math::{days_in_month, is_leap_year, month_layout};
use rat_datepicker::event::PickerOutcome;
use rat_datepicker::locale::Locale;
use rat_datepicker::picker::rules::DateLimit;
use rat_datepicker::picker::{DatePickerState, FocusTarget, InputElement, Options};
use rat_datepicker::registry::PickerElement;
use std::cell::RefCell;
use std::rc::Rc;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    day(2024, 3, 15).and_hms_opt(10, 0, 0).unwrap()
}

fn picker(options: Options) -> DatePickerState {
    DatePickerState::new(
        PickerElement::new("date").input(InputElement::new()),
        options.now(now()),
    )
    .unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_layout() {
    let l = Locale::english();
    for year in [1900, 2000, 2023, 2024] {
        for month in 0..12 {
            let layout = month_layout(year, month, &l);
            assert_eq!(layout.cells() % 7, 0);
            assert!(layout.leading < 7);
            assert!(layout.trailing < 7);
            assert_eq!(layout.days, days_in_month(month, year, &l));
        }
    }

    // 2024-02-01 is a thursday.
    let layout = month_layout(2024, 1, &l);
    assert_eq!(layout.leading, 4);
    assert_eq!(layout.days, 29);
    assert_eq!(layout.trailing, 2);
    assert_eq!(layout.date_at(0), Some(day(2024, 1, 28)));
    assert_eq!(layout.date_at(34), Some(day(2024, 3, 2)));

    let mut monday = Locale::english();
    monday.first_day_of_week = 1;
    let layout = month_layout(2024, 1, &monday);
    assert_eq!(layout.leading, 3);
    assert_eq!(layout.date_at(0), Some(day(2024, 1, 29)));
}

#[test]
fn test_leap_years() {
    let l = Locale::english();
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2023));
    assert_eq!(days_in_month(1, 2024, &l), 29);
    assert_eq!(days_in_month(1, 2100, &l), 28);
    assert_eq!(days_in_month(11, 2024, &l), 31);
}

#[test]
fn test_change_month() {
    let mut p = picker(Options::new());
    assert_eq!(p.current_month(), 2);

    assert_eq!(p.change_month(1, true), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 3);
    assert_eq!(p.change_month(0, false), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 0);
    assert_eq!(p.change_month(-1, true), PickerOutcome::Changed);
    assert_eq!(p.current_year(), 2023);
    assert_eq!(p.current_month(), 11);
    assert_eq!(p.change_month(14, true), PickerOutcome::Changed);
    assert_eq!(p.current_year(), 2025);
    assert_eq!(p.current_month(), 1);
}

#[test]
fn test_change_month_bounds() {
    let mut p = picker(
        Options::new()
            .min_date("2024-02-10")
            .max_date("2024-04-20"),
    );
    assert!(!p.prev_month_disabled());
    assert_eq!(p.change_month(-1, true), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 1);
    assert!(p.prev_month_disabled());
    assert_eq!(p.change_month(-1, true), PickerOutcome::Unchanged);
    assert_eq!(p.current_month(), 1);

    assert_eq!(p.change_month(2, true), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 3);
    assert!(p.next_month_disabled());
    assert_eq!(p.change_month(1, true), PickerOutcome::Unchanged);
    assert_eq!(p.current_month(), 3);
}

#[test]
fn test_change_month_hooks() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log1 = log.clone();
    let log2 = log.clone();
    let mut p = picker(
        Options::new()
            .on_month_change(move |_, _, p| log1.borrow_mut().push(("month", p.current_month())))
            .on_year_change(move |_, _, p| log2.borrow_mut().push(("year", p.current_year() as u32))),
    );
    p.change_month(10, true);
    assert_eq!(&*log.borrow(), &[("year", 2025), ("month", 0)]);
    log.borrow_mut().clear();
    p.change_month(1, true);
    assert_eq!(&*log.borrow(), &[("month", 1)]);
}

#[test]
fn test_change_year() {
    let mut p = picker(
        Options::new()
            .min_date("2022-06-10")
            .max_date("2025-04-20"),
    );
    assert_eq!(p.change_year(2021), PickerOutcome::Unchanged);
    assert_eq!(p.change_year(2025), PickerOutcome::Changed);
    assert_eq!(p.current_year(), 2025);
    assert_eq!(p.current_month(), 2);

    p.change_month(1, true);
    assert_eq!(p.current_month(), 3);
    assert_eq!(p.change_year(2022), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 5);
}

#[test]
fn test_jump_to_date() {
    let mut p = picker(Options::new());
    assert_eq!(
        p.jump_to_date(Some("2025-07-04".into()), false),
        PickerOutcome::Changed
    );
    assert_eq!(p.current_year(), 2025);
    assert_eq!(p.current_month(), 6);
    assert_eq!(p.jump_to_date(None, false), PickerOutcome::Changed);
    assert_eq!(p.current_year(), 2024);
    assert_eq!(p.current_month(), 2);
    assert_eq!(p.jump_to_date(None, false), PickerOutcome::Unchanged);
}

#[test]
fn test_key_days() {
    let mut p = picker(Options::new().disable(vec![DateLimit::from(day(2024, 3, 16))]));
    p.open();
    p.focus = FocusTarget::Day(day(2024, 3, 15));

    p.on_key_down(&key(KeyCode::Right));
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 17)));
    p.on_key_down(&key(KeyCode::Left));
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 15)));
    p.on_key_down(&key(KeyCode::Down));
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 22)));
    p.on_key_down(&key(KeyCode::Up));
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 15)));
}

#[test]
fn test_key_from_input() {
    let mut p = picker(Options::new());
    p.open();
    p.focus = FocusTarget::Input;
    // no day focused yet, goes to today.
    p.on_key_down(&key(KeyCode::Down));
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 15)));
}

#[test]
fn test_key_rollover() {
    let months = Rc::new(RefCell::new(0));
    let months1 = months.clone();
    let mut p = picker(Options::new().on_month_change(move |_, _, _| *months1.borrow_mut() += 1));
    p.open();

    // last cell of the march grid.
    p.focus = FocusTarget::Day(day(2024, 4, 6));
    p.on_key_down(&key(KeyCode::Right));
    assert_eq!(p.current_month(), 3);
    assert_eq!(*months.borrow(), 1);
    // first available cell of the april grid.
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 31)));

    // first cell of the april grid.
    p.on_key_down(&key(KeyCode::Left));
    assert_eq!(p.current_month(), 2);
    assert_eq!(*months.borrow(), 2);
    // last available cell of the march grid.
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 4, 6)));
}

#[test]
fn test_key_rollover_disabled() {
    let mut p = picker(Options::new().disable(vec![DateLimit::range("2024-03-31", "2024-04-02")]));
    p.open();
    p.focus = FocusTarget::Day(day(2024, 4, 6));
    p.on_key_down(&key(KeyCode::Down));
    assert_eq!(p.current_month(), 3);
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 4, 3)));
}

#[test]
fn test_key_rollover_two_months() {
    let months = Rc::new(RefCell::new(0));
    let months1 = months.clone();
    let mut p = picker(
        Options::new()
            .show_months(2)
            .on_month_change(move |_, _, _| *months1.borrow_mut() += 1),
    );
    p.open();
    assert_eq!(p.grid.panels.len(), 2);

    p.focus = FocusTarget::Day(day(2024, 4, 30));
    p.on_key_down(&key(KeyCode::Right));
    assert_eq!(p.current_month(), 3);
    assert_eq!(*months.borrow(), 1);
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 5, 1)));

    p.focus = FocusTarget::Day(day(2024, 4, 1));
    p.on_key_down(&key(KeyCode::Left));
    assert_eq!(p.current_month(), 2);
    assert_eq!(*months.borrow(), 2);
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 31)));
}

#[test]
fn test_key_rollover_bound() {
    let mut p = picker(Options::new().max_date("2024-03-31"));
    p.open();
    p.focus = FocusTarget::Day(day(2024, 3, 31));
    // nothing left, the input gets the focus back.
    assert_eq!(p.on_key_down(&key(KeyCode::Right)), PickerOutcome::Changed);
    assert_eq!(p.current_month(), 2);
    assert_eq!(p.focus, FocusTarget::Input);
}

#[test]
fn test_ctrl_month() {
    let mut p = picker(Options::new());
    p.open();
    p.focus = FocusTarget::Day(day(2024, 3, 15));
    p.on_key_down(&KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL));
    assert_eq!(p.current_month(), 3);
    // first available cell of the april grid.
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 31)));
}

#[test]
fn test_escape() {
    let mut p = picker(Options::new());
    p.open();
    p.focus = FocusTarget::Day(day(2024, 3, 15));
    p.on_key_down(&key(KeyCode::Esc));
    assert!(!p.is_open);
    assert_eq!(p.focus, FocusTarget::Input);
}

#[test]
fn test_enter_selects() {
    let mut p = picker(Options::new());
    p.open();
    p.focus = FocusTarget::Day(day(2024, 3, 18));
    assert_eq!(p.on_key_down(&key(KeyCode::Enter)), PickerOutcome::Selected);
    assert_eq!(p.input.value, "2024-03-18");
    assert!(!p.is_open);
}
