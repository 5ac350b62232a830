use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rat_datepicker::event::PickerOutcome;
use rat_datepicker::picker::{
    handle_events, handle_mouse_events, DatePicker, DatePickerState, FocusTarget, InputElement,
    Options, SelectionMode,
};
use rat_datepicker::registry::PickerElement;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> NaiveDateTime {
    day(2024, 3, 15).and_hms_opt(10, 0, 0).unwrap()
}

fn picker(options: Options) -> DatePickerState {
    let mut p = DatePickerState::new(
        PickerElement::new("date").input(InputElement::new()),
        options.now(now()),
    )
    .unwrap();
    p.screen = Rect::new(0, 0, 80, 24);
    p.area_input = Rect::new(0, 0, 10, 1);
    p
}

fn render(p: &mut DatePickerState) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    let area = if p.config.inline {
        let (w, h) = p.calendar_size();
        Rect::new(0, 2, w, h)
    } else {
        p.popup
    };
    DatePicker::new().render(area, &mut buf, p);
    buf
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(x: u16, y: u16) -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left), x, y)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Screen position of a rendered day.
fn day_pos(p: &DatePickerState, date: NaiveDate) -> (u16, u16) {
    let idx = p
        .area_cells
        .iter()
        .position(|c| p.grid.cell(*c).map(|v| v.date) == Some(date))
        .unwrap();
    let area = p.area_days[idx];
    (area.x, area.y)
}

#[test]
fn test_render() {
    let mut p = picker(Options::new().week_numbers(true));
    p.open();
    let buf = render(&mut p);

    assert_eq!(p.popup, Rect::new(0, 1, 25, 10));
    assert_eq!(p.area_days.len(), 42);
    assert_eq!(p.area_days.len(), p.area_cells.len());
    assert_ne!(p.area_prev, Rect::default());
    assert_ne!(p.area_next, Rect::default());

    let title = (0..25)
        .map(|x| buf[(x, 1)].symbol().to_string())
        .collect::<String>();
    assert!(title.contains("March 2024"));
}

#[test]
fn test_render_bounds() {
    let mut p = picker(Options::new().min_date("2024-03-01"));
    p.open();
    render(&mut p);
    assert_eq!(p.area_prev, Rect::default());
    assert_ne!(p.area_next, Rect::default());
}

#[test]
fn test_click_open_select() {
    let mut p = picker(Options::new());

    assert_eq!(handle_events(&mut p, &click(2, 0)), PickerOutcome::Changed);
    assert!(p.is_open);
    assert_eq!(p.focus, FocusTarget::Input);

    render(&mut p);
    let (x, y) = day_pos(&p, day(2024, 3, 20));
    assert_eq!(handle_events(&mut p, &click(x, y)), PickerOutcome::Selected);
    assert_eq!(p.input.value, "2024-03-20");
    assert!(!p.is_open);

    // closed, stale areas are ignored.
    assert_eq!(handle_events(&mut p, &click(x, y)), PickerOutcome::Continue);
}

#[test]
fn test_click_opens_off() {
    let mut p = picker(Options::new().click_opens(false));
    assert_eq!(handle_events(&mut p, &click(2, 0)), PickerOutcome::Continue);
    assert!(!p.is_open);
}

#[test]
fn test_click_disabled() {
    let mut p = picker(Options::new().max_date("2024-03-18"));
    p.open();
    render(&mut p);
    let (x, y) = day_pos(&p, day(2024, 3, 20));
    assert_eq!(handle_events(&mut p, &click(x, y)), PickerOutcome::Unchanged);
    assert!(p.selected_dates().is_empty());
    assert!(p.is_open);
}

#[test]
fn test_click_outside() {
    let mut p = picker(
        Options::new()
            .mode(SelectionMode::Range)
            .close_on_select(false),
    );
    p.open();
    render(&mut p);
    let (x, y) = day_pos(&p, day(2024, 3, 20));
    handle_events(&mut p, &click(x, y));
    assert_eq!(p.selected_dates().len(), 1);

    // inside the popup, but not on a day.
    let inside = p.area;
    assert_eq!(
        handle_events(&mut p, &click(inside.x + 5, inside.y)),
        PickerOutcome::Unchanged
    );
    assert!(p.is_open);

    assert_eq!(handle_events(&mut p, &click(70, 20)), PickerOutcome::Changed);
    assert!(!p.is_open);
    // half a range is dropped.
    assert!(p.selected_dates().is_empty());
}

#[test]
fn test_arrows() {
    let mut p = picker(Options::new().inline(true));
    render(&mut p);

    let next = p.area_next;
    assert_eq!(
        handle_mouse_events(&mut p, &click(next.x, next.y)),
        PickerOutcome::Changed
    );
    assert_eq!(p.current_month(), 3);

    render(&mut p);
    let prev = p.area_prev;
    handle_mouse_events(&mut p, &click(prev.x, prev.y));
    handle_mouse_events(&mut p, &click(prev.x, prev.y));
    assert_eq!(p.current_month(), 1);
}

#[test]
fn test_scroll() {
    let mut p = picker(Options::new().inline(true));
    render(&mut p);
    let area = p.area;

    assert_eq!(
        handle_events(&mut p, &mouse(MouseEventKind::ScrollDown, area.x + 1, area.y + 1)),
        PickerOutcome::Changed
    );
    assert_eq!(p.current_month(), 3);
    handle_events(&mut p, &mouse(MouseEventKind::ScrollUp, area.x + 1, area.y + 1));
    assert_eq!(p.current_month(), 2);

    // outside the calendar
    assert_eq!(
        handle_events(&mut p, &mouse(MouseEventKind::ScrollUp, 70, 20)),
        PickerOutcome::Continue
    );
}

#[test]
fn test_hover_preview() {
    let mut p = picker(Options::new().mode(SelectionMode::Range).inline(true));
    render(&mut p);

    let (x, y) = day_pos(&p, day(2024, 3, 10));
    handle_events(&mut p, &click(x, y));
    assert_eq!(p.selected_dates().len(), 1);

    let (x, y) = day_pos(&p, day(2024, 3, 14));
    assert_eq!(
        handle_events(&mut p, &mouse(MouseEventKind::Moved, x, y)),
        PickerOutcome::Changed
    );
    assert!(p.preview.is_some());
    assert_eq!(
        handle_events(&mut p, &mouse(MouseEventKind::Moved, x, y)),
        PickerOutcome::Unchanged
    );

    handle_events(&mut p, &click(x, y));
    assert_eq!(p.selected_dates().len(), 2);
    assert!(p.preview.is_none());
}

#[test]
fn test_no_hover_single() {
    let mut p = picker(Options::new().inline(true));
    render(&mut p);
    let (x, y) = day_pos(&p, day(2024, 3, 14));
    assert_eq!(
        handle_events(&mut p, &mouse(MouseEventKind::Moved, x, y)),
        PickerOutcome::Continue
    );
}

#[test]
fn test_keys() {
    let mut p = picker(Options::new().inline(true));
    p.focus = FocusTarget::Day(day(2024, 3, 15));

    assert_eq!(handle_events(&mut p, &key(KeyCode::Down)), PickerOutcome::Changed);
    assert_eq!(p.focus, FocusTarget::Day(day(2024, 3, 22)));
    assert_eq!(handle_events(&mut p, &key(KeyCode::Enter)), PickerOutcome::Selected);
    assert_eq!(p.input.value, "2024-03-22");
}

#[test]
fn test_keys_without_focus() {
    let mut p = picker(Options::new().inline(true));
    assert_eq!(handle_events(&mut p, &key(KeyCode::Down)), PickerOutcome::Continue);
}

#[test]
fn test_typed_input() {
    let mut p = picker(Options::new().allow_input(true));
    p.focus = FocusTarget::Input;
    p.input.value = "2024-04-02".to_string();
    handle_events(&mut p, &key(KeyCode::Enter));
    assert_eq!(p.selected_dates().len(), 1);
    assert_eq!(p.current_month(), 3);
    assert_eq!(p.focus, FocusTarget::None);

    p.input.value = "2024-04-05".to_string();
    assert_eq!(p.blur_input(true), PickerOutcome::Unchanged);
    assert_eq!(p.blur_input(false), PickerOutcome::Changed);
    assert_eq!(p.latest_selected().map(|v| v.date()), Some(day(2024, 4, 5)));
}

#[test]
fn test_enter_opens() {
    let mut p = picker(Options::new());
    p.focus = FocusTarget::Input;
    assert_eq!(handle_events(&mut p, &key(KeyCode::Enter)), PickerOutcome::Changed);
    assert!(p.is_open);
}

#[test]
fn test_backspace_clears() {
    let mut p = picker(Options::new().default_date("2024-03-05"));
    p.open();
    p.focus = FocusTarget::Input;
    handle_events(&mut p, &key(KeyCode::Backspace));
    assert!(p.selected_dates().is_empty());
    assert_eq!(p.input.value, "");
}

#[test]
fn test_time_keys() {
    let mut p = picker(Options::new().mode(SelectionMode::Time));
    p.open();
    assert_eq!(p.focus, FocusTarget::Hour);

    handle_events(&mut p, &key(KeyCode::Up));
    assert_eq!(p.input.value, "13:00");
    handle_events(&mut p, &key(KeyCode::Tab));
    assert_eq!(p.focus, FocusTarget::Minute);
    handle_events(&mut p, &key(KeyCode::Down));
    assert_eq!(p.input.value, "12:55");
    handle_events(&mut p, &key(KeyCode::Tab));
    assert_eq!(p.focus, FocusTarget::AmPm);
    handle_events(&mut p, &key(KeyCode::Char('a')));
    assert_eq!(p.input.value, "00:55");

    handle_events(&mut p, &key(KeyCode::Enter));
    assert!(!p.is_open);
    assert_eq!(p.focus, FocusTarget::Input);
}

#[test]
fn test_destroyed() {
    let mut p = picker(Options::new());
    p.destroy();
    assert_eq!(handle_events(&mut p, &click(2, 0)), PickerOutcome::Continue);
    assert!(!p.is_open);
}
