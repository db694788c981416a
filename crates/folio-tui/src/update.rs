//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Environment input reaches the presentation controller only through this
//! module: pointer moves, applied scroll offsets and resizes are recorded in
//! telemetry, and the frame clock advances the reveal.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use folio_core::presentation::Section;
use ratatui::layout::Position;
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::backdrop::ornament_frame;
use crate::overlays::menu;
use crate::page::visible_badges;
use crate::state::AppState;

/// Rows moved per arrow key.
const LINE_STEP: f64 = 1.0;
/// Rows moved per wheel notch.
const WHEEL_STEP: f64 = 3.0;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { now } => {
            handle_tick(app, now);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
    }
}

fn handle_tick(app: &mut AppState, now: Duration) {
    let previous = app.now;
    app.now = now;

    let advance = app.controller.tick(now);
    if advance.changed {
        app.dirty = true;
    }
    if advance.completed {
        debug!(at_ms = now.as_millis() as u64, "headline settled");
    }

    if !app.loaded {
        app.loaded = true;
        app.dirty = true;
    }

    let max = app.layout.get().max_scroll() as f64;
    let clamped = app.page.clamp(max);
    let stepped = app.page.step();
    if clamped || stepped {
        sync_scroll(app);
    }

    if ornament_frame(previous) != ornament_frame(now) {
        app.dirty = true;
    }
    let settled_at = app.controller.reveal().settled_at();
    let total = app.profile.stack.cloud_services.len();
    if visible_badges(settled_at, previous, total) != visible_badges(settled_at, now, total) {
        app.dirty = true;
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => {
            let (width, height) = (f64::from(width), f64::from(height));
            app.controller.telemetry_mut().on_resize(width, height);
            app.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    if app.controller.menu_open()
        && let Some(effects) = menu::handle_key(app, key)
    {
        return effects;
    }

    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Esc => {
            if app.controller.close_menu() {
                app.dirty = true;
                vec![]
            } else {
                vec![UiEffect::Quit]
            }
        }
        KeyCode::Char('t') => {
            toggle_theme(app);
            vec![]
        }
        KeyCode::Char('m') => {
            toggle_menu(app);
            vec![]
        }
        KeyCode::Char(digit @ '1'..='9') => match Section::from_shortcut(digit) {
            Some(section) => navigate(app, section),
            None => vec![],
        },
        KeyCode::Char('j') | KeyCode::Down => scroll_by(app, LINE_STEP),
        KeyCode::Char('k') | KeyCode::Up => scroll_by(app, -LINE_STEP),
        KeyCode::PageDown | KeyCode::Char(' ') => scroll_pages(app, 1.0),
        KeyCode::PageUp => scroll_pages(app, -1.0),
        KeyCode::Home | KeyCode::Char('g') => scroll_to(app, 0.0),
        KeyCode::End | KeyCode::Char('G') => {
            let max = app.layout.get().max_scroll() as f64;
            scroll_to(app, max)
        }
        KeyCode::Char('e') => open_link(app.profile.contact.mailto()),
        KeyCode::Char('p') => open_link(app.profile.contact.tel()),
        KeyCode::Char('l') => open_link(app.profile.contact.linkedin.clone()),
        KeyCode::F(12) => {
            app.show_status_line = !app.show_status_line;
            app.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let (x, y) = (f64::from(mouse.column), f64::from(mouse.row));
            if app.controller.telemetry_mut().on_pointer_move(x, y) {
                app.dirty = true;
            }
            vec![]
        }
        MouseEventKind::ScrollDown => scroll_by(app, WHEEL_STEP),
        MouseEventKind::ScrollUp => scroll_by(app, -WHEEL_STEP),
        MouseEventKind::Down(MouseButton::Left) => {
            handle_click(app, Position::new(mouse.column, mouse.row))
        }
        _ => vec![],
    }
}

fn handle_click(app: &mut AppState, position: Position) -> Vec<UiEffect> {
    let layout = app.layout.get();
    if app.controller.menu_open() {
        if let Some(section) = layout.menu_hit(position) {
            return navigate(app, section);
        }
        if !layout.theme_toggle.contains(position) && !layout.menu_toggle.contains(position) {
            app.controller.close_menu();
            app.dirty = true;
            return vec![];
        }
    }

    if let Some(section) = layout.nav_hit(position) {
        return navigate(app, section);
    }
    if layout.theme_toggle.contains(position) {
        toggle_theme(app);
    } else if layout.menu_toggle.contains(position) {
        toggle_menu(app);
    }
    vec![]
}

/// Smooth-scrolls to `section`, closing the menu if it was open.
pub(crate) fn navigate(app: &mut AppState, section: Section) -> Vec<UiEffect> {
    let navigation = app.controller.navigate_to(section);
    let layout = app.layout.get();
    let target = layout.anchor(section) as f64;
    app.page.scroll_to(target, layout.max_scroll() as f64);
    app.menu_selection = section.index();
    app.dirty = true;
    debug!(
        section = section.label(),
        closed_menu = navigation.closed_menu,
        "navigate"
    );
    vec![]
}

fn toggle_theme(app: &mut AppState) {
    let mode = app.controller.toggle_theme();
    app.dirty = true;
    debug!(theme = mode.as_str(), "theme toggled");
}

fn toggle_menu(app: &mut AppState) {
    if app.controller.toggle_menu() {
        let offset = app.page.row();
        app.menu_selection = app.layout.get().section_at(offset).index();
    }
    app.dirty = true;
}

fn scroll_by(app: &mut AppState, delta: f64) -> Vec<UiEffect> {
    let max = app.layout.get().max_scroll() as f64;
    if app.page.scroll_by(delta, max) {
        sync_scroll(app);
    }
    vec![]
}

fn scroll_pages(app: &mut AppState, pages: f64) -> Vec<UiEffect> {
    let layout = app.layout.get();
    let page = layout.viewport_height.saturating_sub(2).max(1) as f64;
    let target = app.page.offset() + pages * page;
    app.page.scroll_to(target, layout.max_scroll() as f64);
    vec![]
}

fn scroll_to(app: &mut AppState, target: f64) -> Vec<UiEffect> {
    let max = app.layout.get().max_scroll() as f64;
    app.page.scroll_to(target, max);
    vec![]
}

/// Records the applied page offset in telemetry.
fn sync_scroll(app: &mut AppState) {
    let offset = app.page.offset();
    app.controller.telemetry_mut().on_scroll(offset);
    app.dirty = true;
}

fn open_link(url: Option<String>) -> Vec<UiEffect> {
    match url {
        Some(url) => vec![UiEffect::OpenBrowser { url }],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use folio_core::reveal::{Phase, RevealSettings};
    use folio_core::theme::ThemeMode;
    use ratatui::layout::Rect;

    use super::*;
    use crate::state::PageLayout;
    use crate::state::tests::mount_app;

    fn app() -> AppState {
        let reveal = RevealSettings {
            start_delay: Duration::from_millis(100),
            tick_interval: Duration::from_millis(100),
            blink_interval: Duration::from_millis(50),
            blink_duration: Duration::from_millis(200),
        };
        let app = mount_app(Some("HI"), reveal, ThemeMode::Light);
        app.layout.set(PageLayout {
            anchors: [0, 30, 60, 100],
            content_height: 130,
            viewport_height: 30,
            ..PageLayout::default()
        });
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn click(column: u16, row: u16) -> UiEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn tick(app: &mut AppState, ms: u64) {
        let event = UiEvent::Tick {
            now: Duration::from_millis(ms),
        };
        update(app, event);
    }

    fn recorded_scroll(app: &AppState) -> f64 {
        app.controller.telemetry().current_sample().scroll_offset
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert_eq!(effects, vec![UiEffect::Quit]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let effects = update(&mut app, UiEvent::Terminal(Event::Key(ctrl_c)));
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_esc_closes_menu_before_quitting() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('m')));
        assert!(app.controller.menu_open());
        assert!(update(&mut app, key(KeyCode::Esc)).is_empty());
        assert!(!app.controller.menu_open());
        assert_eq!(update(&mut app, key(KeyCode::Esc)), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_ticks_drive_the_reveal() {
        let mut app = app();
        tick(&mut app, 50);
        assert!(app.loaded);
        assert_eq!(app.controller.reveal().phase(), Phase::Idle);
        tick(&mut app, 300);
        assert_eq!(app.controller.reveal().visible_text(), "HI");
        tick(&mut app, 600);
        assert!(app.controller.reveal().is_settled());
    }

    #[test]
    fn test_pointer_and_resize_reach_telemetry() {
        let mut app = app();
        update(&mut app, mouse(MouseEventKind::Moved, 12, 7));
        update(&mut app, UiEvent::Terminal(Event::Resize(120, 40)));
        let sample = app.controller.telemetry().current_sample();
        assert_eq!(sample.pointer_x, 12.0);
        assert_eq!(sample.pointer_y, 7.0);
        assert_eq!(sample.viewport_width, 120.0);
        assert_eq!(sample.viewport_height, 40.0);
    }

    #[test]
    fn test_wheel_scroll_is_clamped_and_recorded() {
        let mut app = app();
        update(&mut app, mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(recorded_scroll(&app), 3.0);
        update(&mut app, mouse(MouseEventKind::ScrollUp, 0, 0));
        update(&mut app, mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(app.page.offset(), 0.0);
        assert_eq!(recorded_scroll(&app), 0.0);
    }

    #[test]
    fn test_navigation_scrolls_smoothly_to_anchor() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.page.offset(), 0.0);
        for ms in 1..100 {
            tick(&mut app, ms * 16);
        }
        assert_eq!(app.page.offset(), 60.0);
        assert_eq!(recorded_scroll(&app), 60.0);
    }

    #[test]
    fn test_menu_enter_navigates_and_closes() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('m')));
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Down));
        assert_eq!(app.menu_selection, 2);
        update(&mut app, key(KeyCode::Enter));
        assert!(!app.controller.menu_open());
        assert!(app.page.is_animating());
    }

    #[test]
    fn test_clicks_on_header_targets() {
        let mut app = app();
        let mut layout = app.layout.get();
        layout.nav[1] = Rect::new(50, 0, 5, 1);
        layout.theme_toggle = Rect::new(70, 0, 1, 1);
        app.layout.set(layout);

        update(&mut app, click(70, 0));
        assert_eq!(app.controller.theme().mode(), ThemeMode::Dark);

        update(&mut app, click(52, 0));
        assert!(app.page.is_animating());
    }

    #[test]
    fn test_click_outside_menu_closes_it() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('m')));
        update(&mut app, click(3, 15));
        assert!(!app.controller.menu_open());
    }

    #[test]
    fn test_link_keys_open_browser() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('e')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::OpenBrowser { url }] if url.starts_with("mailto:")
        ));
        let effects = update(&mut app, key(KeyCode::Char('l')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::OpenBrowser { url }] if url.contains("linkedin")
        ));
        let effects = update(&mut app, key(KeyCode::Char('p')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::OpenBrowser { url }] if url == "tel:+5547992879838"
        ));
    }

    #[test]
    fn test_f12_toggles_status_line() {
        let mut app = app();
        update(&mut app, key(KeyCode::F(12)));
        assert!(app.show_status_line);
    }

    #[test]
    fn test_events_after_teardown_change_nothing() {
        let mut app = app();
        tick(&mut app, 150);
        app.controller.teardown();
        let frozen = app.controller.reveal().state();
        update(&mut app, mouse(MouseEventKind::Moved, 9, 9));
        tick(&mut app, 5_000);
        assert_eq!(app.controller.reveal().state(), frozen);
        assert_eq!(app.controller.telemetry().current_sample().pointer_x, 0.0);
    }
}
