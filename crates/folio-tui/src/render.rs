//! Frame rendering.
//!
//! `render` is a pure function of `AppState` apart from writing the measured
//! [`PageLayout`] back into its `Cell`, which the reducer uses for hit
//! testing and section anchors.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Paragraph};

use crate::common::Styles;
use crate::features::backdrop::{ParallaxBackdrop, ornament_glyph};
use crate::features::header::{self, HEADER_HEIGHT, WIDE_WIDTH};
use crate::overlays::menu;
use crate::page;
use crate::state::{AppState, PageLayout};
use crate::statusline;

/// Horizontal margin around page content.
const PAGE_MARGIN: u16 = 2;
/// Page content never grows wider than this.
const MAX_CONTENT_WIDTH: u16 = 96;
const STATUS_HEIGHT: u16 = 1;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let palette = app.controller.theme().palette();
    let styles = Styles::new(palette);

    frame.render_widget(Block::default().style(styles.base), area);
    frame.render_widget(ParallaxBackdrop::new(app.controller.frame(), palette), area);

    let status_height = if app.show_status_line { STATUS_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(status_height),
        ])
        .split(area);
    let (header_area, body_area, status_area) = (chunks[0], chunks[1], chunks[2]);

    let content_area = content_rect(body_area);
    let viewport_height = usize::from(body_area.height);
    let content = page::build_page(
        app,
        &styles,
        usize::from(content_area.width),
        viewport_height,
    );
    let max_scroll = content.lines.len().saturating_sub(viewport_height);
    let offset = app.page.row().min(max_scroll);
    let visible: Vec<_> = content
        .lines
        .iter()
        .skip(offset)
        .take(viewport_height)
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(visible), content_area);

    if area.width >= WIDE_WIDTH && offset < content.hero_height {
        render_ornament(app, frame, body_area, content.hero_height, offset, &styles);
    }

    let mut layout = PageLayout {
        anchors: content.anchors,
        content_height: content.lines.len(),
        viewport_height,
        ..PageLayout::default()
    };
    let current = layout.section_at(offset);
    let hits = header::render_header(app, current, &styles, frame, header_area);
    layout.nav = hits.nav;
    layout.theme_toggle = hits.theme_toggle;
    layout.menu_toggle = hits.menu_toggle;

    if app.show_status_line {
        let status = app.status_line.snapshot();
        statusline::render_status_line(app, &status, &styles, frame, status_area);
    }

    if app.controller.menu_open() {
        layout.menu_items = menu::render_menu(app, &styles, frame, area, header_area.bottom());
    }

    app.layout.set(layout);
}

/// Centered content column inside the body.
fn content_rect(body: Rect) -> Rect {
    let width = body
        .width
        .saturating_sub(PAGE_MARGIN * 2)
        .min(MAX_CONTENT_WIDTH)
        .max(1)
        .min(body.width);
    let x = body.x + (body.width - width) / 2;
    Rect::new(x, body.y, width, body.height)
}

/// Draws the rotating glyph at the right third of the hero.
fn render_ornament(
    app: &AppState,
    frame: &mut Frame,
    body: Rect,
    hero_height: usize,
    offset: usize,
    styles: &Styles,
) {
    let Some(row) = (hero_height / 3).checked_sub(offset) else {
        return;
    };
    let Ok(row) = u16::try_from(row) else {
        return;
    };
    if row >= body.height {
        return;
    }
    let inset = (body.width / 6).max(1);
    let x = body.x + body.width.saturating_sub(inset);
    let glyph = ornament_glyph(app.now);
    frame.render_widget(
        Paragraph::new(glyph).style(styles.accent),
        Rect::new(x, body.y + row, 1, 1),
    );
}
