//! Page header: brand, navigation and theme toggle.

use folio_core::presentation::Section;
use folio_core::theme::ThemeMode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{Styles, truncate_with_ellipsis};
use crate::state::AppState;

/// Terminal width from which the full navigation is shown.
pub const WIDE_WIDTH: u16 = 80;
/// Header rows, including the bottom rule.
pub const HEADER_HEIGHT: u16 = 2;

const MENU_GLYPH: &str = "≡";
const NAV_GAP: u16 = 3;

/// Click targets of the rendered header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderHits {
    pub nav: [Rect; 4],
    pub theme_toggle: Rect,
    pub menu_toggle: Rect,
}

/// Glyph offering the opposite theme.
pub fn theme_glyph(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "☾",
        ThemeMode::Dark => "☀",
    }
}

pub fn render_header(
    app: &AppState,
    current: Section,
    styles: &Styles,
    frame: &mut Frame,
    area: Rect,
) -> HeaderHits {
    let mut hits = HeaderHits::default();
    if area.height == 0 || area.width == 0 {
        return hits;
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles.border)
        .style(styles.base);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return hits;
    }
    let row = Rect::new(inner.x, inner.y, inner.width, 1);

    // Right-hand items, laid out from the right edge.
    let wide = area.width >= WIDE_WIDTH;
    let glyph = theme_glyph(app.controller.theme().mode());
    let mut items: Vec<(String, Style, Target)> = Vec::new();
    if wide {
        for section in Section::ALL {
            let style = if section == current {
                styles.accent_strong.add_modifier(Modifier::UNDERLINED)
            } else {
                styles.muted
            };
            items.push((section.label().to_string(), style, Target::Nav(section)));
        }
    } else {
        let style = if app.controller.menu_open() {
            styles.accent_strong
        } else {
            styles.text
        };
        items.push((MENU_GLYPH.to_string(), style, Target::Menu));
    }
    items.push((glyph.to_string(), styles.accent, Target::Theme));

    let labels_width: usize = items.iter().map(|(text, _, _)| text.width()).sum();
    let gaps = usize::from(NAV_GAP) * items.len().saturating_sub(1);
    let right_width = u16::try_from(labels_width + gaps).unwrap_or(u16::MAX);
    let reserved = right_width.saturating_add(1);
    let right_x = row.right().saturating_sub(reserved).max(row.x);

    let brand_area = Rect::new(
        row.x.saturating_add(1),
        row.y,
        right_x.saturating_sub(row.x.saturating_add(2)),
        1,
    );
    let brand = brand_line(app, styles, usize::from(brand_area.width));
    frame.render_widget(Paragraph::new(brand), brand_area);

    let mut x = right_x;
    let mut spans = Vec::with_capacity(items.len() * 2);
    for (index, (text, style, target)) in items.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" ".repeat(usize::from(NAV_GAP))));
            x = x.saturating_add(NAV_GAP);
        }
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let rect = Rect::new(x, row.y, width, 1).intersection(row);
        match target {
            Target::Nav(section) => hits.nav[section.index()] = rect,
            Target::Menu => hits.menu_toggle = rect,
            Target::Theme => hits.theme_toggle = rect,
        }
        spans.push(Span::styled(text, style));
        x = x.saturating_add(width);
    }
    let right_area = Rect::new(right_x, row.y, row.right().saturating_sub(right_x), 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), right_area);

    hits
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Nav(Section),
    Menu,
    Theme,
}

fn brand_line(app: &AppState, styles: &Styles, width: usize) -> Line<'static> {
    let profile = &app.profile;
    let monogram = if profile.initial.is_empty() {
        String::new()
    } else {
        format!("[{}] ", profile.initial)
    };
    let name = truncate_with_ellipsis(&profile.name, width.saturating_sub(monogram.width()));
    Line::from(vec![
        Span::styled(monogram, styles.accent_strong),
        Span::styled(name, styles.strong),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_glyph_offers_the_other_mode() {
        assert_eq!(theme_glyph(ThemeMode::Light), "☾");
        assert_eq!(theme_glyph(ThemeMode::Dark), "☀");
    }
}
