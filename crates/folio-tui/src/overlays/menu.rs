//! Compact navigation menu.
//!
//! Opened from the header glyph (or `m`) on narrow terminals; lists the four
//! sections. The open/closed flag lives in the presentation controller, the
//! highlighted entry in `AppState::menu_selection`.

use crossterm::event::{KeyCode, KeyEvent};
use folio_core::presentation::Section;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::{Styles, truncate_with_ellipsis};
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update;

pub const MENU_WIDTH: u16 = 22;

/// Popup area anchored to the right edge, starting at row `top`.
pub fn menu_area(area: Rect, top: u16) -> Rect {
    let rows = u16::try_from(Section::ALL.len() + 2).unwrap_or(u16::MAX);
    let width = MENU_WIDTH.min(area.width);
    let top = top.min(area.bottom());
    let height = rows.min(area.bottom().saturating_sub(top));
    Rect::new(area.right().saturating_sub(width), top, width, height)
}

/// Renders the menu and returns the click target of each entry.
pub fn render_menu(
    app: &AppState,
    styles: &Styles,
    frame: &mut Frame,
    area: Rect,
    top: u16,
) -> [Rect; 4] {
    let mut targets = [Rect::default(); 4];
    let popup = menu_area(area, top);
    if popup.width < 3 || popup.height < 3 {
        return targets;
    }

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.accent)
        .title(" Menu ")
        .title_style(styles.accent_strong)
        .style(styles.base);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let width = usize::from(inner.width);
    for (index, section) in Section::ALL.iter().enumerate() {
        let Ok(offset) = u16::try_from(index) else {
            break;
        };
        if offset >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let label = format!(" {} {}", index + 1, section.label());
        let label = format!("{:<width$}", truncate_with_ellipsis(&label, width));
        let style = if index == app.menu_selection {
            styles.selected
        } else {
            styles.text
        };
        frame.render_widget(Paragraph::new(Line::from(Span::styled(label, style))), row);
        targets[index] = row;
    }
    targets
}

/// Handles a key while the menu is open.
///
/// Returns `None` for keys the menu does not own, so the page handles them.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let last = Section::ALL.len() - 1;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_selection = app.menu_selection.saturating_sub(1);
            app.dirty = true;
            Some(vec![])
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_selection = (app.menu_selection + 1).min(last);
            app.dirty = true;
            Some(vec![])
        }
        KeyCode::Enter => {
            let section = Section::ALL[app.menu_selection.min(last)];
            Some(update::navigate(app, section))
        }
        KeyCode::Esc | KeyCode::Char('m') => {
            app.controller.close_menu();
            app.dirty = true;
            Some(vec![])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_area_is_right_aligned_below_top() {
        let area = Rect::new(0, 0, 60, 20);
        assert_eq!(menu_area(area, 2), Rect::new(38, 2, 22, 6));
    }

    #[test]
    fn test_menu_area_shrinks_on_tiny_terminals() {
        let area = Rect::new(0, 0, 10, 5);
        let popup = menu_area(area, 2);
        assert_eq!(popup.width, 10);
        assert_eq!(popup.height, 3);
    }
}
