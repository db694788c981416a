//! Status line rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::StatusLine;
use crate::common::{Styles, truncate_with_ellipsis};
use crate::state::AppState;

/// Renders the diagnostic status line into a single row.
pub fn render_status_line(
    app: &AppState,
    status: &StatusLine,
    styles: &Styles,
    frame: &mut Frame,
    area: Rect,
) {
    if area.height == 0 {
        return;
    }
    let sample = app.controller.telemetry().current_sample();
    let reveal = app.controller.reveal();
    let fields = [
        ("fps", format!("{:.1}", status.fps)),
        ("reveal", reveal.phase().label().to_string()),
        (
            "ptr",
            format!("{:.0},{:.0}", sample.pointer_x, sample.pointer_y),
        ),
        ("scroll", format!("{:.1}", sample.scroll_offset)),
        (
            "view",
            format!("{:.0}x{:.0}", sample.viewport_width, sample.viewport_height),
        ),
        ("theme", app.controller.theme().mode().as_str().to_string()),
    ];

    let mut spans = Vec::with_capacity(fields.len() * 3 + 1);
    for (index, (label, value)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", styles.muted));
        }
        spans.push(Span::styled(format!("{label} "), styles.muted));
        spans.push(Span::styled(value, styles.text));
    }
    let line = Line::from(spans);
    let line = if line.width() > usize::from(area.width) {
        let text = line.to_string();
        Line::styled(
            truncate_with_ellipsis(&text, usize::from(area.width)),
            styles.muted,
        )
    } else {
        line
    };
    frame.render_widget(Paragraph::new(line).style(styles.base), area);
}
