//! Hero block: location badge, typed headline, and the settled extras.

use folio_core::reveal::{Phase, RevealSequencer};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::PageBuilder;
use crate::common::{Styles, wrap_words};
use crate::state::AppState;

const CARET: &str = "▌";
const SUBTITLE_WIDTH: usize = 64;

/// Caret is solid while typing and follows the blink toggle afterwards.
pub fn caret_visible(reveal: &RevealSequencer) -> bool {
    reveal.phase() == Phase::Typing || reveal.cursor_visible()
}

/// Styles the visible headline prefix word by word.
///
/// Words keep the style of their position in the full `target`: the last
/// word is accented once it starts appearing, provided the target has more
/// than one word.
pub fn headline_spans(
    visible: &str,
    target: &str,
    caret: bool,
    styles: &Styles,
) -> Vec<Span<'static>> {
    let last_word = target.split(' ').count().saturating_sub(1);
    let mut spans = Vec::new();
    for (index, word) in visible.split(' ').enumerate() {
        if index > 0 {
            spans.push(Span::styled(" ", styles.strong));
        }
        if word.is_empty() {
            continue;
        }
        let style = if last_word > 0 && index == last_word {
            styles.accent_strong
        } else {
            styles.strong
        };
        spans.push(Span::styled(word.to_string(), style));
    }
    if caret {
        spans.push(Span::styled(CARET, styles.accent));
    }
    spans
}

pub(super) fn push_hero(page: &mut PageBuilder, app: &AppState, height: usize) {
    let start = page.len();
    let reveal = app.controller.reveal();
    let settled = reveal.is_settled();
    let height = height.max(1);

    if app.loaded {
        let body = hero_body(app, &page.styles, page.width);
        let pad = height.saturating_sub(body.len() + 1) / 2;
        page.blanks(pad);
        for line in body {
            page.push(line);
        }
    }

    while page.len() < start + height - 1 {
        page.blank();
    }
    if app.loaded && settled {
        page.push(Line::styled("↓ scroll", page.styles.muted).centered());
    } else {
        page.blank();
    }
}

fn hero_body(app: &AppState, styles: &Styles, width: usize) -> Vec<Line<'static>> {
    let profile = &app.profile;
    let reveal = app.controller.reveal();
    let mut lines = Vec::new();

    if !profile.location.is_empty() {
        lines.push(
            Line::from(vec![
                Span::styled("◉ ", styles.accent),
                Span::styled(profile.location.clone(), styles.muted),
            ])
            .centered(),
        );
        lines.push(Line::default());
    }

    lines.push(
        Line::from(headline_spans(
            reveal.visible_text(),
            reveal.target(),
            caret_visible(reveal),
            styles,
        ))
        .centered(),
    );

    if !reveal.is_settled() {
        return lines;
    }

    if !profile.subtitle.is_empty() {
        lines.push(Line::default());
        for row in wrap_words(&profile.subtitle, width.min(SUBTITLE_WIDTH)) {
            lines.push(Line::styled(row, styles.muted).centered());
        }
    }

    lines.push(Line::default());
    let mut actions: Vec<Vec<Span<'static>>> = Vec::new();
    if profile.contact.email.is_some() {
        actions.push(vec![
            Span::styled("[e]", styles.accent_strong),
            Span::styled(" Get in touch ↗", styles.text),
        ]);
    }
    actions.push(vec![
        Span::styled("[3]", styles.accent_strong),
        Span::styled(" View work", styles.text),
    ]);
    let gaps = 3 * actions.len().saturating_sub(1);
    let total = actions
        .iter()
        .flatten()
        .fold(gaps, |sum, span| sum + span.content.width());
    if total <= width {
        let mut row = Vec::new();
        for (index, action) in actions.into_iter().enumerate() {
            if index > 0 {
                row.push(Span::raw("   "));
            }
            row.extend(action);
        }
        lines.push(Line::from(row).centered());
    } else {
        for action in actions {
            lines.push(Line::from(action).centered());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use folio_core::theme::{Palette, ThemeMode};

    use super::*;

    fn styles() -> Styles {
        Styles::new(&Palette::for_mode(ThemeMode::Light))
    }

    fn words(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|span| span.content.to_string()).collect()
    }

    #[test]
    fn test_last_word_is_accented_as_it_appears() {
        let styles = styles();
        let spans = headline_spans("NICOLAS MO", "NICOLAS MORAES", false, &styles);
        assert_eq!(words(&spans), vec!["NICOLAS", " ", "MO"]);
        assert_eq!(spans[0].style, styles.strong);
        assert_eq!(spans[2].style, styles.accent_strong);
    }

    #[test]
    fn test_first_word_prefix_is_plain() {
        let styles = styles();
        let spans = headline_spans("NIC", "NICOLAS MORAES", true, &styles);
        assert_eq!(words(&spans), vec!["NIC", CARET]);
        assert_eq!(spans[0].style, styles.strong);
    }

    #[test]
    fn test_trailing_space_keeps_separator() {
        let styles = styles();
        let spans = headline_spans("NICOLAS ", "NICOLAS MORAES", false, &styles);
        assert_eq!(words(&spans), vec!["NICOLAS", " "]);
    }

    #[test]
    fn test_single_word_target_is_not_accented() {
        let styles = styles();
        let spans = headline_spans("HELLO", "HELLO", false, &styles);
        assert_eq!(spans[0].style, styles.strong);
    }

    #[test]
    fn test_empty_prefix_renders_only_caret() {
        let styles = styles();
        assert!(headline_spans("", "HI", false, &styles).is_empty());
        assert_eq!(words(&headline_spans("", "HI", true, &styles)), vec![CARET]);
    }
}
