//! Scrollable page: the hero followed by the content sections.
//!
//! The page is rebuilt every render from the profile and the reveal state,
//! and the anchors of each navigable section are measured along the way.

mod hero;
mod scroll;
mod sections;

use folio_core::presentation::Section;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub use hero::{caret_visible, headline_spans};
pub use scroll::PageScroll;
pub use sections::{BADGE_STAGGER, visible_badges};

use crate::common::{Styles, wrap_words};
use crate::state::AppState;

/// Rendered page rows plus measured anchors.
#[derive(Debug, Default)]
pub struct PageContent {
    pub lines: Vec<Line<'static>>,
    pub anchors: [usize; 4],
    /// Rows taken by the hero block.
    pub hero_height: usize,
}

/// Builds the full page for a content `width` and a viewport of
/// `viewport_height` rows. The hero fills the first viewport.
pub fn build_page(
    app: &AppState,
    styles: &Styles,
    width: usize,
    viewport_height: usize,
) -> PageContent {
    let mut page = PageBuilder::new(width, *styles);

    page.anchor(Section::Home);
    hero::push_hero(&mut page, app, viewport_height);
    let hero_height = page.len();

    page.anchor(Section::About);
    sections::push_about(&mut page, &app.profile);

    page.anchor(Section::Experience);
    sections::push_experience(&mut page, &app.profile);
    let badges = visible_badges(
        app.controller.reveal().settled_at(),
        app.now,
        app.profile.stack.cloud_services.len(),
    );
    sections::push_stack(&mut page, &app.profile, badges);

    page.anchor(Section::Contact);
    sections::push_contact(&mut page, &app.profile);
    sections::push_footer(&mut page, &app.profile);

    PageContent {
        lines: page.lines,
        anchors: page.anchors,
        hero_height,
    }
}

/// Line accumulator shared by the page slices.
pub(crate) struct PageBuilder {
    lines: Vec<Line<'static>>,
    anchors: [usize; 4],
    width: usize,
    styles: Styles,
}

impl PageBuilder {
    fn new(width: usize, styles: Styles) -> Self {
        Self {
            lines: Vec::new(),
            anchors: [0; 4],
            width: width.max(1),
            styles,
        }
    }

    fn len(&self) -> usize {
        self.lines.len()
    }

    fn anchor(&mut self, section: Section) {
        self.anchors[section.index()] = self.lines.len();
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn blanks(&mut self, count: usize) {
        for _ in 0..count {
            self.blank();
        }
    }

    /// Wrapped paragraph indented by `indent` columns.
    fn paragraph(&mut self, text: &str, style: Style, indent: usize) {
        if text.trim().is_empty() {
            return;
        }
        let pad = " ".repeat(indent);
        for row in wrap_words(text, self.width.saturating_sub(indent)) {
            self.push(Line::from(vec![Span::raw(pad.clone()), Span::styled(row, style)]));
        }
    }

    /// Wrapped text behind a marker; continuation rows align with the text.
    fn bullet(
        &mut self,
        marker: &str,
        marker_style: Style,
        text: &str,
        style: Style,
        indent: usize,
    ) {
        let lead = indent + marker.width() + 1;
        let rows = wrap_words(text, self.width.saturating_sub(lead));
        for (index, row) in rows.into_iter().enumerate() {
            let prefix = if index == 0 {
                Span::styled(format!("{}{marker} ", " ".repeat(indent)), marker_style)
            } else {
                Span::raw(" ".repeat(lead))
            };
            self.push(Line::from(vec![prefix, Span::styled(row, style)]));
        }
    }

    /// Section heading: first part plain, remaining parts in the accent.
    fn heading(&mut self, parts: &[String]) {
        if parts.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(parts.len() * 2);
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if index == 0 {
                self.styles.strong
            } else {
                self.styles.accent_strong
            };
            spans.push(Span::styled(part.clone(), style));
        }
        self.push(Line::from(spans));
        let rule_width = self.width.min(24);
        self.push(Line::styled("━".repeat(rule_width), self.styles.accent));
        self.blank();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_core::reveal::RevealSettings;
    use folio_core::theme::{Palette, ThemeMode};

    use super::*;
    use crate::state::tests::mount_app;

    fn app() -> AppState {
        mount_app(None, RevealSettings::default(), ThemeMode::Dark)
    }

    fn text_of(line: &Line<'_>) -> String {
        line.to_string()
    }

    #[test]
    fn test_anchors_are_ordered_and_hero_fills_viewport() {
        let app = app();
        let styles = Styles::new(&Palette::for_mode(ThemeMode::Dark));
        let page = build_page(&app, &styles, 76, 30);

        assert_eq!(page.anchors[0], 0);
        assert_eq!(page.hero_height, 30);
        assert_eq!(page.anchors[1], 30);
        assert!(page.anchors[1] < page.anchors[2]);
        assert!(page.anchors[2] < page.anchors[3]);
        assert!(page.lines.len() > page.anchors[3]);
    }

    #[test]
    fn test_hero_hidden_before_load() {
        let app = app();
        let styles = Styles::new(&Palette::for_mode(ThemeMode::Dark));
        let page = build_page(&app, &styles, 76, 30);
        let blank = |line: &Line<'_>| text_of(line).trim().is_empty();
        assert!(page.lines[..30].iter().all(blank));
    }

    #[test]
    fn test_settled_hero_shows_headline_and_scroll_hint() {
        let mut app = app();
        app.loaded = true;
        app.controller.tick(Duration::from_secs(10));
        app.now = Duration::from_secs(10);
        let styles = Styles::new(&Palette::for_mode(ThemeMode::Dark));
        let page = build_page(&app, &styles, 76, 30);

        let hero: Vec<String> = page.lines[..page.hero_height].iter().map(text_of).collect();
        assert!(hero.iter().any(|line| line.contains("NICOLAS MORAES")));
        assert!(hero.iter().any(|line| line.contains("scroll")));
        assert!(!hero.iter().any(|line| line.contains('▌')));
    }

    #[test]
    fn test_lines_fit_width() {
        let mut app = app();
        app.loaded = true;
        app.controller.tick(Duration::from_secs(10));
        let styles = Styles::new(&Palette::for_mode(ThemeMode::Light));
        let page = build_page(&app, &styles, 40, 20);
        for line in &page.lines {
            assert!(line.width() <= 40, "too wide: {:?}", text_of(line));
        }
    }
}
