//! Palette to ratatui style mapping.

use folio_core::theme::{Palette, Rgb};
use ratatui::style::{Color, Modifier, Style};

pub fn color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

/// Styles derived from the applied palette.
///
/// Rebuilt every frame so a theme toggle shows up on the next render.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Page background and default foreground.
    pub base: Style,
    pub text: Style,
    pub strong: Style,
    pub muted: Style,
    pub accent: Style,
    pub accent_strong: Style,
    pub border: Style,
    /// Selected menu entry.
    pub selected: Style,
}

impl Styles {
    pub fn new(palette: &Palette) -> Self {
        let text = Style::default().fg(color(palette.text));
        let accent = Style::default().fg(color(palette.accent));
        Self {
            base: Style::default()
                .fg(color(palette.text))
                .bg(color(palette.background)),
            text,
            strong: text.add_modifier(Modifier::BOLD),
            muted: Style::default().fg(color(palette.muted)),
            accent,
            accent_strong: accent.add_modifier(Modifier::BOLD),
            border: Style::default().fg(color(palette.border)),
            selected: Style::default()
                .fg(color(palette.background))
                .bg(color(palette.accent))
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::theme::ThemeMode;

    use super::*;

    #[test]
    fn test_styles_follow_palette() {
        let dark = Palette::for_mode(ThemeMode::Dark);
        let styles = Styles::new(&dark);
        assert_eq!(styles.base.bg, Some(color(dark.background)));
        assert_eq!(styles.accent.fg, Some(color(dark.accent)));
        assert!(styles.strong.add_modifier.contains(Modifier::BOLD));
    }
}
