//! Parallax background and the rotating hero ornament.
//!
//! Layers are drawn as soft shade-glyph ellipses directly into the buffer,
//! before the page text, so content always paints on top of them.

use std::time::Duration;

use folio_core::parallax::{Layer, LayerOffset, ParallaxFrame};
use folio_core::theme::Palette;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::common::color;

/// One full turn of the ornament.
pub const ORNAMENT_PERIOD: Duration = Duration::from_secs(20);
const ORNAMENT_FRAMES: [&str; 4] = ["◴", "◷", "◶", "◵"];

/// Normalized distance below which a blob uses the denser glyph.
const CORE: f64 = 0.35;

/// Index of the ornament glyph at `elapsed`.
pub fn ornament_frame(elapsed: Duration) -> usize {
    let period = ORNAMENT_PERIOD.as_millis();
    let phase = elapsed.as_millis() % period;
    let frames = ORNAMENT_FRAMES.len();
    usize::try_from(phase * frames as u128 / period).map_or(0, |index| index.min(frames - 1))
}

pub fn ornament_glyph(elapsed: Duration) -> &'static str {
    ORNAMENT_FRAMES[ornament_frame(elapsed)]
}

/// Background widget for one parallax frame.
pub struct ParallaxBackdrop<'a> {
    frame: ParallaxFrame,
    palette: &'a Palette,
}

impl<'a> ParallaxBackdrop<'a> {
    pub fn new(frame: ParallaxFrame, palette: &'a Palette) -> Self {
        Self { frame, palette }
    }
}

impl Widget for ParallaxBackdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (layer, offset) in self.frame.layers() {
            let (rx, ry) = radii(layer, area);
            let fg = color(match layer {
                Layer::Primary => self.palette.blob_primary,
                Layer::Secondary => self.palette.blob_secondary,
                Layer::Tertiary => self.palette.blob_tertiary,
                Layer::Follower => self.palette.follower,
            });
            paint_blob(buf, area, offset, rx, ry, fg);
        }
    }
}

/// Blob radii in cells, scaled to the viewport.
fn radii(layer: Layer, area: Rect) -> (f64, f64) {
    let width = f64::from(area.width);
    let height = f64::from(area.height);
    match layer {
        Layer::Primary => ((width / 5.0).max(6.0), (height / 4.0).max(3.0)),
        Layer::Secondary => ((width / 6.0).max(5.0), (height / 5.0).max(3.0)),
        Layer::Tertiary => ((width / 7.0).max(5.0), (height / 6.0).max(2.0)),
        Layer::Follower => (3.0, 1.5),
    }
}

fn paint_blob(buf: &mut Buffer, area: Rect, center: LayerOffset, rx: f64, ry: f64, fg: Color) {
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    for row in 0..area.height {
        let dy = (f64::from(row) - center.y) / ry;
        if dy.abs() > 1.0 {
            continue;
        }
        for col in 0..area.width {
            let dx = (f64::from(col) - center.x) / rx;
            let distance = dx * dx + dy * dy;
            if distance > 1.0 {
                continue;
            }
            let symbol = if distance < CORE { "▒" } else { "░" };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(symbol).set_fg(fg);
            }
        }
    }
}
