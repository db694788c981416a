//! Parallax compositor.
//!
//! Pure mapping from a [`TelemetrySample`] to background layer positions.
//! Each layer is anchored to the viewport and moved linearly by scroll offset
//! and by the pointer's distance from the viewport center, with its own
//! weights, so layers drift at different apparent depths.

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetrySample;

/// Viewport width used before the first measurement.
pub const FALLBACK_WIDTH: f64 = 80.0;
/// Viewport height used before the first measurement.
pub const FALLBACK_HEIGHT: f64 = 24.0;

/// Per-layer movement weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights {
    /// Horizontal cells moved per scrolled row.
    pub scroll_x: f64,
    /// Vertical cells moved per scrolled row.
    pub scroll_y: f64,
    /// Cells moved when the pointer sits on the viewport edge.
    pub pointer: f64,
}

/// Weights for every background layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxWeights {
    pub primary: LayerWeights,
    pub secondary: LayerWeights,
    pub tertiary: LayerWeights,
}

impl Default for ParallaxWeights {
    fn default() -> Self {
        Self {
            primary: LayerWeights {
                scroll_x: -0.05,
                scroll_y: 0.1,
                pointer: 2.0,
            },
            secondary: LayerWeights {
                scroll_x: -0.03,
                scroll_y: -0.15,
                pointer: -1.5,
            },
            tertiary: LayerWeights {
                scroll_x: -0.02,
                scroll_y: -0.08,
                pointer: 1.0,
            },
        }
    }
}

/// Position of one layer's center, in viewport cells.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerOffset {
    pub x: f64,
    pub y: f64,
}

/// Background layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Primary,
    Secondary,
    Tertiary,
    Follower,
}

/// Render parameters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParallaxFrame {
    pub primary: LayerOffset,
    pub secondary: LayerOffset,
    pub tertiary: LayerOffset,
    /// Soft highlight tracking the pointer.
    pub follower: LayerOffset,
}

impl ParallaxFrame {
    /// Layers in paint order.
    pub fn layers(&self) -> [(Layer, LayerOffset); 4] {
        [
            (Layer::Primary, self.primary),
            (Layer::Secondary, self.secondary),
            (Layer::Tertiary, self.tertiary),
            (Layer::Follower, self.follower),
        ]
    }
}

/// Computes layer positions for `sample`.
///
/// Total for finite input: zero or negative viewport dimensions (no resize
/// seen yet) fall back to [`FALLBACK_WIDTH`] x [`FALLBACK_HEIGHT`].
pub fn compute(sample: &TelemetrySample, weights: &ParallaxWeights) -> ParallaxFrame {
    let width = effective_dimension(sample.viewport_width, FALLBACK_WIDTH);
    let height = effective_dimension(sample.viewport_height, FALLBACK_HEIGHT);
    let scroll = sample.scroll_offset;
    // Pointer distance from center, roughly -0.5..=0.5 while inside the viewport.
    let nx = (sample.pointer_x - width / 2.0) / width;
    let ny = (sample.pointer_y - height / 2.0) / height;

    let place = |anchor_x: f64, anchor_y: f64, w: &LayerWeights| LayerOffset {
        x: anchor_x + scroll * w.scroll_x + nx * w.pointer,
        y: anchor_y + scroll * w.scroll_y + ny * w.pointer,
    };

    ParallaxFrame {
        primary: place(width - 4.0, 2.0, &weights.primary),
        secondary: place(1.0, height / 2.0, &weights.secondary),
        tertiary: place(width - width / 3.0, height - 3.0, &weights.tertiary),
        follower: LayerOffset {
            x: sample.pointer_x,
            y: sample.pointer_y,
        },
    }
}

fn effective_dimension(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
