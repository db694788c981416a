//! Status line state types.

/// Public, immutable snapshot read by the renderer each frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusLine {
    pub fps: f32,
    pub frames: u64,
}

/// Mutable accumulator that tracks FPS.
#[derive(Debug)]
pub struct StatusLineAccumulator {
    fps_ema: f32,
    frames: u64,
}

impl Default for StatusLineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLineAccumulator {
    pub fn new() -> Self {
        Self {
            fps_ema: 60.0,
            frames: 0,
        }
    }

    /// Update with the interval since the previous frame (ms).
    pub fn on_frame(&mut self, frame_ms: u16) {
        let fps = if frame_ms > 0 {
            1000.0 / f32::from(frame_ms)
        } else {
            self.fps_ema
        };
        self.fps_ema += 0.1 * (fps - self.fps_ema);
        self.frames += 1;
    }

    pub fn snapshot(&self) -> StatusLine {
        StatusLine {
            fps: (self.fps_ema * 10.0).round() / 10.0,
            frames: self.frames,
        }
    }
}
