//! Page scroll position with smooth scrolling toward a target.

/// Fraction of the remaining distance covered per frame.
const EASE: f64 = 0.35;
/// Distance below which the animation snaps to the target.
const SNAP: f64 = 0.5;

/// Vertical page offset in rows.
///
/// Manual scrolling moves immediately; [`PageScroll::scroll_to`] eases toward
/// its target on each [`PageScroll::step`]. The offset is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageScroll {
    offset: f64,
    target: f64,
}

impl PageScroll {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset rounded to a whole row.
    pub fn row(&self) -> usize {
        self.offset.round().max(0.0) as usize
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    /// Moves by `delta` rows immediately, cancelling any animation.
    /// Returns true if the offset changed.
    pub fn scroll_by(&mut self, delta: f64, max: f64) -> bool {
        self.jump_to(self.offset + delta, max)
    }

    /// Moves to `offset` immediately. Returns true if the offset changed.
    pub fn jump_to(&mut self, offset: f64, max: f64) -> bool {
        let next = offset.clamp(0.0, max.max(0.0));
        let changed = next != self.offset;
        self.offset = next;
        self.target = next;
        changed
    }

    /// Starts a smooth scroll toward `target`.
    pub fn scroll_to(&mut self, target: f64, max: f64) {
        self.target = target.clamp(0.0, max.max(0.0));
    }

    /// Advances the animation by one frame. Returns true if the offset changed.
    pub fn step(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let remaining = self.target - self.offset;
        if remaining.abs() <= SNAP {
            self.offset = self.target;
        } else {
            self.offset += remaining * EASE;
        }
        true
    }

    /// Re-applies bounds after the content or viewport changed.
    /// Returns true if the offset changed.
    pub fn clamp(&mut self, max: f64) -> bool {
        let max = max.max(0.0);
        self.target = self.target.min(max);
        let next = self.offset.min(max);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_clamps_to_bounds() {
        let mut scroll = PageScroll::default();
        assert!(!scroll.scroll_by(-3.0, 50.0));
        assert!(scroll.scroll_by(10.0, 50.0));
        assert_eq!(scroll.row(), 10);
        assert!(scroll.scroll_by(100.0, 50.0));
        assert_eq!(scroll.offset(), 50.0);
    }

    #[test]
    fn test_smooth_scroll_converges() {
        let mut scroll = PageScroll::default();
        scroll.scroll_to(40.0, 100.0);
        let mut previous = scroll.offset();
        let mut frames = 0;
        while scroll.step() {
            assert!(scroll.offset() > previous);
            assert!(scroll.offset() <= 40.0);
            previous = scroll.offset();
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(scroll.offset(), 40.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let mut scroll = PageScroll::default();
        scroll.scroll_to(40.0, 100.0);
        scroll.step();
        scroll.scroll_by(1.0, 100.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut scroll = PageScroll::default();
        scroll.jump_to(80.0, 100.0);
        assert!(scroll.clamp(20.0));
        assert_eq!(scroll.offset(), 20.0);
        assert!(!scroll.clamp(20.0));
    }
}
