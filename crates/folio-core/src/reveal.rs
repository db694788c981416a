//! Headline reveal sequencer.
//!
//! A finite-state machine that types a target string one grapheme at a time,
//! blinks a caret for a while, then settles. Dependent content keys its
//! appearance off [`Phase::Settled`], so it can never show up before the
//! headline finished rendering.
//!
//! ```text
//! Idle --start+delay--> Typing --all emitted--> CursorBlink --duration--> Settled
//! ```
//!
//! All timers live in one [`Timeline`] owned by the sequencer. Leaving a phase
//! cancels its timer, and [`RevealSequencer::cancel`] drops everything, so no
//! stale callback can mutate state after teardown.

use std::time::Duration;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::clock::{TimerId, Timeline};

/// Smallest interval accepted for repeating timers.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fixed timing of the reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSettings {
    /// Delay between `start()` and the first typing tick.
    pub start_delay: Duration,
    /// One grapheme is emitted per tick.
    pub tick_interval: Duration,
    /// Caret toggle period while blinking.
    pub blink_interval: Duration,
    /// How long the caret blinks before the sequence settles.
    pub blink_duration: Duration,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(500),
            tick_interval: Duration::from_millis(90),
            blink_interval: Duration::from_millis(400),
            blink_duration: Duration::from_millis(1600),
        }
    }
}

impl RevealSettings {
    fn normalized(self) -> Self {
        Self {
            tick_interval: self.tick_interval.max(MIN_INTERVAL),
            blink_interval: self.blink_interval.max(MIN_INTERVAL),
            ..self
        }
    }
}

/// Reveal phase. Ordered: a sequence only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Idle,
    Typing,
    CursorBlink,
    Settled,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Typing => "typing",
            Phase::CursorBlink => "blink",
            Phase::Settled => "settled",
        }
    }
}

/// Immutable snapshot of the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    pub phase: Phase,
    pub visible_text: String,
    pub cursor_visible: bool,
}

/// Result of advancing the sequencer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// Visible state changed (re-render needed).
    pub changed: bool,
    /// The sequence settled during this call. Raised exactly once per lifetime.
    pub completed: bool,
}

impl Advance {
    fn merge(&mut self, other: Advance) {
        self.changed |= other.changed;
        self.completed |= other.completed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealTimer {
    Start,
    Tick,
    Blink,
    Settle,
}

/// Timer-driven headline reveal.
#[derive(Debug)]
pub struct RevealSequencer {
    target: String,
    /// Byte offset of the end of each grapheme in `target`.
    boundaries: Vec<usize>,
    settings: RevealSettings,
    clock: Timeline<RevealTimer>,
    phase: Phase,
    emitted: usize,
    cursor_visible: bool,
    start_timer: Option<TimerId>,
    tick_timer: Option<TimerId>,
    blink_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    settled_at: Option<Duration>,
    completion_raised: bool,
    torn_down: bool,
}

impl RevealSequencer {
    pub fn new(target: impl Into<String>, settings: RevealSettings) -> Self {
        let target = target.into();
        let boundaries = target
            .grapheme_indices(true)
            .map(|(offset, grapheme)| offset + grapheme.len())
            .collect();
        Self {
            target,
            boundaries,
            settings: settings.normalized(),
            clock: Timeline::new(),
            phase: Phase::Idle,
            emitted: 0,
            cursor_visible: false,
            start_timer: None,
            tick_timer: None,
            blink_timer: None,
            settle_timer: None,
            settled_at: None,
            completion_raised: false,
            torn_down: false,
        }
    }

    /// Starts the sequence; typing begins after the configured start delay.
    ///
    /// Idempotent: calling it again while the start is pending, while running,
    /// after settling or after teardown does nothing.
    pub fn start(&mut self, now: Duration) -> Advance {
        if self.torn_down || self.phase != Phase::Idle || self.start_timer.is_some() {
            debug!(phase = self.phase.label(), "reveal start ignored");
            return Advance::default();
        }
        self.clock.advance_to(now);
        self.start_timer = Some(self.schedule(RevealTimer::Start));
        let delay_ms = self.settings.start_delay.as_millis() as u64;
        debug!(delay_ms, "reveal scheduled");
        self.advance(now)
    }

    /// Advances logical time to `now`, firing every timer that came due.
    pub fn advance(&mut self, now: Duration) -> Advance {
        let mut result = Advance::default();
        if self.torn_down {
            return result;
        }
        while let Some((_, timer)) = self.clock.pop_due(now) {
            result.merge(self.fire(timer));
        }
        self.clock.advance_to(now);
        result
    }

    /// Tears the sequence down: cancels every pending timer and freezes state.
    ///
    /// Returns the number of timers cancelled. A second call cancels nothing.
    pub fn cancel(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        self.start_timer = None;
        self.tick_timer = None;
        self.blink_timer = None;
        self.settle_timer = None;
        let cancelled = self.clock.cancel_all();
        debug!(cancelled, phase = self.phase.label(), "reveal torn down");
        cancelled
    }

    fn fire(&mut self, timer: RevealTimer) -> Advance {
        match timer {
            RevealTimer::Start => {
                self.start_timer = None;
                self.enter_typing()
            }
            RevealTimer::Tick => {
                self.tick_timer = None;
                self.emit_next()
            }
            RevealTimer::Blink => {
                self.blink_timer = None;
                if self.phase != Phase::CursorBlink {
                    return Advance::default();
                }
                self.cursor_visible = !self.cursor_visible;
                self.blink_timer = Some(self.schedule(RevealTimer::Blink));
                Advance {
                    changed: true,
                    completed: false,
                }
            }
            RevealTimer::Settle => {
                self.settle_timer = None;
                self.settle()
            }
        }
    }

    fn schedule(&mut self, timer: RevealTimer) -> TimerId {
        let delay = match timer {
            RevealTimer::Start => self.settings.start_delay,
            RevealTimer::Tick => self.settings.tick_interval,
            RevealTimer::Blink => self.settings.blink_interval,
            RevealTimer::Settle => self.settings.blink_duration,
        };
        self.clock.schedule(delay, timer)
    }

    fn enter_typing(&mut self) -> Advance {
        self.phase = Phase::Typing;
        debug!(graphemes = self.boundaries.len(), "reveal typing");
        if self.boundaries.is_empty() {
            self.enter_blink();
        } else {
            self.tick_timer = Some(self.schedule(RevealTimer::Tick));
        }
        Advance {
            changed: true,
            completed: false,
        }
    }

    fn emit_next(&mut self) -> Advance {
        if self.phase != Phase::Typing || self.emitted >= self.boundaries.len() {
            return Advance::default();
        }
        self.emitted += 1;
        if self.emitted == self.boundaries.len() {
            self.enter_blink();
        } else {
            self.tick_timer = Some(self.schedule(RevealTimer::Tick));
        }
        Advance {
            changed: true,
            completed: false,
        }
    }

    fn enter_blink(&mut self) {
        self.phase = Phase::CursorBlink;
        self.cursor_visible = true;
        self.blink_timer = Some(self.schedule(RevealTimer::Blink));
        self.settle_timer = Some(self.schedule(RevealTimer::Settle));
        debug!("reveal blinking");
    }

    fn settle(&mut self) -> Advance {
        if self.phase != Phase::CursorBlink {
            return Advance::default();
        }
        if let Some(blink) = self.blink_timer.take() {
            self.clock.cancel(blink);
        }
        self.phase = Phase::Settled;
        self.cursor_visible = false;
        let now = self.clock.now();
        self.settled_at = Some(now);
        let completed = !self.completion_raised;
        self.completion_raised = true;
        debug!(at_ms = now.as_millis() as u64, "reveal settled");
        Advance {
            changed: true,
            completed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The full string being revealed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Grapheme prefix of the target revealed so far.
    pub fn visible_text(&self) -> &str {
        match self.emitted {
            0 => "",
            n => &self.target[..self.boundaries[n - 1]],
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Logical time at which the sequence settled.
    pub fn settled_at(&self) -> Option<Duration> {
        self.settled_at
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.clock.pending_count()
    }

    pub fn state(&self) -> RevealState {
        RevealState {
            phase: self.phase,
            visible_text: self.visible_text().to_string(),
            cursor_visible: self.cursor_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn settings() -> RevealSettings {
        RevealSettings {
            start_delay: ms(0),
            tick_interval: ms(100),
            blink_interval: ms(50),
            blink_duration: ms(300),
        }
    }

    #[test]
    fn test_hi_scenario() {
        let mut seq = RevealSequencer::new("HI", settings());
        assert_eq!(seq.phase(), Phase::Idle);

        seq.start(ms(0));
        assert_eq!(seq.phase(), Phase::Typing);
        assert_eq!(seq.visible_text(), "");

        seq.advance(ms(100));
        assert_eq!(seq.visible_text(), "H");
        assert_eq!(seq.phase(), Phase::Typing);

        seq.advance(ms(200));
        assert_eq!(seq.visible_text(), "HI");
        assert_eq!(seq.phase(), Phase::CursorBlink);
        assert!(seq.cursor_visible());

        let result = seq.advance(ms(500));
        assert!(result.completed);
        assert_eq!(seq.phase(), Phase::Settled);
        assert!(!seq.cursor_visible());
        assert_eq!(seq.visible_text(), "HI");
        assert_eq!(seq.settled_at(), Some(ms(500)));
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_start_delay_holds_idle() {
        let mut seq = RevealSequencer::new(
            "HI",
            RevealSettings {
                start_delay: ms(250),
                ..settings()
            },
        );
        seq.start(ms(0));
        seq.advance(ms(249));
        assert_eq!(seq.phase(), Phase::Idle);
        seq.advance(ms(250));
        assert_eq!(seq.phase(), Phase::Typing);
        assert_eq!(seq.visible_text(), "");
        seq.advance(ms(350));
        assert_eq!(seq.visible_text(), "H");
    }

    #[test]
    fn test_visible_text_is_monotonic_prefix() {
        let target = "NICOLAS MORAES";
        let mut seq = RevealSequencer::new(target, settings());
        seq.start(ms(0));

        let mut previous_len = 0;
        let mut previous_phase = seq.phase();
        for t in (0..=3000).step_by(7) {
            seq.advance(ms(t));
            let visible = seq.visible_text();
            assert!(target.starts_with(visible));
            assert!(visible.len() >= previous_len);
            assert!(visible.len() <= target.len());
            assert!(seq.phase() >= previous_phase);
            previous_len = visible.len();
            previous_phase = seq.phase();
        }
        assert_eq!(seq.phase(), Phase::Settled);
        assert_eq!(seq.visible_text(), target);
    }

    #[test]
    fn test_phases_never_skip_a_stage() {
        let mut seq = RevealSequencer::new("ABC", settings());
        let mut seen = vec![seq.phase()];
        seq.start(ms(0));
        for t in (0..=1000).step_by(10) {
            seq.advance(ms(t));
            if seen.last() != Some(&seq.phase()) {
                seen.push(seq.phase());
            }
        }
        assert_eq!(seen.len(), 4);
        assert!(seen.is_sorted());
        assert_eq!(seen.last(), Some(&Phase::Settled));
    }

    #[test]
    fn test_large_time_jump_fires_everything_in_order() {
        let mut seq = RevealSequencer::new("HELLO", settings());
        seq.start(ms(0));
        let result = seq.advance(ms(10_000));
        assert!(result.changed);
        assert!(result.completed);
        assert_eq!(seq.visible_text(), "HELLO");
        // 5 ticks at 100ms, then 300ms of blinking.
        assert_eq!(seq.settled_at(), Some(ms(800)));
    }

    #[test]
    fn test_start_after_settled_is_noop() {
        let mut seq = RevealSequencer::new("HI", settings());
        seq.start(ms(0));
        seq.advance(ms(1000));
        assert!(seq.is_settled());

        let before = seq.state();
        let result = seq.start(ms(2000));
        assert_eq!(result, Advance::default());
        assert_eq!(seq.state(), before);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn test_duplicate_start_registers_one_timer() {
        let mut seq = RevealSequencer::new(
            "HI",
            RevealSettings {
                start_delay: ms(100),
                ..settings()
            },
        );
        seq.start(ms(0));
        seq.start(ms(10));
        seq.start(ms(20));
        assert_eq!(seq.pending_timers(), 1);

        seq.advance(ms(200));
        assert_eq!(seq.visible_text(), "H");
    }

    #[test]
    fn test_completion_raised_exactly_once() {
        let mut seq = RevealSequencer::new("HI", settings());
        seq.start(ms(0));
        let mut completions = 0;
        for t in (0..=2000).step_by(25) {
            if seq.advance(ms(t)).completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_teardown_before_settled_freezes_state() {
        let mut seq = RevealSequencer::new("HELLO", settings());
        seq.start(ms(0));
        seq.advance(ms(250));
        assert_eq!(seq.visible_text(), "HE");

        assert!(seq.cancel() > 0);
        assert_eq!(seq.pending_timers(), 0);
        let frozen = seq.state();

        for t in (300..=5000).step_by(50) {
            let result = seq.advance(ms(t));
            assert_eq!(result, Advance::default());
        }
        assert_eq!(seq.state(), frozen);
        assert_eq!(seq.start(ms(6000)), Advance::default());
        assert_eq!(seq.state(), frozen);
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let mut seq = RevealSequencer::new("HI", settings());
        seq.start(ms(0));
        seq.cancel();
        assert_eq!(seq.cancel(), 0);
        assert!(seq.is_torn_down());
    }

    #[test]
    fn test_cursor_toggles_while_blinking() {
        let mut seq = RevealSequencer::new("A", settings());
        seq.start(ms(0));
        seq.advance(ms(100));
        assert_eq!(seq.phase(), Phase::CursorBlink);
        assert!(seq.cursor_visible());
        seq.advance(ms(150));
        assert!(!seq.cursor_visible());
        seq.advance(ms(200));
        assert!(seq.cursor_visible());
    }

    #[test]
    fn test_grapheme_prefix_never_splits_clusters() {
        let target = "e\u{301}\u{1F44B}x";
        let mut seq = RevealSequencer::new(target, settings());
        seq.start(ms(0));
        seq.advance(ms(100));
        assert_eq!(seq.visible_text(), "e\u{301}");
        seq.advance(ms(200));
        assert_eq!(seq.visible_text(), "e\u{301}\u{1F44B}");
        seq.advance(ms(300));
        assert_eq!(seq.visible_text(), target);
    }

    #[test]
    fn test_empty_target_goes_straight_to_blink() {
        let mut seq = RevealSequencer::new("", settings());
        seq.start(ms(0));
        assert_eq!(seq.phase(), Phase::CursorBlink);
        seq.advance(ms(300));
        assert!(seq.is_settled());
        assert_eq!(seq.visible_text(), "");
    }

    #[test]
    fn test_zero_blink_interval_is_clamped() {
        let mut seq = RevealSequencer::new(
            "A",
            RevealSettings {
                blink_interval: Duration::ZERO,
                ..settings()
            },
        );
        seq.start(ms(0));
        seq.advance(ms(1000));
        assert!(seq.is_settled());
    }
}
