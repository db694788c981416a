//! UI event types.
//!
//! Everything the reducer reacts to arrives as a [`UiEvent`]: terminal input
//! and the frame clock.

use std::time::Duration;

use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Frame clock. `now` is the time elapsed since mount.
    Tick { now: Duration },
    /// Raw terminal event (key, mouse, resize).
    Terminal(Event),
}
