//! Logical clock with cancellable one-shot timers.
//!
//! Time is a `Duration` measured from an arbitrary origin (usually mount).
//! Nothing here reads the wall clock: the owner advances time explicitly, which
//! keeps timer-driven state machines deterministic under test.

use std::time::Duration;

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    due: Duration,
    payload: T,
}

/// Single clock owning every pending timer of one state machine.
///
/// Timers fire in deadline order; timers sharing a deadline fire in the order
/// they were scheduled.
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `payload` to fire `after` the current logical time.
    pub fn schedule(&mut self, after: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(after),
            payload,
        });
        id
    }

    /// Cancels a pending timer.
    ///
    /// Returns `false` when the timer already fired or was already cancelled;
    /// that case is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(pos) => {
                self.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Removes the earliest timer due at or before `until`.
    ///
    /// Logical time moves forward to that timer's deadline, so anything the
    /// caller schedules while handling it is relative to when it was due, not
    /// to `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(pos, _)| pos)?;
        let fired = self.pending.remove(pos);
        self.now = self.now.max(fired.due);
        Some((fired.id, fired.payload))
    }

    /// Moves logical time forward. Time never goes backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
