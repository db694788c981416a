//! Viewport telemetry: latest pointer, scroll and viewport measurement.
//!
//! Environment events are delivered through an [`EventSource`]. Subscribing
//! yields a [`Subscription`] guard whose disposer runs exactly once, either
//! through [`Subscription::dispose`] or on drop, so listeners cannot leak on
//! any exit path.

use std::fmt;

use anyhow::{Context, Result};
use tracing::debug;

/// Latest known measurement, in terminal cells.
///
/// Current-value semantics: each event overwrites the relevant fields, no
/// history is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetrySample {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub scroll_offset: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// Environment signal kinds telemetry listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    PointerMove,
    Scroll,
    Resize,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::PointerMove, Signal::Scroll, Signal::Resize];
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::PointerMove => "pointer-move",
            Signal::Scroll => "scroll",
            Signal::Resize => "resize",
        };
        f.write_str(name)
    }
}

/// Scoped listener registration. The disposer runs exactly once.
pub struct Subscription {
    signal: Signal,
    disposer: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(signal: Signal, disposer: impl FnOnce() + 'static) -> Self {
        Self {
            signal,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Subscription whose release has nothing to undo.
    pub fn noop(signal: Signal) -> Self {
        Self::new(signal, || {})
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn is_active(&self) -> bool {
        self.disposer.is_some()
    }

    /// Runs the disposer. Returns `false` if it already ran.
    pub fn dispose(&mut self) -> bool {
        match self.disposer.take() {
            Some(disposer) => {
                disposer();
                debug!(signal = %self.signal, "subscription disposed");
                true
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("signal", &self.signal)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Something that can deliver environment events.
pub trait EventSource {
    /// Starts listening for `signal`.
    ///
    /// # Errors
    /// Returns an error if the listener cannot be installed.
    fn subscribe(&self, signal: Signal) -> Result<Subscription>;
}

/// Owner of the current [`TelemetrySample`].
#[derive(Debug, Default)]
pub struct ViewportTelemetry {
    sample: TelemetrySample,
    subscriptions: Vec<Subscription>,
}

impl ViewportTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to pointer, scroll and resize events.
    ///
    /// Attaching twice is a no-op. If any subscription fails, the ones already
    /// acquired are released before the error is returned.
    ///
    /// # Errors
    /// Returns an error if the source refuses a subscription.
    pub fn attach(&mut self, source: &dyn EventSource) -> Result<()> {
        if self.is_attached() {
            return Ok(());
        }
        let mut acquired = Vec::with_capacity(Signal::ALL.len());
        for signal in Signal::ALL {
            let subscription = source
                .subscribe(signal)
                .with_context(|| format!("Failed to subscribe to {signal} events"))?;
            acquired.push(subscription);
        }
        self.subscriptions = acquired;
        debug!("telemetry attached");
        Ok(())
    }

    /// Releases every subscription. Returns how many were released.
    pub fn detach(&mut self) -> usize {
        let mut released = 0;
        for mut subscription in self.subscriptions.drain(..) {
            if subscription.dispose() {
                released += 1;
            }
        }
        if released > 0 {
            debug!(released, "telemetry detached");
        }
        released
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn is_subscribed(&self, signal: Signal) -> bool {
        self.subscriptions.iter().any(|s| s.signal() == signal)
    }

    /// Latest snapshot.
    pub fn current_sample(&self) -> TelemetrySample {
        self.sample
    }

    /// Records a pointer position. Returns true if the sample changed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.is_subscribed(Signal::PointerMove) {
            return false;
        }
        let changed = self.sample.pointer_x != x || self.sample.pointer_y != y;
        self.sample.pointer_x = x;
        self.sample.pointer_y = y;
        changed
    }

    /// Records a scroll offset. Returns true if the sample changed.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if !self.is_subscribed(Signal::Scroll) {
            return false;
        }
        let changed = self.sample.scroll_offset != offset;
        self.sample.scroll_offset = offset;
        changed
    }

    /// Records viewport dimensions. Returns true if the sample changed.
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        if !self.is_subscribed(Signal::Resize) {
            return false;
        }
        let changed = self.sample.viewport_width != width || self.sample.viewport_height != height;
        self.sample.viewport_width = width;
        self.sample.viewport_height = height;
        changed
    }
}

impl Drop for ViewportTelemetry {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Event source that records subscribe/dispose calls.
    #[derive(Default)]
    pub(crate) struct RecordingSource {
        pub log: Rc<RefCell<Vec<String>>>,
        pub fail_on: Option<Signal>,
    }

    impl EventSource for RecordingSource {
        fn subscribe(&self, signal: Signal) -> Result<Subscription> {
            if self.fail_on == Some(signal) {
                anyhow::bail!("{signal} unavailable");
            }
            self.log.borrow_mut().push(format!("+{signal}"));
            let log = Rc::clone(&self.log);
            Ok(Subscription::new(signal, move || {
                log.borrow_mut().push(format!("-{signal}"));
            }))
        }
    }

    fn attached() -> (ViewportTelemetry, Rc<RefCell<Vec<String>>>) {
        let source = RecordingSource::default();
        let mut telemetry = ViewportTelemetry::new();
        telemetry.attach(&source).unwrap();
        (telemetry, source.log)
    }

    #[test]
    fn test_events_update_only_their_fields() {
        let (mut telemetry, _) = attached();
        assert!(telemetry.on_resize(120.0, 40.0));
        assert!(telemetry.on_pointer_move(10.0, 5.0));
        assert!(telemetry.on_scroll(30.0));

        let sample = telemetry.current_sample();
        assert_eq!(
            sample,
            TelemetrySample {
                pointer_x: 10.0,
                pointer_y: 5.0,
                scroll_offset: 30.0,
                viewport_width: 120.0,
                viewport_height: 40.0,
            }
        );

        telemetry.on_pointer_move(11.0, 6.0);
        let next = telemetry.current_sample();
        assert_eq!(next.scroll_offset, 30.0);
        assert_eq!(next.viewport_width, 120.0);
    }

    #[test]
    fn test_repeated_event_reports_no_change() {
        let (mut telemetry, _) = attached();
        assert!(telemetry.on_scroll(4.0));
        assert!(!telemetry.on_scroll(4.0));
    }

    #[test]
    fn test_events_ignored_when_detached() {
        let mut telemetry = ViewportTelemetry::new();
        assert!(!telemetry.on_pointer_move(3.0, 4.0));
        assert_eq!(telemetry.current_sample(), TelemetrySample::default());
    }

    #[test]
    fn test_detach_releases_each_subscription_once() {
        let (mut telemetry, log) = attached();
        assert_eq!(telemetry.detach(), 3);
        assert_eq!(telemetry.detach(), 0);
        drop(telemetry);

        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                "+pointer-move",
                "+scroll",
                "+resize",
                "-pointer-move",
                "-scroll",
                "-resize",
            ]
        );
    }

    #[test]
    fn test_drop_detaches() {
        let (telemetry, log) = attached();
        drop(telemetry);
        let released = log.borrow().iter().filter(|e| e.starts_with('-')).count();
        assert_eq!(released, 3);
    }

    #[test]
    fn test_failed_attach_releases_acquired_subscriptions() {
        let source = RecordingSource {
            fail_on: Some(Signal::Resize),
            ..Default::default()
        };
        let mut telemetry = ViewportTelemetry::new();
        let err = telemetry.attach(&source).unwrap_err();
        assert!(format!("{err:#}").contains("resize"));
        assert!(!telemetry.is_attached());
        assert_eq!(
            *source.log.borrow(),
            vec!["+pointer-move", "+scroll", "-pointer-move", "-scroll"]
        );
    }

    #[test]
    fn test_attach_twice_is_noop() {
        let source = RecordingSource::default();
        let mut telemetry = ViewportTelemetry::new();
        telemetry.attach(&source).unwrap();
        telemetry.attach(&source).unwrap();
        assert_eq!(source.log.borrow().len(), 3);
    }

    #[test]
    fn test_subscription_dispose_runs_once() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut subscription = Subscription::new(Signal::Scroll, move || {
            *counter.borrow_mut() += 1;
        });
        assert!(subscription.dispose());
        assert!(!subscription.dispose());
        drop(subscription);
        assert_eq!(*count.borrow(), 1);
    }
}
