//! Presentation runtime: terminal ownership, the frame loop and effects.
//!
//! Side effects (drawing, opening links, teardown) live here. The reducer
//! only mutates state and returns the effects it wants executed.
//!
//! Time is measured from mount and handed to the reducer in `Tick` events,
//! so the reveal and the other animations never read the clock themselves.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use folio_core::config::{Config, paths};
use folio_core::presentation::{ControllerOptions, MountContext, PresentationController};
use folio_core::profile::Profile;
use folio_core::theme::{
    EnvAppearance, FilePreferenceStore, FixedAppearance, MemoryPreferenceStore, PreferenceStore,
    SystemAppearance,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::LaunchOptions;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::page::visible_badges;
use crate::state::AppState;
use crate::terminal::{self, TerminalSignals};
use crate::{render, update};

/// Target frame rate while something animates (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll timeout once the page is at rest.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen presentation runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct PresentationRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Mount instant; `Tick` times are measured from here.
    mounted_at: Instant,
    last_tick: Instant,
    /// Previous draw, for the frame-rate estimate.
    last_render: Instant,
    /// Recent input keeps the loop on the fast cadence.
    last_terminal_event: Instant,
}

impl PresentationRuntime {
    /// Enters the alternate screen and mounts the presentation.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up or telemetry cannot
    /// subscribe to terminal events. The terminal is restored in both cases.
    pub fn new(config: &Config, profile: Profile, options: LaunchOptions) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let appearance: Box<dyn SystemAppearance> = match options.theme_override {
            Some(mode) => Box::new(FixedAppearance(Some(mode))),
            None => Box::new(EnvAppearance),
        };
        let signals = TerminalSignals::new();
        let mounted = PresentationController::mount(
            ControllerOptions {
                headline: profile.headline.clone(),
                reveal: config.reveal.settings(),
                parallax: config.parallax,
            },
            MountContext {
                source: &signals,
                store: preference_store(options.persist),
                appearance: appearance.as_ref(),
            },
            Duration::ZERO,
        );
        let controller = match mounted {
            Ok(controller) => controller,
            Err(err) => {
                let _ = terminal::restore_terminal();
                return Err(err);
            }
        };

        let state = AppState::new(controller, profile, config.show_status_line);
        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            mounted_at: now,
            last_tick: now,
            last_render: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until quit, then tears the presentation down.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        self.state.controller.teardown();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        // Telemetry only hears about later resizes; seed it with the current size.
        let size = self.terminal.size()?;
        self.dispatch_event(UiEvent::Terminal(Event::Resize(size.width, size.height)));
        self.draw()?;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            let mut ticked = false;
            for event in events {
                // Only Tick triggers render - this caps frame rate at tick cadence
                ticked |= matches!(&event, UiEvent::Tick { .. });
                self.dispatch_event(event);
            }

            if ticked && self.state.dirty {
                self.draw()?;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        // Measure time since last render (actual frame interval for FPS)
        let frame_ms = u16::try_from(self.last_render.elapsed().as_millis()).unwrap_or(u16::MAX);
        self.last_render = Instant::now();

        self.terminal.draw(|frame| {
            render::render(&self.state, frame);
        })?;

        self.state.dirty = false;
        self.state.status_line.on_frame(frame_ms);
        Ok(())
    }

    /// Whether the next tick should come at frame rate.
    fn needs_fast_tick(&self) -> bool {
        let state = &self.state;
        let reveal = state.controller.reveal();
        let revealing = !reveal.is_settled() && !reveal.is_torn_down();
        let total = state.profile.stack.cloud_services.len();
        let badges_pending = reveal.settled_at().is_some()
            && visible_badges(reveal.settled_at(), state.now, total) < total;
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;

        revealing || badges_pending || state.page.is_animating() || recent_terminal_activity
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.needs_fast_tick() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until next tick is due (keeps input responsive while hitting tick cadence)
        let poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
            self.last_terminal_event = Instant::now();
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick {
                now: self.mounted_at.elapsed(),
            });
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                debug!(%url, "opening link");
                if let Err(err) = open::that(&url) {
                    warn!(%url, error = %err, "failed to open link");
                }
            }
        }
    }
}

impl Drop for PresentationRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Persisted store under FOLIO_HOME, or an in-memory one when persistence is
/// disabled or no home directory is known.
fn preference_store(persist: bool) -> Box<dyn PreferenceStore> {
    match paths::preferences_path() {
        Some(path) if persist => Box::new(FilePreferenceStore::new(path)),
        _ => Box::new(MemoryPreferenceStore::new()),
    }
}
