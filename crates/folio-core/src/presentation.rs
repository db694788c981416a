//! Presentation controller: lifecycle owner of telemetry, theme and reveal.
//!
//! The controller is created by [`PresentationController::mount`] and torn
//! down by [`PresentationController::teardown`] (or drop). Beyond wiring it
//! only holds whether the compact navigation menu is open.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::parallax::{self, ParallaxFrame, ParallaxWeights};
use crate::reveal::{Advance, RevealSequencer, RevealSettings};
use crate::telemetry::{EventSource, ViewportTelemetry};
use crate::theme::{PreferenceStore, SystemAppearance, ThemeMode, ThemePreference};

/// Navigable page anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Experience,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Experience,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Home => 0,
            Section::About => 1,
            Section::Experience => 2,
            Section::Contact => 3,
        }
    }

    /// Maps a 1-based shortcut digit to a section.
    pub fn from_shortcut(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }
}

/// Scroll command produced by [`PresentationController::navigate_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub section: Section,
    /// Whether the menu was open and got closed by this navigation.
    pub closed_menu: bool,
}

/// Static options for a presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Headline revealed by the typewriter sequence.
    pub headline: String,
    pub reveal: RevealSettings,
    pub parallax: ParallaxWeights,
}

/// Environment collaborators handed over at mount.
pub struct MountContext<'a> {
    pub source: &'a dyn EventSource,
    pub store: Box<dyn PreferenceStore>,
    pub appearance: &'a dyn SystemAppearance,
}

/// Top-level coordinator.
#[derive(Debug)]
pub struct PresentationController {
    telemetry: ViewportTelemetry,
    theme: ThemePreference,
    reveal: RevealSequencer,
    weights: ParallaxWeights,
    menu_open: bool,
    mounted: bool,
}

impl PresentationController {
    /// Resolves the theme, attaches telemetry and schedules the reveal.
    ///
    /// # Errors
    /// Returns an error if telemetry cannot subscribe to the event source.
    /// Nothing stays subscribed in that case.
    pub fn mount(options: ControllerOptions, ctx: MountContext<'_>, now: Duration) -> Result<Self> {
        let theme = ThemePreference::resolve(ctx.store, ctx.appearance);

        let mut telemetry = ViewportTelemetry::new();
        telemetry.attach(ctx.source)?;

        let mut reveal = RevealSequencer::new(options.headline, options.reveal);
        reveal.start(now);

        info!(theme = theme.mode().as_str(), "presentation mounted");
        Ok(Self {
            telemetry,
            theme,
            reveal,
            weights: options.parallax,
            menu_open: false,
            mounted: true,
        })
    }

    /// Advances the reveal clock.
    pub fn tick(&mut self, now: Duration) -> Advance {
        self.reveal.advance(now)
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Requests a scroll to `section`, closing the menu if it was open.
    pub fn navigate_to(&mut self, section: Section) -> Navigation {
        let closed_menu = self.close_menu();
        Navigation {
            section,
            closed_menu,
        }
    }

    /// Flips the menu, returning the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Closes the menu. Returns true if it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    pub fn telemetry(&self) -> &ViewportTelemetry {
        &self.telemetry
    }

    /// Environment event entry point.
    pub fn telemetry_mut(&mut self) -> &mut ViewportTelemetry {
        &mut self.telemetry
    }

    /// Parallax layers for the current telemetry sample.
    pub fn frame(&self) -> ParallaxFrame {
        parallax::compute(&self.telemetry.current_sample(), &self.weights)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Cancels every reveal timer and releases every subscription.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        let timers = self.reveal.cancel();
        let subscriptions = self.telemetry.detach();
        info!(timers, subscriptions, "presentation torn down");
    }
}

impl Drop for PresentationController {
    fn drop(&mut self) {
        self.teardown();
    }
}
