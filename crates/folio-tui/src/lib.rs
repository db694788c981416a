//! Full-screen terminal front end for Folio.
//!
//! Elm-style layout: `update` is the only place state changes, `render` draws
//! a frame from state, and `runtime` owns the terminal and runs effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Result, bail};
pub use features::{page, statusline};
use folio_core::config::Config;
use folio_core::profile::Profile;
use folio_core::theme::ThemeMode;
pub use runtime::PresentationRuntime;

/// Launch choices made on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Replaces the system appearance signal. A persisted preference still wins.
    pub theme_override: Option<ThemeMode>,
    /// Save theme toggles to the preferences file.
    pub persist: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            theme_override: None,
            persist: true,
        }
    }
}

/// Runs the presentation until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the terminal cannot be set
/// up, or drawing fails.
pub fn run_presentation(config: &Config, profile: Profile, options: LaunchOptions) -> Result<()> {
    if !stdout().is_terminal() {
        bail!("folio needs an interactive terminal (stdout is not a TTY)");
    }
    let mut runtime = PresentationRuntime::new(config, profile, options)?;
    runtime.run()
}
