//! Terminal lifecycle management.
//!
//! This module handles terminal setup, restore, and panic hooks, plus the
//! [`TerminalSignals`] event source that telemetry subscribes to.
//! Terminal state is guaranteed to be restored on:
//! - Normal exit (via Drop)
//! - Panic

use std::cell::Cell;
use std::io::{self, Stdout};
use std::panic;
use std::rc::Rc;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use folio_core::telemetry::{EventSource, Signal, Subscription};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

/// Sets up the terminal for the TUI.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Call `install_panic_hook()` before this to ensure terminal restore on panic.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    Ok(terminal)
}

/// Restores terminal state.
///
/// - Disables mouse capture (safe to call even if not enabled)
/// - Leaves alternate screen
/// - Disables raw mode
///
/// This function is idempotent and safe to call multiple times.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    // Must happen before leaving raw mode
    let _ = execute!(io::stdout(), DisableMouseCapture);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    let _ = execute!(io::stdout(), Show);
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this BEFORE `setup_terminal()` to ensure terminal restore on panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Event source backed by the controlling terminal.
///
/// Pointer and scroll subscriptions share terminal mouse capture: it is
/// enabled with the first of them and disabled when the last one is
/// released. Resize events are always reported by the terminal, so that
/// subscription owns nothing.
#[derive(Debug, Default)]
pub struct TerminalSignals {
    mouse_users: Rc<Cell<usize>>,
}

impl TerminalSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions holding mouse capture.
    pub fn mouse_users(&self) -> usize {
        self.mouse_users.get()
    }

    fn acquire_mouse(&self) -> Result<()> {
        if self.mouse_users.get() == 0 {
            execute!(io::stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;
            debug!("mouse capture enabled");
        }
        self.mouse_users.set(self.mouse_users.get() + 1);
        Ok(())
    }
}

fn release_mouse(users: &Cell<usize>) {
    let remaining = users.get().saturating_sub(1);
    users.set(remaining);
    if remaining == 0 {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        debug!("mouse capture disabled");
    }
}

impl EventSource for TerminalSignals {
    fn subscribe(&self, signal: Signal) -> Result<Subscription> {
        match signal {
            Signal::PointerMove | Signal::Scroll => {
                self.acquire_mouse()?;
                let users = Rc::clone(&self.mouse_users);
                Ok(Subscription::new(signal, move || release_mouse(&users)))
            }
            Signal::Resize => Ok(Subscription::noop(signal)),
        }
    }
}
