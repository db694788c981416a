//! Status line feature slice.
//!
//! Optional diagnostic bar at the bottom of the screen: frame rate, reveal
//! phase and the live telemetry sample. Toggled with F12.
//!
//! - `state.rs`: StatusLineAccumulator (mutable counters) and StatusLine (immutable snapshot)
//! - `render.rs`: Status line rendering

mod render;
mod state;

pub use render::render_status_line;
pub use state::{StatusLine, StatusLineAccumulator};
