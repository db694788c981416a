//! Feature slices for the TUI (state/update/render per slice).

pub mod backdrop;
pub mod header;
pub mod page;
pub mod statusline;
