//! Core Folio library (telemetry, theme, reveal sequencing, parallax, config).
//!
//! Everything in this crate is terminal-agnostic. The TUI crate feeds it
//! environment events and logical time, then renders what it exposes.

pub mod clock;
pub mod config;
pub mod parallax;
pub mod presentation;
pub mod profile;
pub mod reveal;
pub mod telemetry;
pub mod theme;
