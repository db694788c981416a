//! Overlays drawn above the page.

pub mod menu;
