//! Shared helpers for rendering.

mod style;
mod text;

pub use style::{Styles, color};
pub use text::{truncate_with_ellipsis, wrap_words};
