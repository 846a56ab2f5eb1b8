//! Layout engine: the windowing computation and viewport scroll state.
//!
//! This module handles:
//! - Mapping a scroll position to the slice of rows to materialize
//! - Managing viewport state (scroll position, clamping after content changes)
//! - Hit testing a y-coordinate to a row index

mod viewport;
mod window;

pub use viewport::Viewport;
pub use window::{compute_window, max_span};
