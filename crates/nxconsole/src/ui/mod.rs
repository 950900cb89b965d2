//! UI rendering and layout utilities.
//!
//! Pure rendering logic separated from state. Functions here take data
//! and produce ratatui widgets without side effects.
//!
//! Submodules:
//! - layout: helpers for rect manipulation and centering
//! - widgets: list and status bar builders

mod layout;
mod widgets;

pub use layout::{centered_rect, inset_horizontal};
pub use widgets::{render_list, render_status};
