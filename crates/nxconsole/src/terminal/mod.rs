//! Terminal surface and local line editing for remote sessions.
//!
//! This module owns everything between a keystroke and a pixel:
//! - Key event encoding into terminal input data (input.rs)
//! - Input classification (keys.rs)
//! - Line buffer and command history (editor.rs)
//! - VT100 screen model receiving remote output (surface.rs)
//! - Screen rendering to ratatui (render.rs)
//! - Container-driven geometry fitting (resize.rs)
//!
//! Nothing here knows about sockets; the session controller wires the
//! editor and surface to a connection.

mod editor;
mod input;
mod keys;
mod render;
mod resize;
mod surface;

pub use editor::{LineEditor, DEFAULT_HISTORY_LIMIT};
pub use input::key_event_to_data;
pub use resize::{FitCoordinator, Geometry, DEFAULT_SETTLE_DELAY};
pub use surface::{Surface, SurfaceOptions, VtSurface, DEFAULT_SCROLLBACK};

#[cfg(test)]
pub use editor::PROMPT_MARKER;
