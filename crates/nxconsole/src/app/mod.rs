//! Application orchestration and main event loop.
//!
//! The app is structured around a single `App` struct that holds all
//! state. Events from the input thread, connection threads and settle
//! timers are processed sequentially in the main loop.
//!
//! Submodules:
//! - state: App struct and type definitions
//! - runner: main loop and terminal setup
//! - input: keyboard and paste handling
//! - render: UI rendering

mod input;
mod render;
mod runner;
mod state;

pub use runner::run;
