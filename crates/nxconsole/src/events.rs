//! Application event types.
//!
//! Every source of change (the input thread, connection I/O threads,
//! settle timers) posts one of these into the main loop's channel.
//! Events are processed one at a time on the loop thread, so all
//! session state transitions happen there.

use crossterm::event::KeyEvent;

use crate::connection::SocketEvent;

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    /// Connection activity, tagged with the session it belongs to.
    Socket { session: u64, event: SocketEvent },
    /// The settle delay after opening `session` has elapsed.
    SessionSettled(u64),
}
