//! Duplex connections to remote devices.
//!
//! A connection carries submitted lines to the device and reports
//! everything that happens on the socket back to the event loop as
//! [`SocketEvent`]s tagged with the owning session id:
//! - Trait seams used by the session controller (this file)
//! - Websocket implementation on a background thread (ws.rs)
//!
//! Wire contract: every submitted line travels as one text frame
//! holding the line verbatim. Inbound frames are opaque terminal output.

mod ws;

use thiserror::Error;

pub use ws::{WsConnector, DEFAULT_CONNECT_TIMEOUT};

/// Close code used when the socket went away without a close handshake.
pub const ABNORMAL_CLOSE_CODE: u16 = 1006;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ReadyState {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ReadyState::Connecting => 0,
            ReadyState::Open => 1,
            ReadyState::Closing => 2,
            ReadyState::Closed => 3,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
    /// True when the close handshake completed.
    pub clean: bool,
}

impl CloseInfo {
    pub fn clean(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
            clean: true,
        }
    }

    pub fn abnormal(reason: impl Into<String>) -> Self {
        Self {
            code: ABNORMAL_CLOSE_CODE,
            reason: reason.into(),
            clean: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Message(String),
    Error(String),
    Closed(CloseInfo),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("connection is not open ({0:?})")]
    NotOpen(ReadyState),
    #[error("connection worker has stopped")]
    Disconnected,
}

/// One live duplex connection owned by a session.
pub trait Connection {
    fn ready_state(&self) -> ReadyState;

    /// Queue a submitted line for transmission. Fire and forget.
    fn send_text(&mut self, text: &str) -> Result<(), ConnectionError>;

    /// Begin closing. Calling it on a closed connection is a no-op.
    fn close(&mut self);
}

/// Creates connections whose events are reported under `session`.
pub trait Connector {
    type Conn: Connection;

    fn connect(&mut self, session: u64, url: &str) -> Self::Conn;
}

/// Server address and per-device path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub path_template: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path_template: path_template.into(),
        }
    }

    pub fn for_device(&self, device_id: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path_template.replace("{device_id}", device_id);
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
