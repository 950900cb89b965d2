//! Remote terminal sessions.
//!
//! A session binds one device to one connection and one terminal
//! surface. The controller owns at most one session at a time and is
//! the only place that creates or tears them down, so the connection
//! and surface always live and die together.
//!
//! Socket events carry the id of the session that opened the
//! connection; events for any other id are dropped, which keeps late
//! output from a torn-down connection off the screen.

use tracing::{debug, info, warn};

use crate::connection::{CloseInfo, Connection, Connector, Endpoint, ReadyState, SocketEvent};
use crate::directory::Device;
use crate::terminal::{Geometry, LineEditor, Surface};

const NOT_OPEN_WARNING: &str = "\r\n[Cannot send command: connection not open.]\r\n";

pub type SurfaceFactory<S> = Box<dyn FnMut(Geometry) -> S>;

/// One open terminal session.
pub struct Session<T, S> {
    id: u64,
    device: Device,
    url: String,
    connection: T,
    surface: S,
    editor: LineEditor,
}

impl<T: Connection, S: Surface> Session<T, S> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn ready_state(&self) -> ReadyState {
        self.connection.ready_state()
    }

    #[cfg(test)]
    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    fn teardown(mut self) {
        self.connection.close();
        self.surface.dispose();
    }
}

pub struct SessionController<C: Connector, S: Surface> {
    connector: C,
    endpoint: Endpoint,
    new_surface: SurfaceFactory<S>,
    history_limit: usize,
    next_id: u64,
    session: Option<Session<C::Conn, S>>,
}

impl<C: Connector, S: Surface> SessionController<C, S> {
    pub fn new(
        connector: C,
        endpoint: Endpoint,
        history_limit: usize,
        new_surface: SurfaceFactory<S>,
    ) -> Self {
        Self {
            connector,
            endpoint,
            new_surface,
            history_limit,
            next_id: 1,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session<C::Conn, S>> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_id(&self) -> Option<u64> {
        self.session.as_ref().map(|session| session.id)
    }

    /// Open a session for `device`, replacing any session for another device.
    ///
    /// Returns the id that tags this session's socket events.
    pub fn open(&mut self, device: Device, geometry: Geometry) -> u64 {
        if let Some(session) = &self.session {
            if session.device.id == device.id {
                return session.id;
            }
        }
        self.close();

        let id = self.next_id;
        self.next_id += 1;
        let url = self.endpoint.for_device(&device.id);
        info!(session = id, device = %device.id, url = %url, "opening session");

        let surface = (self.new_surface)(geometry);
        let connection = self.connector.connect(id, &url);
        self.session = Some(Session {
            id,
            device,
            url,
            connection,
            surface,
            editor: LineEditor::new(self.history_limit),
        });
        id
    }

    /// Close the connection and dispose the surface. Safe to repeat.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        info!(session = session.id, device = %session.device.id, "closing session");
        session.teardown();
    }

    /// Feed raw terminal input data from the surface.
    pub fn handle_input(&mut self, data: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let state = session.connection.ready_state();
        if state != ReadyState::Open {
            warn!(session = session.id, ?state, "input dropped, connection not open");
            session.surface.write(NOT_OPEN_WARNING);
            return;
        }

        let outcome = session.editor.feed(data);
        if outcome.is_empty() {
            return;
        }
        if !outcome.echo.is_empty() {
            session.surface.write(&outcome.echo);
        }
        if let Some(line) = outcome.submit {
            debug!(
                session = session.id,
                line = %line,
                history = session.editor.history_len(),
                "submitting line"
            );
            if let Err(err) = session.connection.send_text(&line) {
                warn!(session = session.id, "send failed: {err}");
                session.surface.write(NOT_OPEN_WARNING);
            }
        }
    }

    /// Apply a socket event reported for session `id`.
    pub fn handle_socket_event(&mut self, id: u64, event: SocketEvent) {
        let Some(session) = self.session.as_mut().filter(|session| session.id == id) else {
            debug!(session = id, ?event, "discarding event for stale session");
            return;
        };
        match event {
            SocketEvent::Opened => {
                let banner = format!("[Connected to {}]\r\n", session.device.name);
                session.surface.write(&banner);
            }
            SocketEvent::Message(payload) => session.surface.write(&payload),
            SocketEvent::Error(detail) => {
                let line = format!("\r\n\r\n[Connection error: {detail}]\r\n");
                session.surface.write(&line);
            }
            SocketEvent::Closed(info) => {
                info!(session = id, code = info.code, clean = info.clean, "connection closed");
                session.surface.write(&close_message(&info));
            }
        }
    }

    pub fn resize(&mut self, geometry: Geometry) {
        if let Some(session) = self.session.as_mut() {
            session.surface.resize(geometry);
        }
    }
}

impl<C: Connector, S: Surface> Drop for SessionController<C, S> {
    fn drop(&mut self) {
        self.close();
    }
}

fn close_message(info: &CloseInfo) -> String {
    if info.clean {
        return "\r\n\r\n[Connection closed.]\r\n".to_string();
    }
    let reason = if info.reason.trim().is_empty() {
        "N/A"
    } else {
        info.reason.as_str()
    };
    format!(
        "\r\n\r\n[Connection closed. Code: {}, Reason: {reason}]\r\n",
        info.code
    )
}
