//! Websocket connection backed by a dedicated I/O thread.
//!
//! The thread owns the socket: it connects, forwards inbound frames to
//! the app as `AppEvent::Socket`, and writes queued outbound lines. The
//! handle kept by the session only shares the ready state and a queue.
//! TCP connect and the handshake are both bounded by a connect timeout.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use tungstenite::client::IntoClientRequest;
use tungstenite::error::UrlError;
use tungstenite::handshake::HandshakeError;
use tungstenite::{Error as WsError, Message, WebSocket};

use crate::events::AppEvent;

use super::{CloseInfo, Connection, ConnectionError, Connector, ReadyState, SocketEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

type Socket = WebSocket<TcpStream>;

enum Outbound {
    Line(String),
    Close,
}

#[derive(Debug, Default)]
struct SharedState(AtomicU8);

impl SharedState {
    fn get(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, state: ReadyState) {
        self.0.store(state.as_u8(), Ordering::SeqCst);
    }

    /// Move to `next` only if the current state is `expected`.
    fn transition(&self, expected: ReadyState, next: ReadyState) -> bool {
        self.0
            .compare_exchange(
                expected.as_u8(),
                next.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }
}

/// Opens websocket connections that report into the app event channel.
pub struct WsConnector {
    events: Sender<AppEvent>,
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(events: Sender<AppEvent>, connect_timeout: Duration) -> Self {
        Self {
            events,
            connect_timeout,
        }
    }
}

impl Connector for WsConnector {
    type Conn = WsConnection;

    fn connect(&mut self, session: u64, url: &str) -> WsConnection {
        WsConnection::spawn(
            session,
            url.to_string(),
            self.connect_timeout,
            self.events.clone(),
        )
    }
}

pub struct WsConnection {
    state: Arc<SharedState>,
    outbound: Sender<Outbound>,
}

impl WsConnection {
    fn spawn(
        session: u64,
        url: String,
        connect_timeout: Duration,
        events: Sender<AppEvent>,
    ) -> Self {
        let state = Arc::new(SharedState::default());
        let (outbound_tx, outbound_rx) = mpsc::channel();
        let worker = Worker {
            session,
            url,
            connect_timeout,
            state: Arc::clone(&state),
            outbound: outbound_rx,
            events,
        };
        thread::spawn(move || worker.run());
        Self {
            state,
            outbound: outbound_tx,
        }
    }
}

impl Connection for WsConnection {
    fn ready_state(&self) -> ReadyState {
        self.state.get()
    }

    fn send_text(&mut self, text: &str) -> Result<(), ConnectionError> {
        let state = self.state.get();
        if state != ReadyState::Open {
            return Err(ConnectionError::NotOpen(state));
        }
        self.outbound
            .send(Outbound::Line(text.to_string()))
            .map_err(|_| ConnectionError::Disconnected)
    }

    fn close(&mut self) {
        let closing = self
            .state
            .transition(ReadyState::Connecting, ReadyState::Closing)
            || self.state.transition(ReadyState::Open, ReadyState::Closing);
        if closing {
            let _ = self.outbound.send(Outbound::Close);
        }
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.close();
    }
}

struct Worker {
    session: u64,
    url: String,
    connect_timeout: Duration,
    state: Arc<SharedState>,
    outbound: Receiver<Outbound>,
    events: Sender<AppEvent>,
}

impl Worker {
    fn run(self) {
        let close = match self.open_socket() {
            Ok(socket) => self.serve(socket),
            Err(err) => {
                warn!(session = self.session, url = %self.url, "connect failed: {err}");
                self.post(SocketEvent::Error(err.to_string()));
                CloseInfo::abnormal(String::new())
            }
        };
        self.state.set(ReadyState::Closed);
        debug!(session = self.session, code = close.code, "socket closed");
        self.post(SocketEvent::Closed(close));
    }

    /// Resolve the endpoint, connect and run the client handshake.
    fn open_socket(&self) -> Result<Socket, WsError> {
        let request = self.url.as_str().into_client_request()?;
        let uri = request.uri();
        match uri.scheme_str() {
            Some("ws") => {}
            Some("wss") => return Err(WsError::Url(UrlError::TlsFeatureNotEnabled)),
            _ => return Err(WsError::Url(UrlError::UnsupportedUrlScheme)),
        }
        let host = uri
            .host()
            .ok_or(WsError::Url(UrlError::NoHostName))?
            .trim_start_matches('[')
            .trim_end_matches(']');
        let port = uri.port_u16().unwrap_or(80);

        let mut last_err = None;
        let mut stream = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(connected) => {
                    stream = Some(connected);
                    break;
                }
                Err(err) => {
                    debug!(session = self.session, %addr, "connect attempt failed: {err}");
                    last_err = Some(err);
                }
            }
        }
        let stream = match stream {
            Some(stream) => stream,
            None => {
                return Err(WsError::Io(last_err.unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
                })))
            }
        };
        stream.set_read_timeout(Some(self.connect_timeout))?;
        stream.set_write_timeout(Some(self.connect_timeout))?;

        let (socket, _response) = tungstenite::client(request, stream).map_err(|err| match err {
            HandshakeError::Failure(err) => err,
            HandshakeError::Interrupted(_) => WsError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "websocket handshake timed out",
            )),
        })?;
        Ok(socket)
    }

    fn serve(&self, mut socket: Socket) -> CloseInfo {
        // Closed by the user while the handshake was still running.
        if !self.state.transition(ReadyState::Connecting, ReadyState::Open) {
            let _ = socket.close(None);
            let _ = socket.flush();
            return CloseInfo::clean(1000, "");
        }
        if let Err(err) = socket.get_mut().set_read_timeout(Some(POLL_INTERVAL)) {
            warn!(session = self.session, "cannot set read timeout: {err}");
        }
        info!(session = self.session, url = %self.url, "connected");
        self.post(SocketEvent::Opened);

        let mut received_close: Option<CloseInfo> = None;
        let mut close_sent = false;
        let mut close_deadline: Option<Instant> = None;
        loop {
            // The close handshake did not finish in time.
            if close_deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return received_close.unwrap_or_else(|| CloseInfo::clean(1000, ""));
            }
            if !close_sent {
                match self.drain_outbound(&mut socket, received_close.is_some()) {
                    Ok(false) => {}
                    Ok(true) => {
                        close_sent = true;
                        close_deadline = Some(Instant::now() + CLOSE_TIMEOUT);
                    }
                    Err(err) => return self.fail(err),
                }
            }

            match socket.read() {
                Ok(Message::Text(text)) => self.post(SocketEvent::Message(text)),
                Ok(Message::Binary(bytes)) => {
                    self.post(SocketEvent::Message(
                        String::from_utf8_lossy(&bytes).into_owned(),
                    ));
                }
                Ok(Message::Close(frame)) => {
                    // No more sends once the peer has started closing.
                    self.state.set(ReadyState::Closing);
                    received_close = Some(match frame {
                        Some(frame) => CloseInfo::clean(u16::from(frame.code), frame.reason),
                        None => CloseInfo::clean(1005, ""),
                    });
                    close_deadline.get_or_insert(Instant::now() + CLOSE_TIMEOUT);
                }
                Ok(_) => {}
                Err(WsError::Io(err)) if is_timeout(&err) => {}
                Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => {
                    return received_close.unwrap_or_else(|| CloseInfo::clean(1000, ""));
                }
                Err(err) => return self.fail(err),
            }
        }
    }

    /// Write queued lines. Returns true once a close has been sent.
    ///
    /// After the peer's close frame, queued lines are discarded and the
    /// close reply tungstenite already queued is left to the next read.
    fn drain_outbound(&self, socket: &mut Socket, peer_closed: bool) -> Result<bool, WsError> {
        loop {
            match self.outbound.try_recv() {
                Ok(Outbound::Line(line)) if peer_closed => {
                    debug!(
                        session = self.session,
                        bytes = line.len(),
                        "dropping line after peer close"
                    );
                }
                Ok(Outbound::Close) | Err(TryRecvError::Disconnected) if peer_closed => {
                    return Ok(false);
                }
                Ok(Outbound::Line(line)) => {
                    debug!(session = self.session, bytes = line.len(), "sending line");
                    socket.send(Message::Text(line))?;
                }
                Ok(Outbound::Close) | Err(TryRecvError::Disconnected) => {
                    self.state.set(ReadyState::Closing);
                    socket.close(None)?;
                    return Ok(true);
                }
                Err(TryRecvError::Empty) => return Ok(false),
            }
        }
    }

    fn fail(&self, err: WsError) -> CloseInfo {
        warn!(session = self.session, "socket error: {err}");
        self.post(SocketEvent::Error(err.to_string()));
        CloseInfo::abnormal(String::new())
    }

    fn post(&self, event: SocketEvent) {
        let _ = self.events.send(AppEvent::Socket {
            session: self.session,
            event,
        });
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
