//! Mock device server.
//!
//! Accepts websocket sessions on `/ws/{device_id}` and answers each
//! received line with simulated device output followed by a prompt.
//! Frames use the same raw-line format the console sends.

use std::io;
use std::net::{TcpListener, TcpStream};
use std::thread;

use tracing::{debug, info, warn};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::{Error as WsError, Message, WebSocket};

use crate::directory::SANDBOX_DEVICE_ID;

const ROUTE_PREFIX: &str = "/ws/";

/// Bind `addr` and serve until the listener fails.
pub fn serve(addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(addr)?;
    info!(addr = %listener.local_addr()?, "mock device server listening");
    run(listener)
}

/// Accept connections on `listener`, one thread per client.
pub fn run(listener: TcpListener) -> io::Result<()> {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!("accept failed: {err}");
                continue;
            }
        };
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        thread::spawn(move || handle_client(stream, &peer));
    }
    Ok(())
}

fn handle_client(stream: TcpStream, peer: &str) {
    let mut device_id = None;
    let accepted = tungstenite::accept_hdr(stream, |request: &Request, response: Response| {
        match device_id_from_path(request.uri().path()) {
            Some(id) => {
                device_id = Some(id);
                Ok(response)
            }
            None => {
                debug!(peer, path = request.uri().path(), "rejecting unknown route");
                Err(not_found())
            }
        }
    });
    let socket = match accepted {
        Ok(socket) => socket,
        Err(err) => {
            warn!(peer, "handshake failed: {err}");
            return;
        }
    };
    let Some(device_id) = device_id else {
        return;
    };

    info!(device = %device_id, peer, "device session established");
    if let Err(err) = run_session(socket, &device_id) {
        warn!(device = %device_id, "session error: {err}");
    }
    info!(device = %device_id, "device session closed");
}

fn run_session(mut socket: WebSocket<TcpStream>, device_id: &str) -> Result<(), WsError> {
    socket.send(Message::Text(greeting(device_id)))?;
    loop {
        let command = match socket.read() {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(_) => continue,
            Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => return Ok(()),
            Err(err) => return Err(err),
        };
        info!(device = %device_id, command = %command, "received command");
        socket.send(Message::Text(respond(device_id, &command)))?;
    }
}

fn device_id_from_path(path: &str) -> Option<String> {
    let id = path.strip_prefix(ROUTE_PREFIX)?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id.to_string())
}

fn not_found() -> ErrorResponse {
    let mut response = ErrorResponse::new(Some("not found".to_string()));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Shell prompt shown for `device_id`.
pub fn prompt_for(device_id: &str) -> String {
    if device_id == SANDBOX_DEVICE_ID {
        return "nx-sandbox# ".to_string();
    }
    match device_id.split_once('-') {
        Some((prefix, _)) => format!("{}# ", prefix.to_lowercase()),
        None => "switch# ".to_string(),
    }
}

pub fn greeting(device_id: &str) -> String {
    format!(
        "Successfully connected to device: {device_id}\n{}",
        prompt_for(device_id)
    )
}

/// Simulated output for one received line, ending in the prompt.
pub fn respond(device_id: &str, command: &str) -> String {
    let prompt = prompt_for(device_id);
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return prompt;
    }
    if trimmed.eq_ignore_ascii_case("show version") {
        return format!("\nMock 'show version' for {device_id}\n{prompt}");
    }
    format!("\nCommand '{command}' executed (simulated for {device_id}).\n{prompt}")
}
