//! Event handling.
//!
//! While a session is open every key except the close chord is encoded
//! as terminal input and handed to the session controller. Otherwise
//! keys drive the company and device browser.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::connection::Connector;
use crate::events::AppEvent;
use crate::keymap::matches_chord;
use crate::terminal::key_event_to_data;

use super::state::{App, Focus};

pub fn handle_event<C: Connector>(app: &mut App<C>, event: AppEvent) {
    match event {
        AppEvent::Input(key) => handle_key(app, key),
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Resize(_, _) => app.fit.on_window_resize(),
        AppEvent::Socket { session, event } => app.sessions.handle_socket_event(session, event),
        AppEvent::SessionSettled(id) => {
            if app.sessions.active_id() == Some(id) {
                app.fit.on_settled();
            }
        }
    }
}

fn handle_key<C: Connector>(app: &mut App<C>, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if app.sessions.is_open() {
        handle_console_key(app, key);
    } else if app.search_active {
        handle_search_key(app, key);
    } else {
        handle_browse_key(app, key);
    }
}

fn handle_paste<C: Connector>(app: &mut App<C>, text: &str) {
    if app.sessions.is_open() {
        app.sessions.handle_input(text);
    } else if app.search_active {
        app.search.extend(text.chars().filter(|ch| !ch.is_control()));
        app.company_selected = 0;
    }
}

fn handle_console_key<C: Connector>(app: &mut App<C>, key: KeyEvent) {
    if matches_chord(key, &app.keymap.close_session) {
        close_session(app);
        return;
    }
    if let Some(data) = key_event_to_data(key) {
        app.sessions.handle_input(&data);
    }
}

fn handle_search_key<C: Connector>(app: &mut App<C>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_active = false;
            app.search.clear();
        }
        KeyCode::Enter => app.search_active = false,
        KeyCode::Backspace => {
            app.search.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search.push(ch);
        }
        _ => return,
    }
    app.company_selected = 0;
}

fn handle_browse_key<C: Connector>(app: &mut App<C>, key: KeyEvent) {
    if matches_chord(key, &app.keymap.quit) {
        app.should_quit = true;
        return;
    }
    match key.code {
        KeyCode::Char('/') => {
            app.search_active = true;
            app.focus = Focus::Companies;
        }
        KeyCode::Char('c') => cycle_city(app),
        KeyCode::Tab => toggle_focus(app),
        KeyCode::Esc if app.focus == Focus::Devices => app.focus = Focus::Companies,
        KeyCode::Up | KeyCode::Char('k') => move_selection(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, 1),
        KeyCode::Enter => match app.focus {
            Focus::Companies => select_company(app),
            Focus::Devices => open_selected_device(app),
        },
        _ => {}
    }
}

fn cycle_city<C: Connector>(app: &mut App<C>) {
    app.city_filter = match app.city_filter {
        None if !app.cities.is_empty() => Some(0),
        Some(index) if index + 1 < app.cities.len() => Some(index + 1),
        _ => None,
    };
    app.company_selected = 0;
    let label = app.city().unwrap_or("all cities").to_string();
    app.set_output(format!("Showing {label}"));
}

fn toggle_focus<C: Connector>(app: &mut App<C>) {
    app.focus = match app.focus {
        Focus::Companies if !app.devices.is_empty() => Focus::Devices,
        _ => Focus::Companies,
    };
}

fn move_selection<C: Connector>(app: &mut App<C>, delta: isize) {
    let (selected, len) = match app.focus {
        Focus::Companies => {
            let len = app.visible_companies().len();
            (&mut app.company_selected, len)
        }
        Focus::Devices => (&mut app.device_selected, app.devices.len()),
    };
    if len == 0 {
        *selected = 0;
        return;
    }
    let next = (*selected as isize + delta).clamp(0, len as isize - 1);
    *selected = next as usize;
}

fn select_company<C: Connector>(app: &mut App<C>) {
    let Some(company) = app.selected_company() else {
        return;
    };
    let id = company.id.clone();
    let name = company.name.clone();
    app.devices = app.directory.devices(&id);
    app.device_selected = 0;
    app.active_company = Some(id);
    app.focus = Focus::Devices;
    app.set_output(format!("{name}: {} devices", app.devices.len()));
}

fn open_selected_device<C: Connector>(app: &mut App<C>) {
    let Some(device) = app.devices.get(app.device_selected).cloned() else {
        return;
    };
    let name = device.name.clone();
    let id = app.sessions.open(device, app.fit.geometry());
    spawn_settle_timer(app.event_tx.clone(), id, app.config.terminal.settle_delay);
    app.set_output(format!("Console opened for {name}"));
}

fn close_session<C: Connector>(app: &mut App<C>) {
    let name = app
        .sessions
        .session()
        .map(|session| session.device().name.clone());
    app.sessions.close();
    app.fit.unmount();
    if let Some(name) = name {
        app.set_output(format!("Console closed for {name}"));
    }
}

/// Post `SessionSettled(id)` once the open delay has elapsed.
fn spawn_settle_timer(sender: Sender<AppEvent>, id: u64, delay: Duration) {
    debug!(session = id, ?delay, "scheduling settle fit");
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(AppEvent::SessionSettled(id));
    });
}
