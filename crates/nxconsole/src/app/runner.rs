//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the main event loop.
//! Events are read from an mpsc channel and dispatched to handlers.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::{load_config, Config};
use crate::connection::WsConnector;
use crate::directory::{ApiClient, ApiDirectory, Directory, SeedDirectory};
use crate::events::AppEvent;

use super::state::App;

/// Entry point: set up terminal and run the event loop.
pub fn run(config_path: Option<PathBuf>) -> io::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd, config_path.as_deref());
    let (directory, status) = load_directory(&config);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config, directory, status);

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: process events until quit.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    directory: Box<dyn Directory>,
    status: Option<String>,
) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_thread(event_tx.clone());

    let connector = WsConnector::new(event_tx.clone(), config.terminal.connect_timeout);
    let mut app = App::new(config, directory, connector, event_tx);
    if let Some(status) = status {
        app.set_output(status);
    }
    terminal.clear()?;
    terminal.draw(|frame| super::render::render(&mut app, frame))?;

    while !app.should_quit {
        let event = match event_rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        super::input::handle_event(&mut app, event);
        // Drain any pending events before redraw
        while let Ok(event) = event_rx.try_recv() {
            super::input::handle_event(&mut app, event);
        }
        terminal.draw(|frame| super::render::render(&mut app, frame))?;
    }
    app.sessions.close();
    Ok(())
}

/// Spawn a thread to read terminal input events.
fn spawn_input_thread(sender: Sender<AppEvent>) {
    std::thread::spawn(move || loop {
        let event = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Input(key),
            Ok(Event::Paste(text)) => AppEvent::Paste(text),
            Ok(Event::Resize(cols, rows)) => AppEvent::Resize(rows, cols),
            Ok(_) => continue,
            Err(_) => break,
        };
        if sender.send(event).is_err() {
            break;
        }
    });
}

/// Pick the company source: the REST API when configured, else the bundled list.
fn load_directory(config: &Config) -> (Box<dyn Directory>, Option<String>) {
    let Some(base_url) = config.api.base_url.as_deref() else {
        return (Box::new(SeedDirectory::new()), None);
    };
    match ApiClient::new(base_url).and_then(|client| ApiDirectory::load(&client)) {
        Ok(directory) => {
            info!(base_url, companies = directory.companies().len(), "loaded company directory");
            (Box::new(directory), None)
        }
        Err(err) => {
            warn!(base_url, "company API unavailable: {err}");
            (
                Box::new(SeedDirectory::new()),
                Some(format!("Company API unavailable, using bundled list ({err})")),
            )
        }
    }
}
