//! Application state types and core data structures.
//!
//! Defines the App struct which holds all mutable application state:
//! the company/device browser and the single remote terminal session.

use std::sync::mpsc::Sender;

use crate::config::Config;
use crate::connection::{Connector, Endpoint, WsConnector};
use crate::directory::{filter_companies, Company, Device, Directory};
use crate::events::AppEvent;
use crate::keymap::Keymap;
use crate::session::SessionController;
use crate::terminal::{FitCoordinator, VtSurface};

/// Which list receives navigation keys while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Companies,
    Devices,
}

/// Main application state container.
///
/// Methods are split across input.rs (event handling) and render.rs
/// (UI drawing).
pub struct App<C: Connector = WsConnector> {
    pub config: Config,
    pub keymap: Keymap,
    pub directory: Box<dyn Directory>,
    pub cities: Vec<String>,
    /// Index into `cities`; None shows every city.
    pub city_filter: Option<usize>,
    pub search: String,
    pub search_active: bool,
    pub focus: Focus,
    pub company_selected: usize,
    pub active_company: Option<String>,
    pub devices: Vec<Device>,
    pub device_selected: usize,
    pub sessions: SessionController<C, VtSurface>,
    pub fit: FitCoordinator,
    pub event_tx: Sender<AppEvent>,
    pub output: Option<String>,
    pub should_quit: bool,
}

impl<C: Connector> App<C> {
    pub fn new(
        config: Config,
        directory: Box<dyn Directory>,
        connector: C,
        event_tx: Sender<AppEvent>,
    ) -> Self {
        let keymap = Keymap::from_config(&config.keymap);
        let endpoint = Endpoint::new(config.server.url.clone(), config.server.path.clone());
        let surface_options = config.terminal.surface_options();
        let sessions = SessionController::new(
            connector,
            endpoint,
            config.terminal.history_limit,
            Box::new(move |geometry| VtSurface::new(geometry, surface_options)),
        );
        let cities = directory.cities();
        Self {
            config,
            keymap,
            directory,
            cities,
            city_filter: None,
            search: String::new(),
            search_active: false,
            focus: Focus::Companies,
            company_selected: 0,
            active_company: None,
            devices: Vec::new(),
            device_selected: 0,
            sessions,
            fit: FitCoordinator::new(),
            event_tx,
            output: None,
            should_quit: false,
        }
    }

    pub fn city(&self) -> Option<&str> {
        self.city_filter
            .and_then(|index| self.cities.get(index))
            .map(String::as_str)
    }

    /// Companies matching the current search and city filter.
    pub fn visible_companies(&self) -> Vec<&Company> {
        filter_companies(self.directory.companies(), &self.search, self.city())
    }

    pub fn selected_company(&self) -> Option<&Company> {
        self.visible_companies()
            .get(self.company_selected)
            .copied()
    }

    pub fn active_company(&self) -> Option<&Company> {
        self.active_company
            .as_deref()
            .and_then(|id| self.directory.company(id))
    }

    /// Set the status message shown in the footer.
    pub fn set_output(&mut self, message: impl Into<String>) {
        let message = message.into();
        let trimmed = message.trim();
        self.output = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}
