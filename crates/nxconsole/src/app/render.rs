//! UI rendering.
//!
//! Layout: header | company list + device list | status bar, with the
//! terminal modal drawn on top while a session is open. Drawing the
//! modal is also where the terminal learns its container size.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::connection::{Connector, ReadyState};
use crate::directory::{Device, DeviceStatus};
use crate::ui::{centered_rect, inset_horizontal, render_list, render_status};

use super::state::{App, Focus};

const HORIZONTAL_PADDING: u16 = 1;

/// Main render entry point. Called each frame by the event loop.
pub fn render<C: Connector>(app: &mut App<C>, frame: &mut Frame) {
    let area = frame.area();
    let [header, body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

    render_header(app, frame, inset_horizontal(header, HORIZONTAL_PADDING));

    let [companies, devices] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .areas(body);
    render_companies(app, frame, companies);
    render_devices(app, frame, devices);

    let footer = inset_horizontal(footer, HORIZONTAL_PADDING);
    match &app.output {
        Some(message) => render_status(frame, footer, message, true),
        None => render_status(frame, footer, &browse_hint(app), false),
    }

    if app.sessions.is_open() {
        render_console(app, frame, area);
    }
}

fn render_header<C: Connector>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        "Facility Maintenance Console",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let city = app.city().unwrap_or("all");
    spans.push(Span::styled(
        format!("  city: {city}"),
        Style::default().fg(Color::Gray),
    ));
    if app.search_active || !app.search.is_empty() {
        let cursor = if app.search_active { "_" } else { "" };
        spans.push(Span::styled(
            format!("  search: {}{cursor}", app.search),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_companies<C: Connector>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let companies = app.visible_companies();
    let title = format!("Companies ({})", companies.len());
    let items = companies
        .iter()
        .map(|company| {
            let marker = if app.active_company.as_deref() == Some(company.id.as_str()) {
                "* "
            } else {
                "  "
            };
            Line::from(vec![
                Span::raw(format!("{marker}{}", company.name)),
                Span::styled(
                    format!("  {}", company.city),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    render_list(
        frame,
        area,
        &title,
        items,
        app.company_selected,
        app.focus == Focus::Companies,
        "No companies match",
    );
}

fn render_devices<C: Connector>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let title = match app.active_company() {
        Some(company) => format!("Devices - {}", company.name),
        None => "Devices".to_string(),
    };
    let items = app.devices.iter().map(device_line).collect();
    render_list(
        frame,
        area,
        &title,
        items,
        app.device_selected,
        app.focus == Focus::Devices,
        "Select a company to list its devices",
    );
}

fn device_line(device: &Device) -> Line<'static> {
    let status_color = match device.status {
        DeviceStatus::Online => Color::Green,
        DeviceStatus::Offline => Color::Red,
        DeviceStatus::Maintenance => Color::Yellow,
    };
    Line::from(vec![
        Span::raw(format!("{:<28}", device.name)),
        Span::styled(
            format!("{:<36}", device.model),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:<18}", device.address),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            device.status.label().to_string(),
            Style::default().fg(status_color),
        ),
    ])
}

fn browse_hint<C: Connector>(app: &App<C>) -> String {
    if app.search_active {
        return "type to search  Enter keep  Esc clear".to_string();
    }
    format!(
        "/ search  c city  Tab focus  Enter select  {} quit",
        app.keymap.quit.label()
    )
}

/// Draw the terminal modal and apply any pending fit.
fn render_console<C: Connector>(app: &mut App<C>, frame: &mut Frame, area: Rect) {
    let Some(session) = app.sessions.session() else {
        return;
    };
    let title = format!(" {} - Virtual Console ", session.device().name);
    let state = session.ready_state();
    let url = session.url().to_string();

    let modal = centered_rect(90, 85, area);
    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let [screen, hint] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(inner);

    app.fit.observe(screen);
    if let Some(geometry) = app.fit.take_fit() {
        app.sessions.resize(geometry);
    }

    if let Some(session) = app.sessions.session() {
        let lines = session.surface().render_lines(screen.height, screen.width);
        frame.render_widget(Paragraph::new(lines), screen);
    }

    let hint_text = format!(
        "{} close console  |  {}  {url}",
        app.keymap.close_session.label(),
        state_label(state)
    );
    render_status(frame, hint, &hint_text, false);
}

fn state_label(state: ReadyState) -> &'static str {
    match state {
        ReadyState::Connecting => "connecting",
        ReadyState::Open => "connected",
        ReadyState::Closing => "closing",
        ReadyState::Closed => "disconnected",
    }
}
