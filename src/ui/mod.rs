//! UI module for subway-waker
//!
//! Rendering only: every function here reads [`App`] and draws it. The
//! screen is a header with the wizard step and selections, a body for the
//! current phase, and a footer with errors and key hints. A raised alarm
//! covers the body with a flashing overlay.

mod helpers;
mod tracking;
mod wizard;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::machine::Phase;
use crate::theme::{
    line_color, AMBER_ACCENT, BG_PRIMARY, RED_ALARM, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};

const TOTAL_STEPS: usize = 6;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BG_PRIMARY)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Phase body
            Constraint::Length(2), // Error line + key hints
        ])
        .split(area);

    render_header(frame, layout[0], app);

    match app.phase() {
        Phase::SelectLine => wizard::render_lines(frame, layout[1], app),
        Phase::SelectStation => wizard::render_stations(frame, layout[1], app, "Boarding station"),
        Phase::SelectTrain => wizard::render_trains(frame, layout[1], app),
        Phase::SetDestination => wizard::render_stations(frame, layout[1], app, "Get off at"),
        Phase::Tracking => tracking::render_tracking(frame, layout[1], app),
        Phase::Completed => tracking::render_completed(frame, layout[1], app),
    }

    render_footer(frame, layout[2], app);

    if app.is_alerting() {
        tracking::render_alarm(frame, layout[1], app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let phase = app.phase();
    let title = Line::from(vec![
        Span::styled(
            " SUBWAY WAKER ",
            Style::default().fg(AMBER_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" step {}/{} ", phase.step(), TOTAL_STEPS),
            Style::default().fg(TEXT_MUTED),
        ),
        Span::styled(
            phase.title(),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
    ]);

    // Breadcrumb of what has been chosen so far
    let session = &app.session;
    let mut crumbs: Vec<Span> = vec![Span::raw(" ")];
    if let Some(line) = &session.line {
        crumbs.push(Span::styled(
            format!(" {} ", line.name),
            Style::default().fg(Color::Black).bg(line_color(&line.color)),
        ));
    }
    let mut push_crumb = |label: &str, value: &str| {
        crumbs.push(Span::styled(format!("  {} ", label), Style::default().fg(TEXT_MUTED)));
        crumbs.push(Span::styled(value.to_string(), Style::default().fg(TEXT_SECONDARY)));
    };
    if let Some(station) = &session.departure_station {
        push_crumb("from", station);
    }
    if let Some(train) = &session.train {
        push_crumb("train", &train.id);
    }
    if let Some(destination) = &session.destination {
        push_crumb("to", destination);
    }

    frame.render_widget(Paragraph::new(vec![title, Line::from(crumbs)]), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(error) = &app.session.last_error {
        // Tracking errors are transient, selection errors block progress
        let color = if app.phase() == Phase::Tracking {
            TEXT_MUTED
        } else {
            RED_ALARM
        };
        let line = Line::from(Span::styled(format!(" {}", error), Style::default().fg(color)));
        frame.render_widget(Paragraph::new(line), rows[0]);
    }

    let hints = Paragraph::new(key_hints(app))
        .style(Style::default().fg(Color::Black).bg(AMBER_ACCENT));
    frame.render_widget(hints, rows[1]);
}

fn key_hints(app: &App) -> &'static str {
    if app.is_alerting() {
        return " Enter/Space: I'm awake | s: Stop | q: Quit ";
    }
    let phase = app.phase();
    if phase.can_go_back() {
        return " ↑↓: Move | Enter: Select | Esc: Back | r: Restart | q: Quit ";
    }
    match phase {
        Phase::Tracking => " s: Stop tracking | r: Restart | q: Quit ",
        Phase::Completed => " r: New trip | q: Quit ",
        _ => " ↑↓: Move | Enter: Select | q: Quit ",
    }
}
