//! Tracking card, completion card and alarm overlay

use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::helpers::{card, centered_rect, wrap_text};
use crate::app::App;
use crate::status::mentions_previous_station;
use crate::theme::{
    get_pulse_color, AMBER_ACCENT, AMBER_DIM, BORDER_SUBTLE, GREEN_DONE, RED_ALARM, RED_DARK,
    ROUNDED_BORDERS, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::tracking::TrackingSession;
use crate::utils::{format_age, format_clock};

fn label(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_uppercase(), Style::default().fg(TEXT_MUTED)))
}

/// Lines shared by the tracking and completion cards
fn session_lines(tracking: &TrackingSession, width: usize) -> Vec<Line<'static>> {
    let train = &tracking.train;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} bound", tracking.destination),
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   train #{}", train.id), Style::default().fg(TEXT_MUTED)),
        ]),
        Line::from(Span::styled(
            train.destination_display.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::default(),
        label("Current location"),
        Line::from(Span::styled(
            tracking.location.clone(),
            Style::default().fg(AMBER_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        label(&format!("At {}", tracking.destination)),
    ];

    let status_color = if mentions_previous_station(&tracking.destination_status) {
        AMBER_ACCENT
    } else {
        TEXT_PRIMARY
    };
    for row in wrap_text(&tracking.destination_status, width) {
        lines.push(Line::from(Span::styled(row, Style::default().fg(status_color))));
    }
    lines
}

pub fn render_tracking(frame: &mut Frame, area: Rect, app: &App) {
    let Some(tracking) = &app.session.tracking else {
        return;
    };
    let width = area.width.saturating_sub(4) as usize;

    let badge = Span::styled(
        "● LIVE",
        Style::default().fg(get_pulse_color(app.animation_tick, AMBER_ACCENT, AMBER_DIM)),
    );
    let mut lines = vec![Line::from(badge), Line::default()];
    lines.extend(session_lines(tracking, width));
    lines.push(Line::default());

    let polled = match tracking.last_polled_at {
        Some(at) => {
            let age = (Local::now() - at).to_std().unwrap_or_default();
            format!("Last update {} ({})", format_clock(at), format_age(age))
        }
        None => "Waiting for the first update...".to_string(),
    };
    lines.push(Line::from(Span::styled(polled, Style::default().fg(TEXT_MUTED))));

    let paragraph = Paragraph::new(lines).block(card("Tracking", BORDER_SUBTLE));
    frame.render_widget(paragraph, area);
}

pub fn render_completed(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            "✔ Trip complete",
            Style::default().fg(GREEN_DONE).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    if let Some(tracking) = &app.session.tracking {
        lines.extend(session_lines(tracking, width));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Press r to plan another trip.",
        Style::default().fg(TEXT_SECONDARY),
    )));

    frame.render_widget(Paragraph::new(lines).block(card("Done", GREEN_DONE)), area);
}

/// Flashing overlay while the alarm sounds. Each pulse flips the color.
pub fn render_alarm(frame: &mut Frame, area: Rect, app: &App) {
    let flash = app.last_pulse.map_or(0, |pulse| pulse.seq) % 2 == 0;
    let (fg, bg) = if flash {
        (TEXT_PRIMARY, RED_ALARM)
    } else {
        (RED_ALARM, RED_DARK)
    };

    let destination = app
        .session
        .tracking
        .as_ref()
        .map_or("your stop", |t| t.destination.as_str());
    let status = app.session.destination_status().unwrap_or_default();
    let location = app.session.current_location().unwrap_or_default();

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "WAKE UP!",
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("Approaching {}", destination),
            Style::default().fg(fg),
        )),
        Line::from(Span::styled(status.to_string(), Style::default().fg(fg))),
        Line::from(Span::styled(format!("Now: {}", location), Style::default().fg(fg))),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter or Space to stop the alarm",
            Style::default().fg(fg).add_modifier(Modifier::ITALIC),
        )),
    ];

    let popup = centered_rect(area, 44, 10);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(fg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        popup,
    );
}
