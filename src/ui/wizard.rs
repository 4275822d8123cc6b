//! Selection lists for the wizard phases

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::helpers::card;
use crate::app::App;
use crate::models::{ArrivalCode, ArrivalRecord};
use crate::theme::{
    direction_color, get_pulse_color, line_color, AMBER_ACCENT, AMBER_DIM, BG_HIGHLIGHT,
    BORDER_SUBTLE, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::utils::{format_eta, truncate};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

fn render_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, cursor: usize) {
    let list = List::new(items)
        .block(card(title, BORDER_SUBTLE))
        .highlight_style(Style::default().bg(BG_HIGHLIGHT).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_lines(frame: &mut Frame, area: Rect, app: &App) {
    let items = app
        .directory
        .lines
        .iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(line_color(&line.color))),
                Span::styled(line.name.clone(), Style::default().fg(TEXT_PRIMARY)),
                Span::styled(
                    format!("  {} stations", line.stations.len()),
                    Style::default().fg(TEXT_MUTED),
                ),
            ]))
        })
        .collect();
    render_list(frame, area, "Lines", items, app.cursor);
}

/// Station list of the chosen line, used for boarding and for the destination
pub fn render_stations(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let Some(line) = &app.session.line else {
        return;
    };

    let body = match &app.loading {
        Some(station) => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            let frame_idx = (app.animation_tick / 2) as usize % SPINNER.len();
            let loading = Line::from(vec![
                Span::styled(
                    format!(" {} ", SPINNER[frame_idx]),
                    Style::default().fg(get_pulse_color(app.animation_tick, AMBER_ACCENT, AMBER_DIM)),
                ),
                Span::styled(
                    format!("Looking up trains at {}...", station),
                    Style::default().fg(TEXT_SECONDARY),
                ),
            ]);
            frame.render_widget(Paragraph::new(loading), layout[0]);
            layout[1]
        }
        None => area,
    };

    let boarding = app.session.departure_station.as_deref();
    let items = line
        .stations
        .iter()
        .map(|station| {
            let mut spans = vec![Span::styled(station.clone(), Style::default().fg(TEXT_PRIMARY))];
            if boarding == Some(station.as_str()) {
                spans.push(Span::styled("  (boarding)", Style::default().fg(TEXT_MUTED)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let title = format!("{} · {}", title, line.name);
    render_list(frame, body, &title, items, app.cursor);
}

pub fn render_trains(frame: &mut Frame, area: Rect, app: &App) {
    // Borders, padding and highlight symbol
    let width = area.width.saturating_sub(8) as usize;
    let items = app
        .session
        .arrivals
        .iter()
        .map(|record| train_item(record, width))
        .collect();
    let mut title = match &app.session.departure_station {
        Some(station) => format!("Trains at {}", station),
        None => "Trains".to_string(),
    };
    // Feed timestamps look like "2024-03-01 08:41:07"
    if let Some(time) = app
        .session
        .arrivals
        .first()
        .and_then(|r| r.data_timestamp.split_whitespace().nth(1))
    {
        title.push_str(&format!(" as of {}", time));
    }
    render_list(frame, area, &title, items, app.cursor);
}

/// Two-line entry: direction, number and destination, then the status
fn train_item(record: &ArrivalRecord, width: usize) -> ListItem<'static> {
    let badge = format!(" {} ", record.direction.label());
    let number = format!(" #{} ", record.train_id);
    let room = width.saturating_sub(badge.chars().count() + number.chars().count());

    let first = Line::from(vec![
        Span::styled(
            badge,
            Style::default()
                .fg(Color::Black)
                .bg(direction_color(&record.direction)),
        ),
        Span::styled(number, Style::default().fg(TEXT_MUTED)),
        Span::styled(
            truncate(&record.destination_display, room),
            Style::default().fg(TEXT_PRIMARY),
        ),
    ]);

    let marker = match record.arrival_code {
        ArrivalCode::Entering | ArrivalCode::Arrived => "◉",
        ArrivalCode::Departed => "◎",
        ArrivalCode::Running => "○",
    };
    let mut status = vec![
        Span::styled(format!("   {} ", marker), Style::default().fg(TEXT_MUTED)),
        Span::styled(record.status_message.clone(), Style::default().fg(AMBER_ACCENT)),
    ];
    if let Some(eta) = format_eta(&record.seconds_to_arrival) {
        status.push(Span::styled(format!("  ~{}", eta), Style::default().fg(TEXT_MUTED)));
    }
    if !record.current_location.is_empty() {
        status.push(Span::styled(
            format!("  ({})", record.current_location),
            Style::default().fg(TEXT_SECONDARY),
        ));
    }

    ListItem::new(vec![first, Line::from(status)])
}
