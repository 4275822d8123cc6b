//! UI helper functions

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding},
};

use crate::theme::{BG_CARD, ROUNDED_BORDERS, TEXT_SECONDARY};

/// Word wrapping by character count, so Hangul and Latin text wrap alike
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rounded card with a title in the top border
pub fn card<'a>(title: &'a str, border: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(TEXT_SECONDARY),
        ))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(BG_CARD))
}

/// Rectangle of `width` x `height` centered in `area`, clamped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
