//! Theme module for subway-waker
//!
//! Centralized color palette and styling constants: a dark platform
//! palette with amber for trains and red for the alarm.

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::models::Direction;

// ============================================================================
// Surfaces
// ============================================================================

/// Screen background (#0b0f16)
pub const BG_PRIMARY: Color = Color::Rgb(11, 15, 22);

/// Card background (#141a23)
pub const BG_CARD: Color = Color::Rgb(20, 26, 35);

/// Highlighted row background (#1f2733)
pub const BG_HIGHLIGHT: Color = Color::Rgb(31, 39, 51);

/// Card border (#2a3341)
pub const BORDER_SUBTLE: Color = Color::Rgb(42, 51, 65);

pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

// ============================================================================
// Accents
// ============================================================================

/// Train and status accent (#facc15)
pub const AMBER_ACCENT: Color = Color::Rgb(250, 204, 21);

/// Dimmed amber for pulse troughs (#a16207)
pub const AMBER_DIM: Color = Color::Rgb(161, 98, 7);

/// Up / inner loop (#38bdf8)
pub const SKY_ASCENDING: Color = Color::Rgb(56, 189, 248);

/// Down / outer loop (#c084fc)
pub const VIOLET_DESCENDING: Color = Color::Rgb(192, 132, 252);

pub const GREEN_DONE: Color = Color::Rgb(74, 222, 128);

/// Errors and the alarm overlay (#ef4444)
pub const RED_ALARM: Color = Color::Rgb(239, 68, 68);

/// Alarm overlay off-beat (#7f1d1d)
pub const RED_DARK: Color = Color::Rgb(127, 29, 29);

// ============================================================================
// Text
// ============================================================================

pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

/// Alternate between two colors every few animation ticks
pub fn get_pulse_color(tick: u64, bright: Color, dim: Color) -> Color {
    if (tick / 5) % 2 == 0 { bright } else { dim }
}

/// Parse a `#rrggbb` line color. Anything else is None.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Line color from the directory, falling back to the accent
pub fn line_color(hex: &str) -> Color {
    parse_hex_color(hex).unwrap_or(AMBER_ACCENT)
}

pub fn direction_color(direction: &Direction) -> Color {
    if direction.is_ascending() {
        SKY_ASCENDING
    } else {
        VIOLET_DESCENDING
    }
}
