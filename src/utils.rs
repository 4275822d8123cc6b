//! Formatting helpers for the UI.

use std::time::Duration;

use chrono::{DateTime, Local};

/// Format duration as MM:SS
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Wall-clock time of a poll, e.g. "08:41:07"
pub fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Rough age of a poll for the footer
pub fn format_age(age: Duration) -> String {
    match age.as_secs() {
        0..=2 => "just now".to_string(),
        secs @ 3..=59 => format!("{}s ago", secs),
        secs => format!("{}m ago", secs / 60),
    }
}

/// The feed's seconds-to-arrival field as MM:SS. Zero, blank, and
/// non-numeric values mean the feed has no estimate.
pub fn format_eta(seconds: &str) -> Option<String> {
    match seconds.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(format_duration(Duration::from_secs(secs))),
    }
}

/// Cut `text` to at most `width` characters, ending in "..." when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let cut: String = text.chars().take(keep).collect();
    format!("{}...", cut)
}
