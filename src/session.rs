//! Session state: the current phase and everything selected so far.

use chrono::{DateTime, Local};

use crate::machine::{Effect, Phase};
use crate::models::{ArrivalRecord, LineInfo, TrackedTrain};
use crate::tracking::TrackingSession;

/// Everything the presentation layer reads. Plain data; runtime handles
/// (timers, channels) live in `App`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub phase: Phase,
    pub line: Option<LineInfo>,
    /// Boarding station, suffix stripped
    pub departure_station: Option<String>,
    /// Arrival rows for the boarding station, filtered to our line
    pub arrivals: Vec<ArrivalRecord>,
    pub train: Option<TrackedTrain>,
    pub destination: Option<String>,
    /// Present only while tracking and after completion
    pub tracking: Option<TrackingSession>,
    /// Cleared on phase change and on a clean poll
    pub last_error: Option<String>,
}

impl Session {
    /// Apply the data-only effects of a transition and move to `next`.
    /// Changing phase clears any pending error.
    pub fn enter(&mut self, next: Phase, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::ClearSelections => *self = Session::default(),
                Effect::ForgetLine => self.line = None,
                Effect::ForgetStation => {
                    self.departure_station = None;
                    self.arrivals.clear();
                }
                Effect::ForgetTrain => self.train = None,
                Effect::StartPolling | Effect::StopPolling | Effect::SilenceAlarm => {}
            }
        }
        if next != self.phase {
            self.last_error = None;
        }
        self.phase = next;
    }

    pub fn alarm_latched(&self) -> bool {
        self.tracking.as_ref().is_some_and(|t| t.alarm.is_set())
    }

    pub fn current_location(&self) -> Option<&str> {
        self.tracking.as_ref().map(|t| t.location.as_str())
    }

    pub fn destination_status(&self) -> Option<&str> {
        self.tracking.as_ref().map(|t| t.destination_status.as_str())
    }

    pub fn last_polled_at(&self) -> Option<DateTime<Local>> {
        self.tracking.as_ref().and_then(|t| t.last_polled_at)
    }
}
