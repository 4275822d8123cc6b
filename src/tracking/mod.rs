//! Tracking loop.
//!
//! This module encapsulates everything that runs while the session is in
//! the tracking phase:
//! - `TrackingSession`: what we know about the train right now
//! - `cycle`: one poll of the position and arrival feeds
//! - `poller`: the timer handle that repeats the poll

mod cycle;
mod poller;

use chrono::{DateTime, Local};

use crate::alarm::Latch;
use crate::error::DataUnavailable;
use crate::models::{ArrivalRecord, PositionRecord, TrackedTrain};
use crate::status::{classify, Proximity};

pub use cycle::poll_cycle;
pub use poller::Poller;

/// Location text before the first position fix
pub const LOCATING: &str = "Locating train...";

/// Destination status while the arrival feed does not list our train yet.
/// The feed only reports a train a few stations out, so this is the usual
/// state early in a trip.
pub const AWAITING_ARRIVAL: &str = "Awaiting arrival information...";

/// Result of one poll cycle
#[derive(Debug)]
pub struct PollReport {
    /// Tracking run that produced this report
    pub generation: u64,
    pub polled_at: DateTime<Local>,
    /// Our train's row in the line position feed, if present
    pub position: Result<Option<PositionRecord>, DataUnavailable>,
    /// Our train's row in the destination arrival feed, if present
    pub arrival: Result<Option<ArrivalRecord>, DataUnavailable>,
}

/// What applying a report changed
#[derive(Debug, Default, PartialEq)]
pub struct PollOutcome {
    /// The alarm latch went from clear to set on this report
    pub alarm_raised: bool,
    /// Feed failures, already logged
    pub failures: Vec<String>,
}

/// Live state of one tracking run
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSession {
    pub train: TrackedTrain,
    /// Normalized destination station name
    pub destination: String,
    pub location: String,
    pub destination_status: String,
    pub alarm: Latch,
    pub last_polled_at: Option<DateTime<Local>>,
}

impl TrackingSession {
    pub fn new(train: TrackedTrain, destination: String) -> Self {
        Self {
            train,
            destination,
            location: LOCATING.to_string(),
            destination_status: String::new(),
            alarm: Latch::default(),
            last_polled_at: None,
        }
    }

    /// Fold a poll report into the session.
    ///
    /// A failed or empty feed leaves the previous value in place, except
    /// that a successful arrival fetch without our train resets the
    /// destination status to [`AWAITING_ARRIVAL`]. The alarm latch is only
    /// ever set here, never cleared.
    pub fn apply(&mut self, report: PollReport) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        match report.position {
            Ok(Some(record)) => self.location = record.describe(),
            Ok(None) => {}
            Err(e) => outcome.failures.push(format!("position feed: {}", e)),
        }

        match report.arrival {
            Ok(Some(record)) => {
                if classify(&record.status_message) == Proximity::ApproachingFinal {
                    outcome.alarm_raised = self.alarm.set();
                }
                self.destination_status = record.status_message;
            }
            Ok(None) => self.destination_status = AWAITING_ARRIVAL.to_string(),
            Err(e) => outcome.failures.push(format!("arrival feed: {}", e)),
        }

        self.last_polled_at = Some(report.polled_at);
        outcome
    }
}
