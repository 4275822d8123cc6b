//! Messages from background tasks to the app.
//!
//! Background tasks never touch session state. They send one of these over
//! the app's channel and the event loop applies it.

use crate::alarm::AlertPulse;
use crate::error::DataUnavailable;
use crate::models::ArrivalRecord;
use crate::tracking::PollReport;

#[derive(Debug)]
pub enum AppEvent {
    /// Outcome of one tracking poll cycle
    Poll(PollReport),
    /// Arrival list for the boarding station the rider picked
    StationLookup {
        station: String,
        result: Result<Vec<ArrivalRecord>, DataUnavailable>,
    },
    /// One beat of the repeating alarm
    Alert(AlertPulse),
}
