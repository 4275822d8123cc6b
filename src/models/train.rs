//! The train being followed

use crate::models::records::{ArrivalRecord, Direction};
use crate::source::normalize_station_name;

/// Identity of the tracked train. Captured once when the rider picks a
/// train from the arrival list and never modified afterwards.
///
/// Train numbers are only unique within a line at a point in time; they
/// are reused across days.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedTrain {
    pub id: String,
    pub line_id: String,
    /// Advertised destination, display only
    pub destination_display: String,
    pub direction: Direction,
    /// Boarding station with any station suffix stripped
    pub departure_station: String,
}

impl TrackedTrain {
    pub fn from_arrival(record: &ArrivalRecord, departure_station: &str) -> Self {
        Self {
            id: record.train_id.clone(),
            line_id: record.line_id.clone(),
            destination_display: record.destination_display.clone(),
            direction: record.direction.clone(),
            departure_station: normalize_station_name(departure_station),
        }
    }

    /// Whether a position row belongs to this train. The position feed is
    /// already scoped to our line.
    pub fn matches(&self, train_id: &str) -> bool {
        !self.id.is_empty() && self.id == train_id
    }

    /// Whether an arrival row belongs to this train. Station feeds mix
    /// lines, and train numbers are only unique per line.
    pub fn matches_arrival(&self, record: &ArrivalRecord) -> bool {
        self.matches(&record.train_id)
            && (record.line_id.is_empty() || record.line_id == self.line_id)
    }
}
