//! Real-time arrival data source.
//!
//! This module encapsulates all feed access:
//! - `ArrivalSource`: the two feed operations the tracker depends on
//! - `seoul`: the Seoul open-API client with endpoint fallback
//! - `fake`: a scripted in-memory source for tests

use async_trait::async_trait;

use crate::error::DataUnavailable;
use crate::models::{ArrivalRecord, PositionRecord};

#[cfg(test)]
pub mod fake;
mod seoul;

pub use seoul::SeoulOpenApi;

/// Feed access used by station selection and the tracking loop.
///
/// Station names passed in are already normalized with
/// [`normalize_station_name`].
#[async_trait]
pub trait ArrivalSource: Send + Sync {
    /// Trains currently reported for a station, across all lines
    async fn fetch_station_arrivals(
        &self,
        station: &str,
    ) -> Result<Vec<ArrivalRecord>, DataUnavailable>;

    /// Positions of every train currently running on a line
    async fn fetch_line_positions(
        &self,
        line_id: &str,
    ) -> Result<Vec<PositionRecord>, DataUnavailable>;
}

/// Strip a trailing station suffix ("서울역" -> "서울", "Seoul Station" -> "Seoul")
pub fn normalize_station_name(name: &str) -> String {
    let name = name.trim();
    if let Some(stripped) = name.strip_suffix('역') {
        if !stripped.is_empty() {
            return stripped.trim_end().to_string();
        }
    }

    let lower = name.to_ascii_lowercase();
    for suffix in [" station", " stn"] {
        if lower.ends_with(suffix) && name.len() > suffix.len() {
            return name[..name.len() - suffix.len()].trim_end().to_string();
        }
    }

    name.to_string()
}
