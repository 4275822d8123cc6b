//! One poll of the two real-time feeds.

use chrono::Local;
use log::{debug, warn};

use super::PollReport;
use crate::models::TrackedTrain;
use crate::source::ArrivalSource;

/// Fetch the line positions, then the destination arrivals, and pick out
/// our train's row from each. Failures are logged and carried in the
/// report; they never abort the cycle.
pub async fn poll_cycle(
    source: &dyn ArrivalSource,
    train: &TrackedTrain,
    destination: &str,
    generation: u64,
) -> PollReport {
    let position = source
        .fetch_line_positions(&train.line_id)
        .await
        .map(|rows| rows.into_iter().find(|r| train.matches(&r.train_id)));
    match &position {
        Ok(Some(record)) => debug!(
            "train {} at {} toward {}",
            train.id,
            record.describe(),
            record.terminal_station
        ),
        Ok(None) => debug!("train {} absent from line {} positions", train.id, train.line_id),
        Err(e) => warn!("position feed for line {} unavailable: {}", train.line_id, e),
    }

    let arrival = source
        .fetch_station_arrivals(destination)
        .await
        .map(|rows| rows.into_iter().find(|r| train.matches_arrival(r)));
    match &arrival {
        Ok(Some(record)) => debug!("train {} at {}: {}", train.id, destination, record.status_message),
        Ok(None) => debug!("train {} not yet reported at {}", train.id, destination),
        Err(e) => warn!("arrival feed for {} unavailable: {}", destination, e),
    }

    PollReport {
        generation,
        polled_at: Local::now(),
        position,
        arrival,
    }
}
