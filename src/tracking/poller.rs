//! Repeating poll handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::poll_cycle;
use crate::events::AppEvent;
use crate::models::TrackedTrain;
use crate::source::ArrivalSource;
use crate::timer::Ticker;

/// Polls the feeds for one train on a fixed period, starting immediately,
/// and sends each report to the app. Dropping the poller stops it.
pub struct Poller {
    generation: u64,
    _ticker: Ticker,
}

impl Poller {
    pub fn start(
        source: Arc<dyn ArrivalSource>,
        train: TrackedTrain,
        destination: String,
        period: Duration,
        generation: u64,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let ticker = Ticker::spawn(period, move |_| {
            let source = Arc::clone(&source);
            let train = train.clone();
            let destination = destination.clone();
            let events = events.clone();
            async move {
                let report = poll_cycle(source.as_ref(), &train, &destination, generation).await;
                events.send(AppEvent::Poll(report)).is_ok()
            }
        });

        Self {
            generation,
            _ticker: ticker,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
