//! Application state and core logic for subway-waker.
//!
//! `App` is the only writer of [`Session`]. It runs the phase machine,
//! owns the poller and siren handles, and applies events sent back by
//! background tasks. The UI only reads it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::alarm::{AlertPulse, Alerter, Siren};
use crate::config::Config;
use crate::error::{DataUnavailable, SelectionError, TransitionError};
use crate::events::AppEvent;
use crate::input::Action;
use crate::machine::{transition, Command, Effect, Phase, Step};
use crate::models::{ArrivalRecord, LineDirectory, TrackedTrain};
use crate::session::Session;
use crate::source::{normalize_station_name, ArrivalSource};
use crate::tracking::{PollReport, Poller, TrackingSession};

/// Application state
pub struct App {
    pub session: Session,
    pub directory: LineDirectory,
    source: Arc<dyn ArrivalSource>,
    events: UnboundedSender<AppEvent>,
    poll_interval: Duration,
    poller: Option<Poller>,
    siren: Siren,
    alerter: Box<dyn Alerter>,
    // Bumped on every tracking start so late reports from an old poller are dropped
    generation: u64,
    /// Station whose arrival lookup is in flight
    pub loading: Option<String>,
    /// Highlighted row of the current wizard list
    pub cursor: usize,
    /// Most recent alert pulse, drives the overlay flash
    pub last_pulse: Option<AlertPulse>,
    pub animation_tick: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        directory: LineDirectory,
        source: Arc<dyn ArrivalSource>,
        alerter: Box<dyn Alerter>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            session: Session::default(),
            directory,
            source,
            events,
            poll_interval: config.poll_interval(),
            poller: None,
            siren: Siren::new(config.alert_period()),
            alerter,
            generation: 0,
            loading: None,
            cursor: 0,
            last_pulse: None,
            animation_tick: 0,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    pub fn is_alerting(&self) -> bool {
        self.siren.is_sounding()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn select_line(&mut self, line_id: &str) -> Result<(), SelectionError> {
        transition(self.session.phase, Command::ChooseLine)?;
        let line = self
            .directory
            .get(line_id)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownLine(line_id.to_string()))?;
        self.dispatch(Command::ChooseLine)?;
        info!("line {} ({}) selected", line.name, line.id);
        self.session.line = Some(line);
        Ok(())
    }

    /// Start the arrival lookup for the boarding station. The result comes
    /// back as [`AppEvent::StationLookup`]; the phase only advances if it
    /// lists trains on the chosen line. Ignored while a lookup is running.
    pub fn select_station(&mut self, station: &str) -> Result<(), SelectionError> {
        transition(self.session.phase, Command::StationMatched)?;
        if let Some(pending) = &self.loading {
            debug!("ignoring {} while {} is loading", station, pending);
            return Ok(());
        }
        let query = normalize_station_name(station);
        if query.is_empty() {
            return Err(SelectionError::EmptyStation);
        }

        self.loading = Some(station.to_string());
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let station = station.to_string();
        tokio::spawn(async move {
            let result = source.fetch_station_arrivals(&query).await;
            let _ = events.send(AppEvent::StationLookup { station, result });
        });
        Ok(())
    }

    /// Apply a finished station lookup. Zero records for the chosen line
    /// keep the phase at station selection and set `last_error`.
    pub fn finish_station_lookup(
        &mut self,
        station: &str,
        result: Result<Vec<ArrivalRecord>, DataUnavailable>,
    ) -> Result<(), SelectionError> {
        self.loading = None;
        transition(self.session.phase, Command::StationMatched)?;

        let (line_id, line_name) = match &self.session.line {
            Some(line) => (line.id.clone(), line.name.clone()),
            None => (String::new(), String::new()),
        };
        let departure = normalize_station_name(station);

        let matching = result.map_err(SelectionError::from).and_then(|records| {
            let matching: Vec<ArrivalRecord> = records
                .into_iter()
                .filter(|r| r.line_id == line_id)
                .collect();
            if matching.is_empty() {
                Err(SelectionError::NoMatchingService {
                    station: departure.clone(),
                    line: line_name,
                })
            } else {
                Ok(matching)
            }
        });

        match matching {
            Ok(arrivals) => {
                self.dispatch(Command::StationMatched)?;
                info!("{} trains at {}", arrivals.len(), departure);
                self.session.departure_station = Some(departure);
                self.session.arrivals = arrivals;
                Ok(())
            }
            Err(e) => {
                warn!("station lookup for {} failed: {}", departure, e);
                self.dispatch(Command::StationUnmatched)?;
                self.session.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Pick the train at `index` of the arrival list
    pub fn select_train(&mut self, index: usize) -> Result<(), SelectionError> {
        transition(self.session.phase, Command::ChooseTrain)?;
        let record = self
            .session
            .arrivals
            .get(index)
            .ok_or(SelectionError::NoSuchTrain(index))?;
        let departure = self.session.departure_station.clone().unwrap_or_default();
        let train = TrackedTrain::from_arrival(record, &departure);

        self.dispatch(Command::ChooseTrain)?;
        info!("train {} ({}) selected", train.id, train.destination_display);
        self.session.train = Some(train);
        Ok(())
    }

    /// Set the alighting station and start tracking
    pub fn select_destination(&mut self, station: &str) -> Result<(), SelectionError> {
        transition(self.session.phase, Command::ChooseDestination)?;
        let destination = normalize_station_name(station);
        if destination.is_empty() {
            return Err(SelectionError::EmptyStation);
        }
        self.session.destination = Some(destination);
        self.dispatch(Command::ChooseDestination)?;
        Ok(())
    }

    /// Clear the alarm and complete the trip. Returns false (and changes
    /// nothing) when the alarm is not latched.
    pub fn acknowledge_alarm(&mut self) -> bool {
        let acknowledged = self
            .session
            .tracking
            .as_mut()
            .is_some_and(|t| t.alarm.acknowledge());
        if !acknowledged {
            return false;
        }

        info!("alarm acknowledged");
        if let Err(e) = self.dispatch(Command::AcknowledgeAlarm) {
            debug!("{}", e);
            self.silence();
        }
        true
    }

    /// End tracking without waiting for the alarm. Stopping also clears a
    /// latched alarm.
    pub fn stop_tracking(&mut self) -> Result<(), TransitionError> {
        transition(self.session.phase, Command::StopTracking)?;
        if let Some(tracking) = self.session.tracking.as_mut() {
            tracking.alarm.acknowledge();
        }
        self.dispatch(Command::StopTracking)?;
        Ok(())
    }

    /// Back to line selection from any phase, dropping every selection
    pub fn reset(&mut self) {
        if let Err(e) = self.dispatch(Command::Reset) {
            warn!("{}", e);
        }
        self.loading = None;
        self.last_pulse = None;
    }

    pub fn go_back(&mut self) -> Result<(), TransitionError> {
        self.dispatch(Command::Back)?;
        self.loading = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events from background tasks
    // ------------------------------------------------------------------

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Poll(report) => self.apply_poll(report),
            AppEvent::StationLookup { station, result } => {
                if self.loading.as_deref() != Some(station.as_str()) {
                    debug!("dropping stale lookup for {}", station);
                    return;
                }
                // Failures are already in last_error
                let _ = self.finish_station_lookup(&station, result);
            }
            AppEvent::Alert(pulse) => self.on_alert(pulse),
        }
    }

    fn apply_poll(&mut self, report: PollReport) {
        let current = self.poller.as_ref().map(|p| p.generation());
        if self.session.phase != Phase::Tracking || current != Some(report.generation) {
            debug!("dropping poll report from run {}", report.generation);
            return;
        }
        let Some(tracking) = self.session.tracking.as_mut() else {
            return;
        };

        let outcome = tracking.apply(report);
        let latched = tracking.alarm.is_set();

        // Feed failures were logged by the poll cycle
        self.session.last_error = if outcome.failures.is_empty() {
            None
        } else {
            Some(outcome.failures.join("; "))
        };

        if outcome.alarm_raised {
            info!("train is approaching the destination, raising alarm");
        }
        if latched && !self.siren.is_sounding() {
            self.siren.sound(&self.events);
        }
    }

    fn on_alert(&mut self, pulse: AlertPulse) {
        if !self.siren.is_sounding() {
            return;
        }
        self.alerter.pulse(&pulse);
        self.last_pulse = Some(pulse);
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Number of rows in the current wizard list
    pub fn choice_count(&self) -> usize {
        match self.session.phase {
            Phase::SelectLine => self.directory.lines.len(),
            Phase::SelectStation | Phase::SetDestination => self
                .session
                .line
                .as_ref()
                .map_or(0, |line| line.stations.len()),
            Phase::SelectTrain => self.session.arrivals.len(),
            Phase::Tracking | Phase::Completed => 0,
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.choice_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let last = count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Up => self.move_cursor(-1),
            Action::Down => self.move_cursor(1),
            Action::Select => self.select_current(),
            Action::Acknowledge => {
                self.acknowledge_alarm();
            }
            Action::Back => {
                if self.loading.is_none() {
                    if let Err(e) = self.go_back() {
                        debug!("{}", e);
                    }
                }
            }
            Action::Stop => {
                if let Err(e) = self.stop_tracking() {
                    debug!("{}", e);
                }
            }
            Action::Reset => self.reset(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn select_current(&mut self) {
        if self.loading.is_some() {
            return;
        }
        let cursor = self.cursor;
        let result = match self.session.phase {
            Phase::SelectLine => match self.directory.lines.get(cursor) {
                Some(line) => {
                    let id = line.id.clone();
                    self.select_line(&id)
                }
                None => Ok(()),
            },
            Phase::SelectStation => match self.highlighted_station() {
                Some(station) => self.select_station(&station),
                None => Ok(()),
            },
            Phase::SelectTrain => self.select_train(cursor),
            Phase::SetDestination => match self.highlighted_station() {
                Some(station) => self.select_destination(&station),
                None => Ok(()),
            },
            Phase::Tracking => {
                self.acknowledge_alarm();
                Ok(())
            }
            Phase::Completed => Ok(()),
        };
        if let Err(e) = result {
            debug!("selection rejected: {}", e);
        }
    }

    fn highlighted_station(&self) -> Option<String> {
        self.session
            .line
            .as_ref()
            .and_then(|line| line.stations.get(self.cursor))
            .cloned()
    }

    /// Advance the animation frame counter
    pub fn tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn dispatch(&mut self, command: Command) -> Result<Phase, TransitionError> {
        let previous = self.session.phase;
        let Step { next, effects } = transition(previous, command)?;

        self.session.enter(next, &effects);
        for effect in &effects {
            match effect {
                Effect::StartPolling => self.start_polling(),
                Effect::StopPolling => {
                    if self.poller.take().is_some() {
                        debug!("polling stopped");
                    }
                }
                Effect::SilenceAlarm => self.silence(),
                Effect::ClearSelections
                | Effect::ForgetLine
                | Effect::ForgetStation
                | Effect::ForgetTrain => {}
            }
        }

        if next != previous {
            info!("{:?} -> {:?} on {:?}", previous, next, command);
            self.cursor = 0;
        }
        Ok(next)
    }

    fn start_polling(&mut self) {
        let (Some(train), Some(destination)) =
            (self.session.train.clone(), self.session.destination.clone())
        else {
            warn!("tracking started without a train and destination");
            return;
        };

        self.generation += 1;
        info!(
            "tracking train {} on line {} to {}",
            train.id, train.line_id, destination
        );
        self.session.tracking = Some(TrackingSession::new(train.clone(), destination.clone()));
        self.poller = Some(Poller::start(
            Arc::clone(&self.source),
            train,
            destination,
            self.poll_interval,
            self.generation,
            self.events.clone(),
        ));
    }

    fn silence(&mut self) {
        if self.siren.silence() {
            self.alerter.stop();
        }
        self.last_pulse = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::{arrival, FakeSource};
    use crate::tracking::{AWAITING_ARRIVAL, LOCATING};
    use chrono::Local;
    use std::sync::Mutex;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    /// Alerter that records pulse numbers
    struct Recorder {
        pulses: Arc<Mutex<Vec<u64>>>,
        stops: Arc<Mutex<usize>>,
    }

    impl Alerter for Recorder {
        fn pulse(&mut self, pulse: &AlertPulse) {
            self.pulses.lock().unwrap().push(pulse.seq);
        }

        fn stop(&mut self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    struct Harness {
        app: App,
        rx: UnboundedReceiver<AppEvent>,
        source: Arc<FakeSource>,
        pulses: Arc<Mutex<Vec<u64>>>,
        stops: Arc<Mutex<usize>>,
    }

    fn harness() -> Harness {
        let source = Arc::new(FakeSource::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let pulses = Arc::new(Mutex::new(Vec::new()));
        let stops = Arc::new(Mutex::new(0));
        let recorder = Recorder {
            pulses: Arc::clone(&pulses),
            stops: Arc::clone(&stops),
        };
        let app = App::new(
            &Config::default(),
            LineDirectory::embedded().unwrap(),
            source.clone(),
            Box::new(recorder),
            tx,
        );
        Harness {
            app,
            rx,
            source,
            pulses,
            stops,
        }
    }

    impl Harness {
        /// Receive and apply the next event, returning a short tag for it
        async fn pump(&mut self) -> &'static str {
            let event = self.rx.recv().await.unwrap();
            let tag = match &event {
                AppEvent::Poll(_) => "poll",
                AppEvent::StationLookup { .. } => "lookup",
                AppEvent::Alert(_) => "alert",
            };
            self.app.handle_event(event);
            tag
        }

        async fn pump_until(&mut self, wanted: &str) {
            while self.pump().await != wanted {}
        }

        /// Drive the wizard up to tracking train 2210 from 신도림 to 서울
        async fn start_tracking(&mut self) {
            self.source.push_arrivals(
                "신도림",
                vec![
                    arrival("1001", "0101", "2분 후"),
                    arrival("1002", "2210", "3분 후"),
                ],
            );
            self.app.select_line("1002").unwrap();
            self.app.select_station("신도림역").unwrap();
            self.pump_until("lookup").await;
            assert_eq!(self.app.phase(), Phase::SelectTrain);
            self.app.select_train(0).unwrap();
            self.app.select_destination("서울역").unwrap();
            assert_eq!(self.app.phase(), Phase::Tracking);
        }
    }

    #[tokio::test]
    async fn test_station_without_line_service_stays_put() {
        let mut h = harness();
        h.source.push_arrivals(
            "신도림",
            vec![arrival("1001", "0101", "2분 후"), arrival("1001", "0103", "전역 도착")],
        );

        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림").unwrap();
        assert!(h.app.loading.is_some());
        h.pump_until("lookup").await;

        assert_eq!(h.app.phase(), Phase::SelectStation);
        assert!(h.app.loading.is_none());
        let error = h.app.session.last_error.clone().unwrap();
        assert!(!error.is_empty());
        assert!(error.contains("신도림"));
        assert!(h.app.session.departure_station.is_none());
    }

    #[tokio::test]
    async fn test_back_from_station_clears_error() {
        let mut h = harness();
        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림").unwrap();
        h.pump_until("lookup").await;
        assert!(h.app.session.last_error.is_some());

        h.app.go_back().unwrap();
        assert_eq!(h.app.phase(), Phase::SelectLine);
        assert!(h.app.session.last_error.is_none());
        assert!(h.app.session.line.is_none());
    }

    #[tokio::test]
    async fn test_station_lookup_failure_blocks_progress() {
        let mut h = harness();
        h.source.fail_arrivals("신도림", "server error");
        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림").unwrap();
        h.pump_until("lookup").await;

        assert_eq!(h.app.phase(), Phase::SelectStation);
        assert!(h.app.session.last_error.is_some());
    }

    #[tokio::test]
    async fn test_lookup_keeps_only_chosen_line() {
        let mut h = harness();
        h.source.push_arrivals(
            "신도림",
            vec![
                arrival("1001", "0101", "2분 후"),
                arrival("1002", "2210", "3분 후"),
                arrival("1002", "2212", "전역 출발"),
            ],
        );
        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림역").unwrap();
        h.pump_until("lookup").await;

        assert_eq!(h.app.phase(), Phase::SelectTrain);
        assert_eq!(h.app.session.departure_station.as_deref(), Some("신도림"));
        assert_eq!(h.app.session.arrivals.len(), 2);
        assert!(h.app.session.arrivals.iter().all(|r| r.line_id == "1002"));
    }

    #[tokio::test]
    async fn test_stale_lookup_is_ignored() {
        let mut h = harness();
        h.source
            .push_arrivals("신도림", vec![arrival("1002", "2210", "3분 후")]);
        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림").unwrap();
        // Rider backs out before the lookup lands
        h.app.go_back().unwrap();
        h.pump_until("lookup").await;

        assert_eq!(h.app.phase(), Phase::SelectLine);
        assert!(h.app.session.arrivals.is_empty());
    }

    #[tokio::test]
    async fn test_selections_ignored_while_loading() {
        let mut h = harness();
        h.app.select_line("1002").unwrap();
        h.app.select_station("신도림").unwrap();
        h.app.select_station("시청").unwrap();
        assert_eq!(h.app.loading.as_deref(), Some("신도림"));
        h.pump_until("lookup").await;
        assert_eq!(h.source.arrival_calls(), vec!["신도림".to_string()]);
    }

    #[tokio::test]
    async fn test_commands_rejected_out_of_phase() {
        let mut h = harness();
        assert!(matches!(
            h.app.select_train(0),
            Err(SelectionError::Transition(_))
        ));
        assert!(h.app.stop_tracking().is_err());
        assert!(h.app.go_back().is_err());
        assert!(matches!(
            h.app.select_line("9999"),
            Err(SelectionError::UnknownLine(_))
        ));
        assert_eq!(h.app.session, Session::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracking_latches_on_entering_status() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "2 minutes")]);
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "entering Seoul")]);
        h.start_tracking().await;

        let tracking = h.app.session.tracking.clone().unwrap();
        assert_eq!(tracking.train.id, "2210");
        assert_eq!(tracking.destination, "서울");
        assert_eq!(tracking.location, LOCATING);
        assert!(h.app.is_polling());

        h.pump_until("poll").await;
        assert!(!h.app.session.alarm_latched());
        assert_eq!(h.app.session.destination_status(), Some("2 minutes"));
        assert!(h.app.session.last_polled_at().is_some());
        assert!(!h.app.is_alerting());

        h.pump_until("poll").await;
        assert!(h.app.session.alarm_latched());
        assert_eq!(h.app.session.destination_status(), Some("entering Seoul"));
        assert!(h.app.is_alerting());

        h.pump_until("alert").await;
        assert_eq!(*h.pulses.lock().unwrap(), vec![0]);
        assert!(h.app.last_pulse.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latch_holds_across_polls() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "전역 도착")]);
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "2분 후")]);
        h.start_tracking().await;

        h.pump_until("poll").await;
        assert!(h.app.session.alarm_latched());
        for _ in 0..3 {
            h.pump_until("poll").await;
            assert!(h.app.session.alarm_latched());
            assert_eq!(h.app.phase(), Phase::Tracking);
        }
        assert_eq!(h.app.session.destination_status(), Some("2분 후"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_completes_and_is_idempotent() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "서울 진입")]);
        h.start_tracking().await;

        // Acknowledging before the alarm does nothing
        assert!(!h.app.acknowledge_alarm());
        assert_eq!(h.app.phase(), Phase::Tracking);

        h.pump_until("poll").await;
        assert!(h.app.is_alerting());

        assert!(h.app.acknowledge_alarm());
        assert_eq!(h.app.phase(), Phase::Completed);
        assert!(!h.app.is_polling());
        assert!(!h.app.is_alerting());
        assert!(!h.app.session.alarm_latched());
        assert_eq!(*h.stops.lock().unwrap(), 1);

        let after_first = h.app.session.clone();
        assert!(!h.app.acknowledge_alarm());
        assert_eq!(h.app.session, after_first);
        assert_eq!(*h.stops.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pulses_after_silence_are_ignored() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "서울 도착")]);
        h.start_tracking().await;
        h.pump_until("poll").await;
        h.app.acknowledge_alarm();

        h.app.handle_event(AppEvent::Alert(AlertPulse::nth(3)));
        assert!(h.pulses.lock().unwrap().is_empty());
        assert!(h.app.last_pulse.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_failure_sets_and_clears_last_error() {
        let mut h = harness();
        h.source.fail_arrivals("서울", "timeout");
        h.source.push_arrivals("서울", vec![]);
        h.start_tracking().await;

        h.pump_until("poll").await;
        assert_eq!(h.app.phase(), Phase::Tracking);
        assert!(h.app.session.last_error.is_some());
        assert!(h.app.is_polling());

        h.pump_until("poll").await;
        assert!(h.app.session.last_error.is_none());
        assert_eq!(h.app.session.destination_status(), Some(AWAITING_ARRIVAL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_poll_report_is_dropped() {
        let mut h = harness();
        h.start_tracking().await;
        let before = h.app.session.clone();

        h.app.handle_event(AppEvent::Poll(PollReport {
            generation: 0,
            polled_at: Local::now(),
            position: Ok(None),
            arrival: Ok(Some(arrival("1002", "2210", "서울 도착"))),
        }));
        assert_eq!(h.app.session, before);
        assert!(!h.app.session.alarm_latched());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_tracking_completes_without_alarm() {
        let mut h = harness();
        h.start_tracking().await;
        h.app.stop_tracking().unwrap();

        assert_eq!(h.app.phase(), Phase::Completed);
        assert!(!h.app.is_polling());
        assert!(h.app.go_back().is_err());
        assert!(h.app.stop_tracking().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_then_reset_restores_initial_state() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "전역 도착")]);
        h.start_tracking().await;
        h.pump_until("poll").await;
        assert!(h.app.acknowledge_alarm());
        assert_eq!(h.app.phase(), Phase::Completed);

        h.app.reset();
        assert_eq!(h.app.session, Session::default());
        assert!(!h.app.is_polling());
        assert!(!h.app.is_alerting());
        assert!(h.app.loading.is_none());
        assert_eq!(h.app.cursor, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_mid_tracking_stops_everything() {
        let mut h = harness();
        h.source
            .push_arrivals("서울", vec![arrival("1002", "2210", "서울 진입")]);
        h.start_tracking().await;
        h.pump_until("poll").await;
        assert!(h.app.is_alerting());

        h.app.reset();
        assert_eq!(h.app.session, Session::default());
        assert!(!h.app.is_polling());
        assert!(!h.app.is_alerting());
    }

    #[tokio::test]
    async fn test_keyboard_walkthrough_to_station() {
        let mut h = harness();
        h.app.perform(Action::Down);
        h.app.perform(Action::Select);
        assert_eq!(h.app.phase(), Phase::SelectStation);
        assert_eq!(h.app.session.line.as_ref().unwrap().id, "1002");
        assert_eq!(h.app.cursor, 0);

        h.app.perform(Action::Up);
        assert_eq!(h.app.cursor, 0);
        for _ in 0..1000 {
            h.app.perform(Action::Down);
        }
        assert_eq!(h.app.cursor, h.app.choice_count() - 1);

        h.app.perform(Action::Back);
        assert_eq!(h.app.phase(), Phase::SelectLine);

        h.app.perform(Action::Quit);
        assert!(h.app.should_quit);
    }
}
