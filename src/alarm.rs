//! Alarm trigger.
//!
//! The alarm is a latch: the tracking loop sets it when the destination
//! feed says our train is close, and only the rider clears it. While it is
//! set, the [`Siren`] keeps one repeating alert task alive that emits an
//! [`AlertPulse`] every alert period. Each pulse rings the terminal bell
//! and flashes the alarm overlay.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::events::AppEvent;
use crate::timer::Ticker;

/// Vibration pattern (on/off milliseconds) of the first pulse
pub const OPENING_PATTERN: &[u64] = &[500, 200, 500, 200, 1000];

/// Vibration pattern of every later pulse
pub const REPEAT_PATTERN: &[u64] = &[500, 200];

/// A boolean that stays set until explicitly acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latch {
    set: bool,
}

impl Latch {
    /// Set the latch. Returns true only on the false -> true edge.
    pub fn set(&mut self) -> bool {
        let raised = !self.set;
        self.set = true;
        raised
    }

    /// Clear the latch. Returns false (and does nothing) if it was not set.
    pub fn acknowledge(&mut self) -> bool {
        let was_set = self.set;
        self.set = false;
        was_set
    }

    pub fn is_set(&self) -> bool {
        self.set
    }
}

/// One beat of the repeating alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPulse {
    pub seq: u64,
    pub pattern: &'static [u64],
}

impl AlertPulse {
    pub fn nth(seq: u64) -> Self {
        let pattern = if seq == 0 {
            OPENING_PATTERN
        } else {
            REPEAT_PATTERN
        };
        Self { seq, pattern }
    }
}

/// Output device for alert pulses
pub trait Alerter: Send {
    fn pulse(&mut self, pulse: &AlertPulse);

    /// Called once when the alert stops
    fn stop(&mut self) {}
}

/// Rings the terminal bell on every pulse
pub struct TerminalBell<W: Write + Send> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Alerter for TerminalBell<W> {
    /// One bell per "on" segment of the pulse pattern
    fn pulse(&mut self, pulse: &AlertPulse) {
        let rings = pulse.pattern.iter().step_by(2).count();
        let _ = self.out.write_all(&b"\x07".repeat(rings));
        let _ = self.out.flush();
    }
}

/// Owner of the single repeating alert task
pub struct Siren {
    period: Duration,
    ticker: Option<Ticker>,
}

impl Siren {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ticker: None,
        }
    }

    /// Start pulsing. Does nothing if already sounding.
    pub fn sound(&mut self, events: &UnboundedSender<AppEvent>) {
        if self.is_sounding() {
            return;
        }
        let events = events.clone();
        self.ticker = Some(Ticker::spawn(self.period, move |seq| {
            let sent = events.send(AppEvent::Alert(AlertPulse::nth(seq))).is_ok();
            std::future::ready(sent)
        }));
    }

    /// Stop pulsing. Returns true if the siren was sounding.
    pub fn silence(&mut self) -> bool {
        self.ticker.take().is_some()
    }

    /// False once the alert task has ended on its own (the app went away)
    pub fn is_sounding(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_latch_edges() {
        let mut latch = Latch::default();
        assert!(!latch.is_set());
        assert!(latch.set());
        assert!(!latch.set());
        assert!(latch.is_set());
        assert!(latch.acknowledge());
        assert!(!latch.is_set());
    }

    #[test]
    fn test_acknowledge_unset_latch_is_noop() {
        let mut latch = Latch::default();
        assert!(!latch.acknowledge());
        assert!(!latch.acknowledge());
        assert_eq!(latch, Latch::default());
    }

    #[test]
    fn test_pulse_patterns() {
        assert_eq!(AlertPulse::nth(0).pattern, OPENING_PATTERN);
        assert_eq!(AlertPulse::nth(1).pattern, REPEAT_PATTERN);
        assert_eq!(AlertPulse::nth(7).pattern, REPEAT_PATTERN);
    }

    #[test]
    fn test_terminal_bell_rings() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.pulse(&AlertPulse::nth(0));
        assert_eq!(bell.out, b"\x07\x07\x07");
        bell.pulse(&AlertPulse::nth(1));
        assert_eq!(bell.out.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_siren_pulses_until_silenced() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut siren = Siren::new(Duration::from_millis(1500));

        siren.sound(&tx);
        // Second call must not start another task
        siren.sound(&tx);
        assert!(siren.is_sounding());

        let mut seqs = Vec::new();
        for _ in 0..3 {
            match rx.recv().await {
                Some(AppEvent::Alert(pulse)) => seqs.push(pulse.seq),
                _ => panic!("expected an alert pulse"),
            }
        }
        assert_eq!(seqs, vec![0, 1, 2]);

        assert!(siren.silence());
        assert!(!siren.silence());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
