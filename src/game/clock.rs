//! Session clock: the elapsed-seconds counter and periodic encouragement.
//!
//! Nothing here reads the system time. Callers pass `now` into
//! [`SessionClock::poll`], which reports every event that came due since the
//! previous poll. Stopping the clock is dropping it.

use rand::Rng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

/// Messages picked at random by the encouragement ticker.
pub const CHEERS: [&str; 4] = [
    "Keep going!",
    "You've got this!",
    "Nice focus, stay sharp!",
    "Great progress!",
];

/// Something the clock wants the game to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// Another second passed; carries the new elapsed total.
    Tick(u64),
    /// Time for an encouragement message.
    Cheer(&'static str),
}

/// A fixed-period timer that tracks its next due time.
#[derive(Debug, Clone)]
struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    fn new(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: start + period,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    fn advance(&mut self) {
        self.next_due += self.period;
    }
}

/// Elapsed-time and encouragement tickers for one play session.
#[derive(Debug)]
pub struct SessionClock {
    elapsed_secs: u64,
    seconds: Ticker,
    cheers: Ticker,
    rng: StdRng,
}

impl SessionClock {
    /// Starts at zero elapsed seconds.
    pub fn start(now: Instant, cheer_interval: Duration, rng: StdRng) -> Self {
        Self {
            elapsed_secs: 0,
            seconds: Ticker::new(now, Duration::from_secs(1)),
            cheers: Ticker::new(now, cheer_interval.max(Duration::from_millis(1))),
            rng,
        }
    }

    /// Events due up to `now`, oldest first. Ticks go before a cheer due at
    /// the same instant.
    pub fn poll(&mut self, now: Instant) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        loop {
            let tick_due = self.seconds.is_due(now);
            let cheer_due = self.cheers.is_due(now);
            if tick_due && (!cheer_due || self.seconds.next_due <= self.cheers.next_due) {
                self.seconds.advance();
                self.elapsed_secs += 1;
                events.push(ClockEvent::Tick(self.elapsed_secs));
            } else if cheer_due {
                self.cheers.advance();
                let message = CHEERS[self.rng.gen_range(0..CHEERS.len())];
                events.push(ClockEvent::Cheer(message));
            } else {
                break;
            }
        }
        events
    }
}

/// A message shown for a limited time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown.
    pub message: String,
    shown_at: Instant,
    duration: Duration,
}

impl Toast {
    /// A toast showing `message` from `now` for `duration`.
    pub fn new(message: impl Into<String>, now: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at: now,
            duration,
        }
    }

    /// Whether the toast is still on screen at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn clock(now: Instant) -> SessionClock {
        SessionClock::start(now, Duration::from_secs(30), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_ticks_every_second() {
        let t0 = Instant::now();
        let mut clock = clock(t0);
        assert!(clock.poll(t0).is_empty());
        assert!(clock.poll(t0 + Duration::from_millis(999)).is_empty());
        assert_eq!(clock.poll(t0 + Duration::from_secs(1)), vec![ClockEvent::Tick(1)]);
        assert!(clock.poll(t0 + Duration::from_millis(1500)).is_empty());
        assert_eq!(clock.poll(t0 + Duration::from_secs(2)), vec![ClockEvent::Tick(2)]);
    }

    /// A late poll catches up on every missed second in order.
    #[test]
    fn test_catch_up() {
        let t0 = Instant::now();
        let mut clock = clock(t0);
        let events = clock.poll(t0 + Duration::from_millis(3200));
        assert_eq!(
            events,
            vec![ClockEvent::Tick(1), ClockEvent::Tick(2), ClockEvent::Tick(3)]
        );
    }

    /// The thirtieth tick comes before the first cheer.
    #[test]
    fn test_cheer_every_interval() {
        let t0 = Instant::now();
        let mut clock = clock(t0);
        let events = clock.poll(t0 + Duration::from_secs(61));
        let cheers: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, ClockEvent::Cheer(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(cheers, vec![30, 61]);
        assert_eq!(events[29], ClockEvent::Tick(30));
        assert_eq!(events[60], ClockEvent::Tick(60));
        assert_eq!(events.last(), Some(&ClockEvent::Tick(61)));
        for event in &events {
            if let ClockEvent::Cheer(msg) = event {
                assert!(CHEERS.contains(msg));
            }
        }
    }

    #[test]
    fn test_toast_visibility() {
        let t0 = Instant::now();
        let toast = Toast::new("Keep going!", t0, Duration::from_secs(3));
        assert!(toast.is_visible(t0));
        assert!(toast.is_visible(t0 + Duration::from_millis(2999)));
        assert!(!toast.is_visible(t0 + Duration::from_secs(3)));
    }
}
