use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Time source for session timing.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock; clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

/// Accumulates running time, excluding paused stretches.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActiveTimer {
    accumulated_ms: i64,
    running_since: Option<DateTime<Utc>>,
    paused: bool,
}

impl ActiveTimer {
    pub(crate) fn started(now: DateTime<Utc>) -> Self {
        Self {
            accumulated_ms: 0,
            running_since: Some(now),
            paused: false,
        }
    }

    pub(crate) fn active_ms(&self, now: DateTime<Utc>) -> u64 {
        let live = self
            .running_since
            .map(|since| (now - since).num_milliseconds().max(0))
            .unwrap_or(0);
        (self.accumulated_ms + live).max(0) as u64
    }

    pub(crate) fn pause(&mut self, now: DateTime<Utc>) {
        if self.paused {
            return;
        }
        self.bank(now);
        self.paused = true;
    }

    pub(crate) fn resume(&mut self, now: DateTime<Utc>) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.running_since = Some(now);
    }

    /// Freezes the total; later readings stay constant.
    pub(crate) fn stop(&mut self, now: DateTime<Utc>) {
        self.bank(now);
        self.paused = false;
    }

    fn bank(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            self.accumulated_ms += (now - since).num_milliseconds().max(0);
        }
    }
}
