// src/scheduler.rs

//! `TickScheduler` - the injected periodic-tick capability.
//!
//! The frame cadence is deliberately decoupled from the window system: the
//! renderer arms whatever scheduler it is handed, and the event loop polls
//! it each cycle. Production uses `IntervalScheduler` (monotonic-clock
//! deadlines); tests drive the renderer with `ManualScheduler`, which fires
//! on demand and needs no display at all.

use log::trace;
use std::time::{Duration, Instant};

/// Periodic tick source for the renderer.
///
/// Implementations are polled from the owning thread; `poll_tick` reports
/// whether a tick is due and consumes it. A disarmed scheduler never fires.
pub trait TickScheduler {
    /// Arms the scheduler to fire every `interval`. Re-arming replaces the
    /// previous interval.
    fn arm(&mut self, interval: Duration);

    /// Disarms the scheduler. Idempotent; after this, `poll_tick` returns
    /// false until re-armed.
    fn disarm(&mut self);

    /// Returns true if a tick is due, consuming it.
    fn poll_tick(&mut self) -> bool;

    /// Whether the scheduler is currently armed.
    fn is_armed(&self) -> bool;
}

/// Wall-clock scheduler driven by `Instant` deadlines.
///
/// If the loop stalls past several intervals, only one tick is reported and
/// the deadline re-anchors to now; missed ticks are dropped, not replayed.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    interval: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for IntervalScheduler {
    fn arm(&mut self, interval: Duration) {
        trace!("Arming interval scheduler at {:?}", interval);
        self.interval = Some(interval);
        self.next_deadline = Some(Instant::now() + interval);
    }

    fn disarm(&mut self) {
        if self.interval.is_some() {
            trace!("Disarming interval scheduler");
        }
        self.interval = None;
        self.next_deadline = None;
    }

    fn poll_tick(&mut self) -> bool {
        let (interval, deadline) = match (self.interval, self.next_deadline) {
            (Some(i), Some(d)) => (i, d),
            _ => return false,
        };

        let now = Instant::now();
        if now < deadline {
            return false;
        }

        self.next_deadline = Some(now + interval);
        true
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

/// Test scheduler that fires exactly when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed_interval: Option<Duration>,
    pending_ticks: u32,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one tick; ignored while disarmed, like a real timer.
    pub fn fire(&mut self) {
        if self.armed_interval.is_some() {
            self.pending_ticks += 1;
        }
    }

    /// The interval the renderer armed, if any.
    pub fn armed_interval(&self) -> Option<Duration> {
        self.armed_interval
    }
}

#[cfg(test)]
impl TickScheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) {
        self.armed_interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.armed_interval = None;
        self.pending_ticks = 0;
    }

    fn poll_tick(&mut self) -> bool {
        if self.pending_ticks > 0 {
            self.pending_ticks -= 1;
            true
        } else {
            false
        }
    }

    fn is_armed(&self) -> bool {
        self.armed_interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_scheduler_never_fires() {
        let mut scheduler = IntervalScheduler::new();
        assert!(!scheduler.poll_tick());
        scheduler.arm(Duration::from_millis(0));
        scheduler.disarm();
        assert!(!scheduler.poll_tick());
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn zero_interval_fires_immediately() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.arm(Duration::from_millis(0));
        assert!(scheduler.poll_tick());
    }

    #[test]
    fn long_interval_does_not_fire_early() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.arm(Duration::from_secs(3600));
        assert!(!scheduler.poll_tick());
        assert!(scheduler.is_armed());
    }

    #[test]
    fn manual_scheduler_drops_fires_while_disarmed() {
        let mut scheduler = ManualScheduler::new();
        scheduler.fire();
        assert!(!scheduler.poll_tick());

        scheduler.arm(Duration::from_millis(16));
        scheduler.fire();
        assert!(scheduler.poll_tick());
        assert!(!scheduler.poll_tick());

        scheduler.fire();
        scheduler.disarm();
        // Disarming flushes pending ticks; nothing fires afterwards.
        assert!(!scheduler.poll_tick());
    }
}
