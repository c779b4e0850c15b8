//! Interval clock implementation.
//!
//! The clock is a wall-clock-anchored state machine. It does not own a
//! thread or a ticker - the host calls `poll()` on a fixed cadence and
//! dispatches the events it returns.
//!
//! ## Deadline anchoring
//!
//! Arming records an absolute anchor pair: `anchor_start_ms = now` and
//! `anchor_end_ms = anchor_start_ms + interval`. When a poll observes
//! `now >= anchor_end_ms` it rings and re-arms by sliding the pair one
//! interval forward off the OLD deadline, not off `now`. A poll that lands
//! 40 ms late therefore does not push the schedule back 40 ms; the error
//! never accumulates across rings.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = IntervalClock::new(SystemClock, interval);
//! timer.arm(interval);
//! // On a fixed cadence:
//! for event in timer.poll() {
//!     // ring the notifier, update the display
//! }
//! ```

use chrono::Utc;

use super::clock::Clock;
use super::interval::IntervalLength;
use crate::events::Event;

/// Core interval timer.
///
/// A single owned instance; every operation is an explicit method call.
/// The host owns the polling registration and must replace it (never
/// duplicate it) when re-arming.
#[derive(Debug)]
pub struct IntervalClock<C: Clock> {
    clock: C,
    interval: IntervalLength,
    /// Start of the current interval (ms since epoch). Valid once armed.
    anchor_start_ms: u64,
    /// Deadline of the current interval. Always `anchor_start_ms` plus the
    /// interval length.
    anchor_end_ms: u64,
    /// True between arm and stop/reset.
    running: bool,
    /// Read lazily at ring time, so flipping it mid-interval still takes
    /// effect at the very next ring.
    stop_after_next_ring: bool,
    /// Whether the anchors hold a real run. Stop keeps them (the remaining
    /// display keeps counting down to zero); reset invalidates them.
    armed: bool,
    /// Rings since the last arm.
    rings: u64,
}

impl<C: Clock> IntervalClock<C> {
    /// Create a clock with a default interval. Created once at process
    /// start; the instance lives for the whole session and is re-armed in
    /// place.
    pub fn new(clock: C, interval: IntervalLength) -> Self {
        Self {
            clock,
            interval,
            anchor_start_ms: 0,
            anchor_end_ms: 0,
            running: false,
            stop_after_next_ring: false,
            armed: false,
            rings: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> IntervalLength {
        self.interval
    }

    pub fn rings(&self) -> u64 {
        self.rings
    }

    pub fn stop_after_next_ring(&self) -> bool {
        self.stop_after_next_ring
    }

    pub fn anchor_start_ms(&self) -> u64 {
        self.anchor_start_ms
    }

    pub fn anchor_end_ms(&self) -> u64 {
        self.anchor_end_ms
    }

    /// Milliseconds until the current deadline, clamped to zero. Before the
    /// first arm (and after reset) this is the configured interval, which
    /// is what the display shows then.
    pub fn remaining_ms(&self) -> u64 {
        if !self.armed {
            return self.interval.as_millis();
        }
        self.anchor_end_ms.saturating_sub(self.clock.now_ms())
    }

    /// Seconds until the current deadline, clamped to zero for display.
    /// Negative remaining time exists only transiently between an elapsed
    /// deadline and the poll that re-arms it.
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms() as f64 / 1000.0
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.running,
            interval_secs: self.interval.as_secs(),
            remaining_secs: self.remaining_secs(),
            anchor_end_ms: self.anchor_end_ms,
            rings: self.rings,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_stop_after_next_ring(&mut self, stop: bool) {
        self.stop_after_next_ring = stop;
    }

    /// Start a run, discarding any previous one. The host rings once on the
    /// returned `TimerArmed` event as feedback that arming succeeded; the
    /// first deadline ring still happens a full interval later.
    pub fn arm(&mut self, interval: IntervalLength) -> Event {
        let now = self.clock.now_ms();
        self.interval = interval;
        self.anchor_start_ms = now;
        self.anchor_end_ms = now + interval.as_millis();
        self.running = true;
        self.armed = true;
        self.rings = 0;
        Event::TimerArmed {
            interval_secs: interval.as_secs(),
            anchor_start_ms: self.anchor_start_ms,
            anchor_end_ms: self.anchor_end_ms,
            at: Utc::now(),
        }
    }

    /// Call on a fixed cadence while running. Compares the wall clock
    /// against the current deadline and emits one `Ring` per elapsed
    /// interval, re-arming off the old deadline each time, until the
    /// deadline lies in the future again. A host suspension therefore
    /// produces the full ring count, not a collapsed one.
    pub fn poll(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        let now = self.clock.now_ms();
        while self.running && now >= self.anchor_end_ms {
            self.rings += 1;
            events.push(Event::Ring {
                seq: self.rings,
                anchor_end_ms: self.anchor_end_ms,
                late_ms: now - self.anchor_end_ms,
                at: Utc::now(),
            });
            if self.stop_after_next_ring {
                if let Some(stopped) = self.stop() {
                    events.push(stopped);
                }
                break;
            }
            self.anchor_start_ms = self.anchor_end_ms;
            self.anchor_end_ms = self.anchor_start_ms + self.interval.as_millis();
        }
        events
    }

    /// Stop the run. Idempotent: stopping a stopped clock emits nothing and
    /// changes nothing. The anchors survive, so the remaining display keeps
    /// its last countdown until a reset.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerStopped {
            rings: self.rings,
            at: Utc::now(),
        })
    }

    /// Stop, then point the displayed interval and remaining values at the
    /// freshly supplied length without arming.
    pub fn reset(&mut self, interval: IntervalLength) -> Event {
        self.stop();
        self.interval = interval;
        self.armed = false;
        self.anchor_start_ms = 0;
        self.anchor_end_ms = 0;
        Event::TimerReset {
            interval_secs: interval.as_secs(),
            at: Utc::now(),
        }
    }
}
