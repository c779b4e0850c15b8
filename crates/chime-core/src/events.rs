use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the clock produces an Event.
/// The host dispatches them to the notifier and presenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A run started. The host rings once on this event as arming feedback;
    /// the first deadline ring still happens a full interval later.
    TimerArmed {
        interval_secs: f64,
        anchor_start_ms: u64,
        anchor_end_ms: u64,
        at: DateTime<Utc>,
    },
    /// A countdown interval elapsed.
    Ring {
        /// 1-based ring count since the last arm.
        seq: u64,
        /// The deadline that elapsed. The next interval is anchored off it,
        /// never off the observed firing time.
        anchor_end_ms: u64,
        /// How far past the deadline the poll observed the ring.
        late_ms: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        rings: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        interval_secs: f64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        interval_secs: f64,
        remaining_secs: f64,
        anchor_end_ms: u64,
        rings: u64,
        at: DateTime<Utc>,
    },
}
