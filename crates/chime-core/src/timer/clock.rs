use std::cell::Cell;
use std::rc::Rc;

/// Source of absolute wall-clock time in milliseconds since the Unix epoch.
///
/// The engine never reads the system clock directly -- it goes through this
/// trait so tests can drive time by hand.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// System clock reading epoch milliseconds from [`std::time::SystemTime`].
///
/// Wall-clock time can step backwards under NTP adjustment; anchors are
/// absolute, so a backwards step delays the next ring rather than
/// corrupting the schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share the same underlying time, so a test keeps one handle and
/// hands another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
