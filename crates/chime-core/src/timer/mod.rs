mod clock;
mod display;
mod engine;
mod interval;

pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{format_secs, DisplayGate};
pub use engine::IntervalClock;
pub use interval::{IntervalLength, DEFAULT_INTERVAL_SECS};
