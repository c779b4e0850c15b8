//! # Chime Core Library
//!
//! This library provides the core logic for chime, an interval-ringing
//! timer: the user sets a repeat duration, an audible cue fires every time
//! the countdown elapses, and the countdown re-arms itself until the user
//! stops it. The CLI binary is a thin host layer over this library.
//!
//! ## Architecture
//!
//! - **Interval clock**: a wall-clock-anchored state machine that requires
//!   the host to periodically invoke `poll()` and dispatch the returned
//!   events
//! - **Display gate**: throttles countdown rendering to a coarse window
//!   while polling stays at full resolution
//! - **Collaborators**: `Notifier` (audible cue) and `Presenter` (text
//!   rendering) traits implemented by the host
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`IntervalClock`]: core timer state machine
//! - [`DisplayGate`]: render throttling policy
//! - [`Config`]: application configuration management
//! - [`Event`]: state changes the host reacts to

pub mod timer;
pub mod storage;
pub mod events;
pub mod notify;
pub mod present;
pub mod error;

pub use timer::{Clock, DisplayGate, IntervalClock, IntervalLength, ManualClock, SystemClock};
pub use storage::Config;
pub use events::Event;
pub use notify::{Notifier, NullNotifier, Volume};
pub use present::Presenter;
pub use error::{ConfigError, CoreError, ValidationError};
