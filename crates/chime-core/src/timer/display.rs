//! Render throttling for the countdown display.
//!
//! Polling runs every 10 ms so ring detection stays accurate, but
//! repainting two-decimal text at that rate is wasted work and jitters.
//! The gate buckets the time left into `window_ms`-wide phases and lets a
//! repaint through only near a bucket boundary, then drops it entirely when
//! the formatted text has not changed since the last emit.

/// Render a seconds value the way the countdown displays it: two decimals.
pub fn format_secs(secs: f64) -> String {
    format!("{secs:.2}")
}

/// Decides, poll by poll, whether the remaining-time text gets repainted.
#[derive(Debug)]
pub struct DisplayGate {
    tick_ms: u64,
    window_ms: u64,
    last_text: Option<String>,
}

impl DisplayGate {
    pub fn new(tick_ms: u64, window_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            window_ms: window_ms.max(1),
            last_text: None,
        }
    }

    /// Phase test from the polling loop: `remaining_ms` is the time left
    /// until the current deadline. Returns the text to render, or `None`
    /// when this poll should not repaint.
    ///
    /// A poll passes the gate when its phase within the display window is
    /// within half a tick of a window boundary; everything in between is
    /// guaranteed to be repainted by a neighboring poll anyway.
    pub fn poll(&mut self, remaining_ms: u64) -> Option<String> {
        let phase = remaining_ms % self.window_ms;
        let half_tick = (self.tick_ms / 2).max(1);
        if phase >= half_tick && phase <= self.window_ms - half_tick {
            return None;
        }
        self.emit(remaining_ms as f64 / 1000.0)
    }

    /// Unthrottled render used on arm and reset, where the fresh interval
    /// text must appear immediately.
    pub fn force(&mut self, secs: f64) -> Option<String> {
        self.last_text = None;
        self.emit(secs)
    }

    fn emit(&mut self, secs: f64) -> Option<String> {
        let text = format_secs(secs);
        if self.last_text.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_text = Some(text.clone());
        Some(text)
    }
}
