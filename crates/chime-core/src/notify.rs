//! Audible-cue collaborator.

use serde::{Deserialize, Deserializer, Serialize};

/// Loudness on the 0-100 scale the configuration stores, normalized to a
/// 0.0-1.0 gain for hosts that can scale amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Volume(u8);

impl Volume {
    pub const MUTED: Volume = Volume(0);

    /// Out-of-range values clamp instead of failing; a slider can only be
    /// dragged so far, but a config file can say anything.
    pub fn new(level: u32) -> Self {
        Self(level.min(100) as u8)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn gain(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    pub fn is_muted(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(50)
    }
}

impl<'de> Deserialize<'de> for Volume {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level = u32::deserialize(deserializer)?;
        Ok(Volume::new(level))
    }
}

/// The audible cue. Invoked once per ring, and once on arm as feedback
/// that the timer started.
///
/// Failures are reported, not fatal: a broken sound device must not freeze
/// the countdown, so hosts log the error and keep polling.
pub trait Notifier {
    fn ring(&mut self, volume: Volume) -> Result<(), Box<dyn std::error::Error>>;
}

/// Notifier that swallows rings. Used when notifications are disabled and
/// in tests that only care about timing.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn ring(&mut self, _volume: Volume) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_scale() {
        assert_eq!(Volume::new(250).level(), 100);
        assert_eq!(Volume::new(100).level(), 100);
        assert_eq!(Volume::new(0).level(), 0);
    }

    #[test]
    fn normalizes_to_gain() {
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(100).gain(), 1.0);
        assert_eq!(Volume::MUTED.gain(), 0.0);
        assert!(Volume::MUTED.is_muted());
    }

    #[test]
    fn deserialization_clamps_as_well() {
        let volume: Volume = serde_json::from_str("250").unwrap();
        assert_eq!(volume.level(), 100);
    }
}
