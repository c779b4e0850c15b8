use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fallback when the requested interval is absent or unparsable.
pub const DEFAULT_INTERVAL_SECS: f64 = 3.0;

/// Repeat duration in seconds, validated positive and quantized to two
/// decimals. The display renders hundredths, so the stored value matches
/// what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalLength(f64);

impl IntervalLength {
    /// Validate a repeat duration. Rejects NaN, infinities, and anything
    /// that quantizes to zero or below; the clock never arms with those.
    pub fn new(secs: f64) -> Result<Self, ValidationError> {
        if !secs.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "interval_secs".into(),
                message: format!("expected a number of seconds, got {secs}"),
            });
        }
        let quantized = (secs * 100.0).round() / 100.0;
        if quantized <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "interval_secs".into(),
                message: format!("expected a positive number of seconds, got {secs}"),
            });
        }
        Ok(Self(quantized))
    }

    /// Parse user input, falling back to the 3-second default when the
    /// value is missing, unparsable, or non-positive.
    pub fn parse_or_default(input: Option<&str>) -> Self {
        input
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .and_then(|secs| Self::new(secs).ok())
            .unwrap_or_default()
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Interval length in whole milliseconds. Exact for two-decimal
    /// seconds, which is why the quantization happens up front.
    pub fn as_millis(&self) -> u64 {
        (self.0 * 1000.0).round() as u64
    }
}

impl Default for IntervalLength {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_nan() {
        assert!(IntervalLength::new(0.0).is_err());
        assert!(IntervalLength::new(-5.0).is_err());
        assert!(IntervalLength::new(f64::NAN).is_err());
        assert!(IntervalLength::new(f64::INFINITY).is_err());
        // Quantizes to 0.00, so it is as unusable as zero itself.
        assert!(IntervalLength::new(0.004).is_err());
    }

    #[test]
    fn quantizes_to_two_decimals() {
        let interval = IntervalLength::new(1.2345).unwrap();
        assert_eq!(interval.as_secs(), 1.23);
        assert_eq!(interval.as_millis(), 1_230);
    }

    #[test]
    fn millis_are_exact_for_two_decimal_values() {
        assert_eq!(IntervalLength::new(2.5).unwrap().as_millis(), 2_500);
        assert_eq!(IntervalLength::new(0.01).unwrap().as_millis(), 10);
        assert_eq!(IntervalLength::new(60.0).unwrap().as_millis(), 60_000);
    }

    #[test]
    fn parse_falls_back_to_default() {
        assert_eq!(IntervalLength::parse_or_default(None).as_secs(), 3.0);
        assert_eq!(IntervalLength::parse_or_default(Some("abc")).as_secs(), 3.0);
        assert_eq!(IntervalLength::parse_or_default(Some("")).as_secs(), 3.0);
        assert_eq!(IntervalLength::parse_or_default(Some("-2")).as_secs(), 3.0);
        assert_eq!(IntervalLength::parse_or_default(Some("0")).as_secs(), 3.0);
    }

    #[test]
    fn parse_accepts_valid_input() {
        assert_eq!(IntervalLength::parse_or_default(Some("5")).as_secs(), 5.0);
        assert_eq!(
            IntervalLength::parse_or_default(Some(" 1.5 ")).as_secs(),
            1.5
        );
    }
}
