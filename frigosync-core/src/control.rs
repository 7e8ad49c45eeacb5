//! Hysteresis control model.
//!
//! Two distinct thresholds keep the compressor relay from oscillating:
//! cooling latches ON once the baseline temperature climbs to
//! `max_temp` and OFF once it falls back to `min_temp`. The out-of-range
//! alert predicate is deliberately independent of the relay state
//! machine so the two can be tested in isolation.

use thiserror::Error;

pub const DEFAULT_MIN_TEMP: f64 = 2.0;
pub const DEFAULT_MAX_TEMP: f64 = 8.0;
/// Baseline drift per tick while the compressor is idle, in °C.
pub const DEFAULT_RISE_STEP: f64 = 0.05;
/// Baseline drop per tick while the compressor is cooling, in °C.
pub const DEFAULT_FALL_STEP: f64 = 0.1;
pub const DEFAULT_ALERT_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("invalid thresholds: min {min} must be strictly below max {max}")]
    InvalidThresholds { min: f64, max: f64 },

    #[error("step sizes must be positive, got rise {rise} / fall {fall}")]
    InvalidSteps { rise: f64, fall: f64 },
}

/// Named switching parameters for one appliance profile.
///
/// Construction validates `min_temp < max_temp` and positive steps, so
/// every instance in circulation is usable; `step` and `is_alert` are
/// total over validated profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct HysteresisProfile {
    min_temp: f64,
    max_temp: f64,
    rise_step: f64,
    fall_step: f64,
    alert_threshold: f64,
}

impl HysteresisProfile {
    /// Profile with custom thresholds and stock step sizes.
    pub fn new(min_temp: f64, max_temp: f64) -> Result<Self, ControlError> {
        Self::with_steps(
            min_temp,
            max_temp,
            DEFAULT_RISE_STEP,
            DEFAULT_FALL_STEP,
            DEFAULT_ALERT_THRESHOLD,
        )
    }

    /// Fully custom profile for a different appliance.
    pub fn with_steps(
        min_temp: f64,
        max_temp: f64,
        rise_step: f64,
        fall_step: f64,
        alert_threshold: f64,
    ) -> Result<Self, ControlError> {
        // Negated comparisons also reject NaN inputs.
        if !(min_temp < max_temp) {
            return Err(ControlError::InvalidThresholds {
                min: min_temp,
                max: max_temp,
            });
        }
        if !(rise_step > 0.0) || !(fall_step > 0.0) {
            return Err(ControlError::InvalidSteps {
                rise: rise_step,
                fall: fall_step,
            });
        }

        Ok(Self {
            min_temp,
            max_temp,
            rise_step,
            fall_step,
            alert_threshold,
        })
    }

    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }

    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }

    pub fn rise_step(&self) -> f64 {
        self.rise_step
    }

    pub fn fall_step(&self) -> f64 {
        self.fall_step
    }

    pub fn alert_threshold(&self) -> f64 {
        self.alert_threshold
    }

    /// One control tick: advance the baseline and decide the next relay
    /// state.
    ///
    /// While cooling the baseline drops by `fall_step` and cooling
    /// clears once it reaches `min_temp`; while idle it rises by
    /// `rise_step` and cooling sets once it reaches `max_temp`.
    pub fn step(&self, cooling: bool, baseline: f64) -> (bool, f64) {
        if cooling {
            let next = baseline - self.fall_step;
            (next > self.min_temp, next)
        } else {
            let next = baseline + self.rise_step;
            (next >= self.max_temp, next)
        }
    }

    /// Out-of-range predicate, decoupled from the relay state machine.
    pub fn is_alert(&self, temperature: f64) -> bool {
        temperature > self.alert_threshold
    }
}

impl Default for HysteresisProfile {
    fn default() -> Self {
        Self {
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            rise_step: DEFAULT_RISE_STEP,
            fall_step: DEFAULT_FALL_STEP,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_flips_exactly_at_thresholds() {
        // Exact binary steps make the flip ticks deterministic:
        // 5.0 -> 8.0 in 12 rises of 0.25, 8.0 -> 2.0 in 12 falls of 0.5.
        let profile = HysteresisProfile::with_steps(2.0, 8.0, 0.25, 0.5, 10.0).unwrap();

        let mut cooling = false;
        let mut baseline = 5.0;
        let mut flips = Vec::new();

        for tick in 1..=40 {
            let (next_cooling, next_baseline) = profile.step(cooling, baseline);
            if next_cooling != cooling {
                flips.push((tick, next_baseline));
            }
            cooling = next_cooling;
            baseline = next_baseline;
        }

        assert_eq!(flips.len(), 2);
        assert_eq!(flips[0], (12, 8.0));
        assert_eq!(flips[1], (24, 2.0));
    }

    #[test]
    fn test_default_profile_flips_only_past_thresholds() {
        let profile = HysteresisProfile::default();

        let mut cooling = false;
        let mut baseline = 5.0;

        for _ in 0..1000 {
            let (next_cooling, next_baseline) = profile.step(cooling, baseline);
            if next_cooling && !cooling {
                assert!(next_baseline >= profile.max_temp());
                assert!(baseline < profile.max_temp());
            }
            if !next_cooling && cooling {
                assert!(next_baseline <= profile.min_temp());
                assert!(baseline > profile.min_temp());
            }
            cooling = next_cooling;
            baseline = next_baseline;
        }
    }

    #[test]
    fn test_idle_stays_idle_below_max() {
        let profile = HysteresisProfile::default();
        let (cooling, baseline) = profile.step(false, 5.0);
        assert!(!cooling);
        assert!((baseline - 5.05).abs() < 1e-9);
    }

    #[test]
    fn test_cooling_stays_on_above_min() {
        let profile = HysteresisProfile::default();
        let (cooling, baseline) = profile.step(true, 5.0);
        assert!(cooling);
        assert!((baseline - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_alert_is_strictly_above_threshold() {
        let profile = HysteresisProfile::default();
        assert!(!profile.is_alert(10.0));
        assert!(profile.is_alert(10.01));
        assert!(!profile.is_alert(4.0));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        assert_eq!(
            HysteresisProfile::new(8.0, 2.0),
            Err(ControlError::InvalidThresholds { min: 8.0, max: 2.0 })
        );
        assert!(HysteresisProfile::new(5.0, 5.0).is_err());
        assert!(HysteresisProfile::new(f64::NAN, 5.0).is_err());
    }

    #[test]
    fn test_rejects_non_positive_steps() {
        assert!(HysteresisProfile::with_steps(2.0, 8.0, 0.0, 0.1, 10.0).is_err());
        assert!(HysteresisProfile::with_steps(2.0, 8.0, 0.05, -0.1, 10.0).is_err());
    }
}
