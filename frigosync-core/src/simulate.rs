//! Stand-in for the physical appliance.
//!
//! Emulates the controller's hysteresis loop with injected sensor
//! noise. Every simulator owns its full state, so independent simulated
//! devices can coexist in one process.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::control::{ControlError, HysteresisProfile};
use crate::models::SystemStatus;

/// Flutter added to the reported temperature, in °C.
const NOISE_BAND: f64 = 0.05;
/// Probability that door 1 reads open on any given poll.
const DOOR_OPEN_CHANCE: f64 = 0.05;
const BASE_HUMIDITY_PCT: f64 = 58.0;
const HUMIDITY_JITTER_PCT: f64 = 2.0;
/// Seconds the controller reports out of range while alerting.
const ALERT_OUT_OF_RANGE_SECS: u32 = 120;
const INITIAL_BASELINE: f64 = 5.0;

#[derive(Debug)]
pub struct DeviceSimulator {
    profile: HysteresisProfile,
    baseline: f64,
    cooling: bool,
    rng: StdRng,
}

impl DeviceSimulator {
    pub fn new(profile: HysteresisProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Deterministic simulator for tests; same seed, same readings.
    pub fn with_rng(profile: HysteresisProfile, rng: StdRng) -> Self {
        Self {
            profile,
            baseline: INITIAL_BASELINE,
            cooling: false,
            rng,
        }
    }

    pub fn profile(&self) -> &HysteresisProfile {
        &self.profile
    }

    /// Replace the hysteresis bounds, keeping steps and alert threshold.
    pub fn set_thresholds(&mut self, min_temp: f64, max_temp: f64) -> Result<(), ControlError> {
        self.profile = HysteresisProfile::with_steps(
            min_temp,
            max_temp,
            self.profile.rise_step(),
            self.profile.fall_step(),
            self.profile.alert_threshold(),
        )?;
        Ok(())
    }

    /// Advance one control tick and report a snapshot.
    ///
    /// Noise only touches the reported temperature; the baseline the
    /// hysteresis runs on is never perturbed.
    pub fn next_status(&mut self) -> SystemStatus {
        let (cooling, baseline) = self.profile.step(self.cooling, self.baseline);
        self.cooling = cooling;
        self.baseline = baseline;

        let temperature = baseline + self.rng.gen_range(-NOISE_BAND..=NOISE_BAND);
        let alert_active = self.profile.is_alert(temperature);

        SystemStatus {
            temperature,
            humidity: BASE_HUMIDITY_PCT + self.rng.gen_range(0.0..HUMIDITY_JITTER_PCT),
            relay_state: cooling,
            power_status: true,
            door1_closed: self.rng.gen_range(0.0..1.0) > DOOR_OPEN_CHANCE,
            door2_closed: true,
            min_temp: self.profile.min_temp(),
            max_temp: self.profile.max_temp(),
            alert_active,
            time_out_of_range: if alert_active { ALERT_OUT_OF_RANGE_SECS } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> DeviceSimulator {
        DeviceSimulator::with_rng(HysteresisProfile::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_first_reading_tracks_baseline_drift() {
        let mut simulator = seeded(7);
        let status = simulator.next_status();

        // Idle tick: 5.0 + 0.05 rise, then at most ±0.05 noise.
        assert!((5.0..=5.1).contains(&status.temperature));
        assert!(!status.relay_state);
        assert!(status.power_status);
        assert!(status.door2_closed);
        assert_eq!(status.min_temp, 2.0);
        assert_eq!(status.max_temp, 8.0);
    }

    #[test]
    fn test_long_run_stays_inside_hysteresis_band() {
        let mut simulator = seeded(42);
        let mut saw_cooling = false;
        let mut saw_idle = false;

        for _ in 0..500 {
            let status = simulator.next_status();
            // Baseline is confined to [min - fall, max] plus noise.
            assert!((1.85..=8.1).contains(&status.temperature));
            assert!((58.0..60.0).contains(&status.humidity));
            assert!(!status.alert_active);
            assert_eq!(status.time_out_of_range, 0);
            saw_cooling |= status.relay_state;
            saw_idle |= !status.relay_state;
        }

        assert!(saw_cooling);
        assert!(saw_idle);
    }

    #[test]
    fn test_same_seed_same_readings() {
        let mut left = seeded(9);
        let mut right = seeded(9);

        for _ in 0..50 {
            assert_eq!(left.next_status(), right.next_status());
        }
    }

    #[test]
    fn test_set_thresholds_validates_and_applies() {
        let mut simulator = seeded(1);
        assert!(simulator.set_thresholds(8.0, 2.0).is_err());

        simulator.set_thresholds(3.0, 6.0).unwrap();
        let status = simulator.next_status();
        assert_eq!(status.min_temp, 3.0);
        assert_eq!(status.max_temp, 6.0);
    }

    #[test]
    fn test_door_occasionally_reads_open() {
        let mut simulator = seeded(3);
        let open_polls = (0..1000)
            .filter(|_| !simulator.next_status().door1_closed)
            .count();

        // ~5% of polls; generous bounds keep the seed swappable.
        assert!(open_polls > 10, "saw {open_polls} open polls");
        assert!(open_polls < 150, "saw {open_polls} open polls");
    }
}
