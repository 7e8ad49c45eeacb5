//! Device status source.
//!
//! Talks to the appliance controller over its local HTTP endpoint and
//! falls back to the core simulator whenever the controller does not
//! answer in time, so the dashboard always has a reading.

use std::time::Duration;

use frigosync_core::models::{
    EventType, HistoricalDataPoint, Severity, StatusPayload, SystemEvent, SystemStatus,
};
use frigosync_core::{DeviceSimulator, HysteresisProfile};
use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use time::macros::time;

use crate::error::Result;
use crate::settings::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdKind {
    Min,
    Max,
}

#[derive(Debug, Serialize)]
struct UpdateThresholdRequest {
    kind: ThresholdKind,
    value: f64,
}

/// Always-answering status source.
///
/// `fetch_status` hides which path served a value by design; tests that
/// need a specific path call `fetch_live` or `simulate` directly.
pub struct StatusSource {
    client: reqwest::Client,
    base_url: String,
    fallback_delay: Duration,
    simulator: DeviceSimulator,
}

impl StatusSource {
    pub fn new(config: &Device) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            fallback_delay: Duration::from_millis(config.fallback_delay_ms),
            simulator: DeviceSimulator::new(HysteresisProfile::default()),
        }
    }

    /// Swap in a prepared simulator (seeded RNG, custom profile).
    pub fn with_simulator(mut self, simulator: DeviceSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Fetch a snapshot; never fails to the caller. Any live-path
    /// failure serves the simulator after the configured fallback
    /// delay, without surfacing an error.
    pub async fn fetch_status(&mut self) -> SystemStatus {
        match self.fetch_live().await {
            Ok(status) => status,
            Err(e) => {
                tracing::debug!("live status unavailable, simulating: {e}");
                tokio::time::sleep(self.fallback_delay).await;
                self.simulator.next_status()
            }
        }
    }

    /// The live path only, for callers that must not see simulated
    /// data. Non-success responses are errors.
    pub async fn fetch_live(&self) -> Result<SystemStatus> {
        let payload: StatusPayload = self
            .client
            .get(format!("{}/api/status", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(payload.into())
    }

    /// The simulated path only, for tests that force the fallback.
    pub fn simulate(&mut self) -> SystemStatus {
        self.simulator.next_status()
    }

    /// Persist one hysteresis threshold back to the controller.
    ///
    /// `Ok(false)` means the controller answered but refused the value;
    /// transport failures are errors the caller must handle.
    pub async fn update_temperature_settings(
        &self,
        kind: ThresholdKind,
        value: f64,
    ) -> Result<bool> {
        let response = self
            .client
            .post(format!("{}/api/settings", self.base_url))
            .json(&UpdateThresholdRequest { kind, value })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(true)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("controller refused threshold update ({status}): {body}");
            Ok(false)
        }
    }
}

/// Seed events of the current controller session. The controller keeps
/// no event log of its own, so the history view is bootstrapped the way
/// the bring-up firmware seeds it.
pub fn fetch_events(now: OffsetDateTime) -> Vec<SystemEvent> {
    let seeds = [
        (
            1,
            EventType::System,
            Severity::Info,
            "System started successfully",
            time!(08:00),
        ),
        (
            2,
            EventType::Door,
            Severity::Warning,
            "Door 1 opened",
            time!(09:30),
        ),
        (
            3,
            EventType::System,
            Severity::Info,
            "Compressor activated",
            time!(09:35),
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, event_type, severity, message, at)| SystemEvent {
            id,
            event_type,
            message: message.to_owned(),
            timestamp: now.replace_time(at),
            severity,
        })
        .collect()
}

/// Synthesized 24-hour trend, one sample per hour, oldest first.
pub fn fetch_history(now: OffsetDateTime) -> Vec<HistoricalDataPoint> {
    let mut rng = rand::thread_rng();

    (0..=24)
        .rev()
        .map(|hours_back: i64| {
            let slot = now - time::Duration::hours(hours_back);
            HistoricalDataPoint {
                time: format!("{:02}:00", slot.hour()),
                temperature: ((4.0 + (hours_back as f64).sin() * 2.0) * 10.0).round() / 10.0,
                humidity: (55.0f64 + rng.gen_range(0.0..10.0)).floor(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::datetime;

    use super::*;

    fn unreachable_device() -> Device {
        Device {
            // Reserved port; connections are refused immediately.
            url: "http://127.0.0.1:9".to_owned(),
            timeout_ms: 100,
            fallback_delay_ms: 0,
            poll_interval_ms: 1000,
        }
    }

    #[tokio::test]
    async fn test_fetch_status_falls_back_to_simulation() {
        let simulator = DeviceSimulator::with_rng(
            HysteresisProfile::default(),
            StdRng::seed_from_u64(11),
        );
        let mut source = StatusSource::new(&unreachable_device()).with_simulator(simulator);

        let status = source.fetch_status().await;
        assert_eq!(status.min_temp, 2.0);
        assert_eq!(status.max_temp, 8.0);
        assert!(status.power_status);
    }

    #[tokio::test]
    async fn test_fetch_live_surfaces_the_failure() {
        let source = StatusSource::new(&unreachable_device());
        assert!(source.fetch_live().await.is_err());
    }

    #[test]
    fn test_seed_events_share_the_session_date() {
        let now = datetime!(2024-03-05 14:20 UTC);
        let events = fetch_events(now);

        assert_eq!(events.len(), 3);
        for event in &events {
            assert_eq!(event.timestamp.date(), now.date());
        }
        assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_history_covers_a_full_day() {
        let points = fetch_history(datetime!(2024-03-05 14:20 UTC));

        assert_eq!(points.len(), 25);
        assert_eq!(points.last().unwrap().time, "14:00");
        for point in &points {
            assert!((2.0..=6.0).contains(&point.temperature));
            assert!((55.0..65.0).contains(&point.humidity));
        }
    }
}
