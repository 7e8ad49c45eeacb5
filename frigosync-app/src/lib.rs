//! Frigosync monitor process.
//!
//! Polls the appliance controller (or its simulated stand-in), runs the
//! alert engine over every snapshot and keeps the process-wide
//! notification list.

use std::sync::Arc;
use std::time::Duration;

use frigosync_core::AlertEngine;
use frigosync_core::models::Severity;

use crate::device::StatusSource;
use crate::notify::NotificationCenter;
use crate::settings::Settings;

pub mod auth;
pub mod device;
pub mod error;
pub mod notify;
pub mod settings;

pub async fn run(settings: &Arc<Settings>) {
    let mut source = StatusSource::new(&settings.device);
    let mut engine = AlertEngine::new();
    let center = NotificationCenter::new();

    // Single consumer: one tick finishes before the next starts, which
    // the settings validation guarantees against the worst-case round
    // trip.
    let mut interval =
        tokio::time::interval(Duration::from_millis(settings.device.poll_interval_ms));

    loop {
        interval.tick().await;

        let status = source.fetch_status().await;
        tracing::info!(
            temperature = format_args!("{:.2}", status.temperature),
            humidity = format_args!("{:.1}", status.humidity),
            relay = status.relay_state,
            door1_closed = status.door1_closed,
            alert = status.alert_active,
            "status"
        );

        for alert in engine.observe(&status) {
            match alert.severity {
                Severity::Critical => tracing::error!("{}: {}", alert.title, alert.message),
                Severity::Warning => tracing::warn!("{}: {}", alert.title, alert.message),
                Severity::Info => tracing::info!("{}: {}", alert.title, alert.message),
            }
            center.publish(alert).await;
        }
    }
}
