//! Debounced alert engine.
//!
//! Watches the stream of status snapshots and emits discrete
//! entered/left notifications per monitored signal, suppressing repeat
//! emissions while a condition persists.

use std::time::Duration;

use crate::models::{AlertMessage, Severity, SystemStatus};

/// Humidity band monitored by the engine, in %RH.
const HUMIDITY_LOW_PCT: f64 = 30.0;
const HUMIDITY_HIGH_PCT: f64 = 80.0;

const TEMP_CLEAR_DISMISS: Duration = Duration::from_millis(5000);
const DOOR_CLEAR_DISMISS: Duration = Duration::from_millis(3000);
const POWER_CLEAR_DISMISS: Duration = Duration::from_millis(5000);
const RELAY_ON_DISMISS: Duration = Duration::from_millis(3000);

/// Monitored signals, one latch each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKey {
    TempAlert,
    HumidityLow,
    HumidityHigh,
    DoorOpen,
    PowerIssue,
    /// Set on the first relay-ON edge and never cleared: the compressor
    /// announcement fires at most once per engine lifetime. The
    /// asymmetry is inherited controller behavior, kept rather than
    /// modeled with a reverse transition.
    RelayOn,
}

/// Edge-triggered de-duplication over consecutive status snapshots.
///
/// Each key holds a boolean latch; a message is emitted only when a
/// key's predicate changes value between snapshots, so feeding the same
/// snapshot repeatedly is idempotent after the first observation.
///
/// A fresh engine starts all-inactive, which re-announces conditions
/// that are already true on the first snapshot after a restart. That
/// cold-start re-emission is accepted behavior.
///
/// Snapshots must be processed in strict arrival order; transition
/// detection compares against the immediately preceding latch state.
#[derive(Debug, Default)]
pub struct AlertEngine {
    temp_alert: bool,
    humidity_low: bool,
    humidity_high: bool,
    door_open: bool,
    power_issue: bool,
    relay_on: bool,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current latch state for one monitored signal.
    pub fn is_active(&self, key: AlertKey) -> bool {
        match key {
            AlertKey::TempAlert => self.temp_alert,
            AlertKey::HumidityLow => self.humidity_low,
            AlertKey::HumidityHigh => self.humidity_high,
            AlertKey::DoorOpen => self.door_open,
            AlertKey::PowerIssue => self.power_issue,
            AlertKey::RelayOn => self.relay_on,
        }
    }

    /// Feed one snapshot; returns at most one message per key
    /// transition and nothing for keys whose state is unchanged.
    pub fn observe(&mut self, status: &SystemStatus) -> Vec<AlertMessage> {
        let mut out = Vec::new();

        if status.alert_active && !self.temp_alert {
            out.push(AlertMessage {
                severity: Severity::Critical,
                title: "Temperature alert".to_owned(),
                message: format!(
                    "Temperature out of range: {:.1}°C (expected {:.1}°C to {:.1}°C)",
                    status.temperature, status.min_temp, status.max_temp
                ),
                duration: None,
            });
            self.temp_alert = true;
        } else if !status.alert_active && self.temp_alert {
            out.push(AlertMessage {
                severity: Severity::Info,
                title: "Temperature normalized".to_owned(),
                message: format!("Back inside the working range: {:.1}°C", status.temperature),
                duration: Some(TEMP_CLEAR_DISMISS),
            });
            self.temp_alert = false;
        }

        if status.humidity < HUMIDITY_LOW_PCT && !self.humidity_low {
            out.push(AlertMessage {
                severity: Severity::Warning,
                title: "Low humidity".to_owned(),
                message: format!("Humidity at {:.0}%", status.humidity),
                duration: None,
            });
            self.humidity_low = true;
        } else if status.humidity >= HUMIDITY_LOW_PCT && self.humidity_low {
            // Clears silently.
            self.humidity_low = false;
        }

        if status.humidity > HUMIDITY_HIGH_PCT && !self.humidity_high {
            out.push(AlertMessage {
                severity: Severity::Warning,
                title: "High humidity".to_owned(),
                message: format!("Humidity at {:.0}%", status.humidity),
                duration: None,
            });
            self.humidity_high = true;
        } else if status.humidity <= HUMIDITY_HIGH_PCT && self.humidity_high {
            // Clears silently.
            self.humidity_high = false;
        }

        if !status.door1_closed && !self.door_open {
            out.push(AlertMessage {
                severity: Severity::Warning,
                title: "Door open".to_owned(),
                message: "Door 1 is open".to_owned(),
                duration: None,
            });
            self.door_open = true;
        } else if status.door1_closed && self.door_open {
            out.push(AlertMessage {
                severity: Severity::Info,
                title: "Door closed".to_owned(),
                message: "Door 1 was closed".to_owned(),
                duration: Some(DOOR_CLEAR_DISMISS),
            });
            self.door_open = false;
        }

        if !status.power_status && !self.power_issue {
            out.push(AlertMessage {
                severity: Severity::Critical,
                title: "Power issue".to_owned(),
                message: "Mains power lost".to_owned(),
                duration: None,
            });
            self.power_issue = true;
        } else if status.power_status && self.power_issue {
            out.push(AlertMessage {
                severity: Severity::Info,
                title: "Power restored".to_owned(),
                message: "Mains power is back to normal".to_owned(),
                duration: Some(POWER_CLEAR_DISMISS),
            });
            self.power_issue = false;
        }

        if status.relay_state && !self.relay_on {
            out.push(AlertMessage {
                severity: Severity::Info,
                title: "Compressor on".to_owned(),
                message: "Cooling is running".to_owned(),
                duration: Some(RELAY_ON_DISMISS),
            });
            self.relay_on = true;
        }

        out
    }
}
