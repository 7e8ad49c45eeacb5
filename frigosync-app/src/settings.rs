use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Margin between the poll interval and the worst-case round trip
/// below which a warning is logged.
const MARGIN_WARN_RATIO: f64 = 2.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Base URL of the controller, e.g. `http://192.168.4.1`.
    pub url: String,
    /// Hard timeout for the live status call.
    pub timeout_ms: u64,
    /// Artificial latency of the simulated fallback.
    pub fallback_delay_ms: u64,
    /// Polling cadence of the monitor loop.
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub device: Device,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let settings: Settings = toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
        .map_err(|e| Error::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// The single-consumer polling model only holds if one poll always
    /// finishes before the next starts: the interval must exceed the
    /// request timeout plus the fallback delay.
    fn validate(&self) -> Result<()> {
        let worst_case_ms = self.device.timeout_ms + self.device.fallback_delay_ms;

        if self.device.poll_interval_ms <= worst_case_ms {
            return Err(Error::Config(format!(
                "poll interval {}ms must exceed the worst-case round trip of {}ms",
                self.device.poll_interval_ms, worst_case_ms
            )));
        }

        if (self.device.poll_interval_ms as f64) < worst_case_ms as f64 * MARGIN_WARN_RATIO {
            tracing::warn!(
                "poll interval {}ms is under {MARGIN_WARN_RATIO}x the {}ms worst-case round trip",
                self.device.poll_interval_ms,
                worst_case_ms
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(poll_interval_ms: u64) -> Settings {
        Settings {
            logger: Logger {
                level: "debug".to_owned(),
            },
            device: Device {
                url: "http://192.168.4.1".to_owned(),
                timeout_ms: 500,
                fallback_delay_ms: 300,
                poll_interval_ms,
            },
        }
    }

    #[test]
    fn test_default_file_loads_and_validates() {
        let settings = Settings::new().unwrap();
        assert!(settings.device.poll_interval_ms > settings.device.timeout_ms);
    }

    #[test]
    fn test_rejects_poll_interval_inside_round_trip() {
        assert!(settings(800).validate().is_err());
        assert!(settings(500).validate().is_err());
        assert!(settings(2000).validate().is_ok());
    }
}
