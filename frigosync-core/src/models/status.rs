use serde::{Deserialize, Serialize};

/// One immutable reading of the appliance at a point in time.
///
/// Produced fresh on every polling tick and superseded by the next
/// snapshot; the polling cadence is the caller's policy, not the
/// model's. Invariant: `min_temp < max_temp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Reported air temperature in °C.
    pub temperature: f64,
    /// Relative humidity, 0-100 %.
    pub humidity: f64,
    /// true = compressor relay energized.
    pub relay_state: bool,
    /// true = mains power OK.
    pub power_status: bool,
    /// true = door 1 closed.
    pub door1_closed: bool,
    /// true = door 2 closed.
    pub door2_closed: bool,
    /// Lower hysteresis threshold in °C (compressor OFF at or below).
    pub min_temp: f64,
    /// Upper hysteresis threshold in °C (compressor ON at or above).
    pub max_temp: f64,
    /// Controller-side out-of-range alert flag.
    pub alert_active: bool,
    /// Seconds spent out of range, as reported by the controller.
    pub time_out_of_range: u32,
}

/// Wire format served by the controller at `GET /api/status`.
///
/// The relay, power and door fields arrive as the literal strings the
/// firmware prints for GPIO levels; only `"HIGH"` maps to `true`, any
/// other value reads as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub temperature: f64,
    pub humidity: f64,
    pub relay_state: String,
    pub power_status: String,
    pub door1_status: String,
    pub door2_status: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub alert_active: bool,
    pub time_out_of_range: u32,
}

const LEVEL_HIGH: &str = "HIGH";
const LEVEL_LOW: &str = "LOW";

fn level(active: bool) -> String {
    if active { LEVEL_HIGH } else { LEVEL_LOW }.to_owned()
}

impl From<StatusPayload> for SystemStatus {
    fn from(payload: StatusPayload) -> Self {
        Self {
            temperature: payload.temperature,
            humidity: payload.humidity,
            relay_state: payload.relay_state == LEVEL_HIGH,
            power_status: payload.power_status == LEVEL_HIGH,
            door1_closed: payload.door1_status == LEVEL_HIGH,
            door2_closed: payload.door2_status == LEVEL_HIGH,
            min_temp: payload.min_temp,
            max_temp: payload.max_temp,
            alert_active: payload.alert_active,
            time_out_of_range: payload.time_out_of_range,
        }
    }
}

impl From<&SystemStatus> for StatusPayload {
    fn from(status: &SystemStatus) -> Self {
        Self {
            temperature: status.temperature,
            humidity: status.humidity,
            relay_state: level(status.relay_state),
            power_status: level(status.power_status),
            door1_status: level(status.door1_closed),
            door2_status: level(status.door2_closed),
            min_temp: status.min_temp,
            max_temp: status.max_temp,
            alert_active: status.alert_active,
            time_out_of_range: status.time_out_of_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_firmware_payload() {
        let raw = r#"{
            "temperature": 4.2,
            "humidity": 58.5,
            "relayState": "HIGH",
            "powerStatus": "HIGH",
            "door1Status": "LOW",
            "door2Status": "HIGH",
            "minTemp": 2.0,
            "maxTemp": 8.0,
            "alertActive": false,
            "timeOutOfRange": 0
        }"#;

        let payload: StatusPayload = serde_json::from_str(raw).unwrap();
        let status = SystemStatus::from(payload);

        assert!(status.relay_state);
        assert!(status.power_status);
        assert!(!status.door1_closed);
        assert!(status.door2_closed);
        assert_eq!(status.min_temp, 2.0);
        assert_eq!(status.max_temp, 8.0);
    }

    #[test]
    fn test_only_high_maps_to_true() {
        let mut payload = sample_payload();
        payload.relay_state = "high".to_owned();
        payload.power_status = "1".to_owned();
        payload.door1_status = "ON".to_owned();

        let status = SystemStatus::from(payload);
        assert!(!status.relay_state);
        assert!(!status.power_status);
        assert!(!status.door1_closed);
    }

    #[test]
    fn test_payload_round_trip() {
        let status = SystemStatus::from(sample_payload());
        let back = StatusPayload::from(&status);
        assert_eq!(back, sample_payload());
    }

    #[test]
    fn test_payload_field_names_are_camel_case() {
        let json = serde_json::to_value(sample_payload()).unwrap();
        assert!(json.get("relayState").is_some());
        assert!(json.get("door1Status").is_some());
        assert!(json.get("timeOutOfRange").is_some());
    }

    fn sample_payload() -> StatusPayload {
        StatusPayload {
            temperature: 4.2,
            humidity: 58.5,
            relay_state: "HIGH".to_owned(),
            power_status: "HIGH".to_owned(),
            door1_status: "LOW".to_owned(),
            door2_status: "HIGH".to_owned(),
            min_temp: 2.0,
            max_temp: 8.0,
            alert_active: false,
            time_out_of_range: 0,
        }
    }
}
