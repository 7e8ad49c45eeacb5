use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Alert,
    Door,
    Power,
    System,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Alert => "ALERT",
            EventType::Door => "DOOR",
            EventType::Power => "POWER",
            EventType::System => "SYSTEM",
        }
    }
}

/// Append-only history entry; immutable once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub id: i32,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub severity: Severity,
}
