use serde::{Deserialize, Serialize};
use time::Date;

use super::{EventType, Severity};

/// One sampled interval of the historical trend, ordered ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    /// Display label for the sample slot, e.g. `"14:00"`.
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
}

/// History view filter. A plain value with no identity, rebuilt on
/// every filter change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Inclusive lower date bound; `None` = unbounded.
    pub start_date: Option<Date>,
    /// Inclusive upper date bound; `None` = unbounded.
    pub end_date: Option<Date>,
    /// `None` matches every event type.
    pub event_type: Option<EventType>,
    /// `None` matches every severity.
    pub severity: Option<Severity>,
    /// Case-insensitive substring match against the message; empty
    /// matches everything.
    pub search_text: String,
}
