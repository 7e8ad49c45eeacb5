//! Historical aggregation and filter engine.
//!
//! Turns the append-only event log and sampled trend data into
//! filtered, paginated and summarized views, plus CSV export.

use serde::Serialize;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::models::{FilterOptions, HistoricalDataPoint, SystemEvent};

pub const DEFAULT_PAGE_SIZE: usize = 50;

const EXPORT_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    #[error("nothing to export")]
    EmptyExport,

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("pages are 1-indexed; page 0 is not addressable")]
    InvalidPage,

    #[error("csv formatting failed: {0}")]
    Csv(String),

    #[error("timestamp formatting failed: {0}")]
    Timestamp(String),
}

/// Whether `event` passes `filter`; every clause must hold.
pub fn matches(event: &SystemEvent, filter: &FilterOptions) -> bool {
    if let Some(event_type) = filter.event_type {
        if event.event_type != event_type {
            return false;
        }
    }
    if let Some(severity) = filter.severity {
        if event.severity != severity {
            return false;
        }
    }
    if !filter.search_text.is_empty() {
        let needle = filter.search_text.to_lowercase();
        if !event.message.to_lowercase().contains(&needle) {
            return false;
        }
    }

    // Date bounds are inclusive and apply to the calendar date only.
    let date = event.timestamp.date();
    if let Some(start) = filter.start_date {
        if date < start {
            return false;
        }
    }
    if let Some(end) = filter.end_date {
        if date > end {
            return false;
        }
    }

    true
}

pub fn filter_events(events: &[SystemEvent], filter: &FilterOptions) -> Vec<SystemEvent> {
    events
        .iter()
        .filter(|event| matches(event, filter))
        .cloned()
        .collect()
}

/// Fixed-size page addressing over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, HistoryError> {
        if page_size == 0 {
            return Err(HistoryError::InvalidPageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// 1-indexed page of `items`, clamped to the available data; pages
    /// past the end are empty slices, not errors.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> Result<&'a [T], HistoryError> {
        if page == 0 {
            return Err(HistoryError::InvalidPage);
        }
        let start = (page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        Ok(&items[start..end])
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Aggregates over a sampled window.
///
/// Absent entirely when there is no data, so an empty window renders as
/// a placeholder instead of reading as "average 0".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    /// Mean temperature, one decimal place.
    pub avg_temperature: f64,
    /// Mean humidity, whole percent.
    pub avg_humidity: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_humidity: f64,
    pub max_humidity: f64,
}

pub fn summarize(points: &[HistoricalDataPoint]) -> Option<HistorySummary> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let temperatures = || points.iter().map(|p| p.temperature);
    let humidities = || points.iter().map(|p| p.humidity);

    Some(HistorySummary {
        avg_temperature: (temperatures().sum::<f64>() / count * 10.0).round() / 10.0,
        avg_humidity: (humidities().sum::<f64>() / count).round(),
        min_temperature: temperatures().fold(f64::INFINITY, f64::min),
        max_temperature: temperatures().fold(f64::NEG_INFINITY, f64::max),
        min_humidity: humidities().fold(f64::INFINITY, f64::min),
        max_humidity: humidities().fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Serialize flat records to CSV text: header row from the first
/// record's fields in declaration order, embedded quotes doubled,
/// fields quoted only when they need it.
pub fn export_csv<S: Serialize>(records: &[S]) -> Result<String, HistoryError> {
    if records.is_empty() {
        return Err(HistoryError::EmptyExport);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| HistoryError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HistoryError::Csv(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| HistoryError::Csv(e.to_string()))?;

    Ok(text.trim_end_matches(['\r', '\n']).to_owned())
}

#[derive(Debug, Serialize)]
struct EventRow {
    id: i32,
    r#type: &'static str,
    message: String,
    timestamp: String,
    severity: &'static str,
}

/// Flatten events to human-readable CSV rows.
pub fn export_events_csv(events: &[SystemEvent]) -> Result<String, HistoryError> {
    let rows = events
        .iter()
        .map(|event| {
            Ok(EventRow {
                id: event.id,
                r#type: event.event_type.as_str(),
                message: event.message.clone(),
                timestamp: event
                    .timestamp
                    .format(EXPORT_TIMESTAMP)
                    .map_err(|e| HistoryError::Timestamp(e.to_string()))?,
                severity: event.severity.as_str(),
            })
        })
        .collect::<Result<Vec<_>, HistoryError>>()?;

    export_csv(&rows)
}
