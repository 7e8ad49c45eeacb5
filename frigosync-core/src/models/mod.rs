mod alert;
mod event;
mod history;
mod status;

pub use alert::{AlertMessage, Severity};
pub use event::{EventType, SystemEvent};
pub use history::{FilterOptions, HistoricalDataPoint};
pub use status::{StatusPayload, SystemStatus};
