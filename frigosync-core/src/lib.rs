//! Domain core of the frigosync monitoring stack.
//!
//! Holds everything that can be reasoned about without a runtime: the
//! status and history models, the hysteresis control model, the
//! appliance simulator, the debounced alert engine and the history
//! analytics. Networking, scheduling and notification delivery live in
//! `frigosync_app`.

pub mod alerts;
pub mod control;
pub mod history;
pub mod models;
pub mod simulate;

pub use alerts::{AlertEngine, AlertKey};
pub use control::{ControlError, HysteresisProfile};
pub use simulate::DeviceSimulator;
