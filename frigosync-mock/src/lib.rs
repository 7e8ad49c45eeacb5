//! Mock appliance controller.
//!
//! Serves the device HTTP surface over the core simulator so the
//! monitor can be developed and tested without hardware.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use frigosync_core::models::StatusPayload;
use frigosync_core::{DeviceSimulator, HysteresisProfile};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::settings::Settings;

pub mod settings;

#[derive(Clone)]
pub struct AppState {
    simulator: Arc<Mutex<DeviceSimulator>>,
}

pub fn create_app() -> Router {
    let state = AppState {
        simulator: Arc::new(Mutex::new(DeviceSimulator::new(HysteresisProfile::default()))),
    };

    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/settings", post(update_settings))
        .with_state(state)
}

async fn get_status(State(state): State<AppState>) -> Json<StatusPayload> {
    let mut simulator = state.simulator.lock().await;
    let status = simulator.next_status();

    tracing::debug!(
        temperature = status.temperature,
        relay = status.relay_state,
        "serving status"
    );

    Json(StatusPayload::from(&status))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ThresholdKind {
    Min,
    Max,
}

#[derive(Debug, Deserialize)]
struct UpdateThresholdRequest {
    kind: ThresholdKind,
    value: f64,
}

async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateThresholdRequest>,
) -> Response {
    let mut simulator = state.simulator.lock().await;

    let profile = simulator.profile();
    let (min, max) = match request.kind {
        ThresholdKind::Min => (request.value, profile.max_temp()),
        ThresholdKind::Max => (profile.min_temp(), request.value),
    };

    match simulator.set_thresholds(min, max) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::warn!("rejected threshold update: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn run(settings: &Arc<Settings>) {
    let app = create_app();
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind mock controller address.");

    tracing::info!("mock controller listening on {addr}");

    axum::serve(listener, app)
        .await
        .expect("Mock controller server failed.");
}
