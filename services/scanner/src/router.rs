use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use exitgate_core::health::healthz;
use exitgate_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    door::set_door_status,
    exits::today,
    health::readyz,
    scan::{list_open_doors, log_exit, verify},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Scanner station
        .route("/scan/verify", post(verify))
        .route("/scan/log", post(log_exit))
        .route("/scan/doors", get(list_open_doors))
        // Doors
        .route("/doors/{door_id}/status", patch(set_door_status))
        // Dashboard
        .route("/exits/today", get(today))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
