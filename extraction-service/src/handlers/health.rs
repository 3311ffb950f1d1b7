use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_NAME: &str = "Clinical Aggregator API";

/// Service descriptor on `GET /`.
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /extract": "Extrai texto de documento clínico",
            "GET /health": "Verifica status da API"
        }
    }))
}

/// Liveness. Always 200; reports whether extraction can work.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "gemini_configured": state.extractor.is_some()
    }))
}

/// Readiness for orchestrators: not ready without a credential.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.extractor.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
