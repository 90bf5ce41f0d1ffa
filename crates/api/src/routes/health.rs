use axum::{response::IntoResponse, routing::get, Json, Router};

pub fn routes() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
        .route("/live", get(health_live))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "folio-ai",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_ready() -> impl IntoResponse {
    Json(serde_json::json!({
        "ready": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_live() -> impl IntoResponse {
    Json(serde_json::json!({
        "alive": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
