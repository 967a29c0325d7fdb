use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

mod extract;
mod models;

use models::{ExtractRequest, ExtractResponse};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let addr = std::env::var("CONTENT_TILES_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let app = Router::new()
        .route("/health", get(health))
        .route("/extract", post(extract_endpoint));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn extract_endpoint(Json(req): Json<ExtractRequest>) -> Response {
    match extract::extract_for_request(req.html.as_deref(), req.base_url.as_deref()) {
        Ok(items) => {
            tracing::debug!(count = items.len(), "extracted content items");
            (StatusCode::OK, Json(ExtractResponse { items })).into_response()
        }
        Err(e) => {
            use extract::RequestError;
            let (status, detail) = match &e {
                RequestError::InvalidBaseUrl(msg) => {
                    (StatusCode::BAD_REQUEST, format!("Invalid base_url: {}", msg))
                }
            };
            (status, Json(json!({"detail": detail}))).into_response()
        }
    }
}
