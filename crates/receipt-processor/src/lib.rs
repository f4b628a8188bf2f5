//! Receipt Processor Service
//!
//! Scores submitted purchase receipts and serves the stored points by
//! receipt ID.
//!
//! ## Endpoints
//!
//! - `POST /receipts/process` - Score a receipt, returns `{"id": ...}`
//! - `GET /receipts/{id}/points` - Points for a processed receipt
//! - `GET /health` - Health check

pub mod config;
pub mod handlers;
pub mod service;
pub mod storage;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use handlers::AppState;
pub use service::ReceiptService;
pub use storage::Storage;

/// CORS policy admitting a single origin
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the application router
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/receipts/process", post(handlers::process_receipt_handler))
        .route("/receipts/{id}/points", get(handlers::get_points_handler))
        .with_state(shared_state)
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
}
