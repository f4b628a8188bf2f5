//! API request handlers for the receipt processor

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use points_common::Receipt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::service::ReceiptService;

/// Shared application state
pub struct AppState {
    pub receipts: ReceiptService,
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<points_common::Error> for ApiError {
    fn from(err: points_common::Error) -> Self {
        let status = match err {
            points_common::Error::Validation { .. } => StatusCode::BAD_REQUEST,
            points_common::Error::NotFound(_) => StatusCode::NOT_FOUND,
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid receipt JSON: {}", rejection.body_text()),
        }
    }
}

/// Response from processing a receipt
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
}

/// Points awarded to a receipt
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "receipt-processor",
        "receipts": state.receipts.receipt_count().await
    }))
}

/// Score and store a submitted receipt
pub async fn process_receipt_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<ProcessReceiptResponse>, ApiError> {
    let Json(receipt) = payload.inspect_err(|rejection| {
        warn!("Rejected receipt body: {}", rejection.body_text());
    })?;

    info!("Processing receipt from retailer: {}", receipt.retailer);

    let id = state.receipts.process_receipt(&receipt).await?;

    Ok(Json(ProcessReceiptResponse { id }))
}

/// Get the points awarded to a processed receipt
pub async fn get_points_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    info!("Getting points for receipt: {}", id);

    let points = state.receipts.get_points(&id).await?;

    Ok(Json(PointsResponse { points }))
}
