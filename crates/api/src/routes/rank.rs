//! Ranking Route

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use feature_store::StoreError;
use ranking_transformer::{InferenceInputs, InferenceRequest, TransformerError};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::AppState;

/// JSON body returned on failure
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Assemble ranking model inputs for a request
pub async fn rank(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InferenceRequest>,
) -> Result<Json<InferenceInputs>, (StatusCode, Json<ErrorBody>)> {
    let request_id = Uuid::new_v4();
    info!(
        "rank request {}: {} instance(s)",
        request_id,
        request.instances.len()
    );

    match state.transformer.preprocess(&request).await {
        Ok(inputs) => Ok(Json(inputs)),
        Err(err) => {
            warn!("rank request {} failed: {}", request_id, err);
            Err((
                status_for(&err),
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

fn status_for(err: &TransformerError) -> StatusCode {
    match err {
        TransformerError::EmptyRequest => StatusCode::BAD_REQUEST,
        TransformerError::UnknownCustomer(_) => StatusCode::NOT_FOUND,
        TransformerError::Store(StoreError::DimensionMismatch { .. }) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
