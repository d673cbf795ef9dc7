use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{error, info};
use validator::Validate;

use crate::{
    dto::{AncestorsRequest, AncestorsResponse, PreviewResponse},
    service::OntologyService,
};

const PREVIEW_ROWS: usize = 5;

/// Create ancestors router
pub fn create_router() -> Router {
    Router::new()
        .route("/ancestors", post(get_ancestors))
        .route("/preview", get(get_preview))
}

/// Resolve the ancestors of the queried entity via the LLM
async fn get_ancestors(
    Extension(service): Extension<Arc<OntologyService>>,
    Json(request): Json<AncestorsRequest>,
) -> Result<Json<AncestorsResponse>, StatusCode> {
    if request.validate().is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    info!("Your Query: {}", request.query);

    match service.ancestors(&request.query).await {
        Ok(answer) => Ok(Json(AncestorsResponse::from_answer(request.query, answer))),
        Err(e) => {
            error!("Ancestor query failed: {:?}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Preview the first rows of the loaded dataset
async fn get_preview(
    Extension(service): Extension<Arc<OntologyService>>,
) -> Result<Json<PreviewResponse>, StatusCode> {
    let rows = service
        .preview(PREVIEW_ROWS)
        .iter()
        .map(|record| serde_json::to_value(record).unwrap_or_default())
        .collect();

    Ok(Json(PreviewResponse {
        total_records: service.dataset_len(),
        rows,
    }))
}
