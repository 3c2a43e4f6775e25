use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::auth::{RequireAuth, RequirePowerUser};
use crate::server::AppState;
use crate::server::dto::{GetPipelineParams, ListPipelinesParams};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::validation::validate_pipeline;
use crate::types::Pipeline;

pub fn pipeline_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pipelines", get(list_pipelines).post(create_pipeline))
        .route("/pipelines/{pipeline_name}", get(get_pipeline))
}

pub async fn list_pipelines(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPipelinesParams>,
) -> impl IntoResponse {
    let pipelines = state.store.list_pipelines(params.uri.as_deref())?;

    Ok::<_, ApiError>(Json(ApiResponse::success(pipelines)))
}

/// All versions of one pipeline, or just the requested version.
pub async fn get_pipeline(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(pipeline_name): Path<String>,
    Query(params): Query<GetPipelineParams>,
) -> impl IntoResponse {
    let pipelines = state
        .store
        .find_pipelines(&pipeline_name, params.pipeline_version.as_deref())?;

    if pipelines.is_empty() {
        return Err(ApiError::not_found(format!(
            "Pipeline '{pipeline_name}' not found"
        )));
    }

    Ok::<_, ApiError>(Json(ApiResponse::success(pipelines)))
}

pub async fn create_pipeline(
    RequirePowerUser(permission): RequirePowerUser,
    State(state): State<Arc<AppState>>,
    Json(pipeline): Json<Pipeline>,
) -> impl IntoResponse {
    validate_pipeline(&pipeline)?;

    state
        .store
        .create_pipeline(&pipeline)
        .or_conflict("Pipeline already exists")?;

    tracing::info!(
        "Pipeline '{}' version '{}' registered by token {}",
        pipeline.name,
        pipeline.version,
        permission.requestor_id
    );

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(pipeline))))
}
