use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireAuth;
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::{ClaimParams, CreateTaskRequest, ListTasksParams, UpdateTaskRequest};
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::server::validation::{validate_pipeline, validate_task_input};
use crate::store::TaskFilter;
use crate::types::{Pipeline, Task, TaskStatus, task_input_id};

const MAX_CLAIM: u32 = 100;

pub fn task_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks).post(create_task).put(update_task),
        )
        .route("/tasks/claim", post(claim_tasks))
}

fn pipeline_not_found(pipeline: &Pipeline) -> String {
    format!(
        "Pipeline '{}' version '{}' not found",
        pipeline.name, pipeline.version
    )
}

/// Power users see every task. Regular users see only their pipeline's tasks.
pub async fn list_tasks(
    RequireAuth(permission): RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTasksParams>,
) -> impl IntoResponse {
    let mut filter = TaskFilter {
        pipeline_name: params.pipeline_name,
        pipeline_version: None,
        status: params.status,
    };

    if !permission.is_power_user() {
        let scoped = permission
            .pipeline()
            .ok_or_else(|| ApiError::forbidden("Token is not associated with a pipeline"))?;

        if filter
            .pipeline_name
            .as_ref()
            .is_some_and(|name| name != &scoped.name)
        {
            return Err(ApiError::forbidden(
                "Token is not authorized for the requested pipeline",
            ));
        }

        filter.pipeline_name = Some(scoped.name.clone());
        filter.pipeline_version = Some(scoped.version.clone());
    }

    let tasks = state.store.list_tasks(&filter)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(tasks)))
}

pub async fn create_task(
    RequireAuth(permission): RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> impl IntoResponse {
    validate_pipeline(&req.pipeline)?;
    validate_task_input(&req.task_input)?;
    permission.require_pipeline(&req.pipeline)?;

    let pipeline = state
        .store
        .get_pipeline(&req.pipeline.name, &req.pipeline.version)?
        .or_not_found(pipeline_not_found(&req.pipeline))?;

    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4().to_string(),
        pipeline,
        task_input_id: task_input_id(&req.task_input),
        task_input: req.task_input,
        status: TaskStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_task(&task, &permission.requestor_id)
        .or_conflict("Task already exists")?;

    tracing::info!(
        "Task {} created for pipeline '{}' by token {}",
        task.task_input_id,
        task.pipeline.name,
        permission.requestor_id
    );

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

pub async fn update_task(
    RequireAuth(permission): RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateTaskRequest>,
) -> impl IntoResponse {
    validate_pipeline(&req.pipeline)?;
    validate_task_input(&req.task_input)?;
    permission.require_pipeline(&req.pipeline)?;

    let input_id = task_input_id(&req.task_input);
    let task = state
        .store
        .get_task(&req.pipeline, &input_id)?
        .or_not_found("Task not found")?;

    if !task.status.can_update_to(req.status) {
        return Err(ApiError::from(Error::InvalidTransition {
            from: task.status,
            to: req.status,
        }));
    }

    let updated = state
        .store
        .update_task_status(&task, req.status, &permission.requestor_id)?;

    tracing::info!(
        "Task {} moved from {} to {} by token {}",
        updated.task_input_id,
        task.status,
        updated.status,
        permission.requestor_id
    );

    Ok::<_, ApiError>(Json(ApiResponse::success(updated)))
}

/// Claims up to `num_tasks` of the oldest pending tasks of one pipeline.
pub async fn claim_tasks(
    RequireAuth(permission): RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClaimParams>,
    Json(pipeline): Json<Pipeline>,
) -> impl IntoResponse {
    let num_tasks = params.num_tasks.unwrap_or(1);
    if !(1..=MAX_CLAIM).contains(&num_tasks) {
        return Err(ApiError::bad_request(format!(
            "num_tasks must be between 1 and {MAX_CLAIM}"
        )));
    }

    validate_pipeline(&pipeline)?;
    permission.require_pipeline(&pipeline)?;

    let claimed = state
        .store
        .claim_tasks(&pipeline, num_tasks, &permission.requestor_id)
        .or_not_found(pipeline_not_found(&pipeline))?;

    if !claimed.is_empty() {
        tracing::info!(
            "{} task(s) of pipeline '{}' claimed by token {}",
            claimed.len(),
            pipeline.name,
            permission.requestor_id
        );
    }

    Ok::<_, ApiError>(Json(ApiResponse::success(claimed)))
}
