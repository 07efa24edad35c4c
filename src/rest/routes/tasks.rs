// rest/routes/tasks.rs — Task resource routes.
//
// Each handler is a pure composition: validate → TaskStorage → map errors
// to a status code and a `{message}` body. Nothing is cached between
// requests; every listing reflects current store state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::tasks::validate::{
    parse_status_filter, validate_create, validate_update, CreateTaskRequest, UpdateTaskRequest,
};
use crate::tasks::{TaskError, TaskRow};
use crate::AppContext;

type ApiError = (StatusCode, Json<Value>);

/// Map a TaskError to an HTTP response. Store failures are logged in full
/// and surfaced only as the generic `fallback` message.
fn error_response(err: TaskError, fallback: &str) -> ApiError {
    match err {
        TaskError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
        }
        TaskError::InvalidId => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid task ID" })),
        ),
        TaskError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Task not found" })),
        ),
        TaskError::Store(e) => {
            error!(error = %e, "store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": fallback })),
            )
        }
    }
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskRow>), ApiError> {
    let new_task =
        validate_create(body).map_err(|e| error_response(e, "Failed to create task"))?;
    let task = ctx
        .tasks
        .create(new_task)
        .await
        .map_err(|e| error_response(e, "Failed to create task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    let filter = parse_status_filter(query.status.as_deref());
    let tasks = ctx
        .tasks
        .list(filter)
        .await
        .map_err(|e| error_response(e, "Failed to fetch tasks"))?;
    Ok(Json(tasks))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<TaskRow>, ApiError> {
    let patch = validate_update(body).map_err(|e| error_response(e, "Failed to update task"))?;
    let task = ctx
        .tasks
        .update(&id, patch)
        .await
        .map_err(|e| error_response(e, "Failed to update task"))?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.tasks
        .delete(&id)
        .await
        .map_err(|e| error_response(e, "Failed to delete task"))?;
    Ok(Json(json!({ "message": "Task deleted" })))
}
