//! To-do CRUD and attachment handlers.
//!
//! Every handler takes the caller from the bearer token and delegates to
//! `TodoService`. Errors are mapped to status codes by `AppError`.

use axum::{
    extract::State,
    http::{header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use todos_core::todo::{CreateTodoRequest, UpdateTodoRequest};

use crate::{
    handlers::{AppError, AppJson, AppPath},
    identity::CallerId,
    state::AppState,
};

/// List the caller's todos (GET /todos).
pub async fn list_todos(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%user_id, "Listing todos");

    let items = state.service.list_todos(&user_id).await?;

    Ok(Json(json!({ "items": items })))
}

/// Create a todo (POST /todos).
pub async fn create_todo(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateTodoRequest>,
) -> Result<Response, AppError> {
    tracing::debug!(%user_id, name = %request.name, due_date = %request.due_date, "Creating todo");

    let item = state.service.create_todo(&user_id, request).await?;

    tracing::info!(%user_id, todo_id = %item.todo_id, "Created todo");

    let mut response = Json(json!({ "item": item })).into_response();
    response.headers_mut().insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    Ok(response)
}

/// Update a todo (PATCH /todos/{todo_id}).
///
/// Returns 200 with the stored item, or 204 when no such todo exists.
pub async fn update_todo(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateTodoRequest>,
) -> Result<Response, AppError> {
    tracing::debug!(%user_id, %todo_id, "Updating todo");

    match state.service.update_todo(&user_id, todo_id, request).await? {
        Some(item) => {
            tracing::info!(%user_id, %todo_id, "Updated todo");
            Ok(Json(json!({ "item": item })).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Delete a todo (DELETE /todos/{todo_id}).
pub async fn delete_todo(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%user_id, %todo_id, "Deleting todo");

    state.service.delete_todo(&user_id, todo_id).await?;

    tracing::info!(%user_id, %todo_id, "Deleted todo");

    Ok(StatusCode::NO_CONTENT)
}

/// Issue an attachment upload URL (POST /todos/{todo_id}/attachment).
pub async fn generate_upload_url(
    CallerId(user_id): CallerId,
    State(state): State<AppState>,
    AppPath(todo_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%user_id, %todo_id, "Generating upload URL");

    let upload_url = state.service.request_upload_url(&user_id, todo_id).await?;

    Ok(Json(json!({ "uploadUrl": upload_url })))
}
