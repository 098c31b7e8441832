//! Axum handlers for `/api/todos` and the info endpoint.
//!
//! Handlers own validation and status-code mapping; the store only ever sees
//! input that already passed the checks here.

use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::model::{
    CreateTodoRequest, DeleteResponse, EndpointInfo, ErrorBody, ServiceInfo, Todo, TodoChanges,
    UpdateTodoRequest,
};
use crate::store::SharedStore;

pub const DELETED_MESSAGE: &str = "Todo deleted successfully";

/// `axum::Json` with rejections rendered as `ApiError`, so malformed bodies get
/// the same `{"error": ...}` shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with rejections rendered as `ApiError`. An id that
/// does not even decode is reported as not found.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Trimmed title, or a validation error when it is missing or blank.
fn require_title(title: Option<String>) -> Result<String, ApiError> {
    let title = title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(ApiError::Validation {
            field: "title",
            message: "Title is required",
        });
    }
    Ok(title.to_string())
}

pub async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<Todo>> {
    let todos = store.list().await;
    tracing::debug!(count = todos.len(), "listed todos");
    Json(todos)
}

pub async fn get_todo(
    State(store): State<SharedStore>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Todo>, ApiError> {
    store.get(&id).await.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    AppJson(input): AppJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = require_title(input.title)?;
    let todo = store.create(title, input.completed).await;
    tracing::info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<SharedStore>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let changes = TodoChanges {
        title: input.title.map(|t| require_title(Some(t))).transpose()?,
        completed: input.completed,
    };
    let todo = store.update(&id, changes).await.ok_or(ApiError::NotFound)?;
    tracing::info!(id = %todo.id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    AppPath(id): AppPath<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !store.delete(&id).await {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "deleted todo");
    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            endpoint("GET", "/api", "Service information"),
            endpoint("GET", "/api/todos", "List all todos"),
            endpoint("GET", "/api/todos/{id}", "Get a todo by id"),
            endpoint("POST", "/api/todos", "Create a todo"),
            endpoint("PUT", "/api/todos/{id}", "Update a todo"),
            endpoint("DELETE", "/api/todos/{id}", "Delete a todo"),
        ],
    })
}

fn endpoint(method: &'static str, path: &'static str, description: &'static str) -> EndpointInfo {
    EndpointInfo {
        method,
        path,
        description,
    }
}

/// Fallback for unknown paths under `/api`.
pub async fn api_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}
