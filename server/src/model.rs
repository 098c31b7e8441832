//! Wire and domain types for the todo service.
//!
//! `Todo` is both the stored record and its JSON representation. Request
//! payloads are deliberately separate types: they carry only the fields a
//! client may set, so anything else in a body (`id`, timestamps, unknown keys)
//! is dropped during deserialization and never reaches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`.
///
/// `title` is optional here so that a missing title surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Body of `PUT /api/todos/{id}`. Any subset of the fields may be present.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Fields an update is allowed to replace. Everything else on a `Todo` is
/// owned by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response of `GET /api` (and `GET /` when no static directory is served): informational only.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}
