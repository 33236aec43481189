/// Task command handlers
///
/// Every handler runs behind the session token layer and is scoped to the
/// authenticated owner. Lookups fold the owner into the query filter, so a
/// task owned by somebody else produces the same 404 as a task that does
/// not exist — deliberately, to avoid leaking existence across owners.
///
/// # Endpoints
///
/// - `GET    /v1/tasks`       - List, with optional `?status=` and `?search=`
/// - `POST   /v1/tasks`       - Create (201)
/// - `GET    /v1/tasks/:id`   - Fetch one
/// - `PUT    /v1/tasks/:id`   - Partial update
/// - `DELETE /v1/tasks/:id`   - Delete

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tasktrail_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskStatus, UpdateTask},
    query::TaskFilter,
};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (must be non-blank)
    pub title: String,

    /// Task description (must be non-blank)
    pub description: String,

    /// Initial status; defaults to `pending` when omitted
    pub status: Option<TaskStatus>,
}

/// Partial update request
///
/// Fields left out of the body are unchanged; supplied title/description
/// must be non-blank.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,
}

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Status filter: `pending`, `completed`, or the sentinel `all`
    pub status: Option<String>,

    /// Case-insensitive substring search over title and description
    pub search: Option<String>,
}

/// Single-task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// Matching tasks, newest first
    pub tasks: Vec<Task>,

    /// Number of matching tasks
    pub count: usize,
}

/// Delete confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    /// Confirmation message
    pub message: String,
}

/// Validates that a field is non-empty after trimming and returns the
/// trimmed value
fn require_non_blank(field: &'static str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::field(
            field,
            format!("{} must not be empty", field),
        ));
    }
    Ok(trimmed.to_string())
}

/// Creates a task owned by the authenticated user
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "2%",
///   "status": "pending"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: blank title or description
/// - `401 Unauthorized`: missing or invalid token
/// - `500 Internal Server Error`: persistence failure
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let title = require_non_blank("title", &req.title)?;
    let description = require_non_blank("description", &req.description)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            owner_id: auth.user_id,
            title,
            description,
            status: req.status.unwrap_or(TaskStatus::Pending),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Fetches one of the authenticated user's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with this id is owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_by_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Applies a partial update to one of the authenticated user's tasks
///
/// Fields left out of the body are unchanged. Calling this twice with the
/// same payload yields the same final state and no error on the second
/// call.
///
/// # Errors
///
/// - `400 Bad Request`: supplied title or description is blank, or the
///   body carries no fields at all
/// - `404 Not Found`: no task with this id is owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let title = req
        .title
        .as_deref()
        .map(|t| require_non_blank("title", t))
        .transpose()?;
    let description = req
        .description
        .as_deref()
        .map(|d| require_non_blank("description", d))
        .transpose()?;

    let update = UpdateTask {
        title,
        description,
        status: req.status,
    };
    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let task = Task::update_by_owner(&state.db, id, auth.user_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Deletes one of the authenticated user's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with this id is owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let deleted = Task::delete_by_owner(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Lists the authenticated user's tasks, newest first
///
/// # Endpoint
///
/// ```text
/// GET /v1/tasks?status=pending&search=milk
/// ```
///
/// `status=all` (or an absent parameter) disables the status filter; a
/// blank search string is ignored. Each call runs a fresh query.
///
/// # Errors
///
/// - `400 Bad Request`: unknown status value
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let filter = TaskFilter::from_params(params.status.as_deref(), params.search.as_deref())
        .map_err(|message| ApiError::field("status", message))?;

    let tasks = Task::list_by_owner(&state.db, auth.user_id, &filter).await?;
    let count = tasks.len();

    Ok(Json(TaskListResponse { tasks, count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank() {
        assert_eq!(require_non_blank("title", "Buy milk").unwrap(), "Buy milk");
        assert_eq!(require_non_blank("title", "  padded  ").unwrap(), "padded");

        assert!(require_non_blank("title", "").is_err());
        assert!(require_non_blank("title", "   ").is_err());
        assert!(require_non_blank("description", "\t\n").is_err());
    }

    #[test]
    fn test_create_request_status_defaults_to_pending() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"Buy milk","description":"2%"}"#).unwrap();

        assert_eq!(req.status, None);
        assert_eq!(req.status.unwrap_or(TaskStatus::Pending), TaskStatus::Pending);
    }

    #[test]
    fn test_create_request_explicit_status() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"title":"Buy milk","description":"2%","status":"completed"}"#,
        )
        .unwrap();

        assert_eq!(req.status, Some(TaskStatus::Completed));
    }

    #[test]
    fn test_update_request_partial_fields() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"status":"completed"}"#).unwrap();

        assert_eq!(req.title, None);
        assert_eq!(req.description, None);
        assert_eq!(req.status, Some(TaskStatus::Completed));
    }
}
