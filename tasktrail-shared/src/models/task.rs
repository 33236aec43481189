/// Task model and database operations
///
/// Tasks belong to exactly one owner, set at creation and immutable
/// thereafter. Every lookup, mutation, and deletion folds the owner into
/// its WHERE clause, so a task that exists but belongs to somebody else is
/// indistinguishable from one that does not exist. This is intentional: it
/// prevents existence leakage across owners and must not be "fixed" into a
/// separate forbidden case.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'completed');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     status task_status NOT NULL DEFAULT 'pending',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasktrail_shared::models::task::{CreateTask, Task, TaskStatus};
/// use tasktrail_shared::query::TaskFilter;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     owner_id,
///     title: "Buy milk".to_string(),
///     description: "2%".to_string(),
///     status: TaskStatus::Pending,
/// }).await?;
///
/// let mine = Task::list_by_owner(&pool, owner_id, &TaskFilter::default()).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::query::TaskFilter;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task has not been completed yet (the default for new tasks)
    Pending,

    /// Task is done
    Completed,
}

impl TaskStatus {
    /// Status as the string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status: {}", other)),
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// User who owns this task; set at creation, never changed
    pub owner_id: Uuid,

    /// Short title (non-blank)
    pub title: String,

    /// Longer description (non-blank)
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user
    pub owner_id: Uuid,

    /// Task title (validated non-blank by the handler)
    pub title: String,

    /// Task description (validated non-blank by the handler)
    pub description: String,

    /// Initial status
    pub status: TaskStatus,
}

/// Input for a partial task update
///
/// Fields left as None are not touched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    /// True when the update carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl Task {
    /// Creates a new task for its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owner
    ///
    /// Returns None both when the task does not exist and when it belongs
    /// to a different owner.
    pub async fn find_by_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update, scoped to the owner
    ///
    /// Only non-None fields are written; `updated_at` is always refreshed.
    /// Returns None when the task does not exist or is not owned by
    /// `owner_id` — the same lookup filter as [`Task::find_by_owner`].
    pub async fn update_by_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET list from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND owner_id = $2 \
             RETURNING id, owner_id, title, description, status, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task, scoped to the owner
    ///
    /// Returns true if a task was deleted, false when nothing matched the
    /// owner-folded lookup.
    pub async fn delete_by_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists an owner's tasks matching a filter, newest first
    ///
    /// The WHERE clause comes from [`TaskFilter::to_query`]; the owner is
    /// always the first bind. A fresh query runs on every call.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = filter.to_query();

        let sql = format!(
            "SELECT id, owner_id, title, description, status, created_at, updated_at \
             FROM tasks WHERE {} ORDER BY created_at DESC",
            query.where_clause()
        );

        let mut q = sqlx::query_as::<_, Task>(&sql).bind(owner_id);

        if let Some(status) = query.status() {
            q = q.bind(status);
        }
        if let Some(pattern) = query.search_pattern() {
            q = q.bind(pattern.to_string());
        }

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::StatusFilter;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_task_status_from_str() {
        assert_eq!("pending".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!("completed".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("running".parse::<TaskStatus>().is_err());
        assert!("".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_status_serde() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"completed\"").unwrap(),
            TaskStatus::Completed
        );
    }

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.is_empty());

        let update = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_list_query_binds_match_clause() {
        // The bind order in list_by_owner must mirror the clause order
        // produced by the filter: owner, then status, then pattern.
        let filter = TaskFilter {
            status: StatusFilter::Only(TaskStatus::Completed),
            search: Some("foo".to_string()),
        };
        let query = filter.to_query();

        assert_eq!(
            query.where_clause(),
            "owner_id = $1 AND status = $2 AND (title ILIKE $3 OR description ILIKE $3)"
        );
        assert_eq!(query.status(), Some(TaskStatus::Completed));
        assert_eq!(query.search_pattern(), Some("%foo%"));
    }
}
