/// Task model and database operations
///
/// Tasks are the cards on a board. Each task lives in exactly one
/// column and carries a zero-based `position` among its column
/// siblings; `board_id` is denormalized so a board's tasks can be
/// fetched without joining through columns.
///
/// Within a column the set of `position` values is kept contiguous
/// (`{0..n-1}`) by full renumbering after every reorder or move. A
/// cross-column move renumbers only the destination; the source keeps
/// gapped positions until its next reorder, which is harmless because
/// reads always sort by position.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM (
///     'todo', 'in-progress', 'done', 'cancelled', 'paused', 'overdue'
/// );
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     position INTEGER NOT NULL DEFAULT 0,
///     column_id UUID NOT NULL REFERENCES columns(id) ON DELETE CASCADE,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tackboard_shared::models::task::{Task, CreateTask, TaskStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, column_id: Uuid, board_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Write release notes".to_string(),
///     description: None,
///     status: TaskStatus::Todo,
///     position: 0,
///     column_id,
///     board_id,
///     assignee_id: None,
///     due_date: None,
/// }).await?;
///
/// // Move it to another column: appended last, destination renumbered
/// # let other_column = column_id;
/// Task::move_to_column(&pool, task.id, other_column, board_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Actively being worked on
    InProgress,

    /// Completed
    Done,

    /// Abandoned
    Cancelled,

    /// On hold
    Paused,

    /// Past its due date
    Overdue,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Paused => "paused",
            TaskStatus::Overdue => "overdue",
        }
    }
}

/// Task card within a column
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Title shown on the card
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Zero-based rank among the column's tasks
    pub position: i32,

    /// Column this task currently lives in
    pub column_id: Uuid,

    /// Board this task belongs to (denormalized for direct filtering)
    pub board_id: Uuid,

    /// Assigned user, if any
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status, defaults to `todo`
    #[serde(default)]
    pub status: TaskStatus,

    /// Initial position; callers default this to the column's current
    /// task count so new tasks land at the end
    pub position: i32,

    /// Destination column
    pub column_id: Uuid,

    /// Owning board
    pub board_id: Uuid,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for updating a task
///
/// Only fields present in the request are touched. For the nullable
/// fields an outer `Some` with an inner `None` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description (Some(None) clears it)
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New assignee (Some(None) unassigns)
    pub assignee_id: Option<Option<Uuid>>,

    /// New due date (Some(None) clears it)
    pub due_date: Option<Option<DateTime<Utc>>>,
}

const TASK_COLUMNS: &str = "id, title, description, status, position, column_id, board_id, \
                            assignee_id, due_date, created_at, updated_at";

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, status, position, column_id,
                               board_id, assignee_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.position)
        .bind(data.column_id)
        .bind(data.board_id)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks in position order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY position ASC, id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a board's tasks in position order
    pub async fn list_by_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE board_id = $1 ORDER BY position ASC, id"
        ))
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists a column's tasks in position order
    ///
    /// Ties on `position` are broken by id so the sequence handed to
    /// the reordering algorithm is deterministic per call.
    pub async fn list_by_column(pool: &PgPool, column_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE column_id = $1 ORDER BY position ASC, id"
        ))
        .bind(column_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts a column's tasks
    pub async fn count_by_column(pool: &PgPool, column_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE column_id = $1")
                .bind(column_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Updates a task's fields
    ///
    /// Only fields present in `data` are written. Returns the updated
    /// task, or None if it doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause from the fields that are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

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
        if data.assignee_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assignee_id = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(assignee_id) = data.assignee_id {
            q = q.bind(assignee_id);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// Returns true if a row was deleted. The source column keeps a
    /// gap in its positions until its next reorder.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Writes a new task order back to the store
    ///
    /// Assigns `position = index` for every id in `ids`, all writes in
    /// one transaction so a mid-sequence failure leaves no partial
    /// renumbering.
    pub async fn apply_order(pool: &PgPool, ids: &[Uuid]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (index, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE tasks SET position = $1, updated_at = NOW() WHERE id = $2")
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Moves a task into another column, appended at the end
    ///
    /// In one transaction: repoints the task's `column_id` (and its
    /// denormalized `board_id` to the destination's board), then
    /// renumbers the destination column in full with the moved task
    /// last. The source column is left untouched; its positions stay
    /// gapped until a later reorder.
    pub async fn move_to_column(
        pool: &PgPool,
        task_id: Uuid,
        column_id: Uuid,
        board_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE tasks SET column_id = $1, board_id = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(column_id)
        .bind(board_id)
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

        // Renumber the destination: existing siblings keep their
        // relative order, the moved task goes last.
        let siblings: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM tasks WHERE column_id = $1 AND id <> $2 ORDER BY position ASC, id",
        )
        .bind(column_id)
        .bind(task_id)
        .fetch_all(&mut *tx)
        .await?;

        for (index, (id,)) in siblings.iter().enumerate() {
            sqlx::query("UPDATE tasks SET position = $1, updated_at = NOW() WHERE id = $2")
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE tasks SET position = $1, updated_at = NOW() WHERE id = $2")
            .bind(siblings.len() as i32)
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in-progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
        assert_eq!(TaskStatus::Cancelled.as_str(), "cancelled");
        assert_eq!(TaskStatus::Paused.as_str(), "paused");
        assert_eq!(TaskStatus::Overdue.as_str(), "overdue");
    }

    #[test]
    fn test_status_serde_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: TaskStatus = serde_json::from_str("\"overdue\"").unwrap();
        assert_eq!(status, TaskStatus::Overdue);
    }

    #[test]
    fn test_status_default() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn test_update_task_default() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
        assert!(update.assignee_id.is_none());
        assert!(update.due_date.is_none());
    }
}
