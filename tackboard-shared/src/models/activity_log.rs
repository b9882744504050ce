/// Activity log model and database operations
///
/// Append-only audit trail of mutations. Rows are written through the
/// best-effort logger in the `activity` module after a primary
/// mutation succeeds, or directly via the activity-logs endpoint.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE activity_logs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     action VARCHAR(50) NOT NULL,
///     entity_type VARCHAR(50) NOT NULL,
///     entity_id UUID NOT NULL,
///     user_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     organization_id UUID REFERENCES organizations(id) ON DELETE SET NULL,
///     board_id UUID REFERENCES boards(id) ON DELETE SET NULL,
///     task_id UUID REFERENCES tasks(id) ON DELETE SET NULL,
///     details TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// What happened to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Entity was created
    Created,

    /// Entity was updated
    Updated,

    /// Entity was deleted
    Deleted,

    /// Task was moved to another column
    Moved,

    /// A comment was posted
    Commented,
}

impl ActivityAction {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Created => "created",
            ActivityAction::Updated => "updated",
            ActivityAction::Deleted => "deleted",
            ActivityAction::Moved => "moved",
            ActivityAction::Commented => "commented",
        }
    }
}

/// Kind of entity an activity refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityEntity {
    /// An organization (workspace)
    Organization,

    /// A board
    Board,

    /// A column
    Column,

    /// A task
    Task,

    /// A user
    User,
}

impl ActivityEntity {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEntity::Organization => "organization",
            ActivityEntity::Board => "board",
            ActivityEntity::Column => "column",
            ActivityEntity::Task => "task",
            ActivityEntity::User => "user",
        }
    }
}

/// Activity log row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Unique log entry ID
    pub id: Uuid,

    /// Action string ("created", "updated", ...)
    pub action: String,

    /// Entity type string ("board", "task", ...)
    pub entity_type: String,

    /// ID of the affected entity (kept even after the entity is gone)
    pub entity_id: Uuid,

    /// Acting user; null after the user is deleted
    pub user_id: Option<Uuid>,

    /// Related organization, if any
    pub organization_id: Option<Uuid>,

    /// Related board, if any
    pub board_id: Option<Uuid>,

    /// Related task, if any
    pub task_id: Option<Uuid>,

    /// Optional human-readable detail
    pub details: Option<String>,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

/// Activity log row joined with related display names
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    /// Unique log entry ID
    pub id: Uuid,

    /// Action string
    pub action: String,

    /// Entity type string
    pub entity_type: String,

    /// ID of the affected entity
    pub entity_id: Uuid,

    /// Acting user
    pub user_id: Option<Uuid>,

    /// Related organization, if any
    pub organization_id: Option<Uuid>,

    /// Related board, if any
    pub board_id: Option<Uuid>,

    /// Related task, if any
    pub task_id: Option<Uuid>,

    /// Optional human-readable detail
    pub details: Option<String>,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,

    /// Acting user's display name, when the user still exists
    pub user_name: Option<String>,

    /// Acting user's email, when the user still exists
    pub user_email: Option<String>,

    /// Related board's name, when set and the board still exists
    pub board_name: Option<String>,

    /// Related task's title, when set and the task still exists
    pub task_title: Option<String>,
}

/// Input for appending an activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityLog {
    /// Action performed
    pub action: ActivityAction,

    /// Kind of entity affected
    pub entity_type: ActivityEntity,

    /// ID of the affected entity
    pub entity_id: Uuid,

    /// Acting user; None for system-originated events
    pub user_id: Option<Uuid>,

    /// Related organization
    pub organization_id: Option<Uuid>,

    /// Related board
    pub board_id: Option<Uuid>,

    /// Related task
    pub task_id: Option<Uuid>,

    /// Optional human-readable detail
    pub details: Option<String>,
}

/// Filter for listing activity log entries
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    /// Only entries for this organization
    pub organization_id: Option<Uuid>,

    /// Only entries for this board
    pub board_id: Option<Uuid>,

    /// Only entries for this task
    pub task_id: Option<Uuid>,

    /// Maximum number of entries to return (default 50)
    pub limit: Option<i64>,
}

/// Default page size for activity listings
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

impl ActivityLog {
    /// Appends an activity log entry
    pub async fn create(pool: &PgPool, data: CreateActivityLog) -> Result<Self, sqlx::Error> {
        let entry = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (action, entity_type, entity_id, user_id,
                                       organization_id, board_id, task_id, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, action, entity_type, entity_id, user_id,
                      organization_id, board_id, task_id, details, created_at
            "#,
        )
        .bind(data.action.as_str())
        .bind(data.entity_type.as_str())
        .bind(data.entity_id)
        .bind(data.user_id)
        .bind(data.organization_id)
        .bind(data.board_id)
        .bind(data.task_id)
        .bind(data.details)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Lists activity entries, newest first
    ///
    /// Filters are conjunctive; entries carry the acting user's and
    /// related board/task display names via left joins so deleted
    /// relations degrade to null rather than dropping the entry.
    pub async fn list(
        pool: &PgPool,
        filter: ActivityLogFilter,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);

        let entries = sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            SELECT a.id, a.action, a.entity_type, a.entity_id, a.user_id,
                   a.organization_id, a.board_id, a.task_id, a.details, a.created_at,
                   u.name AS user_name, u.email AS user_email,
                   b.name AS board_name, t.title AS task_title
            FROM activity_logs a
            LEFT JOIN users u ON u.id = a.user_id
            LEFT JOIN boards b ON b.id = a.board_id
            LEFT JOIN tasks t ON t.id = a.task_id
            WHERE ($1::uuid IS NULL OR a.organization_id = $1)
              AND ($2::uuid IS NULL OR a.board_id = $2)
              AND ($3::uuid IS NULL OR a.task_id = $3)
            ORDER BY a.created_at DESC
            LIMIT $4
            "#,
        )
        .bind(filter.organization_id)
        .bind(filter.board_id)
        .bind(filter.task_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_as_str() {
        assert_eq!(ActivityAction::Created.as_str(), "created");
        assert_eq!(ActivityAction::Updated.as_str(), "updated");
        assert_eq!(ActivityAction::Deleted.as_str(), "deleted");
        assert_eq!(ActivityAction::Moved.as_str(), "moved");
        assert_eq!(ActivityAction::Commented.as_str(), "commented");
    }

    #[test]
    fn test_entity_as_str() {
        assert_eq!(ActivityEntity::Organization.as_str(), "organization");
        assert_eq!(ActivityEntity::Board.as_str(), "board");
        assert_eq!(ActivityEntity::Column.as_str(), "column");
        assert_eq!(ActivityEntity::Task.as_str(), "task");
        assert_eq!(ActivityEntity::User.as_str(), "user");
    }

    #[test]
    fn test_filter_default() {
        let filter = ActivityLogFilter::default();
        assert!(filter.organization_id.is_none());
        assert!(filter.board_id.is_none());
        assert!(filter.task_id.is_none());
        assert!(filter.limit.is_none());
    }
}
