/// Board model and database operations
///
/// Boards belong to an organization and own ordered columns. Deleting
/// a board cascades explicitly in dependency order (tasks, then
/// columns, then the board itself) inside one transaction rather than
/// relying on store-level cascade configuration.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     description TEXT,
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kanban board belonging to an organization
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL slug, unique across boards
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning organization
    pub organization_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// Display name (the slug is derived from it)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning organization
    pub organization_id: Uuid,
}

/// Input for updating a board
///
/// Only fields present in the request are touched. An outer `Some`
/// with an inner `None` clears a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    /// New display name
    pub name: Option<String>,

    /// New description (Some(None) clears it)
    pub description: Option<Option<String>>,
}

impl Board {
    /// Creates a new board
    pub async fn create(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        let slug = super::slugify(&data.name);

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (name, slug, description, organization_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, description, organization_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(slug)
        .bind(data.description)
        .bind(data.organization_id)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, name, slug, description, organization_id,
                   created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Lists all boards, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, name, slug, description, organization_id,
                   created_at, updated_at
            FROM boards
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }

    /// Lists an organization's boards, newest first
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, name, slug, description, organization_id,
                   created_at, updated_at
            FROM boards
            WHERE organization_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(organization_id)
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }

    /// Counts an organization's boards
    ///
    /// Used by the boards handler to enforce the organization's
    /// `board_limit` before insertion.
    pub async fn count_by_organization(
        pool: &PgPool,
        organization_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM boards WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Updates a board's name and/or description
    ///
    /// Only fields present in `data` are written. Returns the updated
    /// board, or None if it doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateBoard,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause from the fields that are present. The
        // slug is fixed at creation and never rewritten on rename.
        let mut query = String::from("UPDATE boards SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, slug, description, organization_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Board>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }

        let board = q.fetch_optional(pool).await?;

        Ok(board)
    }

    /// Deletes a board and everything it contains
    ///
    /// Runs the full cascade in dependency order inside a single
    /// transaction: tasks on the board, then its columns, then the
    /// board row. Returns true if the board existed.
    pub async fn delete_cascade(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM columns WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_board_default() {
        let update = UpdateBoard::default();
        assert!(update.name.is_none());
        assert!(update.description.is_none());
    }

    // Integration tests for the delete cascade are in the api crate's
    // tests/ directory.
}
