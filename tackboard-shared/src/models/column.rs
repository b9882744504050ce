/// Column model and database operations
///
/// Columns are the ordered lanes of a board. Within a board the set of
/// `position` values is kept contiguous (`{0..n-1}`) by full
/// renumbering after every reorder; see the `ordering` module.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE columns (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     position INTEGER NOT NULL DEFAULT 0,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Ordered column within a board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique column ID
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Zero-based rank among the board's columns
    pub position: i32,

    /// Owning board
    pub board_id: Uuid,

    /// When the column was created
    pub created_at: DateTime<Utc>,

    /// When the column was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumn {
    /// Display title
    pub title: String,

    /// Initial position; callers default this to the board's current
    /// column count so new columns land at the end
    pub position: i32,

    /// Owning board
    pub board_id: Uuid,
}

impl Column {
    /// Creates a new column
    pub async fn create(pool: &PgPool, data: CreateColumn) -> Result<Self, sqlx::Error> {
        let column = sqlx::query_as::<_, Column>(
            r#"
            INSERT INTO columns (title, position, board_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.position)
        .bind(data.board_id)
        .fetch_one(pool)
        .await?;

        Ok(column)
    }

    /// Finds a column by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, Column>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM columns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Lists all columns in position order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let columns = sqlx::query_as::<_, Column>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM columns
            ORDER BY position ASC, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }

    /// Lists a board's columns in position order
    ///
    /// Ties on `position` (possible only from external corruption) are
    /// broken by id so the sequence is deterministic per call.
    pub async fn list_by_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let columns = sqlx::query_as::<_, Column>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM columns
            WHERE board_id = $1
            ORDER BY position ASC, id
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }

    /// Counts a board's columns
    pub async fn count_by_board(pool: &PgPool, board_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM columns WHERE board_id = $1")
                .bind(board_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Renames a column
    pub async fn rename(
        pool: &PgPool,
        id: Uuid,
        title: String,
    ) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, Column>(
            r#"
            UPDATE columns
            SET title = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Writes a new column order back to the store
    ///
    /// Assigns `position = index` for every id in `ids`, all writes in
    /// one transaction so a mid-sequence failure leaves no partial
    /// renumbering.
    pub async fn apply_order(pool: &PgPool, ids: &[Uuid]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (index, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE columns SET position = $1, updated_at = NOW() WHERE id = $2")
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Deletes a column and its tasks
    ///
    /// The cascade is explicit (tasks first, then the column) inside
    /// one transaction; store-level cascade configuration is only a
    /// backstop. Returns true if the column existed.
    pub async fn delete_cascade(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE column_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM columns WHERE id = $1")
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
    fn test_create_column_struct() {
        let data = CreateColumn {
            title: "To Do".to_string(),
            position: 0,
            board_id: Uuid::new_v4(),
        };

        assert_eq!(data.title, "To Do");
        assert_eq!(data.position, 0);
    }
}
