/// Organization (workspace) model and database operations
///
/// Organizations own boards and cap how many a workspace may hold via
/// `board_limit`, enforced at board-creation time by the boards
/// handler.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     description TEXT,
///     owner_id UUID NOT NULL,
///     board_limit INTEGER NOT NULL DEFAULT 7,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Default board cap for newly created organizations
pub const DEFAULT_BOARD_LIMIT: i32 = 7;

/// Organization (workspace) that owns boards
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// URL slug, unique across organizations
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user's ID
    pub owner_id: Uuid,

    /// Maximum number of boards this organization may hold
    pub board_limit: i32,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    /// Display name (the slug is derived from it)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user's ID
    pub owner_id: Uuid,

    /// Board cap, defaults to [`DEFAULT_BOARD_LIMIT`]
    pub board_limit: Option<i32>,
}

impl Organization {
    /// Creates a new organization
    ///
    /// The slug is derived from the name; a duplicate slug surfaces as
    /// a unique-constraint error.
    pub async fn create(pool: &PgPool, data: CreateOrganization) -> Result<Self, sqlx::Error> {
        let slug = super::slugify(&data.name);
        let board_limit = data.board_limit.unwrap_or(DEFAULT_BOARD_LIMIT);

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, slug, description, owner_id, board_limit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, description, owner_id, board_limit,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(slug)
        .bind(data.description)
        .bind(data.owner_id)
        .bind(board_limit)
        .fetch_one(pool)
        .await?;

        Ok(organization)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, description, owner_id, board_limit,
                   created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Finds an organization by slug
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, description, owner_id, board_limit,
                   created_at, updated_at
            FROM organizations
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Lists all organizations, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, description, owner_id, board_limit,
                   created_at, updated_at
            FROM organizations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(organizations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_organization_struct() {
        let data = CreateOrganization {
            name: "Acme".to_string(),
            description: None,
            owner_id: Uuid::new_v4(),
            board_limit: None,
        };

        assert_eq!(data.name, "Acme");
        assert!(data.board_limit.is_none());
    }

    #[test]
    fn test_default_board_limit() {
        assert_eq!(DEFAULT_BOARD_LIMIT, 7);
    }
}
