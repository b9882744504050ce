/// Database models for Tackboard
///
/// One module per table, each providing the row struct and its CRUD
/// operations.
///
/// # Models
///
/// - `organization`: Workspaces that own boards and enforce a board limit
/// - `board`: Kanban boards belonging to an organization
/// - `column`: Ordered columns within a board
/// - `task`: Ordered tasks within a column
/// - `user`: User accounts (passwordless; see spec on login)
/// - `comment`: Comments attached to tasks
/// - `activity_log`: Append-only audit trail of mutations
///
/// # Example
///
/// ```no_run
/// use tackboard_shared::models::user::{User, CreateUser, UserRole};
/// use tackboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "user@example.com".to_string(),
///         name: Some("John Doe".to_string()),
///         role: UserRole::User,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod activity_log;
pub mod board;
pub mod column;
pub mod comment;
pub mod organization;
pub mod task;
pub mod user;

/// Derives a URL slug from a display name.
///
/// Lowercases the input, maps every run of non-alphanumeric characters
/// to a single dash, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress a leading dash

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Default Workspace"), "default-workspace");
        assert_eq!(slugify("Main Board"), "main-board");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Q3 -- Launch  Plan!"), "q3-launch-plan");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("---"), "");
    }
}
