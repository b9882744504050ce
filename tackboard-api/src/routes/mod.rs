/// API route handlers
///
/// One module per resource:
///
/// - `health`: Health check endpoint
/// - `organizations`: Workspace CRUD
/// - `boards`: Board CRUD with board-limit enforcement and cascade delete
/// - `columns`: Column CRUD and reorder
/// - `tasks`: Task CRUD, reorder and cross-column move
/// - `users`: User CRUD and passwordless login
/// - `comments`: Task comment CRUD
/// - `activity_logs`: Audit trail listing and append

pub mod activity_logs;
pub mod boards;
pub mod columns;
pub mod comments;
pub mod health;
pub mod organizations;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Deserializes a field that distinguishes "absent" from "null".
///
/// Plain `Option<Option<T>>` collapses JSON `null` into the outer
/// `None`; wrapping the field with this function keeps the partial
/// update semantics: absent leaves the column untouched, an explicit
/// `null` clears it.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
