/// Best-effort activity logging
///
/// Mutating handlers call [`log_activity`] after their primary write
/// succeeds. The audit trail is a side channel: a failed insert is
/// recorded in the server log and swallowed, never propagated to the
/// caller and never used to undo the primary mutation.
///
/// # Example
///
/// ```no_run
/// use tackboard_shared::activity::log_activity;
/// use tackboard_shared::models::activity_log::{
///     ActivityAction, ActivityEntity, CreateActivityLog,
/// };
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, board_id: Uuid, user_id: Uuid, org_id: Uuid) {
/// log_activity(
///     &pool,
///     CreateActivityLog {
///         action: ActivityAction::Created,
///         entity_type: ActivityEntity::Board,
///         entity_id: board_id,
///         user_id: Some(user_id),
///         organization_id: Some(org_id),
///         board_id: Some(board_id),
///         task_id: None,
///         details: Some("Created board \"Main Board\"".to_string()),
///     },
/// )
/// .await;
/// # }
/// ```

use crate::models::activity_log::{ActivityLog, CreateActivityLog};
use sqlx::PgPool;
use tracing::warn;

/// Records an activity log entry, swallowing failures.
pub async fn log_activity(pool: &PgPool, entry: CreateActivityLog) {
    let action = entry.action.as_str();
    let entity_type = entry.entity_type.as_str();
    let entity_id = entry.entity_id;

    if let Err(e) = ActivityLog::create(pool, entry).await {
        warn!(
            action,
            entity_type,
            %entity_id,
            "Failed to record activity: {}",
            e
        );
    }
}
