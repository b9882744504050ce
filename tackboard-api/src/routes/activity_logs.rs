/// Activity log endpoints
///
/// # Endpoints
///
/// - `GET /activity-logs?organizationId=&boardId=&taskId=&limit=` - List entries
/// - `POST /activity-logs` - Append an entry directly

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tackboard_shared::models::activity_log::{
    ActivityAction, ActivityEntity, ActivityLog, ActivityLogEntry, ActivityLogFilter,
    CreateActivityLog,
};
use uuid::Uuid;

/// Query parameters for listing activity entries
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivityQuery {
    /// Only entries for this organization
    pub organization_id: Option<Uuid>,

    /// Only entries for this board
    pub board_id: Option<Uuid>,

    /// Only entries for this task
    pub task_id: Option<Uuid>,

    /// Maximum number of entries (default 50)
    pub limit: Option<i64>,
}

/// Append activity entry request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    /// Action performed ("created", "updated", ...)
    pub action: ActivityAction,

    /// Kind of entity affected
    pub entity_type: ActivityEntity,

    /// ID of the affected entity
    pub entity_id: Uuid,

    /// Acting user
    pub user_id: Uuid,

    /// Related organization
    pub organization_id: Option<Uuid>,

    /// Related board
    pub board_id: Option<Uuid>,

    /// Related task
    pub task_id: Option<Uuid>,

    /// Optional human-readable detail
    pub details: Option<String>,
}

/// `GET /activity-logs`
///
/// Lists entries newest first. Filters are conjunctive; each entry
/// carries the acting user's and related board/task display names.
pub async fn list_activity_logs(
    State(state): State<AppState>,
    Query(query): Query<ListActivityQuery>,
) -> ApiResult<Json<Vec<ActivityLogEntry>>> {
    if let Some(limit) = query.limit {
        if limit < 1 {
            return Err(ApiError::BadRequest(
                "limit must be a positive integer".to_string(),
            ));
        }
    }

    let entries = ActivityLog::list(
        &state.db,
        ActivityLogFilter {
            organization_id: query.organization_id,
            board_id: query.board_id,
            task_id: query.task_id,
            limit: query.limit,
        },
    )
    .await?;

    Ok(Json(entries))
}

/// `POST /activity-logs`
///
/// Appends an entry directly. Unlike the server-side best-effort
/// logger, a failed insert here is reported to the caller.
pub async fn create_activity_log(
    State(state): State<AppState>,
    Json(req): Json<CreateActivityRequest>,
) -> ApiResult<(StatusCode, Json<ActivityLog>)> {
    let entry = ActivityLog::create(
        &state.db,
        CreateActivityLog {
            action: req.action,
            entity_type: req.entity_type,
            entity_id: req.entity_id,
            user_id: Some(req.user_id),
            organization_id: req.organization_id,
            board_id: req.board_id,
            task_id: req.task_id,
            details: req.details,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}
