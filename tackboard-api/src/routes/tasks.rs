/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks?boardId=` - List tasks in position order
/// - `POST /tasks` - Create a task (appended at the end by default)
/// - `PATCH /tasks/:id` - Partial update
/// - `DELETE /tasks/:id` - Delete a task
/// - `POST /tasks/move` - Move a task to another column
/// - `POST /tasks/reorder` - Move a task next to another task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::double_option,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tackboard_shared::{
    activity::log_activity,
    models::{
        activity_log::{ActivityAction, ActivityEntity, CreateActivityLog},
        column::Column,
        task::{CreateTask, Task, TaskStatus, UpdateTask},
    },
    ordering,
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing tasks
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Restrict to one board's tasks
    pub board_id: Option<Uuid>,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Destination column
    pub column_id: Uuid,

    /// Owning board
    pub board_id: Uuid,

    /// Initial position; defaults to the end of the column
    pub position: Option<i32>,

    /// Workflow status; defaults to `todo`
    pub status: Option<TaskStatus>,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request; absent fields are left untouched, an explicit
/// null clears the nullable fields
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description (null clears it)
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// New workflow status
    pub status: Option<TaskStatus>,

    /// New assignee (null unassigns)
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<Uuid>>,

    /// New due date (null clears it)
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Move request: relocate `taskId` into `columnId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    /// Task being moved
    pub task_id: Uuid,

    /// Destination column
    pub column_id: Uuid,

    /// Client-side drop position. Accepted for wire compatibility but
    /// advisory only: the task is appended at the end of the
    /// destination and the column renumbered in full.
    pub position: Option<i32>,
}

/// Reorder request: move `taskId` next to `overTaskId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    /// Task being moved
    pub task_id: Uuid,

    /// Task it is dropped onto
    pub over_task_id: Uuid,
}

/// Move/reorder/delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on a 200
    pub success: bool,
}

/// `GET /tasks?boardId=`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = match query.board_id {
        Some(board_id) => Task::list_by_board(&state.db, board_id).await?,
        None => Task::list(&state.db).await?,
    };

    Ok(Json(tasks))
}

/// `POST /tasks`
///
/// Creates a task. Without an explicit position the task is appended
/// after the column's existing tasks.
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from)?;

    let position = match req.position {
        Some(position) => position,
        None => Task::count_by_column(&state.db, req.column_id).await? as i32,
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            position,
            column_id: req.column_id,
            board_id: req.board_id,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /tasks/:id`
///
/// Partial update: only fields present in the request are written; an
/// explicit null clears description, assignee and due date.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// `DELETE /tasks/:id`
///
/// Direct single-row delete. The source column keeps a gap in its
/// positions until its next reorder.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /tasks/move`
///
/// Moves a task into another column: the task is appended at the end
/// of the destination (its new position equals the destination's
/// pre-move task count) and the destination is renumbered in full.
/// The source column is not renumbered. Records a `moved task`
/// activity entry.
///
/// # Errors
///
/// - `404 Not Found`: Task or destination column does not exist
pub async fn move_task(
    State(state): State<AppState>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let task = Task::find_by_id(&state.db, req.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let column = Column::find_by_id(&state.db, req.column_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;

    Task::move_to_column(&state.db, task.id, column.id, column.board_id).await?;

    log_activity(
        &state.db,
        CreateActivityLog {
            action: ActivityAction::Moved,
            entity_type: ActivityEntity::Task,
            entity_id: task.id,
            user_id: None,
            organization_id: None,
            board_id: Some(column.board_id),
            task_id: Some(task.id),
            details: Some(format!(
                "Moved task \"{}\" to \"{}\"",
                task.title, column.title
            )),
        },
    )
    .await;

    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /tasks/reorder`
///
/// Moves `taskId` next to `overTaskId` within the reference task's
/// column and renumbers that column to `{0..n-1}`. When the subject
/// lives in a different column the request degrades to a move:
/// appended at the end of the reference's column. Degenerate requests
/// (same id, or either task absent) are defined no-ops and still
/// report success.
pub async fn reorder_tasks(
    State(state): State<AppState>,
    Json(req): Json<ReorderTasksRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let active = Task::find_by_id(&state.db, req.task_id).await?;
    let over = Task::find_by_id(&state.db, req.over_task_id).await?;

    let (Some(active), Some(over)) = (active, over) else {
        return Ok(Json(SuccessResponse { success: true }));
    };
    if active.id == over.id {
        return Ok(Json(SuccessResponse { success: true }));
    }

    if active.column_id == over.column_id {
        let siblings = Task::list_by_column(&state.db, over.column_id).await?;
        let ids: Vec<Uuid> = siblings.iter().map(|t| t.id).collect();

        if let Some(order) = ordering::reorder(&ids, active.id, over.id) {
            Task::apply_order(&state.db, &order).await?;
        }
    } else {
        // Dropped onto a task in another column: treat as a move to
        // the end of that column.
        let column = Column::find_by_id(&state.db, over.column_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;

        Task::move_to_column(&state.db, active.id, column.id, column.board_id).await?;
    }

    Ok(Json(SuccessResponse { success: true }))
}
