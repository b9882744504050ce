/// Board endpoints
///
/// # Endpoints
///
/// - `GET /boards` - List boards with nested columns and tasks
/// - `POST /boards` - Create a board (enforces the organization's board limit)
/// - `PATCH /boards/:id` - Partial update
/// - `DELETE /boards/:id` - Cascade delete (tasks, then columns, then the board)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::double_option,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tackboard_shared::{
    activity::log_activity,
    models::{
        activity_log::{ActivityAction, ActivityEntity, CreateActivityLog},
        board::{Board, CreateBoard, UpdateBoard},
        column::Column,
        organization::Organization,
        task::Task,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create board request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    /// Board name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning organization
    pub organization_id: Uuid,
}

/// Update board request; absent fields are left untouched, an explicit
/// null clears the description
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    /// New name
    pub name: Option<String>,

    /// New description (null clears it)
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Column with its tasks, for the nested board listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWithTasks {
    /// The column record
    #[serde(flatten)]
    pub column: Column,

    /// Tasks in position order
    pub tasks: Vec<Task>,
}

/// Board with its organization and fully nested columns/tasks
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// The board record
    #[serde(flatten)]
    pub board: Board,

    /// Owning organization
    pub organization: Option<Organization>,

    /// Columns in position order, each with its tasks
    pub columns: Vec<ColumnWithTasks>,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on a 200
    pub success: bool,
}

/// `GET /boards`
///
/// Lists all boards, newest first, each with its organization and
/// columns (position ascending) and each column's tasks (position
/// ascending).
pub async fn list_boards(State(state): State<AppState>) -> ApiResult<Json<Vec<BoardResponse>>> {
    let boards = Board::list(&state.db).await?;

    let mut response = Vec::with_capacity(boards.len());
    for board in boards {
        let organization = Organization::find_by_id(&state.db, board.organization_id).await?;
        let columns = Column::list_by_board(&state.db, board.id).await?;
        let tasks = Task::list_by_board(&state.db, board.id).await?;

        // Group the board's tasks under their columns, keeping the
        // position order from the query
        let mut by_column: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_column.entry(task.column_id).or_default().push(task);
        }

        let columns = columns
            .into_iter()
            .map(|column| {
                let tasks = by_column.remove(&column.id).unwrap_or_default();
                ColumnWithTasks { column, tasks }
            })
            .collect();

        response.push(BoardResponse {
            board,
            organization,
            columns,
        });
    }

    Ok(Json(response))
}

/// `POST /boards`
///
/// Creates a board after checking the organization's board limit, and
/// records a `created board` activity entry.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the board limit is reached
/// - `404 Not Found`: Organization does not exist
pub async fn create_board(
    State(state): State<AppState>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    req.validate().map_err(ApiError::from)?;

    let organization = Organization::find_by_id(&state.db, req.organization_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;

    let board_count = Board::count_by_organization(&state.db, organization.id).await?;
    if board_count >= organization.board_limit as i64 {
        return Err(ApiError::BadRequest(format!(
            "Board limit reached. Maximum {} boards allowed per organization.",
            organization.board_limit
        )));
    }

    let board = Board::create(
        &state.db,
        CreateBoard {
            name: req.name.clone(),
            description: req.description,
            organization_id: organization.id,
        },
    )
    .await?;

    log_activity(
        &state.db,
        CreateActivityLog {
            action: ActivityAction::Created,
            entity_type: ActivityEntity::Board,
            entity_id: board.id,
            user_id: Some(organization.owner_id),
            organization_id: Some(organization.id),
            board_id: Some(board.id),
            task_id: None,
            details: Some(format!("Created board \"{}\"", req.name)),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(board)))
}

/// `PATCH /boards/:id`
///
/// Partial update: only fields present in the request are written.
pub async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<Board>> {
    let board = Board::update(
        &state.db,
        id,
        UpdateBoard {
            name: req.name.clone(),
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    if let Some(organization) = Organization::find_by_id(&state.db, board.organization_id).await? {
        log_activity(
            &state.db,
            CreateActivityLog {
                action: ActivityAction::Updated,
                entity_type: ActivityEntity::Board,
                entity_id: board.id,
                user_id: Some(organization.owner_id),
                organization_id: Some(organization.id),
                board_id: Some(board.id),
                task_id: None,
                details: Some(match req.name {
                    Some(name) => format!("Updated board \"{}\"", name),
                    None => "Updated board".to_string(),
                }),
            },
        )
        .await;
    }

    Ok(Json(board))
}

/// `DELETE /boards/:id`
///
/// Deletes the board and everything it contains, in dependency order
/// (tasks, then columns, then the board) inside one transaction, and
/// records a `deleted board` activity entry. The log entry keeps the
/// board's id as `entity_id` only; the `board_id` reference is left
/// unset since the row is gone.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let board = Board::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    Board::delete_cascade(&state.db, id).await?;

    let owner_id = Organization::find_by_id(&state.db, board.organization_id)
        .await?
        .map(|o| o.owner_id);

    if let Some(owner_id) = owner_id {
        log_activity(
            &state.db,
            CreateActivityLog {
                action: ActivityAction::Deleted,
                entity_type: ActivityEntity::Board,
                entity_id: board.id,
                user_id: Some(owner_id),
                organization_id: Some(board.organization_id),
                board_id: None,
                task_id: None,
                details: Some(format!("Deleted board \"{}\"", board.name)),
            },
        )
        .await;
    }

    Ok(Json(SuccessResponse { success: true }))
}
