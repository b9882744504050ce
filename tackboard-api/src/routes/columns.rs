/// Column endpoints
///
/// # Endpoints
///
/// - `GET /columns?boardId=` - List columns in position order
/// - `POST /columns` - Create a column (appended at the end by default)
/// - `PATCH /columns/:id` - Rename
/// - `DELETE /columns/:id` - Delete the column and its tasks
/// - `POST /columns/reorder` - Move a column next to another one

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tackboard_shared::{
    models::column::{Column, CreateColumn},
    ordering,
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing columns
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListColumnsQuery {
    /// Restrict to one board's columns
    pub board_id: Option<Uuid>,
}

/// Create column request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    /// Column title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Owning board
    pub board_id: Uuid,

    /// Initial position; defaults to the end of the board
    pub position: Option<i32>,
}

/// Rename column request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateColumnRequest {
    /// New title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
}

/// Reorder request: move `columnId` next to `overColumnId`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    /// Column being moved
    pub column_id: Uuid,

    /// Column it is dropped onto
    pub over_column_id: Uuid,
}

/// Reorder/delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on a 200
    pub success: bool,
}

/// `GET /columns?boardId=`
pub async fn list_columns(
    State(state): State<AppState>,
    Query(query): Query<ListColumnsQuery>,
) -> ApiResult<Json<Vec<Column>>> {
    let columns = match query.board_id {
        Some(board_id) => Column::list_by_board(&state.db, board_id).await?,
        None => Column::list(&state.db).await?,
    };

    Ok(Json(columns))
}

/// `POST /columns`
///
/// Creates a column. Without an explicit position the column is
/// appended after the board's existing columns.
pub async fn create_column(
    State(state): State<AppState>,
    Json(req): Json<CreateColumnRequest>,
) -> ApiResult<(StatusCode, Json<Column>)> {
    req.validate().map_err(ApiError::from)?;

    let position = match req.position {
        Some(position) => position,
        None => Column::count_by_board(&state.db, req.board_id).await? as i32,
    };

    let column = Column::create(
        &state.db,
        CreateColumn {
            title: req.title,
            position,
            board_id: req.board_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(column)))
}

/// `PATCH /columns/:id`
pub async fn update_column(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateColumnRequest>,
) -> ApiResult<Json<Column>> {
    req.validate().map_err(ApiError::from)?;

    let column = Column::rename(&state.db, id, req.title)
        .await?
        .ok_or_else(|| ApiError::NotFound("Column not found".to_string()))?;

    Ok(Json(column))
}

/// `DELETE /columns/:id`
///
/// Deletes the column and all of its tasks, explicitly and in one
/// transaction.
pub async fn delete_column(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Column::delete_cascade(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Column not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// `POST /columns/reorder`
///
/// Moves `columnId` next to `overColumnId` within the reference
/// column's board and renumbers the board's columns to `{0..n-1}`.
/// Degenerate requests (same id, or either column absent from the
/// container) are defined no-ops and still report success.
pub async fn reorder_columns(
    State(state): State<AppState>,
    Json(req): Json<ReorderColumnsRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let Some(over_column) = Column::find_by_id(&state.db, req.over_column_id).await? else {
        return Ok(Json(SuccessResponse { success: true }));
    };

    let siblings = Column::list_by_board(&state.db, over_column.board_id).await?;
    let ids: Vec<Uuid> = siblings.iter().map(|c| c.id).collect();

    if let Some(order) = ordering::reorder(&ids, req.column_id, req.over_column_id) {
        Column::apply_order(&state.db, &order).await?;
    }

    Ok(Json(SuccessResponse { success: true }))
}
