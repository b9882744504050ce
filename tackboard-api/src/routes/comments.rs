/// Task comment endpoints
///
/// # Endpoints
///
/// - `GET /task-comments?taskId=` - List a task's comments with authors
/// - `POST /task-comments` - Post a comment
/// - `PATCH /task-comments/comment-actions` - Edit a comment
/// - `DELETE /task-comments/comment-actions?id=` - Delete a comment

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tackboard_shared::{
    activity::log_activity,
    models::{
        activity_log::{ActivityAction, ActivityEntity, CreateActivityLog},
        comment::{Comment, CommentWithAuthor, CreateComment},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing comments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Task whose comments to list
    pub task_id: Uuid,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Comment body
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    /// Task to attach the comment to
    pub task_id: Uuid,

    /// Author
    pub user_id: Uuid,
}

/// Edit comment request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    /// Comment to edit
    pub comment_id: Uuid,

    /// Replacement body
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Query parameters for deleting a comment
#[derive(Debug, Deserialize)]
pub struct DeleteCommentQuery {
    /// Comment to delete
    pub id: Uuid,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on a 200
    pub success: bool,
}

/// `GET /task-comments?taskId=`
///
/// Lists a task's comments, newest first, each with its author.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> ApiResult<Json<Vec<CommentWithAuthor>>> {
    let comments = Comment::list_by_task(&state.db, query.task_id).await?;
    Ok(Json(comments))
}

/// `POST /task-comments`
///
/// Posts a comment and records a `commented` activity entry.
pub async fn create_comment(
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    req.validate().map_err(ApiError::from)?;

    let comment = Comment::create(
        &state.db,
        CreateComment {
            content: req.content,
            task_id: req.task_id,
            user_id: req.user_id,
        },
    )
    .await?;

    log_activity(
        &state.db,
        CreateActivityLog {
            action: ActivityAction::Commented,
            entity_type: ActivityEntity::Task,
            entity_id: req.task_id,
            user_id: Some(req.user_id),
            organization_id: None,
            board_id: None,
            task_id: Some(req.task_id),
            details: None,
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `PATCH /task-comments/comment-actions`
pub async fn update_comment(
    State(state): State<AppState>,
    Json(req): Json<UpdateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    req.validate().map_err(ApiError::from)?;

    let comment = Comment::update_content(&state.db, req.comment_id, req.content)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    Ok(Json(comment))
}

/// `DELETE /task-comments/comment-actions?id=`
pub async fn delete_comment(
    State(state): State<AppState>,
    Query(query): Query<DeleteCommentQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = Comment::delete(&state.db, query.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}
