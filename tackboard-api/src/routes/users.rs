/// User endpoints
///
/// There is no authentication: `POST /users/login` is a passwordless
/// upsert by email that the client uses to identify itself.
///
/// # Endpoints
///
/// - `GET /users` - List users
/// - `POST /users` - Create a user
/// - `POST /users/login` - Upsert-login by email
/// - `DELETE /users/:id` - Delete a user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tackboard_shared::models::user::{name_from_email, CreateUser, User, UserRole};
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Role, defaults to `user`
    pub role: Option<UserRole>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on a 200
    pub success: bool,
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// `POST /users`
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate().map_err(ApiError::from)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            role: req.role.unwrap_or_default(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /users/login`
///
/// Passwordless upsert-login: returns the existing user for the email,
/// or creates one with role `user` and a name derived from the email's
/// local part. Repeat logins with the same email return the same user.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    req.validate().map_err(ApiError::from)?;

    if let Some(user) = User::find_by_email(&state.db, &req.email).await? {
        return Ok(Json(user));
    }

    let user = User::create(
        &state.db,
        CreateUser {
            name: Some(name_from_email(&req.email)),
            email: req.email,
            role: UserRole::User,
        },
    )
    .await?;

    Ok(Json(user))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}
