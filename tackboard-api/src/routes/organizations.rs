/// Organization (workspace) endpoints
///
/// # Endpoints
///
/// - `GET /organizations` - List organizations with their boards
/// - `POST /organizations` - Create a new organization

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tackboard_shared::{
    activity::log_activity,
    models::{
        activity_log::{ActivityAction, ActivityEntity, CreateActivityLog},
        board::Board,
        organization::{CreateOrganization, Organization},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create organization request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    /// Workspace name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user's ID
    pub owner_id: Uuid,
}

/// Organization with its boards, newest boards first
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    /// The organization record
    #[serde(flatten)]
    pub organization: Organization,

    /// Boards owned by the organization
    pub boards: Vec<Board>,
}

/// `GET /organizations`
///
/// Lists all organizations, newest first, each with its boards.
pub async fn list_organizations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<OrganizationResponse>>> {
    let organizations = Organization::list(&state.db).await?;

    let mut response = Vec::with_capacity(organizations.len());
    for organization in organizations {
        let boards = Board::list_by_organization(&state.db, organization.id).await?;
        response.push(OrganizationResponse {
            organization,
            boards,
        });
    }

    Ok(Json(response))
}

/// `POST /organizations`
///
/// Creates a workspace with the default board limit and records a
/// `created organization` activity entry.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Slug already exists
pub async fn create_organization(
    State(state): State<AppState>,
    Json(req): Json<CreateOrganizationRequest>,
) -> ApiResult<(StatusCode, Json<OrganizationResponse>)> {
    req.validate().map_err(ApiError::from)?;

    let organization = Organization::create(
        &state.db,
        CreateOrganization {
            name: req.name.clone(),
            description: req.description,
            owner_id: req.owner_id,
            board_limit: None,
        },
    )
    .await?;

    log_activity(
        &state.db,
        CreateActivityLog {
            action: ActivityAction::Created,
            entity_type: ActivityEntity::Organization,
            entity_id: organization.id,
            user_id: Some(req.owner_id),
            organization_id: Some(organization.id),
            board_id: None,
            task_id: None,
            details: Some(format!("Created workspace \"{}\"", req.name)),
        },
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(OrganizationResponse {
            organization,
            boards: Vec::new(),
        }),
    ))
}
