/// Integration tests for the Tackboard API
///
/// These tests drive the router end-to-end against a real PostgreSQL
/// database and verify the ordering invariants: after any reorder or
/// move, a container's position values are exactly {0..n-1}.
///
/// They require DATABASE_URL to point at a test database and skip
/// when it is unset.

mod common;

use axum::http::StatusCode;
use common::{create_task, create_workspace, request, test_context};
use serde_json::json;
use tackboard_shared::models::board::Board;
use tackboard_shared::models::column::Column;
use tackboard_shared::models::organization::{CreateOrganization, Organization};
use tackboard_shared::models::task::Task;
use tackboard_shared::models::user::{CreateUser, User, UserRole};
use uuid::Uuid;

/// Collects (id, position) pairs for a column's tasks
async fn column_positions(ctx: &common::TestContext, column_id: Uuid) -> Vec<(Uuid, i32)> {
    Task::list_by_column(&ctx.db, column_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.position))
        .collect()
}

#[tokio::test]
async fn test_reorder_tasks_matches_splice_semantics() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["To Do"]).await.unwrap();
    let column = &ws.columns[0];

    // [A(0), B(1), C(2)]
    let a = create_task(&ctx, ws.board.id, column.id, "A").await;
    let b = create_task(&ctx, ws.board.id, column.id, "B").await;
    let c = create_task(&ctx, ws.board.id, column.id, "C").await;

    // reorder(A, C) => [B(0), C(1), A(2)]
    let (status, body) = request(
        &ctx,
        "POST",
        "/tasks/reorder",
        Some(json!({ "taskId": a, "overTaskId": c })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);

    let positions = column_positions(&ctx, column.id).await;
    assert_eq!(positions, vec![(b, 0), (c, 1), (a, 2)]);

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}

#[tokio::test]
async fn test_reorder_noop_cases_leave_store_unchanged() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["To Do"]).await.unwrap();
    let column = &ws.columns[0];

    let a = create_task(&ctx, ws.board.id, column.id, "A").await;
    let b = create_task(&ctx, ws.board.id, column.id, "B").await;
    let before = column_positions(&ctx, column.id).await;

    // Subject == reference
    let (status, body) = request(
        &ctx,
        "POST",
        "/tasks/reorder",
        Some(json!({ "taskId": a, "overTaskId": a })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(column_positions(&ctx, column.id).await, before);

    // Reference does not exist
    let (status, body) = request(
        &ctx,
        "POST",
        "/tasks/reorder",
        Some(json!({ "taskId": b, "overTaskId": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(column_positions(&ctx, column.id).await, before);

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}

#[tokio::test]
async fn test_move_task_appends_to_destination() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["To Do", "In Progress"]).await.unwrap();
    let (source, dest) = (&ws.columns[0], &ws.columns[1]);

    let a0 = create_task(&ctx, ws.board.id, source.id, "A0").await;
    let a1 = create_task(&ctx, ws.board.id, source.id, "A1").await;
    let a2 = create_task(&ctx, ws.board.id, source.id, "A2").await;
    let b0 = create_task(&ctx, ws.board.id, dest.id, "B0").await;
    let b1 = create_task(&ctx, ws.board.id, dest.id, "B1").await;

    let (status, body) = request(
        &ctx,
        "POST",
        "/tasks/move",
        Some(json!({ "taskId": a0, "columnId": dest.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    // Moved task lands at the end: position == pre-move count of dest
    let moved = Task::find_by_id(&ctx.db, a0).await.unwrap().unwrap();
    assert_eq!(moved.column_id, dest.id);
    assert_eq!(moved.position, 2);

    // Destination renumbered to {0..n-1}
    let positions = column_positions(&ctx, dest.id).await;
    assert_eq!(positions, vec![(b0, 0), (b1, 1), (a0, 2)]);

    // Source is NOT renumbered: the survivors keep their old gapped
    // positions until a later reorder
    let source_positions = column_positions(&ctx, source.id).await;
    assert_eq!(source_positions, vec![(a1, 1), (a2, 2)]);

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}

#[tokio::test]
async fn test_reorder_columns_within_board() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["A", "B", "C"]).await.unwrap();
    let ids: Vec<Uuid> = ws.columns.iter().map(|c| c.id).collect();

    let (status, body) = request(
        &ctx,
        "POST",
        "/columns/reorder",
        Some(json!({ "columnId": ids[0], "overColumnId": ids[2] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let columns = Column::list_by_board(&ctx.db, ws.board.id).await.unwrap();
    let order: Vec<(Uuid, i32)> = columns.iter().map(|c| (c.id, c.position)).collect();
    assert_eq!(order, vec![(ids[1], 0), (ids[2], 1), (ids[0], 2)]);

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}

#[tokio::test]
async fn test_board_limit_is_enforced() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let marker = Uuid::new_v4();

    let owner = User::create(
        &ctx.db,
        CreateUser {
            email: format!("limited-{}@example.com", marker),
            name: None,
            role: UserRole::User,
        },
    )
    .await
    .unwrap();

    let organization = Organization::create(
        &ctx.db,
        CreateOrganization {
            name: format!("Limited Workspace {}", marker),
            description: None,
            owner_id: owner.id,
            board_limit: Some(1),
        },
    )
    .await
    .unwrap();

    // First board fits within the limit
    let (status, _) = request(
        &ctx,
        "POST",
        "/boards",
        Some(json!({
            "name": format!("First Board {}", marker),
            "organizationId": organization.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Second board exceeds it: rejected with the limit in the message,
    // and no row is created
    let (status, body) = request(
        &ctx,
        "POST",
        "/boards",
        Some(json!({
            "name": format!("Second Board {}", marker),
            "organizationId": organization.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("Board limit reached"),
        "{}",
        body
    );
    assert!(body["error"].as_str().unwrap().contains('1'));

    let count = Board::count_by_organization(&ctx.db, organization.id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    ctx.drop_organization(organization.id).await.unwrap();
    User::delete(&ctx.db, owner.id).await.unwrap();
}

#[tokio::test]
async fn test_board_delete_cascades_in_dependency_order() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["C1", "C2"]).await.unwrap();

    for column in &ws.columns {
        create_task(&ctx, ws.board.id, column.id, "task").await;
        create_task(&ctx, ws.board.id, column.id, "task").await;
    }

    let (status, body) = request(
        &ctx,
        "DELETE",
        &format!("/boards/{}", ws.board.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);

    // Nothing survives: no tasks, no columns, no board row
    assert!(Task::list_by_board(&ctx.db, ws.board.id)
        .await
        .unwrap()
        .is_empty());
    assert!(Column::list_by_board(&ctx.db, ws.board.id)
        .await
        .unwrap()
        .is_empty());
    assert!(Board::find_by_id(&ctx.db, ws.board.id)
        .await
        .unwrap()
        .is_none());

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}

#[tokio::test]
async fn test_login_upserts_by_email() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let email = format!("newcomer-{}@example.com", Uuid::new_v4());
    let local_part = email.split('@').next().unwrap();

    // First login creates the user
    let (status, body) = request(&ctx, "POST", "/users/login", Some(json!({ "email": &email })))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["role"], "user");
    assert_eq!(body["name"], local_part);
    let first_id = body["id"].as_str().unwrap().to_string();

    // Second login returns the same user
    let (status, body) = request(&ctx, "POST", "/users/login", Some(json!({ "email": &email })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_str().unwrap(), first_id);

    User::delete(&ctx.db, Uuid::parse_str(&first_id).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_comment_records_activity() {
    let Some(ctx) = test_context().await else {
        return;
    };
    let ws = create_workspace(&ctx, &["To Do"]).await.unwrap();
    let task = create_task(&ctx, ws.board.id, ws.columns[0].id, "Discuss").await;

    let (status, body) = request(
        &ctx,
        "POST",
        "/task-comments",
        Some(json!({
            "content": "First!",
            "taskId": task,
            "userId": ws.owner.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let (status, body) = request(
        &ctx,
        "GET",
        &format!("/activity-logs?taskId={}", task),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert!(
        entries
            .iter()
            .any(|e| e["action"] == "commented" && e["entityType"] == "task"),
        "{}",
        body
    );

    ctx.drop_organization(ws.organization.id).await.unwrap();
    User::delete(&ctx.db, ws.owner.id).await.unwrap();
}
