/// Common test utilities for integration tests
///
/// Shared infrastructure for driving the router end-to-end:
/// - Test database setup (migrations run on first use)
/// - Router construction with injected state
/// - Request/response helpers
/// - Workspace fixtures (organization + board + columns)
///
/// All of this requires a running PostgreSQL reachable via the
/// DATABASE_URL environment variable; tests skip when it is unset.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tackboard_api::app::{build_router, AppState};
use tackboard_api::config::{ApiConfig, Config, DatabaseConfig};
use tackboard_shared::db::migrations::{ensure_database_exists, run_migrations};
use tackboard_shared::models::board::{Board, CreateBoard};
use tackboard_shared::models::column::{Column, CreateColumn};
use tackboard_shared::models::organization::{CreateOrganization, Organization};
use tackboard_shared::models::user::{CreateUser, User, UserRole};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing the database pool and a ready router
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
}

impl TestContext {
    async fn create() -> anyhow::Result<Self> {
        let url = std::env::var("DATABASE_URL")?;

        ensure_database_exists(&url).await?;

        let db = PgPool::connect(&url).await?;
        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Deletes a test organization and everything under it
    pub async fn drop_organization(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Builds a test context, or None when DATABASE_URL is not set
pub async fn test_context() -> Option<TestContext> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    }

    Some(
        TestContext::create()
            .await
            .expect("Failed to build test context"),
    )
}

/// Sends a JSON request through the router and parses the response
pub async fn request(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Workspace fixture: one organization, one board, named columns
pub struct Workspace {
    pub owner: User,
    pub organization: Organization,
    pub board: Board,
    pub columns: Vec<Column>,
}

/// Creates an organization, a board and `column_titles.len()` columns.
///
/// Names carry a fresh UUID so slugs never collide across tests.
pub async fn create_workspace(
    ctx: &TestContext,
    column_titles: &[&str],
) -> anyhow::Result<Workspace> {
    let marker = Uuid::new_v4();

    let owner = User::create(
        &ctx.db,
        CreateUser {
            email: format!("owner-{}@example.com", marker),
            name: Some("Test Owner".to_string()),
            role: UserRole::User,
        },
    )
    .await?;

    let organization = Organization::create(
        &ctx.db,
        CreateOrganization {
            name: format!("Test Workspace {}", marker),
            description: None,
            owner_id: owner.id,
            board_limit: None,
        },
    )
    .await?;

    let board = Board::create(
        &ctx.db,
        CreateBoard {
            name: format!("Test Board {}", marker),
            description: None,
            organization_id: organization.id,
        },
    )
    .await?;

    let mut columns = Vec::with_capacity(column_titles.len());
    for (position, title) in column_titles.iter().enumerate() {
        columns.push(
            Column::create(
                &ctx.db,
                CreateColumn {
                    title: (*title).to_string(),
                    position: position as i32,
                    board_id: board.id,
                },
            )
            .await?,
        );
    }

    Ok(Workspace {
        owner,
        organization,
        board,
        columns,
    })
}

/// Creates a task through the API, appended at the end of `column_id`
pub async fn create_task(
    ctx: &TestContext,
    board_id: Uuid,
    column_id: Uuid,
    title: &str,
) -> Uuid {
    let (status, body) = request(
        ctx,
        "POST",
        "/tasks",
        Some(serde_json::json!({
            "title": title,
            "columnId": column_id,
            "boardId": board_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create_task failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}
