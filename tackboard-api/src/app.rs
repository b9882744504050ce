/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router
/// with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tackboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tackboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the
/// pool is internally reference-counted so the clone is cheap. The
/// store handle is injected here rather than held in a global.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                  # Liveness probe
/// ├── /organizations          GET POST
/// ├── /boards                 GET POST
/// │   └── /:id                PATCH DELETE
/// ├── /columns                GET POST
/// │   ├── /:id                PATCH DELETE
/// │   └── /reorder            POST
/// ├── /tasks                  GET POST
/// │   ├── /:id                PATCH DELETE
/// │   ├── /move               POST
/// │   └── /reorder            POST
/// ├── /users                  GET POST
/// │   ├── /:id                DELETE
/// │   └── /login              POST
/// ├── /task-comments          GET POST
/// │   └── /comment-actions    PATCH DELETE
/// └── /activity-logs          GET POST
/// ```
///
/// No endpoint is authenticated; `POST /users/login` is a client-side
/// convenience, not an access check.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let organization_routes = Router::new()
        .route("/", get(routes::organizations::list_organizations))
        .route("/", post(routes::organizations::create_organization));

    let board_routes = Router::new()
        .route("/", get(routes::boards::list_boards))
        .route("/", post(routes::boards::create_board))
        .route("/:id", patch(routes::boards::update_board))
        .route("/:id", delete(routes::boards::delete_board));

    let column_routes = Router::new()
        .route("/", get(routes::columns::list_columns))
        .route("/", post(routes::columns::create_column))
        .route("/reorder", post(routes::columns::reorder_columns))
        .route("/:id", patch(routes::columns::update_column))
        .route("/:id", delete(routes::columns::delete_column));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/move", post(routes::tasks::move_task))
        .route("/reorder", post(routes::tasks::reorder_tasks))
        .route("/:id", patch(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/", post(routes::users::create_user))
        .route("/login", post(routes::users::login))
        .route("/:id", delete(routes::users::delete_user));

    let comment_routes = Router::new()
        .route("/", get(routes::comments::list_comments))
        .route("/", post(routes::comments::create_comment))
        .route(
            "/comment-actions",
            patch(routes::comments::update_comment).delete(routes::comments::delete_comment),
        );

    let activity_routes = Router::new()
        .route("/", get(routes::activity_logs::list_activity_logs))
        .route("/", post(routes::activity_logs::create_activity_log));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/organizations", organization_routes)
        .nest("/boards", board_routes)
        .nest("/columns", column_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes)
        .nest("/task-comments", comment_routes)
        .nest("/activity-logs", activity_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
