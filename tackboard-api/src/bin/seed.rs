//! Seeds a demo workspace: a default organization and board, three
//! columns, sample users and tasks. Safe to run repeatedly; existing
//! rows are reused instead of duplicated.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/tackboard cargo run -p tackboard-api --bin seed
//! ```

use tackboard_api::config::Config;
use tackboard_shared::db::migrations::{ensure_database_exists, run_migrations};
use tackboard_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use tackboard_shared::models::board::{Board, CreateBoard};
use tackboard_shared::models::column::{Column, CreateColumn};
use tackboard_shared::models::organization::{CreateOrganization, Organization};
use tackboard_shared::models::task::{CreateTask, Task, TaskStatus};
use tackboard_shared::models::user::{CreateUser, User, UserRole};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    tracing::info!("Starting database seed...");

    // Users
    let admin = match User::find_by_email(&pool, "admin@example.com").await? {
        Some(user) => user,
        None => {
            User::create(
                &pool,
                CreateUser {
                    email: "admin@example.com".to_string(),
                    name: Some("Admin User".to_string()),
                    role: UserRole::Admin,
                },
            )
            .await?
        }
    };

    for (email, name) in [
        ("user1@example.com", "John Doe"),
        ("user2@example.com", "Jane Smith"),
    ] {
        if User::find_by_email(&pool, email).await?.is_none() {
            User::create(
                &pool,
                CreateUser {
                    email: email.to_string(),
                    name: Some(name.to_string()),
                    role: UserRole::User,
                },
            )
            .await?;
        }
    }

    // Default workspace
    let organization = match Organization::find_by_slug(&pool, "default-workspace").await? {
        Some(organization) => organization,
        None => {
            Organization::create(
                &pool,
                CreateOrganization {
                    name: "Default Workspace".to_string(),
                    description: Some("Your main workspace".to_string()),
                    owner_id: admin.id,
                    board_limit: None,
                },
            )
            .await?
        }
    };
    tracing::info!("Organization ready: {}", organization.name);

    // Main board with its three default columns
    let boards = Board::list_by_organization(&pool, organization.id).await?;
    let board = match boards.into_iter().find(|b| b.slug == "main-board") {
        Some(board) => board,
        None => {
            Board::create(
                &pool,
                CreateBoard {
                    name: "Main Board".to_string(),
                    description: Some("Your first board".to_string()),
                    organization_id: organization.id,
                },
            )
            .await?
        }
    };
    tracing::info!("Board ready: {}", board.name);

    let existing = Column::list_by_board(&pool, board.id).await?;
    if existing.is_empty() {
        let mut columns = Vec::new();
        for (position, title) in ["To Do", "In Progress", "Done"].iter().enumerate() {
            columns.push(
                Column::create(
                    &pool,
                    CreateColumn {
                        title: (*title).to_string(),
                        position: position as i32,
                        board_id: board.id,
                    },
                )
                .await?,
            );
        }
        tracing::info!("Columns created: {}", columns.len());

        let samples = [
            (
                0usize,
                "Welcome to your new board!",
                "This is your first task. Drag and drop tasks to organize your work.",
                TaskStatus::Todo,
            ),
            (
                0,
                "Try adding new columns",
                "Click the \"Add Column\" button to create new lists.",
                TaskStatus::Todo,
            ),
            (
                1,
                "Sample task in progress",
                "This task shows how tasks look when they are in progress.",
                TaskStatus::InProgress,
            ),
            (
                2,
                "Completed task",
                "Tasks move here when completed.",
                TaskStatus::Done,
            ),
        ];

        for (column_index, title, description, status) in samples {
            let column = &columns[column_index];
            let position = Task::count_by_column(&pool, column.id).await? as i32;
            Task::create(
                &pool,
                CreateTask {
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    status,
                    position,
                    column_id: column.id,
                    board_id: board.id,
                    assignee_id: None,
                    due_date: None,
                },
            )
            .await?;
        }
        tracing::info!("Sample tasks created");
    } else {
        tracing::info!("Columns already present, skipping samples");
    }

    tracing::info!("Seed complete");
    close_pool(pool).await;

    Ok(())
}
