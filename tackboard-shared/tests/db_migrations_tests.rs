/// Integration tests for database migrations
///
/// These tests require a running PostgreSQL database reachable via the
/// DATABASE_URL environment variable. They are skipped when
/// DATABASE_URL is not set.

use std::env;
use tackboard_shared::db::migrations::{
    ensure_database_exists, get_migration_status, run_migrations,
};
use tackboard_shared::db::pool::{close_pool, create_pool, DatabaseConfig};

fn test_database_url() -> Option<String> {
    env::var("DATABASE_URL").ok()
}

#[tokio::test]
async fn test_run_migrations() {
    let Some(url) = test_database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    ensure_database_exists(&url)
        .await
        .expect("Failed to ensure database exists");

    let pool = create_pool(DatabaseConfig {
        url,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    run_migrations(&pool).await.expect("Migrations failed");

    let status = get_migration_status(&pool)
        .await
        .expect("Failed to get migration status");
    assert!(status.applied_migrations > 0, "No migrations were applied");
    assert!(status.latest_version.is_some());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let Some(url) = test_database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };

    ensure_database_exists(&url)
        .await
        .expect("Failed to ensure database exists");

    let pool = create_pool(DatabaseConfig {
        url,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    // Running twice must not fail or re-apply anything
    run_migrations(&pool).await.expect("First run failed");
    let first = get_migration_status(&pool).await.expect("status");

    run_migrations(&pool).await.expect("Second run failed");
    let second = get_migration_status(&pool).await.expect("status");

    assert_eq!(first.applied_migrations, second.applied_migrations);
    assert_eq!(first.latest_version, second.latest_version);

    close_pool(pool).await;
}
