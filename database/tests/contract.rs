//! Runs the shared repository contract suite against the SQL backends

use database::{PoolSettings, PostgresTodoRepository, SqliteTodoRepository};
use mocks::test_repository_contract;

#[tokio::test]
async fn sqlite_in_memory_passes_contract() {
    let repo = SqliteTodoRepository::new("sqlite::memory:").await.unwrap();
    repo.migrate().await.unwrap();
    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn sqlite_file_passes_contract() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("contract.sqlite").display());

    let repo = SqliteTodoRepository::new(&url).await.unwrap();
    repo.migrate().await.unwrap();
    test_repository_contract(&repo).await;
}

/// Needs a reachable server; set `TEST_POSTGRES_URL` to enable.
#[tokio::test]
async fn postgres_passes_contract() {
    let Ok(url) = std::env::var("TEST_POSTGRES_URL") else {
        eprintln!("TEST_POSTGRES_URL not set, skipping PostgreSQL contract");
        return;
    };

    let repo = PostgresTodoRepository::connect(&url, PoolSettings::default())
        .await
        .unwrap();
    repo.migrate().await.unwrap();

    let version = repo.check_server_version().await.unwrap();
    assert!(version.starts_with("PostgreSQL"));

    test_repository_contract(&repo).await;
}
