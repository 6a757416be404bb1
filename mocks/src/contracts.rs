//! Contract test helpers for validating TodoRepository implementations
//!
//! Provides standardized tests that every backend should pass, ensuring the
//! HTTP layer sees consistent behavior regardless of storage.

use crate::{create_unicode_todo, TodoItemBuilder, MAX_DESCRIPTION_CHARS};
use todo_core::{TodoError, TodoRepository};
use uuid::Uuid;

/// Test any TodoRepository implementation with the full contract suite
///
/// The repository must start empty of the identifiers used here; each step
/// generates fresh random identifiers.
pub async fn test_repository_contract<R: TodoRepository>(repo: &R) {
    test_create_and_get_contract(repo).await;
    test_not_found_contract(repo).await;
    test_duplicate_id_contract(repo).await;
    test_description_fidelity_contract(repo).await;
    test_independent_items_contract(repo).await;
}

/// A stored item comes back identical
pub async fn test_create_and_get_contract<R: TodoRepository>(repo: &R) {
    let item = TodoItemBuilder::new()
        .with_description("Contract create")
        .build();

    repo.create(&item).await.expect("Create should succeed");
    let fetched = repo
        .get_by_id(item.id)
        .await
        .expect("Get after create should succeed");

    assert_eq!(fetched, item, "Stored item should round-trip unchanged");
}

/// Unknown identifiers report RecordNotFound, never a persistence failure
pub async fn test_not_found_contract<R: TodoRepository>(repo: &R) {
    for id in [Uuid::new_v4(), Uuid::nil()] {
        match repo.get_by_id(id).await {
            Err(TodoError::RecordNotFound) => {}
            other => panic!("Expected RecordNotFound for {id}, got: {other:?}"),
        }
    }
}

/// Reusing an identifier fails as a persistence error and keeps the original
pub async fn test_duplicate_id_contract<R: TodoRepository>(repo: &R) {
    let original = TodoItemBuilder::new()
        .with_description("Contract original")
        .build();
    repo.create(&original).await.expect("Create should succeed");

    let clash = TodoItemBuilder::new()
        .with_id(original.id)
        .with_description("Contract clash")
        .build();

    match repo.create(&clash).await {
        Err(error) => assert!(
            error.is_persistence(),
            "Duplicate id should be a persistence failure, got: {error:?}"
        ),
        Ok(()) => panic!("Duplicate id should be rejected"),
    }

    let fetched = repo.get_by_id(original.id).await.expect("Original should remain");
    assert_eq!(fetched.description, "Contract original");
}

/// Long and multi-byte descriptions are stored verbatim
pub async fn test_description_fidelity_contract<R: TodoRepository>(repo: &R) {
    let long = TodoItemBuilder::new()
        .with_description("é".repeat(MAX_DESCRIPTION_CHARS))
        .build();
    let unicode = create_unicode_todo();

    for item in [long, unicode] {
        repo.create(&item).await.expect("Create should succeed");
        let fetched = repo.get_by_id(item.id).await.expect("Get should succeed");
        assert_eq!(fetched.description, item.description);
        assert_eq!(fetched.due_date, item.due_date);
    }
}

/// Creating one item does not disturb another
pub async fn test_independent_items_contract<R: TodoRepository>(repo: &R) {
    let first = TodoItemBuilder::new().with_description("First").build();
    let second = TodoItemBuilder::new()
        .with_description("Second")
        .due_in_days(7)
        .build();

    repo.create(&first).await.expect("Create should succeed");
    repo.create(&second).await.expect("Create should succeed");

    assert_ne!(first.id, second.id);
    assert_eq!(repo.get_by_id(first.id).await.unwrap(), first);
    assert_eq!(repo.get_by_id(second.id).await.unwrap(), second);
}
