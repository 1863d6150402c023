use cql_manager::{ManagerConfig, QueryArgs};
use cql_manager_core::{driver::Operation, record};
use tests::{models, setup};

use pretty_assertions::assert_eq;
use serde_json::json;

fn lookup(id: &str) -> QueryArgs {
    [("id", id)].into_iter().collect()
}

#[tokio::test]
async fn create_retrieve_update_delete() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    let created = manager
        .create(record! { "first_name" => "x", "last_name" => "Lovelace" })
        .await
        .unwrap();

    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["first_name"], json!("x"));
    assert_eq!(created["age"], json!(null));

    let retrieved = manager.retrieve(&lookup(&id)).await.unwrap();
    assert_eq!(retrieved, created);

    let updated = manager
        .update(&lookup(&id), record! { "first_name" => "y" })
        .await
        .unwrap();
    assert_eq!(updated["first_name"], json!("y"));
    assert_eq!(updated["last_name"], json!("Lovelace"));

    let retrieved = manager.retrieve(&lookup(&id)).await.unwrap();
    assert_eq!(retrieved["first_name"], json!("y"));

    let deleted = manager.delete(&lookup(&id)).await.unwrap();
    assert!(deleted.is_empty());

    let err = manager.retrieve(&lookup(&id)).await.unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn create_generates_distinct_ids() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    let a = manager.create(record! { "first_name" => "a" }).await.unwrap();
    let b = manager.create(record! { "first_name" => "b" }).await.unwrap();

    assert_eq!(a["id"].as_str().unwrap().len(), 36);
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn create_drops_fields_that_are_not_creatable() {
    let config = ManagerConfig::new().create_fields(["first_name", "last_name"]);
    let (manager, _log) = setup(models::person(), config);

    let created = manager
        .create(record! { "id" => "forced", "first_name" => "a", "age" => 30i32, "bogus" => 1i32 })
        .await
        .unwrap();

    assert_ne!(created["id"], json!("forced"));
    assert_eq!(created["age"], json!(null));
    assert!(!created.contains_key("bogus"));
}

#[tokio::test]
async fn create_casts_text_input_to_column_types() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    let created = manager
        .create(record! { "first_name" => "a", "age" => "42" })
        .await
        .unwrap();

    assert_eq!(created["age"], json!(42));
}

#[tokio::test]
async fn update_ignores_fields_that_are_not_updatable() {
    let config = ManagerConfig::new().update_fields(["last_name"]);
    let (manager, _log) = setup(models::person(), config);

    let created = manager
        .create(record! { "first_name" => "a", "last_name" => "b" })
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let updated = manager
        .update(&lookup(id), record! { "first_name" => "c", "last_name" => "d" })
        .await
        .unwrap();

    assert_eq!(updated["first_name"], json!("a"));
    assert_eq!(updated["last_name"], json!("d"));

    let retrieved = manager.retrieve(&lookup(id)).await.unwrap();
    assert_eq!(retrieved, updated);
}

#[tokio::test]
async fn update_without_changes_skips_the_write() {
    let (manager, mut log) = setup(models::person(), ManagerConfig::new());

    let created = manager.create(record! { "first_name" => "a" }).await.unwrap();
    let id = created["id"].as_str().unwrap();
    log.clear();

    // Only the key, set to its current value
    let updated = manager
        .update(&lookup(id), record! { "id" => id })
        .await
        .unwrap();
    assert_eq!(updated, created);

    assert_eq!(log.len(), 1);
    let (op, _) = log.pop();
    assert!(op.is_select());
}

#[tokio::test]
async fn update_writes_only_assigned_columns() {
    let (manager, mut log) = setup(models::person(), ManagerConfig::new());

    let created = manager.create(record! { "first_name" => "a" }).await.unwrap();
    let id = created["id"].as_str().unwrap();
    log.clear();

    manager
        .update(&lookup(id), record! { "age" => 7i32 })
        .await
        .unwrap();

    let (select, _) = log.pop();
    assert!(select.is_select());

    let (op, response) = log.pop();
    let Operation::Update(update) = op else {
        panic!("expected update; got {op:?}")
    };
    assert_eq!(update.key, record! { "id" => id });
    assert_eq!(update.assignments, record! { "age" => 7i32 });
    assert_eq!(response.into_count().unwrap(), 1);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    let err = manager.retrieve(&lookup("missing")).await.unwrap_err();
    assert!(err.is_record_not_found());

    let err = manager
        .update(&lookup("missing"), record! { "age" => 1i32 })
        .await
        .unwrap_err();
    assert!(err.is_record_not_found());

    let err = manager.delete(&lookup("missing")).await.unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn retrieve_by_partial_key_matching_many_records_fails() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());

    for hour in [1i32, 2] {
        manager
            .create(record! { "sensor" => "a", "day" => 1i32, "hour" => hour, "seq" => 0i32 })
            .await
            .unwrap();
    }

    let args: QueryArgs = [("sensor", "a"), ("day", "1")].into_iter().collect();
    let err = manager.retrieve(&args).await.unwrap_err();
    assert!(err.is_too_many_records());
}

#[tokio::test]
async fn retrieve_by_unknown_column_fails() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    let args: QueryArgs = [("nickname", "a")].into_iter().collect();
    let err = manager.retrieve(&args).await.unwrap_err();
    assert!(err.is_invalid_statement());
}

#[tokio::test]
async fn filtering_on_non_key_columns_needs_allow_filtering() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());
    manager.create(record! { "first_name" => "a" }).await.unwrap();

    let args: QueryArgs = [("first_name", "a")].into_iter().collect();
    let err = manager.retrieve(&args).await.unwrap_err();
    assert!(err.is_invalid_statement());

    let (manager, _log) = setup(
        models::person(),
        ManagerConfig::new().allow_filtering(true),
    );
    manager.create(record! { "first_name" => "a" }).await.unwrap();

    let retrieved = manager.retrieve(&args).await.unwrap();
    assert_eq!(retrieved["first_name"], json!("a"));
}

#[tokio::test]
async fn create_without_full_key_fails() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());

    let err = manager
        .create(record! { "sensor" => "a", "day" => 1i32, "hour" => 0i32 })
        .await
        .unwrap_err();
    assert!(err.is_invalid_statement());
}
