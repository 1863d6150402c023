use cql_manager::{ManagerConfig, QueryArgs};
use cql_manager_core::{driver::Operation, record};
use tests::{models, setup};

use pretty_assertions::assert_eq;
use serde_json::json;

fn lookup(id: &str) -> QueryArgs {
    [("id", id)].into_iter().collect()
}

#[tokio::test]
async fn second_create_with_same_key_fails() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    manager
        .create(record! { "id" => "p1", "first_name" => "first" })
        .await
        .unwrap();

    let err = manager
        .create(record! { "id" => "p1", "first_name" => "second" })
        .await
        .unwrap_err();
    assert!(err.is_condition_failed());

    let retrieved = manager.retrieve(&lookup("p1")).await.unwrap();
    assert_eq!(retrieved["first_name"], json!("first"));
}

#[tokio::test]
async fn create_is_conditional_by_default() {
    let (manager, mut log) = setup(models::person(), ManagerConfig::new());

    manager.create(record! { "first_name" => "a" }).await.unwrap();

    let (op, _) = log.pop();
    let Operation::Insert(insert) = op else {
        panic!("expected insert; got {op:?}")
    };
    assert!(insert.if_not_exists);

    // Unset columns are not written
    let names: Vec<_> = insert.values.names().collect();
    assert_eq!(names, ["id", "first_name"]);
}

#[tokio::test]
async fn create_overwrites_when_policy_is_off() {
    let config = ManagerConfig::new().fail_create_if_exists(false);
    let (manager, mut log) = setup(models::person(), config);

    manager
        .create(record! { "id" => "p1", "first_name" => "first", "age" => 1i32 })
        .await
        .unwrap();
    manager
        .create(record! { "id" => "p1", "first_name" => "second" })
        .await
        .unwrap();

    let (op, _) = log.pop();
    assert!(matches!(op, Operation::Insert(ref insert) if !insert.if_not_exists));

    let retrieved = manager.retrieve(&lookup("p1")).await.unwrap();
    assert_eq!(retrieved["first_name"], json!("second"));
    assert_eq!(retrieved["age"], json!(1));
}
