use cql_manager::{sanitize, to_safe_representation, ManagerConfig, Value};
use cql_manager_core::record;
use tests::{models, setup};

use pretty_assertions::assert_eq;
use serde_json::json;

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| field.to_string()).collect()
}

#[test]
fn projection_keeps_allowed_fields_present_in_record() {
    let record = record! {
        "id" => uuid::Uuid::nil(),
        "name" => "a",
        "blob" => Value::Bytes(vec![0xde, 0xad]),
        "tags" => Value::List(vec![Value::from("x"), Value::I32(1)]),
    };

    let projected = sanitize(record, &names(&["tags", "id", "blob", "missing"]));
    let json = to_safe_representation(&projected);

    assert_eq!(
        serde_json::Value::Object(json.clone()),
        json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "blob": "0xdead",
            "tags": ["x", 1],
        })
    );

    // Re-serializing the safe representation changes nothing
    let again = json
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value)))
        .collect::<Vec<_>>();
    let again = to_safe_representation(again.iter().map(|(name, value)| (name, value)));
    assert_eq!(again, json);
}

#[tokio::test]
async fn serialize_model_defaults_to_configured_fields() {
    let config = ManagerConfig::new().fields(["id", "first_name"]);
    let (manager, _log) = setup(models::person(), config);

    let record = record! { "id" => "p1", "first_name" => "a", "last_name" => "b" };

    let json = manager.serialize_model(&record, None);
    assert_eq!(serde_json::Value::Object(json), json!({ "id": "p1", "first_name": "a" }));

    let fields = names(&["last_name"]);
    let json = manager.serialize_model(&record, Some(&fields));
    assert_eq!(serde_json::Value::Object(json), json!({ "last_name": "b" }));
}
