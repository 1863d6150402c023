use cql_manager::{Field, FieldKind, Manager, ManagerConfig, Model};
use cql_manager_core::schema::Type;
use cql_manager_driver_memory::Memory;

use pretty_assertions::assert_eq;
use std::sync::Arc;

fn manager() -> Manager {
    let model = Model::builder("Profile")
        .partition_key("user_id", Type::Uuid)
        .column("handle", Type::VarChar)
        .column("visits", Type::Counter)
        .column("verified", Type::Boolean)
        .column("score", Type::Double)
        .column("tags", Type::set(Type::Text))
        .column("links", Type::map(Type::Text, Type::Text))
        .column("joined", Type::Timestamp)
        .column("avatar", Type::Blob)
        .build()
        .unwrap();

    Manager::new(model, Arc::new(Memory::new()), ManagerConfig::new())
}

#[test]
fn field_types_follow_column_types() {
    let manager = manager();

    let cases = [
        ("user_id", FieldKind::String),
        ("handle", FieldKind::String),
        ("visits", FieldKind::Integer),
        ("verified", FieldKind::Boolean),
        ("score", FieldKind::Float),
        ("tags", FieldKind::List),
        ("links", FieldKind::Dict),
        ("joined", FieldKind::Base),
        ("avatar", FieldKind::Base),
    ];

    for (name, kind) in cases {
        assert_eq!(
            manager.get_field_type(name).unwrap(),
            Field {
                name: name.to_string(),
                kind,
            }
        );
    }
}

#[test]
fn unknown_field_is_an_error() {
    let err = manager().get_field_type("missing").unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn empty_fields_expose_every_column() {
    let manager = manager();
    let fields = &manager.config().fields;

    assert_eq!(fields.len(), 9);
    assert_eq!(fields[0], "user_id");
    assert_eq!(manager.config().listable(), &fields[..]);
}
