//! Field allow-lists and JSON-safe output.

use cql_manager_core::stmt::Value;

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

/// Keeps the entries whose name is in `allowed`, in their original order.
/// Disallowed names are dropped silently.
pub fn sanitize<I, K>(values: I, allowed: &[String]) -> IndexMap<String, Value>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    values
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .filter(|(name, _)| allowed.iter().any(|allowed| allowed == name))
        .collect()
}

/// Converts every value to plain JSON, recursing into collections.
pub fn to_safe_representation<'a, I>(values: I) -> Map<String, Json>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    values
        .into_iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect()
}
