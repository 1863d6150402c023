//! Ordering between values, and comparisons with Rust primitives.

use super::Value;

use std::cmp::Ordering;

impl Value {
    /// Compares two values in the order the store sorts them.
    ///
    /// Integers and floats compare numerically across variants; lists
    /// compare lexicographically. Returns `None` when either side is null or
    /// the variants have no common order.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;

        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Bytes(a), Bytes(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (F64(a), F64(b)) => a.partial_cmp(b),
            (F64(a), b) => b.as_i64().and_then(|b| a.partial_cmp(&(b as f64))),
            (a, F64(b)) => a.as_i64().and_then(|a| (a as f64).partial_cmp(b)),
            (List(a), List(b)) => {
                for (a, b) in a.iter().zip(b) {
                    match a.compare(b)? {
                        Ordering::Equal => continue,
                        ordering => return Some(ordering),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => None,
            },
        }
    }
}

/// Macro to implement PartialEq between Value and primitive types
macro_rules! impl_value_eq {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Value::$variant(val) if val == other)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    other.eq(self)
                }
            }
        )*
    };
}

impl_value_eq! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f64 => F64,
    String => String,
    uuid::Uuid => Uuid,
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(val) if val == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other.eq(self)
    }
}
