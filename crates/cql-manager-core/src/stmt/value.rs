use std::fmt;

/// A column value, as read from or written to the store.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Raw bytes (`blob`)
    Bytes(Vec<u8>),

    /// 64-bit float (`double`, `float`, `decimal`)
    F64(f64),

    /// Signed 32-bit integer (`int`)
    I32(i32),

    /// Signed 64-bit integer (`bigint`, `counter`, `varint`, `timestamp`)
    I64(i64),

    /// Ordered collection (`list`, `set`), also used for tuples
    List(Vec<Value>),

    /// Key/value collection (`map`), in insertion order
    Map(Vec<(Value, Value)>),

    /// Null value
    #[default]
    Null,

    /// String value (`text`, `varchar`, `ascii`, `inet`)
    String(String),

    /// 128-bit identifier (`uuid`, `timeuuid`)
    Uuid(uuid::Uuid),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is any integer variant.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(v) => Some(v as i64),
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    /// Flattens a value into a sequence: lists yield their items, null
    /// yields nothing, anything else yields itself.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::List(items) => items,
            Self::Null => vec![],
            value => vec![value],
        }
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Bytes(_) => "Bytes",
            Self::F64(_) => "F64",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Null => "Null",
            Self::String(_) => "String",
            Self::Uuid(_) => "Uuid",
        }
    }
}

/// Formats the value the way it appears in a continuation token: strings
/// unquoted and unescaped, identifiers hyphenated, blobs as `0x` hex.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::Bytes(v) => {
                f.write_str("0x")?;
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::F64(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::List(items) => {
                f.write_str("[")?;
                let mut s = "";
                for item in items {
                    write!(f, "{s}{item}")?;
                    s = ", ";
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                let mut s = "";
                for (key, value) in entries {
                    write!(f, "{s}{key}: {value}")?;
                    s = ", ";
                }
                f.write_str("}")
            }
            Self::Null => f.write_str("null"),
            Self::String(v) => f.write_str(v),
            Self::Uuid(v) => v.hyphenated().fmt(f),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(src: uuid::Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<Vec<Value>> for Value {
    fn from(src: Vec<Value>) -> Self {
        Self::List(src)
    }
}

impl From<&Value> for Value {
    fn from(src: &Value) -> Self {
        src.clone()
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}
