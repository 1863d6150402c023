use cql_manager_core::schema::Type;

use serde::Serialize;
use std::fmt;

/// Abstract kind of a resource field, as the API framework validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Float,
    Dict,
    List,

    /// Passed through without validation
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldKind {
    pub fn from_column_type(ty: &Type) -> Self {
        use Type::*;

        match ty {
            Ascii | Inet | Text | VarChar | TimeUuid | Uuid => Self::String,
            BigInt | Counter | Int | VarInt => Self::Integer,
            Boolean => Self::Boolean,
            Double | Float | Decimal => Self::Float,
            Map(..) => Self::Dict,
            List(_) | Set(_) => Self::List,
            _ => Self::Base,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Dict => "dict",
            Self::List => "list",
            Self::Base => "base",
        })
    }
}
