use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// Store-level column types.
///
/// Parsed from, and displayed as, CQL type names (`text`, `map<text, int>`,
/// ...). Types the store reports that are not listed here are kept verbatim
/// as [`Type::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Set(Box<Type>),
    Text,
    Timestamp,
    TimeUuid,
    Uuid,
    VarChar,
    VarInt,

    /// User-specified unrecognized type
    Custom(String),
}

impl Type {
    pub fn list(item: Type) -> Self {
        Self::List(Box::new(item))
    }

    pub fn set(item: Type) -> Self {
        Self::Set(Box::new(item))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Type::*;

        match self {
            Ascii => f.write_str("ascii"),
            BigInt => f.write_str("bigint"),
            Blob => f.write_str("blob"),
            Boolean => f.write_str("boolean"),
            Counter => f.write_str("counter"),
            Decimal => f.write_str("decimal"),
            Double => f.write_str("double"),
            Float => f.write_str("float"),
            Inet => f.write_str("inet"),
            Int => f.write_str("int"),
            List(item) => write!(f, "list<{item}>"),
            Map(key, value) => write!(f, "map<{key}, {value}>"),
            Set(item) => write!(f, "set<{item}>"),
            Text => f.write_str("text"),
            Timestamp => f.write_str("timestamp"),
            TimeUuid => f.write_str("timeuuid"),
            Uuid => f.write_str("uuid"),
            VarChar => f.write_str("varchar"),
            VarInt => f.write_str("varint"),
            Custom(name) => write!(f, "'{name}'"),
        }
    }
}

impl FromStr for Type {
    type Err = Error;

    fn from_str(src: &str) -> Result<Type> {
        let src = src.trim();

        if let Some((outer, inner)) = src
            .strip_suffix('>')
            .and_then(|rest| rest.split_once('<'))
        {
            let args = split_args(inner)?;

            return match (outer.trim().to_ascii_lowercase().as_str(), &args[..]) {
                ("list", [item]) => Ok(Type::list(item.parse()?)),
                ("set", [item]) => Ok(Type::set(item.parse()?)),
                ("map", [key, value]) => Ok(Type::map(key.parse()?, value.parse()?)),
                ("frozen", [item]) => item.parse(),
                _ => Err(Error::invalid_schema(format!(
                    "unsupported column type `{src}`"
                ))),
            };
        }

        if src.is_empty() || src.contains(['<', '>']) {
            return Err(Error::invalid_schema(format!(
                "malformed column type `{src}`"
            )));
        }

        Ok(match src.to_ascii_lowercase().as_str() {
            "ascii" => Type::Ascii,
            "bigint" => Type::BigInt,
            "blob" => Type::Blob,
            "boolean" => Type::Boolean,
            "counter" => Type::Counter,
            "decimal" => Type::Decimal,
            "double" => Type::Double,
            "float" => Type::Float,
            "inet" => Type::Inet,
            "int" => Type::Int,
            "text" => Type::Text,
            "timestamp" => Type::Timestamp,
            "timeuuid" => Type::TimeUuid,
            "uuid" => Type::Uuid,
            "varchar" => Type::VarChar,
            "varint" => Type::VarInt,
            _ => Type::Custom(src.trim_matches('\'').to_string()),
        })
    }
}

/// Splits `a, map<b, c>` on the commas that are not nested in angle
/// brackets.
fn split_args(src: &str) -> Result<Vec<&str>> {
    let mut args = vec![];
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in src.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::invalid_schema(format!("unbalanced column type `{src}`"))
                })?
            }
            ',' if depth == 0 => {
                args.push(src[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::invalid_schema(format!(
            "unbalanced column type `{src}`"
        )));
    }

    args.push(src[start..].trim());
    Ok(args)
}
