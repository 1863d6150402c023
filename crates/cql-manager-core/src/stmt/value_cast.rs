use super::Value;
use crate::{schema::Type, Error, Result};

impl Value {
    /// Coerces the value to the representation used by a column of type `ty`.
    ///
    /// Values arriving from query strings and continuation tokens are text,
    /// so strings are parsed into the column's type. Null passes through.
    pub fn cast(self, ty: &Type) -> Result<Value> {
        use Type::*;

        let value = match (ty, self) {
            (_, Value::Null) => Value::Null,
            (Custom(_), value) => value,

            (Ascii | Inet | Text | VarChar, value @ Value::String(_)) => value,
            (Ascii | Inet | Text | VarChar, Value::Uuid(v)) => Value::String(v.to_string()),

            (Int, value @ Value::I32(_)) => value,
            (Int, Value::I64(v)) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::I64(v), ty.to_string())),
            },
            (Int, Value::String(v)) => match v.trim().parse::<i32>() {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::String(v), ty.to_string())),
            },

            (BigInt | Counter | VarInt | Timestamp, Value::I32(v)) => Value::I64(v as i64),
            (BigInt | Counter | VarInt | Timestamp, value @ Value::I64(_)) => value,
            (BigInt | Counter | VarInt | Timestamp, Value::String(v)) => {
                match v.trim().parse::<i64>() {
                    Ok(v) => Value::I64(v),
                    Err(_) => {
                        return Err(Error::type_conversion(Value::String(v), ty.to_string()))
                    }
                }
            }

            (Boolean, value @ Value::Bool(_)) => value,
            (Boolean, Value::String(v)) => match v.trim() {
                "true" | "True" | "TRUE" | "1" => Value::Bool(true),
                "false" | "False" | "FALSE" | "0" => Value::Bool(false),
                _ => return Err(Error::type_conversion(Value::String(v), ty.to_string())),
            },

            (Double | Float | Decimal, value @ Value::F64(_)) => value,
            (Double | Float | Decimal, Value::I32(v)) => Value::F64(v as f64),
            (Double | Float | Decimal, Value::I64(v)) => Value::F64(v as f64),
            (Double | Float | Decimal, Value::String(v)) => match v.trim().parse::<f64>() {
                Ok(v) => Value::F64(v),
                Err(_) => return Err(Error::type_conversion(Value::String(v), ty.to_string())),
            },

            (Uuid | TimeUuid, value @ Value::Uuid(_)) => value,
            (Uuid | TimeUuid, Value::String(v)) => Value::Uuid(v.trim().parse()?),

            (Blob, value @ Value::Bytes(_)) => value,
            (Blob, Value::String(v)) => match decode_hex(&v) {
                Some(bytes) => Value::Bytes(bytes),
                None => return Err(Error::type_conversion(Value::String(v), ty.to_string())),
            },

            (List(item_ty), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item| item.cast(item_ty))
                    .collect::<Result<_>>()?,
            ),
            (Set(item_ty), Value::List(items)) => {
                let mut items = items
                    .into_iter()
                    .map(|item| item.cast(item_ty))
                    .collect::<Result<Vec<_>>>()?;
                // Sets are stored sorted and without duplicates
                items.sort_by(|a, b| a.compare(b).unwrap_or(std::cmp::Ordering::Equal));
                items.dedup();
                Value::List(items)
            }
            (Map(key_ty, value_ty), Value::Map(entries)) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key.cast(key_ty)?, value.cast(value_ty)?)))
                    .collect::<Result<_>>()?,
            ),

            (ty, value) => return Err(Error::type_conversion(value, ty.to_string())),
        };

        Ok(value)
    }
}

fn decode_hex(src: &str) -> Option<Vec<u8>> {
    let digits = src.strip_prefix("0x").unwrap_or(src);

    if digits.len() % 2 != 0 {
        return None;
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok())
        .collect()
}
