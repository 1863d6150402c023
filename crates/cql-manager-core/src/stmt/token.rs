use super::Value;
use crate::{Error, Result};

use std::fmt;

/// Position of a partition on the token ring.
///
/// Partitions are not ordered by their key values, only by this hash of the
/// serialized partition key. The hash is the Murmur3 partitioner's: the
/// first 64 bits of `murmur3_x64_128` (seed 0) over the key bytes, with
/// `i64::MIN` mapped to `i64::MAX`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub i64);

impl Token {
    /// Computes the token of a partition from its key values, in partition
    /// key order.
    pub fn from_values(values: &[Value]) -> Result<Token> {
        let key = match values {
            [value] => serialize(value)?,
            values => {
                // Composite partition keys: each component is written as a
                // 2-byte big-endian length, the bytes, and an end-of-component
                // marker.
                let mut key = vec![];
                for value in values {
                    let component = serialize(value)?;
                    let len = u16::try_from(component.len()).map_err(|_| {
                        Error::unsupported_feature(format!(
                            "partition key component of {} bytes exceeds the 65535 byte limit",
                            component.len()
                        ))
                    })?;
                    key.extend_from_slice(&len.to_be_bytes());
                    key.extend_from_slice(&component);
                    key.push(0);
                }
                key
            }
        };

        Ok(Token::from_key(&key))
    }

    /// Computes the token of an already serialized partition key.
    pub fn from_key(key: &[u8]) -> Token {
        match murmur3_x64_128_h1(key) as i64 {
            i64::MIN => Token(i64::MAX),
            token => Token(token),
        }
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Value::I64(token.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Serializes a value the way the store's native protocol encodes it.
fn serialize(value: &Value) -> Result<Vec<u8>> {
    Ok(match value {
        Value::Bool(v) => vec![*v as u8],
        Value::Bytes(v) => v.clone(),
        Value::F64(v) => v.to_bits().to_be_bytes().to_vec(),
        Value::I32(v) => v.to_be_bytes().to_vec(),
        Value::I64(v) => v.to_be_bytes().to_vec(),
        Value::String(v) => v.as_bytes().to_vec(),
        Value::Uuid(v) => v.as_bytes().to_vec(),
        Value::Null | Value::List(_) | Value::Map(_) => {
            return Err(Error::unsupported_feature(format!(
                "{} values cannot be part of a partition key",
                value.kind_name()
            )))
        }
    })
}

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// First half of `murmur3_x64_128` with seed 0.
///
/// Tail bytes are sign-extended before mixing. The Murmur3 partitioner has
/// always hashed them that way, and tokens must match the store's.
fn murmur3_x64_128_h1(data: &[u8]) -> u64 {
    let len = data.len();
    let nblocks = len / 16;

    let mut h1: u64 = 0;
    let mut h2: u64 = 0;

    for block in data.chunks_exact(16) {
        let mut k1 = le_u64(&block[..8]);
        let mut k2 = le_u64(&block[8..]);

        k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
        h1 ^= k1;
        h1 = h1
            .rotate_left(27)
            .wrapping_add(h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        h2 ^= k2;
        h2 = h2
            .rotate_left(31)
            .wrapping_add(h1)
            .wrapping_mul(5)
            .wrapping_add(0x3849_5ab5);
    }

    let tail = &data[nblocks * 16..];
    let signed = |i: usize| tail[i] as i8 as i64 as u64;

    if tail.len() > 8 {
        let mut k2 = 0u64;
        for i in 8..tail.len() {
            k2 ^= signed(i) << ((i - 8) * 8);
        }
        k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
        h2 ^= k2;
    }

    if !tail.is_empty() {
        let mut k1 = 0u64;
        for i in 0..tail.len().min(8) {
            k1 ^= signed(i) << (i * 8);
        }
        k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
        h1 ^= k1;
    }

    h1 ^= len as u64;
    h2 ^= len as u64;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix(h1);
    h2 = fmix(h2);

    h1.wrapping_add(h2)
}

fn fmix(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

fn le_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}
