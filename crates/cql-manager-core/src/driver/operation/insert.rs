use super::*;
use crate::stmt::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Column values of the new row, primary key included
    pub values: Record,

    /// Fail with a condition-failed error instead of overwriting an
    /// existing row with the same key.
    pub if_not_exists: bool,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
