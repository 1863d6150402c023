use super::*;
use crate::stmt::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateByKey {
    /// Full primary key of the row to update
    pub key: Record,

    /// Non-key columns to set
    pub assignments: Record,
}

impl From<UpdateByKey> for Operation {
    fn from(value: UpdateByKey) -> Self {
        Self::Update(value)
    }
}
