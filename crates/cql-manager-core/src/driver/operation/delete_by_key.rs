use super::*;
use crate::stmt::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteByKey {
    /// Full primary key of the row to delete
    pub key: Record,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::Delete(value)
    }
}
