use super::{Auto, Type};

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column within its model.
    pub id: ColumnId,

    /// The name of the column in the table.
    pub name: String,

    /// The store type of the column.
    pub ty: Type,

    /// Set when the manager populates the column on create.
    pub auto: Option<Auto>,
}

/// Index of a column in its model's column list.
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub usize);

impl From<&Column> for ColumnId {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({})", self.0)
    }
}
