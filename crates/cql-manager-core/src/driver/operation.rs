mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod update_by_key;
pub use update_by_key::UpdateByKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Query the table with a conjunction of filters
    Select(Select),

    /// Write a new row, optionally only when the key is free
    Insert(Insert),

    /// Set columns of the row with the given primary key
    Update(UpdateByKey),

    /// Delete the row with the given primary key
    Delete(DeleteByKey),
}

impl Operation {
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }
}
