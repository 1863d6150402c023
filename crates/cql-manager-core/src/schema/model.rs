use super::{Column, ColumnId, ModelBuilder, PrimaryKey};
use crate::{
    stmt::{Direction, Value},
    Error, Result,
};

/// A resource type stored in one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Name of the resource, used in log lines and error context.
    pub name: String,

    /// Name of the table holding the records.
    pub table: String,

    /// Columns in declaration order. A column's `id` is its index here.
    pub columns: Vec<Column>,

    pub primary_key: PrimaryKey,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name)
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().0]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Like [`Model::column_by_name`], failing for unknown names.
    pub fn expect_column(&self, name: &str) -> Result<&Column> {
        self.column_by_name(name).ok_or_else(|| {
            Error::invalid_statement(format!(
                "unknown column `{name}` for model `{}`",
                self.name
            ))
        })
    }

    pub fn partition_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .partition
            .iter()
            .map(move |id| self.column(*id))
    }

    /// Clustering columns with their declared direction.
    pub fn clustering_key_columns(
        &self,
    ) -> impl ExactSizeIterator<Item = (&Column, Direction)> + '_ {
        self.primary_key
            .clustering
            .iter()
            .map(move |c| (self.column(c.column), c.direction))
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.primary_key.columns().map(move |id| self.column(id))
    }

    pub fn is_partition_key(&self, name: &str) -> bool {
        self.partition_key_columns().any(|column| column.name == name)
    }

    pub fn is_clustering_key(&self, name: &str) -> bool {
        self.clustering_key_columns()
            .any(|(column, _)| column.name == name)
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key_columns().any(|column| column.name == name)
    }

    /// Returns the declared direction of a clustering column.
    pub fn clustering_direction(&self, name: &str) -> Option<Direction> {
        self.clustering_key_columns()
            .find(|(column, _)| column.name == name)
            .map(|(_, direction)| direction)
    }

    /// Extracts the primary key values of a record, in primary key order.
    pub fn key_of(&self, record: &impl crate::stmt::Attributes) -> Result<Vec<Value>> {
        self.primary_key_columns()
            .map(|column| match record.get(&column.name) {
                Some(value) if !value.is_null() => Ok(value.clone()),
                _ => Err(Error::invalid_statement(format!(
                    "missing primary key column `{}` for model `{}`",
                    column.name, self.name
                ))),
            })
            .collect()
    }
}
