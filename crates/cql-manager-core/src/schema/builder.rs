use super::{Auto, ClusteringColumn, Column, ColumnId, Model, PrimaryKey, Type};
use crate::{err, stmt::Direction, Error, Result};

use heck::ToSnakeCase;

/// Declares a model column by column.
///
/// Key columns are declared in key order: partition key columns first, then
/// clustering columns.
///
/// ```
/// # use cql_manager_core::{schema::Type, stmt::Direction, Model};
/// let model = Model::builder("SensorReading")
///     .partition_key("sensor", Type::Text)
///     .clustering_key("seq", Type::Int, Direction::Asc)
///     .column("value", Type::Double)
///     .build()
///     .unwrap();
///
/// assert_eq!(model.table, "sensor_reading");
/// ```
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    table: Option<String>,
    columns: Vec<Column>,
    partition: Vec<ColumnId>,
    clustering: Vec<ClusteringColumn>,
    autos: Vec<(String, Auto)>,
    err: Option<Error>,
}

impl ModelBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            columns: vec![],
            partition: vec![],
            clustering: vec![],
            autos: vec![],
            err: None,
        }
    }

    /// Overrides the table name, which defaults to the snake-cased model
    /// name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn column(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.push_column(name.into(), ty);
        self
    }

    pub fn partition_key(mut self, name: impl Into<String>, ty: Type) -> Self {
        if !self.clustering.is_empty() {
            self.fail(format!(
                "partition key column `{}` declared after a clustering column",
                name.into()
            ));
            return self;
        }

        if let Some(id) = self.push_column(name.into(), ty) {
            self.partition.push(id);
        }
        self
    }

    pub fn clustering_key(mut self, name: impl Into<String>, ty: Type, direction: Direction) -> Self {
        if let Some(column) = self.push_column(name.into(), ty) {
            self.clustering.push(ClusteringColumn { column, direction });
        }
        self
    }

    /// Marks an already declared column as generated on create.
    pub fn auto(mut self, name: impl Into<String>, auto: Auto) -> Self {
        self.autos.push((name.into(), auto));
        self
    }

    pub fn build(self) -> Result<Model> {
        let Self {
            name,
            table,
            mut columns,
            partition,
            clustering,
            autos,
            err,
        } = self;

        let context = || err!("invalid model `{name}`");

        if let Some(err) = err {
            return Err(err.context(context()));
        }

        if partition.is_empty() {
            return Err(Error::invalid_schema("a model needs at least one partition key column")
                .context(context()));
        }

        for (column_name, auto) in autos {
            let Some(column) = columns.iter_mut().find(|c| c.name == column_name) else {
                return Err(Error::invalid_schema(format!(
                    "auto strategy set on unknown column `{column_name}`"
                ))
                .context(context()));
            };
            column.auto = Some(auto);
        }

        for (id, column) in columns.iter().enumerate() {
            let is_key = partition.contains(&ColumnId(id))
                || clustering.iter().any(|c| c.column == ColumnId(id));

            if is_key && (matches!(column.ty, Type::Counter) || column.ty.is_collection()) {
                return Err(Error::invalid_schema(format!(
                    "column `{}` of type {} cannot be part of the primary key",
                    column.name, column.ty
                ))
                .context(context()));
            }
        }

        Ok(Model {
            table: table.unwrap_or_else(|| name.to_snake_case()),
            name,
            columns,
            primary_key: PrimaryKey {
                partition,
                clustering,
            },
        })
    }

    fn push_column(&mut self, name: String, ty: Type) -> Option<ColumnId> {
        if self.columns.iter().any(|column| column.name == name) {
            self.fail(format!("duplicate column `{name}`"));
            return None;
        }

        let id = ColumnId(self.columns.len());
        self.columns.push(Column {
            id,
            name,
            ty,
            auto: None,
        });
        Some(id)
    }

    fn fail(&mut self, message: String) {
        if self.err.is_none() {
            self.err = Some(Error::invalid_schema(message));
        }
    }
}
