//! An in-process partitioned store.
//!
//! Rows are grouped into partitions placed on the token ring by the
//! Murmur3 token of their partition key, and ordered within a partition by
//! their clustering columns. Selects return rows in that order, which is the
//! order a Cassandra cluster scans a table in.

mod table;
use table::Table;

use cql_manager_core::{
    async_trait,
    driver::{
        operation::{DeleteByKey, Insert, Operation, Select, UpdateByKey},
        Capability, Driver, Response,
    },
    err,
    schema::Model,
    Error, Result,
};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<HashMap<String, Table>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows stored for the model.
    pub fn len(&self, model: &Model) -> Result<usize> {
        Ok(self
            .lock()?
            .get(&model.table)
            .map(Table::len)
            .unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Table>>> {
        self.tables
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))
    }

    fn exec_select(&self, model: &Model, select: Select) -> Result<Response> {
        verify_select(model, &select)?;

        let tables = self.lock()?;
        let rows = match tables.get(&model.table) {
            Some(table) => table.select(model, &select)?,
            None => vec![],
        };

        log::trace!("select; table={}; rows={}", model.table, rows.len());
        Ok(Response::values(rows))
    }

    fn exec_insert(&self, model: &Model, insert: Insert) -> Result<Response> {
        verify_columns(model, insert.values.names())?;

        let mut tables = self.lock()?;
        let table = tables.entry(model.table.clone()).or_default();

        if insert.if_not_exists && table.contains_key(model, &insert.values)? {
            return Err(Error::condition_failed(format!(
                "row already exists; table={}",
                model.table
            )));
        }

        table.upsert(model, insert.values)?;
        Ok(Response::count(1))
    }

    fn exec_update(&self, model: &Model, update: UpdateByKey) -> Result<Response> {
        verify_key(model, &update.key)?;
        verify_columns(model, update.assignments.names())?;

        if let Some(name) = update
            .assignments
            .names()
            .find(|name| model.is_primary_key(name))
        {
            return Err(Error::invalid_statement(format!(
                "primary key column `{name}` cannot be updated"
            )));
        }

        let mut values = update.key;
        for (name, value) in update.assignments {
            values.insert(name, value);
        }

        let mut tables = self.lock()?;
        tables
            .entry(model.table.clone())
            .or_default()
            .upsert(model, values)?;

        Ok(Response::count(1))
    }

    fn exec_delete(&self, model: &Model, delete: DeleteByKey) -> Result<Response> {
        verify_key(model, &delete.key)?;

        let mut tables = self.lock()?;
        let removed = match tables.get_mut(&model.table) {
            Some(table) => table.remove(model, &delete.key)?,
            None => false,
        };

        Ok(Response::count(removed as u64))
    }
}

#[async_trait]
impl Driver for Memory {
    fn capability(&self) -> &Capability {
        &Capability::MEMORY
    }

    async fn exec(&self, model: &Model, op: Operation) -> Result<Response> {
        match op {
            Operation::Select(select) => self.exec_select(model, select),
            Operation::Insert(insert) => self.exec_insert(model, insert),
            Operation::Update(update) => self.exec_update(model, update),
            Operation::Delete(delete) => self.exec_delete(model, delete),
        }
    }
}

fn verify_columns<'a>(model: &Model, mut names: impl Iterator<Item = &'a str>) -> Result<()> {
    match names.find(|name| model.column_by_name(name).is_none()) {
        Some(name) => Err(Error::invalid_statement(format!(
            "unknown column `{name}` in table `{}`",
            model.table
        ))),
        None => Ok(()),
    }
}

/// The key of a write must name every primary key column and nothing else.
fn verify_key(model: &Model, key: &cql_manager_core::stmt::Record) -> Result<()> {
    model.key_of(key)?;

    if key.len() != model.primary_key.len() {
        return Err(Error::invalid_statement(format!(
            "key for table `{}` must contain exactly the primary key columns",
            model.table
        )));
    }

    Ok(())
}

fn verify_select(model: &Model, select: &Select) -> Result<()> {
    for expr in &select.filter {
        for name in expr.columns() {
            model.expect_column(name)?;

            if !model.is_primary_key(name) && !select.allow_filtering {
                return Err(Error::invalid_statement(format!(
                    "filtering on non-key column `{name}` requires ALLOW FILTERING"
                )));
            }
        }
    }

    for order_by in &select.order_by {
        if !model.is_clustering_key(&order_by.column) {
            return Err(Error::invalid_statement(format!(
                "ORDER BY is only supported on clustering columns; got `{}`",
                order_by.column
            )));
        }
    }

    Ok(())
}
