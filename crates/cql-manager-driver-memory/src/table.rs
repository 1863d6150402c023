use cql_manager_core::{
    driver::operation::Select,
    schema::Model,
    stmt::{Attributes, Direction, Record, Token, Value},
    Result,
};

use std::cmp::Ordering;

#[derive(Debug, Default)]
pub(crate) struct Table {
    rows: Vec<Row>,
}

#[derive(Debug)]
struct Row {
    token: Token,
    key: Vec<Value>,
    record: Record,
}

impl Table {
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn contains_key(&self, model: &Model, values: &Record) -> Result<bool> {
        let key = model.key_of(values)?;
        Ok(self.position(&key).is_some())
    }

    /// Writes the given columns, creating the row if needed. Columns not
    /// present in `values` keep their stored value.
    pub(crate) fn upsert(&mut self, model: &Model, values: Record) -> Result<()> {
        let key = model.key_of(&values)?;

        match self.position(&key) {
            Some(index) => {
                let record = &mut self.rows[index].record;
                for (name, value) in values {
                    record.set(&name, value);
                }
            }
            None => {
                let token = Token::from_values(&key[..model.primary_key.partition.len()])?;

                // Unset columns read back as null
                let mut record = Record::new();
                for column in &model.columns {
                    record.insert(&column.name, Value::Null);
                }
                for (name, value) in values {
                    record.set(&name, value);
                }

                self.rows.push(Row { token, key, record });
            }
        }

        Ok(())
    }

    pub(crate) fn remove(&mut self, model: &Model, key: &Record) -> Result<bool> {
        let key = model.key_of(key)?;

        Ok(match self.position(&key) {
            Some(index) => {
                self.rows.swap_remove(index);
                true
            }
            None => false,
        })
    }

    pub(crate) fn select(&self, model: &Model, select: &Select) -> Result<Vec<Record>> {
        let mut matches = vec![];

        'rows: for row in &self.rows {
            for expr in &select.filter {
                if !expr.eval_bool(&row.record)? {
                    continue 'rows;
                }
            }
            matches.push(row);
        }

        let directions = clustering_directions(model, select);
        let partition_len = model.primary_key.partition.len();

        matches.sort_by(|a, b| {
            a.token
                .cmp(&b.token)
                .then_with(|| cmp_values(&a.key[..partition_len], &b.key[..partition_len]))
                .then_with(|| {
                    let a = &a.key[partition_len..];
                    let b = &b.key[partition_len..];

                    a.iter()
                        .zip(b)
                        .zip(&directions)
                        .map(|((a, b), direction)| {
                            direction.apply(a.compare(b).unwrap_or(Ordering::Equal))
                        })
                        .find(|ordering| ordering.is_ne())
                        .unwrap_or(Ordering::Equal)
                })
        });

        let limit = select
            .limit
            .map(|limit| limit as usize)
            .unwrap_or(usize::MAX);

        Ok(matches
            .into_iter()
            .take(limit)
            .map(|row| row.record.clone())
            .collect())
    }

    fn position(&self, key: &[Value]) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }
}

/// Clustering order of a select. An `ORDER BY` on the first clustering
/// column against its declared direction reverses the whole clustering
/// order.
fn clustering_directions(model: &Model, select: &Select) -> Vec<Direction> {
    let declared: Vec<Direction> = model
        .clustering_key_columns()
        .map(|(_, direction)| direction)
        .collect();

    let reversed = select.order_by.first().is_some_and(|order_by| {
        model
            .clustering_direction(&order_by.column)
            .is_some_and(|direction| direction != order_by.direction)
    });

    if reversed {
        declared.into_iter().map(Direction::reverse).collect()
    } else {
        declared
    }
}

fn cmp_values(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| a.compare(b).unwrap_or(Ordering::Equal))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
