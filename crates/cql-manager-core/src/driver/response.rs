use crate::{stmt::Record, Error, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a select, in store order
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self.rows {
            Rows::Values(values) => Ok(values),
            Rows::Count(_) => Err(Error::invalid_result("expected rows, got a count")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self.rows {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => Err(Error::invalid_result("expected a count, got rows")),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
