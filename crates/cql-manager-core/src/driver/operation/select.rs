use super::*;
use crate::stmt::{Expr, OrderByExpr, Value};

/// Reads rows matching every expression in `filter`.
///
/// ```
/// # use cql_manager_core::driver::operation::Select;
/// # use cql_manager_core::stmt::{Expr, OrderByExpr};
/// let select = Select::new()
///     .filter_eq("sensor", "a")
///     .filter_ge("seq", 10i32)
///     .order_by(OrderByExpr::desc("seq"))
///     .limit(11);
///
/// assert_eq!(select.filter.len(), 2);
/// assert_eq!(select.limit, Some(11));
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// Conjunction of boolean expressions
    pub filter: Vec<Expr>,

    /// Clustering order override
    pub order_by: Vec<OrderByExpr>,

    /// Maximum number of rows to return
    pub limit: Option<u64>,

    /// Allow predicates the store cannot serve from the primary key
    pub allow_filtering: bool,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter.push(expr);
        self
    }

    pub fn filter_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Expr::eq(Expr::column(column), value.into()))
    }

    pub fn filter_ge(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Expr::ge(Expr::column(column), value.into()))
    }

    pub fn filter_le(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Expr::le(Expr::column(column), value.into()))
    }

    pub fn order_by(mut self, order_by: OrderByExpr) -> Self {
        self.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn allow_filtering(mut self, allow_filtering: bool) -> Self {
        self.allow_filtering = allow_filtering;
        self
    }
}

impl From<Select> for Operation {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
