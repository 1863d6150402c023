use super::*;

use std::fmt;

/// A filter expression over the columns of a single table.
///
/// Select filters are a list of expressions that must all evaluate to
/// `true`; there is no disjunction, matching what the store accepts in a
/// `WHERE` clause.
#[derive(Clone, PartialEq)]
pub enum Expr {
    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// References a column of the row being filtered
    Column(ExprColumn),

    /// A tuple of expressions, compared lexicographically
    Record(ExprRecord),

    /// The partition token of the wrapped expressions
    Token(ExprToken),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Returns the constant value if this is a value expression.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the names of every column referenced by this expression, in
    /// order of appearance.
    pub fn columns(&self) -> Vec<&str> {
        let mut ret = vec![];
        self.collect_columns(&mut ret);
        ret
    }

    fn collect_columns<'a>(&'a self, dst: &mut Vec<&'a str>) {
        match self {
            Self::BinaryOp(expr) => {
                expr.lhs.collect_columns(dst);
                expr.rhs.collect_columns(dst);
            }
            Self::Column(expr) => dst.push(&expr.name),
            Self::Record(expr) => {
                for field in &expr.fields {
                    field.collect_columns(dst);
                }
            }
            Self::Token(expr) => {
                for arg in &expr.args {
                    arg.collect_columns(dst);
                }
            }
            Self::Value(_) => {}
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&Value> for Expr {
    fn from(value: &Value) -> Self {
        Self::Value(value.clone())
    }
}

macro_rules! impl_expr_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_expr_from_value!(bool, i32, i64, f64, String, &str, uuid::Uuid);

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryOp(e) => e.fmt(f),
            Self::Column(e) => e.fmt(f),
            Self::Record(e) => e.fmt(f),
            Self::Token(e) => e.fmt(f),
            Self::Value(e) => e.fmt(f),
        }
    }
}
