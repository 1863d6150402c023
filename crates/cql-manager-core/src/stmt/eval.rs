use super::{Attributes, Expr, Token, Value};
use crate::{Error, Result};

impl Expr {
    /// Evaluates the expression against a row.
    ///
    /// Columns missing from the row evaluate to null. A comparison with a
    /// null operand is `false`, as in the store's `WHERE` clauses.
    pub fn eval(&self, row: &impl Attributes) -> Result<Value> {
        Ok(match self {
            Expr::BinaryOp(expr) => {
                let lhs = expr.lhs.eval(row)?;
                let rhs = expr.rhs.eval(row)?;

                if lhs.is_null() || rhs.is_null() {
                    return Ok(Value::Bool(false));
                }

                let Some(ordering) = lhs.compare(&rhs) else {
                    return Err(Error::invalid_statement(format!(
                        "cannot compare {} with {}",
                        lhs.kind_name(),
                        rhs.kind_name()
                    )));
                };

                Value::Bool(expr.op.apply(ordering))
            }
            Expr::Column(expr) => row.get(&expr.name).cloned().unwrap_or_default(),
            Expr::Record(expr) => Value::List(
                expr.fields
                    .iter()
                    .map(|field| field.eval(row))
                    .collect::<Result<_>>()?,
            ),
            Expr::Token(expr) => {
                let args = expr
                    .args
                    .iter()
                    .map(|arg| arg.eval(row))
                    .collect::<Result<Vec<_>>>()?;
                Token::from_values(&args)?.into()
            }
            Expr::Value(value) => value.clone(),
        })
    }

    /// Evaluates the expression and requires a boolean result.
    pub fn eval_bool(&self, row: &impl Attributes) -> Result<bool> {
        match self.eval(row)? {
            Value::Bool(ret) => Ok(ret),
            value => Err(Error::type_conversion(value, "boolean")),
        }
    }
}
