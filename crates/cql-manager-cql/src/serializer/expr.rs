use super::{Comma, Ident, Params, ToCql};

use cql_manager_core::stmt::{self, Direction};

impl ToCql for &stmt::Expr {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            BinaryOp(expr) => {
                fmt!(f, expr.lhs " " expr.op " " expr.rhs);
            }
            Column(expr) => {
                fmt!(f, Ident(&expr.name));
            }
            Record(expr) => {
                fmt!(f, "(" Comma(&expr.fields) ")");
            }
            Token(expr) => {
                fmt!(f, "token(" Comma(&expr.args) ")");
            }
            Value(value) => {
                let placeholder = f.params.push(value);
                fmt!(f, placeholder);
            }
        }
    }
}

impl ToCql for stmt::BinaryOp {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Ne => "!=",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Le => "<=",
            stmt::BinaryOp::Lt => "<",
        });
    }
}

impl ToCql for &stmt::OrderByExpr {
    fn to_cql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };

        fmt!(f, Ident(&self.column) direction);
    }
}
