mod direction;
pub use direction::Direction;

mod eval;

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_record;
pub use expr_record::ExprRecord;

mod expr_token;
pub use expr_token::ExprToken;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::OrderByExpr;

mod record;
pub use record::{Attributes, Record};

mod token;
pub use token::Token;

mod value;
pub use value::Value;

mod value_cast;

mod value_cmp;

mod value_json;
