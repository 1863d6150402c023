use super::Expr;

/// The position of a partition on the token ring, `token(a, b, ...)`.
///
/// The arguments are either the partition key columns or the partition key
/// values of a cursor, in partition key order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprToken {
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn token<T>(args: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Self>,
    {
        ExprToken {
            args: args.into_iter().map(Into::into).collect(),
        }
        .into()
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

impl From<ExprToken> for Expr {
    fn from(value: ExprToken) -> Self {
        Self::Token(value)
    }
}
