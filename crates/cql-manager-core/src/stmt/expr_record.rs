use super::Expr;

/// A tuple of expressions, as in `("seq", "sub") >= (?, ?)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRecord {
    pub fields: Vec<Expr>,
}

impl Expr {
    pub fn record<T>(items: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Self>,
    {
        ExprRecord {
            fields: items.into_iter().map(Into::into).collect(),
        }
        .into()
    }
}

impl From<ExprRecord> for Expr {
    fn from(value: ExprRecord) -> Self {
        Self::Record(value)
    }
}
