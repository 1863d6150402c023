use super::Expr;

/// References a column by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprColumn {
    pub name: String,
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        ExprColumn { name: name.into() }.into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
