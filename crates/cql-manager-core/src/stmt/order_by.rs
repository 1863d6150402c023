use super::Direction;

/// One term of an `ORDER BY` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByExpr {
    /// Name of the column being ordered on
    pub column: String,

    /// Sort direction
    pub direction: Direction,
}

impl OrderByExpr {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses the `"column"` / `"-column"` shorthand, where a leading `-`
    /// selects descending order.
    pub fn parse(src: &str) -> Self {
        match src.strip_prefix('-') {
            Some(column) => Self::desc(column),
            None => Self::asc(src.strip_prefix('+').unwrap_or(src)),
        }
    }
}
