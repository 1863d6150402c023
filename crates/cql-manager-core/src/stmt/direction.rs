use std::fmt;

/// Sort direction of a clustering column or an `ORDER BY` clause.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn is_asc(self) -> bool {
        matches!(self, Self::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => "ASC".fmt(f),
            Self::Desc => "DESC".fmt(f),
        }
    }
}
