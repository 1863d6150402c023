#[derive(Debug, Clone)]
pub struct Capability {
    /// Supports `INSERT ... IF NOT EXISTS`.
    pub conditional_insert: bool,

    /// Supports `token(...)` range predicates on the partition key.
    pub token_range: bool,
}

impl Capability {
    /// Cassandra (and CQL compatible stores)
    pub const CASSANDRA: Self = Self {
        conditional_insert: true,
        token_range: true,
    };

    /// In-process store used by tests
    pub const MEMORY: Self = Self::CASSANDRA;
}
