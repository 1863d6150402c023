use super::ColumnId;
use crate::stmt::Direction;

/// The primary key of a model: the partition key followed by the clustering
/// key.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    /// Columns hashed to place a row on the token ring. Never empty.
    pub partition: Vec<ColumnId>,

    /// Columns ordering rows within a partition.
    pub clustering: Vec<ClusteringColumn>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringColumn {
    pub column: ColumnId,

    /// Declared clustering order
    pub direction: Direction,
}

impl PrimaryKey {
    /// Returns every primary key column, partition columns first.
    pub fn columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.partition
            .iter()
            .copied()
            .chain(self.clustering.iter().map(|c| c.column))
    }

    pub fn len(&self) -> usize {
        self.partition.len() + self.clustering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
