mod auto;
pub use auto::Auto;

mod builder;
pub use builder::ModelBuilder;

mod column;
pub use column::{Column, ColumnId};

mod model;
pub use model::Model;

mod pk;
pub use pk::{ClusteringColumn, PrimaryKey};

mod ty;
pub use ty::Type;
