//! A paged CRUD manager over a partitioned, clustered store.
//!
//! [`Manager`] exposes one model's records through create / retrieve /
//! update / delete / list operations. Listing is cursor-paginated by
//! [`PagedQueryTranslator`], which turns "the next N records after cursor C
//! matching filters F" into range queries the store can serve: token range
//! predicates across partitions and clustering range predicates within one.

mod config;
pub use config::ManagerConfig;

mod field;
pub use field::{Field, FieldKind};

mod manager;
pub use manager::Manager;

mod page;
pub use page::PageDescriptor;

pub mod paginate;
pub use paginate::{PagedQueryTranslator, QueryPlan};

mod query_args;
pub use query_args::QueryArgs;

mod serialize;
pub use serialize::{sanitize, to_safe_representation};

pub use cql_manager_core::{
    driver::Driver,
    schema::Model,
    stmt::{Record, Value},
    Error, Result,
};
