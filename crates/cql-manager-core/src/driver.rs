mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::Model};

use std::fmt::Debug;

/// A connection to a partitioned store.
///
/// The manager builds every query as an [`Operation`] against a single
/// model's table and hands it to the driver.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes what the store supports, which informs the manager.
    fn capability(&self) -> &Capability;

    /// Execute an operation against the model's table.
    async fn exec(&self, model: &Model, op: Operation) -> crate::Result<Response>;
}
