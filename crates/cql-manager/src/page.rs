use crate::ManagerConfig;

use cql_manager_core::stmt::Value;

use serde_json::{Map, Value as Json};

/// Pagination metadata returned with each list page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// Requested or default page size
    pub count: u64,

    /// Primary key values of the first record of the next page. Empty when
    /// this is the last page.
    pub next_cursor: Vec<Value>,

    /// Continuation token for the next page; `None` on the last page.
    pub next: Option<String>,
}

impl PageDescriptor {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_empty()
    }

    /// Renders the metadata under the configured query argument names.
    pub fn to_meta(&self, config: &ManagerConfig) -> Map<String, Json> {
        let page = if self.is_last() {
            Json::Null
        } else {
            Json::Array(self.next_cursor.iter().map(Value::to_json).collect())
        };

        let next = match &self.next {
            Some(next) => Json::String(next.clone()),
            None => Json::Null,
        };

        let mut meta = Map::new();
        meta.insert(config.pagination_pk_query_arg.clone(), page);
        meta.insert(config.pagination_count_query_arg.clone(), self.count.into());
        meta.insert(config.pagination_next.clone(), next);
        meta
    }
}
