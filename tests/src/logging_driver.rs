use crate::ExecLog;

use async_trait::async_trait;
use cql_manager_core::{
    driver::{Capability, Driver, Operation, Response, Rows},
    schema::Model,
    Result,
};
use std::sync::{Arc, Mutex};

/// A driver wrapper that logs all operations for testing purposes
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Arc<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Response,
}

impl LoggingDriver {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to the operations log
    pub fn exec_log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn capability(&self) -> &Capability {
        self.inner.capability()
    }

    async fn exec(&self, model: &Model, operation: Operation) -> Result<Response> {
        let operation_clone = operation.clone();
        let response = self.inner.exec(model, operation).await?;

        let driver_op = DriverOp {
            operation: operation_clone,
            response: duplicate_response(&response),
        };
        self.ops_log.lock().unwrap().push(driver_op);

        Ok(response)
    }
}

fn duplicate_response(response: &Response) -> Response {
    match &response.rows {
        Rows::Count(count) => Response::count(*count),
        Rows::Values(values) => Response::values(values.clone()),
    }
}
