pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};


use cql_manager::{Manager, ManagerConfig, Model};
use cql_manager_driver_memory::Memory;
use std::sync::Arc;

/// A manager over a fresh in-memory store, with every driver operation
/// recorded in the returned log.
pub fn setup(model: Model, config: ManagerConfig) -> (Manager, ExecLog) {
    let _ = env_logger::builder().is_test(true).try_init();

    let driver = LoggingDriver::new(Arc::new(Memory::new()));
    let log = driver.exec_log();

    (Manager::new(model, Arc::new(driver), config), log)
}
