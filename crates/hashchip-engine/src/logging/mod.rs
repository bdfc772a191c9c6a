//! Logging utilities.
//!
//! The library crates only use the `log` facade; this module is where front
//! ends pick `env_logger` as the backend.

mod init;

pub use init::{init_logging, LoggingConfig};
