//! Logging utilities.
//!
//! The effect only talks to the `log` facade. Hosts without their own logger
//! install `env_logger` through [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
