//! Logging utilities.
//!
//! The crate itself only talks to the `log` facade; this module offers an
//! `env_logger` setup for binaries and tests that want to watch the command
//! stream.

mod init;

pub use init::{init_logging, LoggingConfig};
