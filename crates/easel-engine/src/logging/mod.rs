//! Logger initialization.
//!
//! The crate logs through the `log` facade; binaries call [`init_logging`]
//! early in `main` to route it to `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
