//! Core shared library for the Amity user service.
//!
//! Exposes the primitives every Amity binary depends on: the canonical
//! error type, configuration loading and logging setup.

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{CoreConfig, Environment, DEFAULT_HTTP_BIND};
pub use errors::{AmityError, ConfigError, Result as CoreResult};
