//! Infrastructure layer for SQL Query Bridge
//!
//! Configuration loading (defaults, TOML file, environment), structured
//! logging setup, error-context helpers, and the bootstrap wiring that turns
//! an [`config::AppConfig`] into a ready [`sqb_application::use_cases::QueryWorkflow`].

pub mod bootstrap;
pub mod config;
pub mod error_ext;
pub mod logging;
