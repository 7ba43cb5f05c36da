//! Domain layer for SQL Query Bridge
//!
//! Core types shared by every other crate: the stage-typed error taxonomy,
//! the value objects that flow through the query workflow, and the port
//! traits the collaborator providers implement. This crate performs no I/O
//! and depends on no provider SDKs.

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
