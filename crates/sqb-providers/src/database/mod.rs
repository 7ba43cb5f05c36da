//! Relational database providers

mod postgres;

pub use postgres::{PostgresConfig, PostgresDatabase};
