//! Provider implementations for SQL Query Bridge
//!
//! Concrete collaborators behind the domain ports: embedding providers
//! (local fastembed, Gemini API, deterministic null), similarity indexes
//! (in-memory, Chroma over HTTP), SQL generators (Gemini API, canned static),
//! and a PostgreSQL component serving both schema introspection and SQL
//! execution.
//!
//! Each pluggable provider registers itself into the linkme registries
//! declared in `sqb-application`; linking this crate is what populates them.

pub mod constants;
pub mod database;
pub mod embedding;
pub mod generator;
pub mod similarity;
pub mod utils;
