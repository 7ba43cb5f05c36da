//! Application layer for SQL Query Bridge
//!
//! Hosts the [`use_cases::QueryWorkflow`] orchestrator - the end-to-end
//! natural-language-to-SQL pipeline - and the linkme provider registries
//! through which the pluggable collaborators (embedding, similarity index,
//! SQL generator) are resolved by name at startup.

pub mod ports;
pub mod use_cases;
