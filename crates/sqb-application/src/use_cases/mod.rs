//! Application use cases

mod query_workflow;

pub use query_workflow::{QueryWorkflow, UpsertPolicy};
