//! Value objects shared across the workflow

mod embedding;
mod schema;
mod search;
mod workflow;

pub use embedding::Embedding;
pub use schema::{TableSchema, schema_text};
pub use search::SchemaMatch;
pub use workflow::{QueryRows, WorkflowResult};
