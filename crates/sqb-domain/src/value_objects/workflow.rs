//! Workflow result value objects

use crate::value_objects::SchemaMatch;
use serde::{Deserialize, Serialize};

/// Column names and row data returned by SQL execution.
///
/// Cells are JSON values so the result can cross the HTTP boundary without
/// caring about the engine's native types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRows {
    /// Column names, in select-list order
    pub columns: Vec<String>,
    /// Row data; each row has one value per column
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// The outcome of one workflow invocation.
///
/// Created once per run, immutable after construction, never persisted.
/// `query_result` is `None` for dry runs (`execute = false`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowResult {
    /// The generated SQL statement, bare (no code fences)
    pub sql_query: String,
    /// Execution output, present only when execution was requested
    pub query_result: Option<QueryRows>,
    /// The similarity matches consulted for prompt context
    pub similar_schemas: Vec<SchemaMatch>,
}
