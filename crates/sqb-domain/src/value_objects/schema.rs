//! Schema text formatting
//!
//! The flattened one-line-per-table representation of a relational schema
//! that gets embedded, indexed, and pasted into prompts. The format is part
//! of the workflow contract, so it lives here rather than in the provider
//! that happens to produce it.

use serde::{Deserialize, Serialize};

/// A single table and its column names, in ordinal order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Column names in ordinal order
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Render the table as one schema-text line (without trailing newline).
    pub fn to_line(&self) -> String {
        format!("Table: {} | Columns: {}", self.name, self.columns.join(", "))
    }
}

/// Render a full schema as text, one line per table, each newline-terminated.
///
/// A database with zero tables renders as the empty string, which is a valid
/// schema text.
pub fn schema_text(tables: &[TableSchema]) -> String {
    let mut out = String::new();
    for table in tables {
        out.push_str(&table.to_line());
        out.push('\n');
    }
    out
}
