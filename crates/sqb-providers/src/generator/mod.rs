//! SQL generator implementations

mod gemini;
mod static_sql;

pub use gemini::GeminiSqlGenerator;
pub use static_sql::StaticSqlGenerator;

/// Compose the generation prompt from schema context and the user question.
///
/// Shared by every generator so the prompt the model sees does not depend on
/// which backend is configured.
pub fn compose_prompt(schema_context: &str, user_query: &str, dialect: &str) -> String {
    format!(
        "Database Schema:\n{schema_context}\n\n\
         User Request:\n{user_query}\n\n\
         You are a SQL expert. Write a valid {dialect} query using the above schema.\n\
         Return only the SQL query itself - no explanations, titles, or code fences."
    )
}

/// Strip surrounding code-fence markers from raw model output.
///
/// Models routinely wrap statements in ```` ```sql ... ``` ```` fences even
/// when told not to; the workflow needs a bare executable statement. Leading
/// and trailing whitespace is removed as well.
pub fn strip_sql_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (e.g. "sql") up to the end of the fence line
        text = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest,
        };
        if let Some(stripped) = text.trim_end().strip_suffix("```") {
            text = stripped;
        }
    }

    text.trim().to_string()
}
