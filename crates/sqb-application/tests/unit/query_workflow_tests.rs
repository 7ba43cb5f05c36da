//! Workflow behavior tests
//!
//! Exercises the end-to-end pipeline against hand-rolled collaborators plus
//! the real in-memory index / null embedding / static generator providers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sqb_application::use_cases::{QueryWorkflow, UpsertPolicy};
use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::{
    EmbeddingProvider, SchemaProvider, SimilarityIndex, SqlExecutor, SqlGenerator,
};
use sqb_domain::value_objects::{Embedding, QueryRows, SchemaMatch};
use sqb_providers::embedding::NullEmbeddingProvider;
use sqb_providers::generator::StaticSqlGenerator;
use sqb_providers::similarity::InMemorySimilarityIndex;

const SALES_SCHEMA: &str = "Table: Orders | Columns: id, amount\n";

// ---------------------------------------------------------------------------
// Test collaborators
// ---------------------------------------------------------------------------

/// Schema provider returning a settable fixed text
struct FixedSchemaProvider {
    text: Mutex<String>,
}

impl FixedSchemaProvider {
    fn new(text: &str) -> Self {
        Self {
            text: Mutex::new(text.to_string()),
        }
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }
}

#[async_trait]
impl SchemaProvider for FixedSchemaProvider {
    async fn fetch_schema_text(&self, _database: &str) -> Result<String> {
        Ok(self.text.lock().unwrap().clone())
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

/// Executor recording every statement it is asked to run
struct RecordingExecutor {
    calls: Mutex<Vec<String>>,
    result: QueryRows,
}

impl RecordingExecutor {
    fn new(result: QueryRows) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> Result<QueryRows> {
        self.calls.lock().unwrap().push(sql.to_string());
        Ok(self.result.clone())
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

/// Executor that always fails with an engine-style message
struct FailingExecutor;

#[async_trait]
impl SqlExecutor for FailingExecutor {
    async fn execute(&self, _sql: &str) -> Result<QueryRows> {
        Err(Error::sql_execution("relation \"orders\" does not exist"))
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Generator that records the schema context passed to build_prompt
struct CapturingGenerator {
    context: Mutex<Option<String>>,
    sql: String,
}

impl CapturingGenerator {
    fn returning(sql: &str) -> Self {
        Self {
            context: Mutex::new(None),
            sql: sql.to_string(),
        }
    }

    fn captured_context(&self) -> Option<String> {
        self.context.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlGenerator for CapturingGenerator {
    fn build_prompt(&self, schema_context: &str, user_query: &str) -> String {
        *self.context.lock().unwrap() = Some(schema_context.to_string());
        format!("{schema_context}\n{user_query}")
    }

    async fn generate_sql(&self, _prompt: &str) -> Result<String> {
        Ok(self.sql.clone())
    }

    fn provider_name(&self) -> &str {
        "capturing"
    }
}

/// Index whose search always comes back empty (upserts accepted and counted)
struct EmptySearchIndex {
    upserts: Mutex<usize>,
}

impl EmptySearchIndex {
    fn new() -> Self {
        Self {
            upserts: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SimilarityIndex for EmptySearchIndex {
    async fn upsert(&self, _id: &str, _document: &str, _embedding: &Embedding) -> Result<()> {
        *self.upserts.lock().unwrap() += 1;
        Ok(())
    }

    async fn search(&self, _query_vector: &[f32], _top_k: usize) -> Result<Vec<SchemaMatch>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "empty"
    }
}

/// Index returning fixed matches from search
struct FixedMatchIndex {
    matches: Vec<SchemaMatch>,
}

#[async_trait]
impl SimilarityIndex for FixedMatchIndex {
    async fn upsert(&self, _id: &str, _document: &str, _embedding: &Embedding) -> Result<()> {
        Ok(())
    }

    async fn search(&self, _query_vector: &[f32], _top_k: usize) -> Result<Vec<SchemaMatch>> {
        Ok(self.matches.clone())
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

/// Delegating index that counts upserts
struct CountingIndex {
    inner: InMemorySimilarityIndex,
    upserts: Mutex<usize>,
}

impl CountingIndex {
    fn new() -> Self {
        Self {
            inner: InMemorySimilarityIndex::new(),
            upserts: Mutex::new(0),
        }
    }

    fn upsert_count(&self) -> usize {
        *self.upserts.lock().unwrap()
    }
}

#[async_trait]
impl SimilarityIndex for CountingIndex {
    async fn upsert(&self, id: &str, document: &str, embedding: &Embedding) -> Result<()> {
        *self.upserts.lock().unwrap() += 1;
        self.inner.upsert(id, document, embedding).await
    }

    async fn search(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<SchemaMatch>> {
        self.inner.search(query_vector, top_k).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id).await
    }

    fn provider_name(&self) -> &str {
        "counting"
    }
}

fn sales_rows() -> QueryRows {
    QueryRows {
        columns: vec!["id".to_string(), "amount".to_string()],
        rows: vec![vec![serde_json::json!(1), serde_json::json!(10.5)]],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dry_run_never_invokes_executor() {
    let executor = Arc::new(RecordingExecutor::new(sales_rows()));
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(InMemorySimilarityIndex::new()),
        Arc::new(StaticSqlGenerator::returning("SELECT id FROM Orders")),
        executor.clone(),
    );

    let result = workflow
        .run("list order ids", "Sales", false)
        .await
        .unwrap();

    assert_eq!(result.sql_query, "SELECT id FROM Orders");
    assert!(result.query_result.is_none());
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn empty_search_falls_back_to_fresh_schema_text() {
    let generator = Arc::new(CapturingGenerator::returning("SELECT 1"));
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(EmptySearchIndex::new()),
        generator.clone(),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    let result = workflow.run("anything", "Sales", false).await.unwrap();

    // Byte-for-byte the text from step 1
    assert_eq!(generator.captured_context().as_deref(), Some(SALES_SCHEMA));
    assert!(result.similar_schemas.is_empty());
}

#[tokio::test]
async fn top_match_document_wins_over_fresh_schema() {
    let stored = "Table: Invoices | Columns: id, total\n";
    let generator = Arc::new(CapturingGenerator::returning("SELECT 1"));
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(FixedMatchIndex {
            matches: vec![SchemaMatch::new("Billing", stored, 0.2)],
        }),
        generator.clone(),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    let result = workflow.run("sum totals", "Sales", false).await.unwrap();

    assert_eq!(generator.captured_context().as_deref(), Some(stored));
    assert_eq!(result.similar_schemas.len(), 1);
    assert_eq!(result.similar_schemas[0].id, "Billing");
}

#[tokio::test]
async fn top_match_with_empty_document_falls_back_to_fresh_schema() {
    let generator = Arc::new(CapturingGenerator::returning("SELECT 1"));
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(FixedMatchIndex {
            matches: vec![SchemaMatch::new("Sales", "", 0.0)],
        }),
        generator.clone(),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    workflow.run("anything", "Sales", false).await.unwrap();

    assert_eq!(generator.captured_context().as_deref(), Some(SALES_SCHEMA));
}

#[tokio::test]
async fn repeated_runs_overwrite_the_index_entry() {
    let index = Arc::new(InMemorySimilarityIndex::new());
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        index.clone(),
        Arc::new(StaticSqlGenerator::returning("SELECT 1")),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    workflow.run("first", "Sales", false).await.unwrap();
    workflow.run("second", "Sales", false).await.unwrap();

    // Second call overwrote, not duplicated: one entry under "Sales"
    let all = index.search(&vec![0.5; 384], 10).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "Sales");
    assert_eq!(all[0].document, SALES_SCHEMA);
}

#[tokio::test]
async fn executor_failure_aborts_run_and_leaves_prior_dry_run_intact() {
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        Arc::new(InMemorySimilarityIndex::new()),
        Arc::new(StaticSqlGenerator::returning("SELECT * FROM orders")),
        Arc::new(FailingExecutor),
    );

    let dry = workflow.run("show orders", "Sales", false).await.unwrap();
    assert_eq!(dry.sql_query, "SELECT * FROM orders");

    let err = workflow.run("show orders", "Sales", true).await.unwrap_err();
    assert_eq!(err.stage(), "sql_execution");
    // The engine message comes through untouched
    assert_eq!(
        err.to_string(),
        "SQL execution error: relation \"orders\" does not exist"
    );

    // The earlier dry-run result is unaffected by the failed invocation
    assert_eq!(dry.sql_query, "SELECT * FROM orders");
    assert!(dry.query_result.is_none());
}

#[tokio::test]
async fn end_to_end_sales_scenario() {
    let executor = Arc::new(RecordingExecutor::new(sales_rows()));
    let index = Arc::new(InMemorySimilarityIndex::new());
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        index.clone(),
        Arc::new(StaticSqlGenerator::returning("SELECT id, amount FROM Orders")),
        executor.clone(),
    );

    let result = workflow
        .run("total amount per order", "Sales", true)
        .await
        .unwrap();

    // The schema was stored under the database name and came back as the
    // nearest neighbor for the query
    assert_eq!(result.similar_schemas.len(), 1);
    assert_eq!(result.similar_schemas[0].id, "Sales");
    assert_eq!(result.similar_schemas[0].document, SALES_SCHEMA);

    // The generated statement reached the executor exactly as returned
    assert_eq!(result.sql_query, "SELECT id, amount FROM Orders");
    assert_eq!(executor.calls(), vec!["SELECT id, amount FROM Orders"]);

    // Execution output populated the result
    assert_eq!(result.query_result, Some(sales_rows()));
}

#[tokio::test]
async fn always_policy_upserts_every_run() {
    let index = Arc::new(CountingIndex::new());
    let workflow = QueryWorkflow::new(
        Arc::new(FixedSchemaProvider::new(SALES_SCHEMA)),
        Arc::new(NullEmbeddingProvider::new()),
        index.clone(),
        Arc::new(StaticSqlGenerator::returning("SELECT 1")),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    workflow.run("q1", "Sales", false).await.unwrap();
    workflow.run("q2", "Sales", false).await.unwrap();

    assert_eq!(index.upsert_count(), 2);
}

#[tokio::test]
async fn when_changed_policy_skips_identical_schema() {
    let schema_provider = Arc::new(FixedSchemaProvider::new(SALES_SCHEMA));
    let index = Arc::new(CountingIndex::new());
    let workflow = QueryWorkflow::new(
        schema_provider.clone(),
        Arc::new(NullEmbeddingProvider::new()),
        index.clone(),
        Arc::new(StaticSqlGenerator::returning("SELECT 1")),
        Arc::new(RecordingExecutor::new(sales_rows())),
    )
    .with_upsert_policy(UpsertPolicy::WhenChanged);

    workflow.run("q1", "Sales", false).await.unwrap();
    workflow.run("q2", "Sales", false).await.unwrap();
    assert_eq!(index.upsert_count(), 1);

    // A schema change makes the next run write again
    schema_provider.set_text("Table: Orders | Columns: id, amount, status\n");
    workflow.run("q3", "Sales", false).await.unwrap();
    assert_eq!(index.upsert_count(), 2);
}

#[tokio::test]
async fn schema_failure_surfaces_before_any_index_write() {
    struct DownSchemaProvider;

    #[async_trait]
    impl SchemaProvider for DownSchemaProvider {
        async fn fetch_schema_text(&self, database: &str) -> Result<String> {
            Err(Error::schema_retrieval(format!(
                "cannot connect for '{database}'"
            )))
        }

        fn provider_name(&self) -> &str {
            "down"
        }
    }

    let index = Arc::new(CountingIndex::new());
    let workflow = QueryWorkflow::new(
        Arc::new(DownSchemaProvider),
        Arc::new(NullEmbeddingProvider::new()),
        index.clone(),
        Arc::new(StaticSqlGenerator::returning("SELECT 1")),
        Arc::new(RecordingExecutor::new(sales_rows())),
    );

    let err = workflow.run("q", "Sales", false).await.unwrap_err();
    assert_eq!(err.stage(), "schema_retrieval");
    assert_eq!(index.upsert_count(), 0);
}
