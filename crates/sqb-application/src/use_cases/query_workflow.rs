//! Query Workflow Use Case
//!
//! The end-to-end natural-language-to-SQL pipeline: schema fetch, embedding,
//! index upsert, similarity search, prompt construction, SQL generation, and
//! optional execution. Collaborators are injected at construction; the run
//! itself is a fixed sequence with no branching on data content except
//! context selection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use sqb_domain::error::Result;
use sqb_domain::ports::providers::{
    EmbeddingProvider, SchemaProvider, SimilarityIndex, SqlExecutor, SqlGenerator,
};
use sqb_domain::value_objects::WorkflowResult;

/// When to write the freshly fetched schema into the similarity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpsertPolicy {
    /// Upsert on every run, even when the schema text has not changed.
    #[default]
    Always,
    /// Skip the upsert when the schema text is byte-identical to the last
    /// text this workflow upserted for the same database.
    WhenChanged,
}

/// End-to-end natural-language-to-SQL workflow.
///
/// One invocation of [`run`](Self::run) performs the whole pipeline
/// sequentially on the calling task. Every collaborator failure aborts the
/// run and propagates as the error variant naming its stage; no stage is
/// retried and no partial result is returned.
///
/// The index upsert in step 3 mutates shared external state on every call,
/// dry runs included: every schema fetch warms the index. Entries are keyed
/// by database name, so repeated runs against the same database overwrite
/// rather than version the stored embedding.
pub struct QueryWorkflow {
    schema_provider: Arc<dyn SchemaProvider>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    similarity_index: Arc<dyn SimilarityIndex>,
    sql_generator: Arc<dyn SqlGenerator>,
    sql_executor: Arc<dyn SqlExecutor>,
    top_k: usize,
    upsert_policy: UpsertPolicy,
    // database name -> last schema text upserted, for WhenChanged
    last_upserted: Mutex<HashMap<String, String>>,
}

impl QueryWorkflow {
    /// Create a workflow with the given collaborators and default options
    /// (`top_k = 1`, [`UpsertPolicy::Always`]).
    pub fn new(
        schema_provider: Arc<dyn SchemaProvider>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        similarity_index: Arc<dyn SimilarityIndex>,
        sql_generator: Arc<dyn SqlGenerator>,
        sql_executor: Arc<dyn SqlExecutor>,
    ) -> Self {
        Self {
            schema_provider,
            embedding_provider,
            similarity_index,
            sql_generator,
            sql_executor,
            top_k: 1,
            upsert_policy: UpsertPolicy::Always,
            last_upserted: Mutex::new(HashMap::new()),
        }
    }

    /// Set how many nearest neighbors the similarity search requests.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Set the upsert policy.
    pub fn with_upsert_policy(mut self, policy: UpsertPolicy) -> Self {
        self.upsert_policy = policy;
        self
    }

    /// Execute the full workflow.
    ///
    /// # Arguments
    /// * `user_query` - Natural language question (non-empty; validated by
    ///   the caller)
    /// * `database_name` - Database to introspect; doubles as the similarity
    ///   index key
    /// * `execute` - When false, stop after generation (dry run for review)
    pub async fn run(
        &self,
        user_query: &str,
        database_name: &str,
        execute: bool,
    ) -> Result<WorkflowResult> {
        info!(database = database_name, "step 1: fetching schema text");
        let schema_text = self.schema_provider.fetch_schema_text(database_name).await?;
        info!(len = schema_text.len(), "schema text retrieved");

        info!("step 2: generating schema embedding");
        let schema_embedding = self.embedding_provider.embed(&schema_text).await?;

        if self.should_upsert(database_name, &schema_text) {
            info!(id = database_name, "step 3: storing schema in similarity index");
            self.similarity_index
                .upsert(database_name, &schema_text, &schema_embedding)
                .await?;
            self.remember_upserted(database_name, &schema_text);
        } else {
            info!(id = database_name, "step 3: schema unchanged, skipping upsert");
        }

        info!("step 4: generating embedding for user query");
        let query_embedding = self.embedding_provider.embed(user_query).await?;

        info!(top_k = self.top_k, "step 5: retrieving similar schemas");
        let similar_schemas = self
            .similarity_index
            .search(&query_embedding.vector, self.top_k)
            .await?;
        info!(count = similar_schemas.len(), "similar schemas found");

        // Context selection: the top match's document when the search
        // produced one, otherwise the full schema text from step 1. Covers
        // an empty index and search backends that return matches without
        // document payloads.
        let context = similar_schemas
            .first()
            .map(|m| m.document.as_str())
            .filter(|doc| !doc.is_empty())
            .unwrap_or(&schema_text);

        info!("step 6: building prompt");
        let prompt = self.sql_generator.build_prompt(context, user_query);

        info!("step 7: generating SQL");
        let sql_query = self.sql_generator.generate_sql(&prompt).await?;
        info!(sql = %sql_query, "SQL generated");

        let query_result = if execute {
            info!("step 8: executing SQL");
            Some(self.sql_executor.execute(&sql_query).await?)
        } else {
            None
        };

        Ok(WorkflowResult {
            sql_query,
            query_result,
            similar_schemas,
        })
    }

    /// Whether step 3 should write, given the configured policy.
    fn should_upsert(&self, database_name: &str, schema_text: &str) -> bool {
        match self.upsert_policy {
            UpsertPolicy::Always => true,
            UpsertPolicy::WhenChanged => {
                let seen = self
                    .last_upserted
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                seen.get(database_name).map(String::as_str) != Some(schema_text)
            }
        }
    }

    fn remember_upserted(&self, database_name: &str, schema_text: &str) {
        if self.upsert_policy == UpsertPolicy::WhenChanged {
            let mut seen = self
                .last_upserted
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            seen.insert(database_name.to_string(), schema_text.to_string());
        }
    }

    /// The embedding provider this workflow was built with.
    pub fn embedding_provider(&self) -> &dyn EmbeddingProvider {
        self.embedding_provider.as_ref()
    }

    /// The similarity index this workflow was built with.
    pub fn similarity_index(&self) -> &dyn SimilarityIndex {
        self.similarity_index.as_ref()
    }

    /// The SQL generator this workflow was built with.
    pub fn sql_generator(&self) -> &dyn SqlGenerator {
        self.sql_generator.as_ref()
    }
}
