//! Bootstrap wiring
//!
//! Turns an [`AppConfig`] into a ready [`QueryWorkflow`]: resolves the
//! pluggable providers from the linkme registries by their configured names,
//! connects the PostgreSQL component, and injects everything through
//! constructors. No ambient globals - the registries hold factories, and
//! every instance is created exactly once here.

use std::sync::Arc;

use tracing::info;

use sqb_application::ports::registry::{
    EmbeddingProviderConfig, SimilarityIndexConfig, SqlGeneratorConfig,
    resolve_embedding_provider, resolve_similarity_index, resolve_sql_generator,
};
use sqb_application::use_cases::QueryWorkflow;
use sqb_domain::error::{Error, Result};
use sqb_domain::ports::providers::{EmbeddingProvider, SimilarityIndex, SqlGenerator};
use sqb_providers::database::{PostgresConfig, PostgresDatabase};

use crate::config::AppConfig;

/// The pluggable providers resolved from the registries
pub struct ResolvedProviders {
    /// Embedding provider
    pub embedding: Arc<dyn EmbeddingProvider>,
    /// Similarity index
    pub index: Arc<dyn SimilarityIndex>,
    /// SQL generator
    pub generator: Arc<dyn SqlGenerator>,
}

/// Resolve the embedding provider, similarity index, and SQL generator
/// named in the configuration.
pub fn resolve_providers(config: &AppConfig) -> Result<ResolvedProviders> {
    let embedding =
        resolve_embedding_provider(&embedding_registry_config(config)).map_err(Error::configuration)?;
    let index =
        resolve_similarity_index(&index_registry_config(config)).map_err(Error::configuration)?;
    let generator =
        resolve_sql_generator(&generator_registry_config(config)).map_err(Error::configuration)?;

    info!(
        embedding = embedding.provider_name(),
        index = index.provider_name(),
        generator = generator.provider_name(),
        "providers resolved"
    );

    Ok(ResolvedProviders {
        embedding,
        index,
        generator,
    })
}

/// Build the full query workflow from configuration.
///
/// The PostgreSQL component serves as both the schema provider and the SQL
/// executor, mirroring the single source-database connection it wraps.
pub fn build_workflow(config: &AppConfig) -> Result<QueryWorkflow> {
    let providers = resolve_providers(config)?;

    let database = Arc::new(PostgresDatabase::connect(&PostgresConfig {
        host: config.database.host.clone(),
        port: config.database.port,
        dbname: config.database.dbname.clone(),
        user: config.database.user.clone(),
        password: config.database.password.clone(),
        pool_size: config.database.pool_size,
    }));

    Ok(QueryWorkflow::new(
        database.clone(),
        providers.embedding,
        providers.index,
        providers.generator,
        database,
    )
    .with_top_k(config.workflow.top_k)
    .with_upsert_policy(config.workflow.upsert_policy))
}

fn embedding_registry_config(config: &AppConfig) -> EmbeddingProviderConfig {
    let mut registry_config = EmbeddingProviderConfig::new(&config.embedding.provider);
    registry_config.model = config.embedding.model.clone();
    // The Gemini embedding provider can ride on the generator's key when no
    // dedicated one is configured
    registry_config.api_key = config
        .embedding
        .api_key
        .clone()
        .or_else(|| config.generator.api_key.clone());
    registry_config.base_url = config.embedding.base_url.clone();
    registry_config.dimensions = config.embedding.dimensions;
    registry_config
}

fn index_registry_config(config: &AppConfig) -> SimilarityIndexConfig {
    let mut registry_config = SimilarityIndexConfig::new(&config.index.provider);
    registry_config.base_url = config.index.base_url.clone();
    registry_config.collection = Some(config.index.collection.clone());
    registry_config
}

fn generator_registry_config(config: &AppConfig) -> SqlGeneratorConfig {
    let mut registry_config = SqlGeneratorConfig::new(&config.generator.provider);
    registry_config.model = Some(config.generator.model.clone());
    registry_config.api_key = config.generator.api_key.clone();
    registry_config.base_url = config.generator.base_url.clone();
    registry_config.dialect = Some(config.generator.dialect.clone());
    registry_config
}
