//! Registry resolution tests
//!
//! sqb-providers is a dev-dependency of this crate, so linking these tests
//! populates the linkme slices with the real provider entries.

use sqb_application::ports::registry::{
    EmbeddingProviderConfig, SimilarityIndexConfig, SqlGeneratorConfig,
    list_embedding_providers, list_similarity_indexes, list_sql_generators,
    resolve_embedding_provider, resolve_similarity_index, resolve_sql_generator,
};

#[test]
fn null_embedding_provider_is_registered() {
    let provider = resolve_embedding_provider(&EmbeddingProviderConfig::new("null"))
        .expect("null provider must resolve");
    assert_eq!(provider.provider_name(), "null");
    assert_eq!(provider.dimensions(), 384);
}

#[test]
fn memory_index_is_registered() {
    let index = resolve_similarity_index(&SimilarityIndexConfig::new("memory"))
        .expect("memory index must resolve");
    assert_eq!(index.provider_name(), "memory");
}

#[test]
fn static_generator_is_registered_and_honors_extra_sql() {
    let mut config = SqlGeneratorConfig::new("static");
    config
        .extra
        .insert("sql".to_string(), "SELECT 42".to_string());
    let generator = resolve_sql_generator(&config).expect("static generator must resolve");
    assert_eq!(generator.provider_name(), "static");
}

#[test]
fn listings_include_registered_providers() {
    let embedding_names: Vec<_> = list_embedding_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(embedding_names.contains(&"null"));

    let index_names: Vec<_> = list_similarity_indexes()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(index_names.contains(&"memory"));

    let generator_names: Vec<_> = list_sql_generators()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(generator_names.contains(&"static"));
}

#[test]
fn unknown_names_fail_with_available_set() {
    let Err(err) = resolve_similarity_index(&SimilarityIndexConfig::new("bogus")) else {
        panic!("resolution must fail");
    };
    assert!(err.contains("bogus"));
    assert!(err.contains("Available providers"));
}
