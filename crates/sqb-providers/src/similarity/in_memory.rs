//! In-memory similarity index implementation
//!
//! Stores documents and vectors in a concurrent map for development and
//! testing. Data is not persisted and is lost on restart.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use sqb_domain::error::Result;
use sqb_domain::ports::providers::SimilarityIndex;
use sqb_domain::value_objects::{Embedding, SchemaMatch};

/// Stored entry: document text plus its embedding
type IndexEntry = (String, Embedding);

/// In-memory similarity index
///
/// Entries are keyed by document id, so upsert is a plain insert-or-replace
/// and repeated writes under one id never accumulate. Search scores every
/// entry with cosine similarity and keeps the top k with a bounded heap.
pub struct InMemorySimilarityIndex {
    entries: Arc<DashMap<String, IndexEntry>>,
}

impl InMemorySimilarityIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemorySimilarityIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimilarityIndex for InMemorySimilarityIndex {
    async fn upsert(&self, id: &str, document: &str, embedding: &Embedding) -> Result<()> {
        self.entries
            .insert(id.to_string(), (document.to_string(), embedding.clone()));
        Ok(())
    }

    async fn search(&self, query_vector: &[f32], top_k: usize) -> Result<Vec<SchemaMatch>> {
        if top_k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        // Precompute the query norm once instead of per entry
        let query_norm = compute_norm(query_vector);

        // Bounded max-heap on distance: keeps the k closest entries in O(n log k)
        let mut heap: BinaryHeap<ScoredItem> = BinaryHeap::with_capacity(top_k + 1);

        for entry in self.entries.iter() {
            let (document, embedding) = entry.value();
            let similarity =
                cosine_similarity_with_norm(query_vector, &embedding.vector, query_norm);
            let distance = f64::from(1.0 - similarity);

            if heap.len() < top_k {
                heap.push(ScoredItem {
                    distance,
                    id: entry.key().clone(),
                    document: document.clone(),
                });
            } else if let Some(farthest) = heap.peek() {
                if distance < farthest.distance {
                    heap.pop();
                    heap.push(ScoredItem {
                        distance,
                        id: entry.key().clone(),
                        document: document.clone(),
                    });
                }
            }
        }

        // Extract results in ascending distance order (closest first)
        let mut items: Vec<_> = heap.into_iter().collect();
        items.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));

        Ok(items
            .into_iter()
            .map(|item| SchemaMatch::new(item.id, item.document, item.distance))
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries.remove(id);
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Scored item for heap-based top-k selection (max-heap on distance)
struct ScoredItem {
    distance: f64,
    id: String,
    document: String,
}

impl PartialEq for ScoredItem {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the L2 norm of a vector
fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with a precomputed norm for the query side
fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use sqb_application::ports::registry::{
    SIMILARITY_INDEXES, SimilarityIndexConfig, SimilarityIndexEntry,
};

/// Factory function for creating in-memory index instances.
fn in_memory_index_factory(
    _config: &SimilarityIndexConfig,
) -> std::result::Result<Arc<dyn SimilarityIndex>, String> {
    Ok(Arc::new(InMemorySimilarityIndex::new()))
}

#[linkme::distributed_slice(SIMILARITY_INDEXES)]
static MEMORY_INDEX: SimilarityIndexEntry = SimilarityIndexEntry {
    name: "memory",
    description: "In-memory similarity index (fast, non-persistent)",
    factory: in_memory_index_factory,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn embedding(vector: Vec<f32>) -> Embedding {
        let dimensions = vector.len();
        Embedding {
            vector,
            model: "test".to_string(),
            dimensions,
        }
    }

    #[tokio::test]
    async fn search_on_empty_index_returns_no_matches() {
        let index = InMemorySimilarityIndex::new();
        let matches = index.search(&[1.0, 0.0], 1).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_instead_of_duplicating() {
        let index = InMemorySimilarityIndex::new();
        index
            .upsert("Sales", "v1", &embedding(vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .upsert("Sales", "v2", &embedding(vec![1.0, 0.0]))
            .await
            .unwrap();

        let matches = index.search(&[1.0, 0.0], 10).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "Sales");
        assert_eq!(matches[0].document, "v2");
    }

    #[tokio::test]
    async fn search_ranks_closest_first() {
        let index = InMemorySimilarityIndex::new();
        index
            .upsert("aligned", "doc-a", &embedding(vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .upsert("orthogonal", "doc-b", &embedding(vec![0.0, 1.0]))
            .await
            .unwrap();

        let matches = index.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "aligned");
        assert!(matches[0].distance < matches[1].distance);
    }

    #[tokio::test]
    async fn top_k_bounds_the_result_count() {
        let index = InMemorySimilarityIndex::new();
        for i in 0..5 {
            index
                .upsert(
                    &format!("db{i}"),
                    "doc",
                    &embedding(vec![1.0, i as f32 * 0.1]),
                )
                .await
                .unwrap();
        }
        let matches = index.search(&[1.0, 0.0], 3).await.unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let index = InMemorySimilarityIndex::new();
        index
            .upsert("Sales", "doc", &embedding(vec![1.0]))
            .await
            .unwrap();
        index.delete("Sales").await.unwrap();
        assert!(index.search(&[1.0], 10).await.unwrap().is_empty());
        // Deleting an absent id is not an error
        index.delete("Sales").await.unwrap();
    }
}
