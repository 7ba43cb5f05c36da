//! Semantic Embedding Value Object

use serde::{Deserialize, Serialize};

/// Value Object: Semantic Text Embedding
///
/// A vector embedding of a text (a schema description or a user question).
/// The workflow treats the vector as opaque beyond being a unit of
/// comparison; dimensionality is fixed by the producing model.
///
/// ## Example
///
/// ```rust
/// use sqb_domain::value_objects::Embedding;
///
/// let embedding = Embedding {
///     vector: vec![0.1, 0.2, 0.3],
///     model: "all-MiniLM-L6-v2".to_string(),
///     dimensions: 3,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}
