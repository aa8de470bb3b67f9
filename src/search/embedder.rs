//! Embedding provider abstraction.
//!
//! The index builder and the search engine both hold the same
//! `Arc<dyn Embedder>`, so one model configuration serves indexing and
//! querying. Vectors produced under different embedder ids are not
//! comparable.

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by embedding backends.
#[derive(Debug, Error)]
pub enum EmbedderError {
    /// The backend cannot be constructed (unknown name, missing model files).
    #[error("embedder unavailable: {0}")]
    Unavailable(String),
    /// The backend failed while producing a vector.
    #[error("embedding failed: {0}")]
    Failed(String),
}

pub type EmbedderResult<T> = Result<T, EmbedderError>;

/// Identifying metadata for a loaded embedder.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedderInfo {
    pub id: String,
    pub dimension: usize,
    pub is_semantic: bool,
}

/// A text embedding capability.
///
/// Implementations are deterministic for a fixed model: the same text maps
/// to the same vector for the lifetime of the instance. Outputs are
/// unit-normalized, except that input with no features at all may embed to
/// the zero vector; callers treat that as a degenerate vector, not an
/// error.
pub trait Embedder: Send + Sync {
    /// Unique id, e.g. `minilm-384` or `fnv1a-384`.
    fn id(&self) -> &str;

    /// Output vector length.
    fn dimension(&self) -> usize;

    /// Whether this backend carries semantic (ML) weights.
    fn is_semantic(&self) -> bool;

    /// Embed one text.
    fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>>;

    /// Embed a batch of texts, one vector per input, in input order.
    fn embed_batch(&self, texts: &[&str]) -> EmbedderResult<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Metadata snapshot for display and logging.
    fn info(&self) -> EmbedderInfo {
        EmbedderInfo {
            id: self.id().to_string(),
            dimension: self.dimension(),
            is_semantic: self.is_semantic(),
        }
    }
}
