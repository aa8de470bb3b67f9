//! In-memory vector index: exact cosine scoring over dense rows.
//!
//! Vectors are keyed by record position (`0..N`), so the index is a plain
//! `Vec` of rows built once per corpus/selector pair. Search is an
//! exhaustive O(N·D) scan; the catalogs this crate serves stay in the
//! hundreds-to-low-thousands range, well under the point where an
//! approximate structure would earn its complexity.

use tracing::info;

use super::composite::composite_texts;
use super::embedder::{Embedder, EmbedderError, EmbedderResult};
use crate::model::types::{FieldSelector, Record};

/// A scored row: record position plus cosine similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPosition {
    pub position: usize,
    pub similarity: f32,
}

/// Position-keyed embedding vectors for one corpus/selector pair.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    embedder_id: String,
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Embed every record's composite text and build the index.
    ///
    /// The mapping is total: exactly one vector per record position, in
    /// order, complete before this returns. Empty composite texts are
    /// embedded like any other input. Records are read, never mutated.
    pub fn build(
        embedder: &dyn Embedder,
        records: &[Record],
        selector: &FieldSelector,
    ) -> EmbedderResult<Self> {
        let texts = composite_texts(records, selector);
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&refs)?;
        if vectors.len() != records.len() {
            return Err(EmbedderError::Failed(format!(
                "embedder returned {} vectors for {} records",
                vectors.len(),
                records.len()
            )));
        }

        info!(
            records = records.len(),
            dimension = embedder.dimension(),
            embedder = embedder.id(),
            "vector index built"
        );
        Ok(Self {
            embedder_id: embedder.id().to_string(),
            dimension: embedder.dimension(),
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Id of the embedder that produced these vectors. Query vectors must
    /// come from the same embedder or the scores are meaningless.
    pub fn embedder_id(&self) -> &str {
        &self.embedder_id
    }

    /// Vector for one record position.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    /// Score every row against `query_vec` and return the best `k`:
    /// similarity descending, exact ties broken by ascending position.
    pub fn search_top_k(&self, query_vec: &[f32], k: usize) -> Vec<ScoredPosition> {
        let mut scored: Vec<ScoredPosition> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| ScoredPosition {
                position,
                similarity: cosine_similarity(query_vec, vector),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.position.cmp(&b.position))
        });
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity with a zero-norm guard.
///
/// Either side having zero norm yields 0.0, never NaN, so degenerate
/// embeddings still take a defined place in the ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 { dot / denom } else { 0.0 }
}
