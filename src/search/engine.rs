//! Engine lifecycle: build, query, atomic rebuild.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, info};

use super::embedder::{Embedder, EmbedderError, EmbedderInfo};
use super::vector_index::VectorIndex;
use crate::model::types::{FieldSelector, Record};

/// Errors surfaced by [`SearchEngine`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller contract violation: `top_k` must be at least 1.
    #[error("top_k must be at least 1 (got {0})")]
    InvalidTopK(usize),
    /// The embedding backend failed; not retried here.
    #[error(transparent)]
    Embedder(#[from] EmbedderError),
}

/// One ranked hit: an owned copy of the record's fields plus its corpus
/// position and cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub position: usize,
    pub similarity: f32,
    pub record: Record,
}

/// Serializes flat: the record's fields, then `position`, then
/// `similarity`.
impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len() + 2))?;
        for (name, value) in self.record.fields() {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("position", &self.position)?;
        map.serialize_entry("similarity", &self.similarity)?;
        map.end()
    }
}

struct EngineState {
    records: Vec<Record>,
    index: VectorIndex,
}

/// Exact top-K search over an embedded corpus.
///
/// The engine owns one embedder for its whole lifetime; the index and
/// every query vector come from that instance, which is what makes the
/// similarities comparable. State (records + index) sits behind an
/// `RwLock<Arc<_>>`: a query clones the `Arc` under a brief read lock and
/// runs entirely on that snapshot, a rebuild swaps in a fully built
/// replacement. A half-built index is never observable.
pub struct SearchEngine {
    embedder: Arc<dyn Embedder>,
    selector: FieldSelector,
    state: RwLock<Arc<EngineState>>,
}

impl SearchEngine {
    /// Build the index for `records` and return a ready engine.
    ///
    /// Blocking: embeds every record before returning, so a constructed
    /// engine never serves from a partial index.
    pub fn build(
        embedder: Arc<dyn Embedder>,
        records: Vec<Record>,
        selector: FieldSelector,
    ) -> Result<Self, SearchError> {
        let index = VectorIndex::build(embedder.as_ref(), &records, &selector)?;
        Ok(Self {
            embedder,
            selector,
            state: RwLock::new(Arc::new(EngineState { records, index })),
        })
    }

    /// Replace the corpus. The new index is built off to the side and
    /// swapped in whole; queries in flight finish on their old snapshot.
    pub fn rebuild(&self, records: Vec<Record>) -> Result<(), SearchError> {
        let index = VectorIndex::build(self.embedder.as_ref(), &records, &self.selector)?;
        let next = Arc::new(EngineState { records, index });
        *self.state.write() = next;
        info!("index swapped after rebuild");
        Ok(())
    }

    /// Rank the corpus against `query` and return the best `top_k` hits.
    ///
    /// Returns exactly `min(top_k, N)` results, similarity descending,
    /// exact ties broken by ascending corpus position. `top_k == 0` is
    /// rejected before any work; an empty corpus yields an empty result
    /// set for any `top_k`.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<QueryResult>, SearchError> {
        if top_k == 0 {
            return Err(SearchError::InvalidTopK(top_k));
        }

        let state = self.state.read().clone();
        if state.records.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(query)?;
        debug!(query_len = query.len(), top_k, "query embedded");

        let results = state
            .index
            .search_top_k(&query_vec, top_k)
            .into_iter()
            .map(|scored| QueryResult {
                position: scored.position,
                similarity: scored.similarity,
                record: state.records[scored.position].clone(),
            })
            .collect();
        Ok(results)
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn embedder_info(&self) -> EmbedderInfo {
        self.embedder.info()
    }
}
