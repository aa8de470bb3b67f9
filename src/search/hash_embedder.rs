//! FNV-1a feature hashing embedder.
//!
//! Deterministic lexical fallback: split on non-alphanumeric boundaries,
//! lowercase, hash each token with FNV-1a into a fixed number of buckets,
//! L2-normalize the bucket counts. No model files, no startup cost, stable
//! across runs and platforms. Token-free input embeds to the zero vector.

use super::embedder::{Embedder, EmbedderResult};

/// Default output dimension. Matches the MiniLM embedder so indexes have
/// the same shape regardless of backend.
pub const DEFAULT_DIMENSION: usize = 384;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    id: String,
}

impl HashEmbedder {
    /// Embedder with `dimension` buckets. Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "dimension must be nonzero");
        Self {
            dimension,
            id: format!("fnv1a-{dimension}"),
        }
    }

    /// Embedder with the default 384-bucket dimension.
    pub fn default_dimension() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::default_dimension()
    }
}

fn fnv1a(token: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl Embedder for HashEmbedder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn is_semantic(&self) -> bool {
        false
    }

    fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
        {
            let token = token.to_lowercase();
            let bucket = (fnv1a(&token) % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}
