//! FastEmbed-backed MiniLM embedder.
//!
//! Wraps `fastembed`'s user-defined model path: the ONNX weights and
//! tokenizer files are read from a local model directory and nothing is
//! ever downloaded. Missing files surface as
//! [`EmbedderError::Unavailable`] with the list of what is absent.

use std::fs;
use std::path::{Path, PathBuf};

use fastembed::{
    InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles, UserDefinedEmbeddingModel,
};
use parking_lot::Mutex;
use tracing::info;

use super::embedder::{Embedder, EmbedderError, EmbedderResult};

/// Model directory name under `<data_dir>/models/`.
pub const MODEL_DIR_NAME: &str = "all-MiniLM-L6-v2";

/// Files that must be present in the model directory.
pub const REQUIRED_MODEL_FILES: &[&str] = &[
    "model.onnx",
    "tokenizer.json",
    "config.json",
    "special_tokens_map.json",
    "tokenizer_config.json",
];

const EMBEDDER_ID: &str = "minilm-384";
const DIMENSION: usize = 384;

/// `sentence-transformers/all-MiniLM-L6-v2` served through the ONNX
/// runtime. 384 dimensions, mean pooling, unit-normalized output.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    /// Default model directory for a data dir.
    pub fn default_model_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("models").join(MODEL_DIR_NAME)
    }

    pub fn required_model_files() -> &'static [&'static str] {
        REQUIRED_MODEL_FILES
    }

    pub fn embedder_id_static() -> &'static str {
        EMBEDDER_ID
    }

    /// Load the model from the default location under `data_dir`.
    pub fn load(data_dir: &Path) -> EmbedderResult<Self> {
        Self::load_from_dir(&Self::default_model_dir(data_dir))
    }

    /// Load the model from a directory containing the required files.
    pub fn load_from_dir(model_dir: &Path) -> EmbedderResult<Self> {
        let missing: Vec<&str> = REQUIRED_MODEL_FILES
            .iter()
            .copied()
            .filter(|file| !model_dir.join(file).is_file())
            .collect();
        if !missing.is_empty() {
            return Err(EmbedderError::Unavailable(format!(
                "model files missing in {}: {}",
                model_dir.display(),
                missing.join(", ")
            )));
        }

        let onnx = read_model_file(model_dir, "model.onnx")?;
        let tokenizer_files = TokenizerFiles {
            tokenizer_file: read_model_file(model_dir, "tokenizer.json")?,
            config_file: read_model_file(model_dir, "config.json")?,
            special_tokens_map_file: read_model_file(model_dir, "special_tokens_map.json")?,
            tokenizer_config_file: read_model_file(model_dir, "tokenizer_config.json")?,
        };

        let model =
            UserDefinedEmbeddingModel::new(onnx, tokenizer_files).with_pooling(Pooling::Mean);
        let model =
            TextEmbedding::try_new_from_user_defined(model, InitOptionsUserDefined::default())
                .map_err(|e| EmbedderError::Unavailable(format!("model init failed: {e}")))?;

        info!(model_dir = %model_dir.display(), id = EMBEDDER_ID, "loaded MiniLM embedder");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

fn read_model_file(model_dir: &Path, name: &str) -> EmbedderResult<Vec<u8>> {
    let path = model_dir.join(name);
    fs::read(&path)
        .map_err(|e| EmbedderError::Unavailable(format!("failed to read {}: {e}", path.display())))
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

impl Embedder for FastEmbedder {
    fn id(&self) -> &str {
        EMBEDDER_ID
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn is_semantic(&self) -> bool {
        true
    }

    fn embed(&self, text: &str) -> EmbedderResult<Vec<f32>> {
        let mut vectors = self
            .model
            .lock()
            .embed(vec![text], None)
            .map_err(|e| EmbedderError::Failed(e.to_string()))?;
        let mut vector = vectors
            .pop()
            .ok_or_else(|| EmbedderError::Failed("model returned no embedding".to_string()))?;
        l2_normalize(&mut vector);
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[&str]) -> EmbedderResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut vectors = self
            .model
            .lock()
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbedderError::Failed(e.to_string()))?;
        if vectors.len() != texts.len() {
            return Err(EmbedderError::Failed(format!(
                "model returned {} embeddings for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        for vector in &mut vectors {
            l2_normalize(vector);
        }
        Ok(vectors)
    }
}
