//! Registry of embedding backends.
//!
//! Every backend the binary can construct is listed here with its stable
//! identifier and dimensionality. Lookup accepts either the short name or
//! the id, availability is checked against the data directory, and
//! [`load_embedder`] turns an entry into a live [`Embedder`].

use std::path::Path;
use std::sync::Arc;

use super::embedder::{Embedder, EmbedderError, EmbedderInfo, EmbedderResult};
use super::fastembed_embedder::FastEmbedder;
use super::hash_embedder::HashEmbedder;

/// A registered embedding backend.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredEmbedder {
    /// Short name used on the command line.
    pub name: &'static str,
    /// Stable identifier recorded alongside built indexes.
    pub id: &'static str,
    /// Output dimensionality.
    pub dimension: usize,
    /// Whether vectors carry semantic meaning rather than token hashes.
    pub is_semantic: bool,
    /// One-line description for `embedders` output.
    pub description: &'static str,
}

/// All embedders this build knows about, preferred first.
pub static EMBEDDERS: &[RegisteredEmbedder] = &[
    RegisteredEmbedder {
        name: "minilm",
        id: "minilm-384",
        dimension: 384,
        is_semantic: true,
        description: "all-MiniLM-L6-v2 sentence embeddings via local ONNX files",
    },
    RegisteredEmbedder {
        name: "hash",
        id: "fnv1a-384",
        dimension: 384,
        is_semantic: false,
        description: "FNV-1a token hashing, deterministic and always available",
    },
];

/// Every registered embedder, in preference order.
pub fn all() -> &'static [RegisteredEmbedder] {
    EMBEDDERS
}

/// Look up an embedder by name, id, or unambiguous id prefix.
pub fn get(query: &str) -> Option<&'static RegisteredEmbedder> {
    if let Some(entry) = EMBEDDERS.iter().find(|e| e.name == query) {
        return Some(entry);
    }
    if let Some(entry) = EMBEDDERS.iter().find(|e| e.id == query) {
        return Some(entry);
    }
    let mut matches = EMBEDDERS.iter().filter(|e| e.id.starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry),
        _ => None,
    }
}

/// Whether an embedder can be constructed against this data directory.
pub fn is_available(entry: &RegisteredEmbedder, data_dir: &Path) -> bool {
    match entry.name {
        "minilm" => {
            let model_dir = FastEmbedder::default_model_dir(data_dir);
            FastEmbedder::required_model_files()
                .iter()
                .all(|file| model_dir.join(file).is_file())
        }
        // Hashing needs nothing on disk.
        _ => true,
    }
}

/// Registered embedders that are usable right now, preference order kept.
pub fn available(data_dir: &Path) -> Vec<&'static RegisteredEmbedder> {
    EMBEDDERS
        .iter()
        .filter(|entry| is_available(entry, data_dir))
        .collect()
}

/// The embedder used when nothing is configured.
pub fn default_embedder() -> &'static RegisteredEmbedder {
    &EMBEDDERS[0]
}

/// Most preferred embedder that is actually usable. The hash backend has
/// no requirements, so this never returns `None` in practice.
pub fn best_available(data_dir: &Path) -> Option<&'static RegisteredEmbedder> {
    available(data_dir).into_iter().next()
}

/// Check that a named embedder exists and is usable, with an actionable
/// message when it is not.
pub fn validate(name: &str, data_dir: &Path) -> Result<(), String> {
    let Some(entry) = get(name) else {
        let known = EMBEDDERS
            .iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("unknown embedder '{name}' (known: {known})"));
    };
    if !is_available(entry, data_dir) {
        let model_dir = FastEmbedder::default_model_dir(data_dir);
        return Err(format!(
            "embedder '{}' needs model files in {}. Place {} there, or use --embedder hash",
            entry.name,
            model_dir.display(),
            FastEmbedder::required_model_files().join(", ")
        ));
    }
    Ok(())
}

/// Construct a live embedder by name or id.
pub fn load_embedder(name: &str, data_dir: &Path) -> EmbedderResult<Arc<dyn Embedder>> {
    let entry = get(name).ok_or_else(|| {
        let known = EMBEDDERS
            .iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
            .join(", ");
        EmbedderError::Unavailable(format!("unknown embedder '{name}' (known: {known})"))
    })?;
    match entry.name {
        "minilm" => {
            let embedder = FastEmbedder::load(data_dir)?;
            Ok(Arc::new(embedder))
        }
        "hash" => Ok(Arc::new(HashEmbedder::default_dimension())),
        other => Err(EmbedderError::Unavailable(format!(
            "embedder '{other}' has no loader"
        ))),
    }
}

/// Info for a registered embedder without constructing it.
pub fn get_embedder_info(entry: &RegisteredEmbedder) -> EmbedderInfo {
    EmbedderInfo {
        id: entry.id.to_string(),
        dimension: entry.dimension,
        is_semantic: entry.is_semantic,
    }
}
