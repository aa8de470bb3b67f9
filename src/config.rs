//! Runtime configuration.
//!
//! Settings resolve in precedence order: command-line flags, then
//! `ARTSEARCH_*` environment variables (a `.env` file is honored via
//! `dotenvy`), then built-in defaults. This module owns the env and
//! default layers; flag merging happens at the CLI boundary.

use std::path::PathBuf;

use crate::model::types::FieldSelector;

pub const ENV_CATALOG: &str = "ARTSEARCH_CATALOG";
pub const ENV_FIELDS: &str = "ARTSEARCH_FIELDS";
pub const ENV_EMBEDDER: &str = "ARTSEARCH_EMBEDDER";
pub const ENV_TOP_K: &str = "ARTSEARCH_TOP_K";

pub const DEFAULT_TOP_K: usize = 5;

/// Fields embedded when no selection is configured.
pub const DEFAULT_EMBED_FIELDS: &[&str] = &["title", "year", "season", "medium", "hue", "place"];

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Catalog CSV path. `None` until configured; searching requires one.
    pub catalog_path: Option<PathBuf>,
    /// Field names embedded into the composite text, in order.
    pub embed_fields: Vec<String>,
    /// Embedder name or id. `None` means pick the best available.
    pub embedder: Option<String>,
    /// Result count cap.
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            embed_fields: DEFAULT_EMBED_FIELDS.iter().map(|s| s.to_string()).collect(),
            embedder: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with any `ARTSEARCH_*` variables that are set.
    ///
    /// Empty values are treated as unset. An unparsable or zero
    /// `ARTSEARCH_TOP_K` is ignored rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = dotenvy::var(ENV_CATALOG)
            && !path.is_empty()
        {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Ok(fields) = dotenvy::var(ENV_FIELDS)
            && !fields.is_empty()
        {
            let fields = parse_fields(&fields);
            if !fields.is_empty() {
                config.embed_fields = fields;
            }
        }
        if let Ok(embedder) = dotenvy::var(ENV_EMBEDDER)
            && !embedder.is_empty()
        {
            config.embedder = Some(embedder);
        }
        if let Ok(top_k) = dotenvy::var(ENV_TOP_K)
            && let Ok(top_k) = top_k.parse::<usize>()
            && top_k > 0
        {
            config.top_k = top_k;
        }
        config
    }

    /// Selector over the configured embed fields.
    pub fn field_selector(&self) -> FieldSelector {
        FieldSelector::new(self.embed_fields.iter().cloned())
    }
}

/// Split a comma-separated field list, trimming and dropping empties.
pub fn parse_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
