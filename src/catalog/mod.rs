//! Catalog loading.
//!
//! The corpus lives in a CSV file whose header row names the record
//! fields. Rows become [`Record`]s in file order; that order is the
//! position every search result reports.

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::model::types::Record;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Load every record from a catalog CSV, preserving row order.
///
/// Rows shorter than the header keep only the columns they have; a
/// missing column reads as an absent field, not an empty one. Values are
/// kept verbatim, including empty strings.
pub fn load_catalog(path: &Path) -> Result<Vec<Record>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(Record::from_pairs(headers.iter().zip(row.iter())));
    }

    info!(count = records.len(), path = %path.display(), "loaded catalog");
    Ok(records)
}
