//! Pluggable persistence for the niche document.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;

use std::collections::BTreeMap;

use thiserror::Error;

use nichelab_catalog::ProductRecord;

/// The persisted document: niche name → ordered product records.
///
/// No schema version field; the record field names are the schema.
pub type NicheData = BTreeMap<String, Vec<ProductRecord>>;

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing persisted yet at the configured location. Recoverable: the
    /// caller starts from an empty store.
    #[error("no persisted niche data")]
    NoData,

    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed niche document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the niche document lives.
///
/// Implementations replace the whole document on save; there is no
/// incremental or transactional update.
pub trait NicheStorage {
    /// Read the full document. [`StorageError::NoData`] when nothing was
    /// ever saved.
    fn load(&self) -> Result<NicheData, StorageError>;

    /// Overwrite the full document.
    fn save(&self, data: &NicheData) -> Result<(), StorageError>;
}
