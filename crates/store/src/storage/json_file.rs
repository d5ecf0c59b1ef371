use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{NicheData, NicheStorage, StorageError};

/// Single-file JSON persistence.
///
/// Save is a full-file overwrite, flushed to disk before returning. A crash
/// between mutations loses at most the latest one.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NicheStorage for JsonFileStorage {
    fn load(&self) -> Result<NicheData, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NoData);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, data: &NicheData) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(data)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(())
    }
}
