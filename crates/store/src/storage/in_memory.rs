use std::sync::RwLock;

use super::{NicheData, NicheStorage, StorageError};

/// In-memory document holder.
///
/// Intended for tests and throwaway sessions; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: RwLock<Option<NicheData>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved document, if any.
    pub fn snapshot(&self) -> Option<NicheData> {
        self.data.read().ok()?.clone()
    }
}

impl NicheStorage for InMemoryStorage {
    fn load(&self) -> Result<NicheData, StorageError> {
        let guard = self.data.read().map_err(|_| poisoned())?;
        guard.clone().ok_or(StorageError::NoData)
    }

    fn save(&self, data: &NicheData) -> Result<(), StorageError> {
        let mut guard = self.data.write().map_err(|_| poisoned())?;
        *guard = Some(data.clone());
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::Io(std::io::Error::other("storage lock poisoned"))
}
