//! The session-scoped niche store: load once, mutate in place, write back
//! after every mutation.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use nichelab_catalog::{Niche, Product, ProductRecord};
use nichelab_core::{CategoryRanges, DomainError};

use crate::storage::{NicheData, NicheStorage, StorageError};
use crate::view::NicheView;

/// Store-level error: domain failures pass through untouched, plus the
/// bookkeeping failures of the niche map itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no niche named {0:?}")]
    NicheNotFound(String),

    #[error("niche {0:?} already exists")]
    NicheExists(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// All niches of one evaluation session, keyed by name.
///
/// State is loaded once at open and written back through the injected
/// storage backend after every mutation. Single operator, no concurrent
/// access.
#[derive(Debug)]
pub struct NicheStore<S> {
    niches: BTreeMap<String, Niche>,
    ranges: CategoryRanges,
    storage: S,
}

impl<S: NicheStorage> NicheStore<S> {
    /// Load persisted niches, or start empty when nothing was saved yet.
    ///
    /// Every loaded niche is rebuilt through full product and membership
    /// validation.
    pub fn open(storage: S, ranges: CategoryRanges) -> StoreResult<Self> {
        let data = match storage.load() {
            Ok(data) => data,
            Err(StorageError::NoData) => {
                info!("no persisted niche data, starting empty");
                NicheData::new()
            }
            Err(err) => return Err(err.into()),
        };
        let mut niches = BTreeMap::new();
        for (name, records) in data {
            let niche = Niche::from_records(&records, &ranges)?;
            niches.insert(name, niche);
        }
        Ok(Self {
            niches,
            ranges,
            storage,
        })
    }

    /// Niche names in lexicographic order.
    pub fn list_niches(&self) -> Vec<&str> {
        self.niches.keys().map(String::as_str).collect()
    }

    pub fn niche(&self, name: &str) -> Option<&Niche> {
        self.niches.get(name)
    }

    /// The category table this store validates against. Front ends use it
    /// to bound their numeric inputs.
    pub fn category_ranges(&self) -> &CategoryRanges {
        &self.ranges
    }

    /// Register an empty niche under `name`.
    pub fn create_niche(&mut self, name: &str) -> StoreResult<()> {
        if self.niches.contains_key(name) {
            return Err(StoreError::NicheExists(name.to_string()));
        }
        self.niches.insert(name.to_string(), Niche::new());
        self.persist()?;
        info!(niche = name, "niche created");
        Ok(())
    }

    /// Remove a niche and all its products.
    pub fn delete_niche(&mut self, name: &str) -> StoreResult<()> {
        if self.niches.remove(name).is_none() {
            return Err(StoreError::NicheNotFound(name.to_string()));
        }
        self.persist()?;
        info!(niche = name, "niche deleted");
        Ok(())
    }

    /// Validate a raw record and add the product to the named niche.
    ///
    /// Returns the constructed product so the caller can display its
    /// economics. A rejected record leaves the niche, and the persisted
    /// document, unchanged.
    pub fn add_product(&mut self, name: &str, record: ProductRecord) -> StoreResult<Product> {
        let niche = self
            .niches
            .get_mut(name)
            .ok_or_else(|| StoreError::NicheNotFound(name.to_string()))?;
        let product = Product::new(record, &self.ranges)?;
        niche.add(product.clone())?;
        self.persist()?;
        debug!(niche = name, bsr = product.bsr(), "product added");
        Ok(product)
    }

    /// Table rows plus hypothesis-level expectations for one niche.
    pub fn niche_view(&self, name: &str) -> StoreResult<NicheView> {
        let niche = self
            .niches
            .get(name)
            .ok_or_else(|| StoreError::NicheNotFound(name.to_string()))?;
        Ok(NicheView::project(name, niche, &self.ranges)?)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let data: NicheData = self
            .niches
            .iter()
            .map(|(name, niche)| (name.clone(), niche.to_records()))
            .collect();
        self.storage.save(&data)
    }
}
