use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{Medicine, MedicineDocument};
use tracing::info;

use crate::errors::ServiceError;
use crate::medicine::repository::MedicineRepository;
use crate::storage::json_document_store::JsonDocumentStore;

/// Medicine collection kept in a single JSON data file.
pub struct MedicineFileStore {
    store: JsonDocumentStore<MedicineDocument>,
}

impl MedicineFileStore {
    /// Bind to the given data file. The file is not touched until first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonDocumentStore::new(path) })
    }

    /// Seed `{"medicines":[]}` when the data file does not exist yet.
    pub async fn seed_if_missing(&self) -> Result<bool, ServiceError> {
        let created = self.store.ensure_exists(&MedicineDocument::default()).await?;
        if created {
            info!(path = %self.store.path().display(), "seeded empty medicine data file");
        }
        Ok(created)
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

#[async_trait]
impl MedicineRepository for MedicineFileStore {
    async fn load(&self) -> Result<MedicineDocument, ServiceError> {
        self.store.read().await
    }

    async fn append(&self, record: Medicine) -> Result<(), ServiceError> {
        self.store
            .update(|doc| {
                doc.medicines.push(record);
                Some(())
            })
            .await
            .map(|_| ())
    }

    async fn set_price(&self, name: &str, price: f64) -> Result<bool, ServiceError> {
        let updated = self
            .store
            .update(|doc| {
                let record = doc.medicines.iter_mut().find(|m| m.is_named(name))?;
                record.price = Some(price);
                Some(())
            })
            .await?;
        Ok(updated.is_some())
    }

    async fn remove_first(&self, name: &str) -> Result<bool, ServiceError> {
        let removed = self
            .store
            .update(|doc| {
                let idx = doc.position_of(name)?;
                Some(doc.medicines.remove(idx))
            })
            .await?;
        Ok(removed.is_some())
    }
}
