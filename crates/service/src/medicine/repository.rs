use async_trait::async_trait;
use models::{Medicine, MedicineDocument};

use crate::errors::ServiceError;

/// Persistence seam for the medicine collection.
///
/// Name-based operations act on the first record whose name matches exactly.
#[async_trait]
pub trait MedicineRepository: Send + Sync {
    /// Full collection as currently stored.
    async fn load(&self) -> Result<MedicineDocument, ServiceError>;
    /// Append a record; duplicates are allowed.
    async fn append(&self, record: Medicine) -> Result<(), ServiceError>;
    /// Set the price of the first match; `false` when nothing matched.
    async fn set_price(&self, name: &str, price: f64) -> Result<bool, ServiceError>;
    /// Remove the first match; `false` when nothing matched.
    async fn remove_first(&self, name: &str) -> Result<bool, ServiceError>;
}
