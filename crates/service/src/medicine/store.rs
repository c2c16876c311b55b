use crate::errors::ServiceError;
use crate::medicine::domain::{AveragePrice, Catalog, Medicine};
use async_trait::async_trait;

/// Trait abstraction for medicine persistence.
/// Lookups, updates and deletes act on the first record with an exactly matching name.
#[async_trait]
pub trait MedicineStore: Send + Sync {
    async fn list_all(&self) -> Result<Catalog, ServiceError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Medicine>, ServiceError>;
    async fn create(&self, name: String, price: f64) -> Result<Medicine, ServiceError>;
    /// Returns `false` (and writes nothing) when no record matches.
    async fn update(&self, name: &str, price: f64) -> Result<bool, ServiceError>;
    /// Returns `false` (and writes nothing) when no record matches.
    async fn delete(&self, name: &str) -> Result<bool, ServiceError>;
    async fn average_price(&self) -> Result<AveragePrice, ServiceError>;
}
