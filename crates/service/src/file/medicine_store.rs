use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::errors::ServiceError;
use crate::medicine::domain::{AveragePrice, Catalog, Medicine, Price, PriceSheet};
use crate::medicine::store::MedicineStore;
use crate::storage::json_document_store::{JsonDocumentStore, Mutation};

/// File-backed medicine store.
/// Every call re-reads the JSON document; writes rewrite it whole.
#[derive(Clone)]
pub struct FileMedicineStore {
    doc: Arc<JsonDocumentStore>,
}

impl FileMedicineStore {
    /// Point the store at the data file. The file is expected to exist already.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { doc: JsonDocumentStore::new(path) })
    }

    /// Write an empty catalog if the data file is absent; returns whether it did.
    pub async fn seed_if_missing(&self) -> Result<bool, ServiceError> {
        let seeded = self.doc.seed_if_missing(&Catalog::default()).await?;
        if seeded {
            info!(path = %self.doc.path().display(), "seeded empty medicines document");
        }
        Ok(seeded)
    }

    /// Full document as stored, whatever its records look like.
    pub async fn list_all(&self) -> Result<Catalog, ServiceError> {
        self.doc.load().await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Medicine>, ServiceError> {
        let catalog: Catalog = self.doc.load().await?;
        catalog.find(name)
    }

    /// Append a new record. No duplicate check.
    pub async fn create(&self, name: String, price: f64) -> Result<Medicine, ServiceError> {
        let med = Medicine::new(name, Price::from_f64(price)?);
        let created = med.clone();
        self.doc
            .modify(|catalog: &mut Catalog| {
                catalog.append(med)?;
                Ok(Mutation::Commit(()))
            })
            .await?;
        info!(name = %created.name, price, "medicine created");
        Ok(created)
    }

    /// Change the price of the first matching record.
    pub async fn update(&self, name: &str, price: f64) -> Result<bool, ServiceError> {
        let price = Price::from_f64(price)?;
        let updated = self
            .doc
            .modify(|catalog: &mut Catalog| {
                Ok(if catalog.reprice_first(name, price)? {
                    Mutation::Commit(true)
                } else {
                    Mutation::Discard(false)
                })
            })
            .await?;
        if updated {
            info!(%name, "medicine updated");
        }
        Ok(updated)
    }

    /// Remove the first matching record.
    pub async fn delete(&self, name: &str) -> Result<bool, ServiceError> {
        let deleted = self
            .doc
            .modify(|catalog: &mut Catalog| {
                Ok(match catalog.remove_first(name)? {
                    Some(_) => Mutation::Commit(true),
                    None => Mutation::Discard(false),
                })
            })
            .await?;
        if deleted {
            info!(%name, "medicine deleted");
        }
        Ok(deleted)
    }

    pub async fn average_price(&self) -> Result<AveragePrice, ServiceError> {
        let sheet: PriceSheet = self.doc.load().await?;
        Ok(sheet.average())
    }
}

#[async_trait::async_trait]
impl MedicineStore for FileMedicineStore {
    async fn list_all(&self) -> Result<Catalog, ServiceError> { self.list_all().await }
    async fn get_by_name(&self, name: &str) -> Result<Option<Medicine>, ServiceError> { self.get_by_name(name).await }
    async fn create(&self, name: String, price: f64) -> Result<Medicine, ServiceError> { self.create(name, price).await }
    async fn update(&self, name: &str, price: f64) -> Result<bool, ServiceError> { self.update(name, price).await }
    async fn delete(&self, name: &str) -> Result<bool, ServiceError> { self.delete(name).await }
    async fn average_price(&self) -> Result<AveragePrice, ServiceError> { self.average_price().await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use uuid::Uuid;

    async fn store_with(doc: Value) -> Result<(Arc<FileMedicineStore>, PathBuf), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_medicines_{}.json", Uuid::new_v4()));
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&doc)?).await?;
        Ok((FileMedicineStore::new(&tmp), tmp))
    }

    async fn document(path: &PathBuf) -> Result<Value, anyhow::Error> {
        Ok(serde_json::from_slice(&tokio::fs::read(path).await?)?)
    }

    #[tokio::test]
    async fn medicine_store_crud_persists() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": [{"name": "Aspirin", "price": 4.5}]})).await?;

        // create then get
        store.create("Ibuprofen".into(), 6.25).await?;
        let found = store.get_by_name("Ibuprofen").await?.expect("created");
        assert_eq!(serde_json::to_value(&found)?, json!({"name": "Ibuprofen", "price": 6.25}));

        // update only touches that entry
        assert!(store.update("Ibuprofen", 7.0).await?);
        assert_eq!(
            store.list_all().await?.as_value(),
            &json!({"medicines": [{"name": "Aspirin", "price": 4.5}, {"name": "Ibuprofen", "price": 7.0}]})
        );

        // delete removes exactly one
        assert!(store.delete("Ibuprofen").await?);
        assert!(store.get_by_name("Ibuprofen").await?.is_none());
        assert_eq!(store.list_all().await?.medicines()?.len(), 1);

        // a fresh handle sees the same document
        let reopened = FileMedicineStore::new(&tmp);
        assert_eq!(reopened.list_all().await?, store.list_all().await?);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn misses_do_not_touch_the_file() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": [{"name": "Aspirin", "price": 4.5}]})).await?;
        let before = tokio::fs::read(&tmp).await?;

        assert!(store.get_by_name("Paracetamol").await?.is_none());
        assert!(!store.update("Paracetamol", 1.0).await?);
        assert!(!store.delete("Paracetamol").await?);

        assert_eq!(tokio::fs::read(&tmp).await?, before);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_names_affect_first_only() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": [
            {"name": "dup", "price": 1},
            {"name": "dup", "price": 2}
        ]}))
        .await?;

        store.create("dup".into(), 3.0).await?;
        assert!(store.update("dup", 10.0).await?);
        assert_eq!(
            document(&tmp).await?,
            json!({"medicines": [
                {"name": "dup", "price": 10.0},
                {"name": "dup", "price": 2},
                {"name": "dup", "price": 3.0}
            ]})
        );

        assert!(store.delete("dup").await?);
        let first = store.get_by_name("dup").await?.expect("second remains");
        assert_eq!(first.price.as_ref().and_then(Price::as_f64), Some(2.0));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn records_without_string_names_are_carried_along() -> Result<(), anyhow::Error> {
        let raw = json!({"medicines": [
            {"name": "a", "price": 1},
            {"price": 2},
            {"name": 7, "price": 3}
        ]});
        let (store, tmp) = store_with(raw.clone()).await?;

        // listing is verbatim
        assert_eq!(store.list_all().await?.as_value(), &raw);

        // a match before the nameless record is still found
        let a = store.get_by_name("a").await?.expect("a");
        assert_eq!(serde_json::to_value(&a)?, json!({"name": "a", "price": 1}));
        assert!(store.update("a", 1.5).await?);

        // create appends after whatever is already there
        store.create("z".into(), 1.0).await?;
        assert_eq!(
            document(&tmp).await?,
            json!({"medicines": [
                {"name": "a", "price": 1.5},
                {"price": 2},
                {"name": 7, "price": 3},
                {"name": "z", "price": 1.0}
            ]})
        );

        // a scan that has to pass the nameless record fails without writing
        let before = tokio::fs::read(&tmp).await?;
        assert!(matches!(store.get_by_name("z").await, Err(ServiceError::BadRecord(_))));
        assert!(matches!(store.delete("z").await, Err(ServiceError::BadRecord(_))));
        assert_eq!(tokio::fs::read(&tmp).await?, before);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn average_tolerates_bad_records() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": [
            {"name": "a", "price": 10},
            {"name": "b", "price": 20},
            {"name": "c", "price": "bad"},
            {"price": 5}
        ]}))
        .await?;

        let avg = store.average_price().await?;
        assert_eq!(avg, AveragePrice { average_price: Some(11.67), count: 3 });

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn average_rounds_ties_to_even() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": [
            {"name": "a", "price": 0.25},
            {"name": "b", "price": 0}
        ]}))
        .await?;

        assert_eq!(store.average_price().await?, AveragePrice { average_price: Some(0.12), count: 2 });

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_an_error_until_seeded() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_medicines_seed_{}.json", Uuid::new_v4()));
        let store = FileMedicineStore::new(&tmp);

        assert!(matches!(store.list_all().await, Err(ServiceError::Io(_))));
        assert!(matches!(store.create("x".into(), 1.0).await, Err(ServiceError::Io(_))));

        assert!(store.seed_if_missing().await?);
        assert_eq!(serde_json::to_value(store.list_all().await?)?, json!({"medicines": []}));
        assert_eq!(store.average_price().await?, AveragePrice { average_price: None, count: 0 });

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn non_finite_price_is_a_validation_error() -> Result<(), anyhow::Error> {
        let (store, tmp) = store_with(json!({"medicines": []})).await?;
        assert!(matches!(store.create("x".into(), f64::NAN).await, Err(ServiceError::Validation(_))));
        assert!(store.list_all().await?.medicines()?.is_empty());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
