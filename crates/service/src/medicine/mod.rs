//! Medicine records, the catalog document, and the store seam the server talks to.

pub mod domain;
pub mod store;

pub use domain::{AveragePrice, Catalog, Medicine, Price, PriceSheet, NOT_FOUND_MESSAGE};
pub use store::MedicineStore;
