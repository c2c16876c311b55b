pub mod medicine_store;
