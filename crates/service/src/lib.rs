//! Service layer for the medicine store.
//! - `medicine` holds the domain types, first-match catalog operations and the store trait.
//! - `storage` persists whole JSON documents with a guarded read-modify-write cycle.
//! - `file` wires the two together into the file-backed store used by the server.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod medicine;
pub mod file;
