//! Storage abstractions for service layer
//!
//! File-backed helpers that persist one JSON document per file and
//! re-read it on every access instead of caching it in memory.

pub mod json_document_store;
