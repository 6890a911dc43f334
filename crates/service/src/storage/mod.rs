//! Storage abstractions for service layer
//!
//! Contains the file-backed JSON document store shared by the file
//! repositories.

pub mod json_document_store;
