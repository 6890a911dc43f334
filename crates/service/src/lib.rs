//! Service layer for the medicine collection.
//! - `storage` holds the generic JSON document store with its single-writer lock.
//! - `file` binds that store to the medicine data file.
//! - `medicine` carries the business operations on top of a repository trait.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod medicine;
