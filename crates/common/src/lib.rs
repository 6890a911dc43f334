//! Shared helpers used by every crate in the workspace: logging setup,
//! startup environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
