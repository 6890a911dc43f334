//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data file directory exists; warn on a missing static directory.
pub async fn ensure_env(static_dir: Option<&str>, data_file: &str) -> anyhow::Result<()> {
    common::env::ensure_env(static_dir, data_file).await
}
