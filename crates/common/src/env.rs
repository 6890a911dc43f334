//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the directory holding `data_file` exists; warn when an optional
/// static assets directory is configured but missing.
pub async fn ensure_env(static_dir: Option<&str>, data_file: &str) -> anyhow::Result<()> {
    if let Some(dir) = static_dir {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(static_dir = %dir, "static assets directory not found; static assets may 404");
        }
    }
    if let Some(parent) = Path::new(data_file).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
