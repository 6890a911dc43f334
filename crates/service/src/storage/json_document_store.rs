use std::{
    ffi::OsString,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, error};

use crate::errors::ServiceError;

/// JSON document persisted as a single file and re-read on every access.
///
/// Nothing is cached between calls: `read` parses the file each time and
/// `update` runs a full read-modify-write. Readers share the lock, and an
/// update holds it exclusively for its whole cycle, so two updates never
/// interleave and readers never observe a half-applied one.
pub struct JsonDocumentStore<D> {
    lock: RwLock<()>,
    file_path: PathBuf,
    _doc: PhantomData<fn() -> D>,
}

impl<D> JsonDocumentStore<D>
where
    D: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { lock: RwLock::new(()), file_path: path.into(), _doc: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Write `seed` if the file does not exist yet. Returns whether it was created.
    pub async fn ensure_exists(&self, seed: &D) -> Result<bool, ServiceError> {
        let _guard = self.lock.write().await;
        match fs::try_exists(&self.file_path).await {
            Ok(true) => return Ok(false),
            Ok(false) => {}
            Err(e) => return Err(self.unavailable("stat", e)),
        }
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| self.unavailable("create dir", e))?;
            }
        }
        self.save(seed).await?;
        Ok(true)
    }

    /// Load the current document.
    pub async fn read(&self) -> Result<D, ServiceError> {
        let _guard = self.lock.read().await;
        self.load().await
    }

    /// Replace the document wholesale.
    pub async fn write(&self, doc: &D) -> Result<(), ServiceError> {
        let _guard = self.lock.write().await;
        self.save(doc).await
    }

    /// Exclusive read-modify-write. `f` returns `None` when it changed nothing,
    /// in which case the file is left untouched.
    pub async fn update<F, T>(&self, f: F) -> Result<Option<T>, ServiceError>
    where
        F: FnOnce(&mut D) -> Option<T>,
    {
        let _guard = self.lock.write().await;
        let mut doc = self.load().await?;
        match f(&mut doc) {
            Some(out) => {
                self.save(&doc).await?;
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }

    async fn load(&self) -> Result<D, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| self.unavailable("read", e))?;
        serde_json::from_slice(&bytes).map_err(|e| self.unavailable("parse", e))
    }

    // Write to a sibling temp file, then rename over the target.
    async fn save(&self, doc: &D) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| self.unavailable("serialize", e))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(|e| self.unavailable("write", e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.unavailable("rename", e));
        }
        debug!(path = %self.file_path.display(), "document saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    fn unavailable(&self, op: &str, e: impl std::fmt::Display) -> ServiceError {
        error!(path = %self.file_path.display(), op, error = %e, "data file unavailable");
        ServiceError::StorageUnavailable(format!("{op} {}: {e}", self.file_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    fn tmp_file() -> PathBuf {
        std::env::temp_dir().join(format!("json_document_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_is_storage_unavailable() {
        let store = JsonDocumentStore::<Doc>::new(tmp_file());
        assert!(matches!(store.read().await, Err(ServiceError::StorageUnavailable(_))));
        let res = store.update(|d| { d.items.push("x".into()); Some(()) }).await;
        assert!(matches!(res, Err(ServiceError::StorageUnavailable(_))));
        assert!(!fs::try_exists(store.path()).await.unwrap_or(true));
    }

    #[tokio::test]
    async fn malformed_file_is_storage_unavailable() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        fs::write(&path, b"{not json").await?;
        let store = JsonDocumentStore::<Doc>::new(&path);
        assert!(matches!(store.read().await, Err(ServiceError::StorageUnavailable(_))));
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_exists_seeds_once() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        let store = JsonDocumentStore::<Doc>::new(&path);
        assert!(store.ensure_exists(&Doc::default()).await?);
        store.write(&Doc { items: vec!["kept".into()] }).await?;
        assert!(!store.ensure_exists(&Doc::default()).await?);
        assert_eq!(store.read().await?.items, vec!["kept".to_string()]);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_persists_only_when_changed() -> Result<(), anyhow::Error> {
        let path = tmp_file();
        let store = JsonDocumentStore::<Doc>::new(&path);
        store.write(&Doc { items: vec!["a".into()] }).await?;

        let added = store.update(|d| { d.items.push("b".into()); Some(d.items.len()) }).await?;
        assert_eq!(added, Some(2));

        // an unchanged update must not touch the file, even if the closure mutated the copy
        let skipped: Option<()> = store.update(|d| { d.items.clear(); None }).await?;
        assert_eq!(skipped, None);

        let reloaded = JsonDocumentStore::<Doc>::new(&path).read().await?;
        assert_eq!(reloaded.items, vec!["a".to_string(), "b".to_string()]);
        assert!(!fs::try_exists(store.tmp_path()).await?);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_exists_reports_unreadable_location() -> Result<(), anyhow::Error> {
        let parent = tmp_file();
        fs::write(&parent, b"not a directory").await?;
        let store = JsonDocumentStore::<Doc>::new(parent.join("data.json"));
        let res = store.ensure_exists(&Doc::default()).await;
        assert!(matches!(res, Err(ServiceError::StorageUnavailable(_))));
        let _ = fs::remove_file(&parent).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() -> Result<(), anyhow::Error> {
        // a directory at the target path makes the rename fail after the temp write
        let path = tmp_file();
        fs::create_dir(&path).await?;
        let store = JsonDocumentStore::<Doc>::new(&path);
        let res = store.write(&Doc { items: vec!["lost".into()] }).await;
        assert!(matches!(res, Err(ServiceError::StorageUnavailable(_))));
        assert!(!fs::try_exists(store.tmp_path()).await?);
        let _ = fs::remove_dir(&path).await;
        Ok(())
    }
}
