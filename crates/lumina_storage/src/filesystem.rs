//! Filesystem-backed object store.
//!
//! Each scope is a directory under the base path and each key a file inside
//! it. Used when outputs are kept locally instead of in a bucket.

use async_trait::async_trait;
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use lumina_interface::ObjectStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem store.
///
/// ```text
/// output/
/// ├── insights/
/// │   └── topico_golpes_no_pix.md
/// └── pilulas/
///     └── pilula_golpes_no_pix.json
/// ```
///
/// Writes go through a temporary file and a rename, so readers never observe
/// a partially written object.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a filesystem store, creating the base directory if needed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> LuminaResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::ScopeCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn scope_path(&self, scope: &str) -> LuminaResult<PathBuf> {
        validate_component(scope)?;
        Ok(self.base_path.join(scope))
    }

    fn object_path(&self, scope: &str, key: &str) -> LuminaResult<PathBuf> {
        validate_component(key)?;
        Ok(self.scope_path(scope)?.join(key))
    }
}

/// Keys and scopes must be single path components.
fn validate_component(name: &str) -> LuminaResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(name.to_string())).into());
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for FileSystemStore {
    fn backend_name(&self) -> &'static str {
        "filesystem"
    }

    #[tracing::instrument(skip(self))]
    async fn ensure_scope(&self, scope: &str) -> LuminaResult<()> {
        let path = self.scope_path(scope)?;
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::ScopeCreation(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, scope: &str) -> LuminaResult<Vec<String>> {
        let path = self.scope_path(scope)?;
        let mut entries = match tokio::fs::read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(
                    StorageError::new(StorageErrorKind::ScopeNotFound(scope.to_string())).into(),
                );
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::List(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::List(e.to_string())))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            // Skip in-flight temporary files.
            if is_file && !name.starts_with(".tmp-") {
                keys.push(name);
            }
        }

        keys.sort();
        Ok(keys)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, scope: &str, key: &str) -> LuminaResult<Vec<u8>> {
        let path = self.object_path(scope, key)?;
        let data = tokio::fs::read(&path).await.map_err(|e| {
            let kind = if e.kind() == ErrorKind::NotFound {
                StorageErrorKind::ObjectNotFound {
                    scope: scope.to_string(),
                    key: key.to_string(),
                }
            } else {
                StorageErrorKind::Read(format!("{}: {}", path.display(), e))
            };
            StorageError::new(kind)
        })?;
        Ok(data)
    }

    #[tracing::instrument(skip(self, data, _content_type), fields(size = data.len()))]
    async fn put(
        &self,
        scope: &str,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> LuminaResult<()> {
        let path = self.object_path(scope, key)?;
        self.ensure_scope(scope).await?;

        let temp_path = self
            .scope_path(scope)?
            .join(format!(".tmp-{}", Uuid::new_v4()));
        tokio::fs::write(&temp_path, &data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!("{}: {}", path.display(), e)))
        })?;

        tracing::debug!(path = %path.display(), "Stored object");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn wipe(&self, scope: &str) -> LuminaResult<usize> {
        let keys = match self.list(scope).await {
            Ok(keys) => keys,
            Err(e) if e.is_missing_scope() => return Ok(0),
            Err(e) => return Err(e),
        };

        for key in &keys {
            let path = self.object_path(scope, key)?;
            tokio::fs::remove_file(&path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::Delete(format!("{}: {}", path.display(), e)))
            })?;
        }

        tracing::info!(scope, removed = keys.len(), "Wiped directory");
        Ok(keys.len())
    }
}
