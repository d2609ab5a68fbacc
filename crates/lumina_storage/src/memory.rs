//! In-memory object store.

use async_trait::async_trait;
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use lumina_interface::ObjectStore;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: String,
}

/// Object store kept in process memory.
///
/// Scopes must be created with [`ObjectStore::ensure_scope`] (or implicitly
/// by `put`) before they can be listed, mirroring bucket semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scopes: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
}

impl MemoryStore {
    /// Empty store with no scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type an object was stored with.
    pub fn content_type(&self, scope: &str, key: &str) -> Option<String> {
        self.scopes
            .read()
            .ok()?
            .get(scope)?
            .get(key)
            .map(|object| object.content_type.clone())
    }

    /// Number of objects in a scope, zero when it does not exist.
    pub fn len(&self, scope: &str) -> usize {
        self.scopes
            .read()
            .map(|scopes| scopes.get(scope).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    /// True when the scope holds no objects.
    pub fn is_empty(&self, scope: &str) -> bool {
        self.len(scope) == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::new(StorageErrorKind::Unavailable("memory store lock poisoned".into()))
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ensure_scope(&self, scope: &str) -> LuminaResult<()> {
        let mut scopes = self.scopes.write().map_err(|_| poisoned())?;
        scopes.entry(scope.to_string()).or_default();
        Ok(())
    }

    async fn list(&self, scope: &str) -> LuminaResult<Vec<String>> {
        let scopes = self.scopes.read().map_err(|_| poisoned())?;
        let objects = scopes
            .get(scope)
            .ok_or_else(|| StorageError::new(StorageErrorKind::ScopeNotFound(scope.to_string())))?;
        Ok(objects.keys().cloned().collect())
    }

    async fn get(&self, scope: &str, key: &str) -> LuminaResult<Vec<u8>> {
        let scopes = self.scopes.read().map_err(|_| poisoned())?;
        scopes
            .get(scope)
            .and_then(|objects| objects.get(key))
            .map(|object| object.data.clone())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::ObjectNotFound {
                    scope: scope.to_string(),
                    key: key.to_string(),
                })
                .into()
            })
    }

    async fn put(
        &self,
        scope: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> LuminaResult<()> {
        let mut scopes = self.scopes.write().map_err(|_| poisoned())?;
        scopes.entry(scope.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn wipe(&self, scope: &str) -> LuminaResult<usize> {
        let mut scopes = self.scopes.write().map_err(|_| poisoned())?;
        Ok(scopes
            .get_mut(scope)
            .map(|objects| {
                let removed = objects.len();
                objects.clear();
                removed
            })
            .unwrap_or(0))
    }
}
