//! Tests for the existing-output index.

use async_trait::async_trait;
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use lumina_storage::{ExistingOutputIndex, MemoryStore, ObjectStore};

/// Store whose listing always fails with a non-missing-scope error.
struct UnreachableStore;

#[async_trait]
impl ObjectStore for UnreachableStore {
    fn backend_name(&self) -> &'static str {
        "unreachable"
    }

    async fn ensure_scope(&self, _scope: &str) -> LuminaResult<()> {
        Ok(())
    }

    async fn list(&self, scope: &str) -> LuminaResult<Vec<String>> {
        Err(StorageError::new(StorageErrorKind::Unavailable(scope.to_string())).into())
    }

    async fn get(&self, scope: &str, key: &str) -> LuminaResult<Vec<u8>> {
        Err(StorageError::new(StorageErrorKind::ObjectNotFound {
            scope: scope.to_string(),
            key: key.to_string(),
        })
        .into())
    }

    async fn put(&self, _: &str, _: &str, _: Vec<u8>, _: &str) -> LuminaResult<()> {
        Ok(())
    }

    async fn wipe(&self, _scope: &str) -> LuminaResult<usize> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_index_lists_existing_keys() {
    let store = MemoryStore::new();
    store
        .put("pilulas", "pilula_pix.json", b"{}".to_vec(), "application/json")
        .await
        .unwrap();

    let index = ExistingOutputIndex::load(&store, "pilulas").await;
    assert_eq!(index.len(), 1);
    assert!(index.contains("pilula_pix.json"));
    assert!(!index.contains("pilula_senhas.json"));
}

#[tokio::test]
async fn test_missing_scope_yields_empty_index() {
    let store = MemoryStore::new();
    let index = ExistingOutputIndex::load(&store, "roteiros").await;
    assert!(index.is_empty());
}

#[tokio::test]
async fn test_listing_failure_fails_open() {
    let index = ExistingOutputIndex::load(&UnreachableStore, "insights").await;
    assert!(index.is_empty());
}

#[tokio::test]
async fn test_index_is_a_snapshot() {
    let store = MemoryStore::new();
    store.ensure_scope("insights").await.unwrap();
    let index = ExistingOutputIndex::load(&store, "insights").await;

    store
        .put("insights", "topico_new.md", b"# New".to_vec(), "text/markdown")
        .await
        .unwrap();

    assert!(!index.contains("topico_new.md"));
    assert!(ExistingOutputIndex::load(&store, "insights").await.contains("topico_new.md"));
}
