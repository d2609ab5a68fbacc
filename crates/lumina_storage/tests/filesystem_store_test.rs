//! Tests for the filesystem object store.

use lumina_storage::{FileSystemStore, ObjectStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_put_get_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    store
        .put("insights", "topico_b.md", b"# B".to_vec(), "text/markdown")
        .await
        .unwrap();
    store
        .put("insights", "topico_a.md", b"# A".to_vec(), "text/markdown")
        .await
        .unwrap();

    assert_eq!(store.get("insights", "topico_a.md").await.unwrap(), b"# A");
    assert_eq!(
        store.list("insights").await.unwrap(),
        vec!["topico_a.md".to_string(), "topico_b.md".to_string()]
    );
    assert_eq!(store.get_text("insights", "topico_b.md").await.unwrap(), "# B");
}

#[tokio::test]
async fn test_put_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    store.put("s", "k.md", b"one".to_vec(), "text/plain").await.unwrap();
    store.put("s", "k.md", b"two".to_vec(), "text/plain").await.unwrap();

    assert_eq!(store.get("s", "k.md").await.unwrap(), b"two");
    assert_eq!(store.list("s").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_scope_and_object() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let err = store.list("nowhere").await.unwrap_err();
    assert!(err.is_missing_scope());

    store.ensure_scope("roteiros").await.unwrap();
    assert!(store.list("roteiros").await.unwrap().is_empty());

    let err = store.get("roteiros", "absent.md").await.unwrap_err();
    assert!(err.is_missing_object());
}

#[tokio::test]
async fn test_rejects_path_traversal() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    assert!(store.put("s", "../escape.md", vec![], "text/plain").await.is_err());
    assert!(store.put("..", "k.md", vec![], "text/plain").await.is_err());
}

#[tokio::test]
async fn test_wipe_removes_everything() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    for key in ["a.md", "b.md", "c.md"] {
        store.put("insights", key, b"x".to_vec(), "text/plain").await.unwrap();
    }

    assert_eq!(store.wipe("insights").await.unwrap(), 3);
    assert!(store.list("insights").await.unwrap().is_empty());
    assert_eq!(store.wipe("never_created").await.unwrap(), 0);
}
