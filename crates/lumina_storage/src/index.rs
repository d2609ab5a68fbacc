//! Index of outputs that already exist in a scope.

use lumina_interface::ObjectStore;
use std::collections::HashSet;
use tracing::{info, warn};

/// Keys already persisted in a scope, captured once at the start of a run.
///
/// The index is read-only after construction, so artifacts written during
/// the run are not visible to it. Loading never fails: a missing scope means
/// nothing exists yet, and any other listing failure is logged and treated
/// the same way, so the run redoes work rather than skipping it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingOutputIndex {
    keys: HashSet<String>,
}

impl ExistingOutputIndex {
    /// List the scope and capture its keys.
    #[tracing::instrument(skip(store), fields(backend = store.backend_name()))]
    pub async fn load(store: &dyn ObjectStore, scope: &str) -> Self {
        match store.list(scope).await {
            Ok(keys) => {
                info!(scope, existing = keys.len(), "Loaded existing outputs");
                Self::from_keys(keys)
            }
            Err(e) if e.is_missing_scope() => {
                info!(scope, "Scope does not exist yet; assuming no existing outputs");
                Self::default()
            }
            Err(e) => {
                warn!(
                    scope,
                    error = %e,
                    "Failed to list existing outputs; assuming none exist"
                );
                Self::default()
            }
        }
    }

    /// Build an index from known keys.
    pub fn from_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Whether the key already exists.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of existing keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when nothing exists.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
