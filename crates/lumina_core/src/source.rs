//! Source items consumed by a pipeline run.

use serde::{Deserialize, Serialize};

/// Where the raw content of a source item lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "data")]
pub enum SourceHandle {
    /// Web page to fetch and extract
    #[display("{}", _0)]
    Url(String),
    /// Document already persisted in an object-store scope
    #[display("{}/{}", scope, key)]
    Stored {
        /// Scope holding the document
        scope: String,
        /// Document key within the scope
        key: String,
    },
}

/// One unit of raw input, with its position in the enumeration.
///
/// # Examples
///
/// ```
/// use lumina_core::{SourceHandle, SourceItem};
///
/// let item = SourceItem::new(1, SourceHandle::Url("https://example.org".into()));
/// assert_eq!(item.ordinal(), &1);
/// assert_eq!(item.to_string(), "https://example.org");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{}", handle)]
pub struct SourceItem {
    /// 1-based position in the enumeration
    ordinal: usize,
    /// Content handle
    handle: SourceHandle,
}

impl SourceItem {
    /// Create a source item.
    pub fn new(ordinal: usize, handle: SourceHandle) -> Self {
        Self { ordinal, handle }
    }

    /// Key of a stored document, if the item refers to one.
    pub fn stored_key(&self) -> Option<&str> {
        match &self.handle {
            SourceHandle::Stored { key, .. } => Some(key),
            SourceHandle::Url(_) => None,
        }
    }
}
