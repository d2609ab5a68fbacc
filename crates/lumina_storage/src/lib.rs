//! Object storage and source enumeration for Lumina.
//!
//! Three [`ObjectStore`] backends share one contract:
//!
//! - [`S3ObjectStore`]: S3-compatible buckets (MinIO in production)
//! - [`FileSystemStore`]: one directory per scope under a base path
//! - [`MemoryStore`]: process-local maps, for tests and dry runs
//!
//! On top of them sit the [`ExistingOutputIndex`] used to compute a run's
//! backlog and the enumerators that turn a URL list or a stored scope into
//! source items.
//!
//! # Example
//!
//! ```rust
//! use lumina_interface::ObjectStore;
//! use lumina_storage::{ExistingOutputIndex, MemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! store.ensure_scope("insights").await?;
//! store
//!     .put("insights", "topico_pix.md", b"# Pix".to_vec(), "text/markdown")
//!     .await?;
//!
//! let index = ExistingOutputIndex::load(&store, "insights").await;
//! assert!(index.contains("topico_pix.md"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod index;
mod memory;
mod s3;
mod sources;

pub use filesystem::FileSystemStore;
pub use index::ExistingOutputIndex;
pub use lumina_error::{StorageError, StorageErrorKind};
pub use lumina_interface::ObjectStore;
pub use memory::MemoryStore;
pub use s3::{S3ObjectStore, S3StoreConfig, S3StoreConfigBuilder};
pub use sources::{StoredDocumentSource, UrlListSource, parse_url_list};
