//! Error types for the Lumina content pipeline.
//!
//! Every concern gets an `ErrorKind` enum plus a wrapper struct that records
//! where the error was raised:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use lumina_error::{LuminaResult, HttpError};
//!
//! fn fetch_page() -> LuminaResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_page() {
//!     Ok(page) => println!("Got: {}", page),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod generation;
mod message;
mod pipeline;
mod storage;
mod video;

pub use error::{LuminaError, LuminaErrorKind, LuminaResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use message::{ConfigError, HttpError, JsonError};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use video::{VideoError, VideoErrorKind};
