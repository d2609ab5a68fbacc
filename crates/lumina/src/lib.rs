//! Lumina turns scraped educational pages into insights, video scripts,
//! knowledge pills and multi-scene videos.
//!
//! The work is split across focused crates, re-exported here:
//!
//! - `lumina_error` - Error types
//! - `lumina_core` - Data model, key derivation and output naming
//! - `lumina_interface` - Capability traits for providers and stores
//! - `lumina_storage` - Object stores, existing-output index, source lists
//! - `lumina_models` - Gemini, OpenAI-compatible, Imagen and Veo clients
//! - `lumina_pipeline` - Per-item processors and the fan-out/fan-in orchestrator
//! - `lumina_video` - Scene parser and the video extension state machine
//!
//! This crate adds configuration, logging setup, the stage runners and
//! three binaries: `lumina-scraper`, `lumina-video` and `lumina-pills`.
//!
//! # Cargo Features
//!
//! - `gemini` - Google Gemini text generation (default)
//! - `observability` - OpenTelemetry stdout tracer layer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod config;
mod observability;
mod stages;

pub use cli::{cancel_on_ctrl_c, report_preflight};
pub use config::LuminaConfig;
pub use observability::{ObservabilityConfig, init_observability};
pub use stages::{NoInfographics, open_store, run_insights, run_pills, run_scripts, run_videos};

pub use lumina_core::*;
pub use lumina_error::*;
pub use lumina_interface::*;
pub use lumina_models::*;
pub use lumina_pipeline::*;
pub use lumina_storage::*;
pub use lumina_video::*;
