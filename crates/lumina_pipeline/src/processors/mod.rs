//! Processor variants for each generated artifact.

mod insight;
mod pill;
mod script;

pub use insight::InsightProcessor;
pub use pill::PillProcessor;
pub use script::ScriptProcessor;
