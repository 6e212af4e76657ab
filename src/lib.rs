pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod food;
pub mod http;
pub mod medicine;
pub mod pipeline;
pub mod providers;
pub mod records;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use config::AppConfig;
pub use error::{Lookup, PipelineError, Service};
pub use pipeline::Pipeline;
pub use records::{AnalysisOutcome, AnalysisResult, CanonicalRecord, PipelineResult};
