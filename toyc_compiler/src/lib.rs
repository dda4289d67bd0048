// Internal modules
#[macro_use]
pub mod logging;
pub mod comments;
pub mod config;
pub mod cst;
pub mod file_processor;
pub mod lexical;
pub mod pipeline;
pub mod report;
pub mod symbols;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{PipelineError, PipelineResult};
