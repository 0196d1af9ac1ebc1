pub mod analyzer;
pub mod config;
pub mod derived;
pub mod error;
pub mod fallback;
pub mod h2h;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod stats;
pub mod types;

pub use error::PredictError;
pub use orchestrator::Orchestrator;
