// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod commands;
pub mod context;
pub mod extraction;
pub mod orchestrator;
pub mod report;

pub use commands::CommandFactory;
pub use context::{DEPENDENCY_MARKER, RunContext};
pub use extraction::BitcodeExtractor;
pub use orchestrator::PipelineOrchestrator;
pub use report::{AnalysisOutcome, RunReport};
