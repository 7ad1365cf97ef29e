// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod process;
pub mod repository;
pub mod utils;

pub use catalog::CatalogStore;
pub use config::{Config, PathsConfig, ToolchainConfig, ToolsConfig};
pub use error::{PipelineError, Result};
pub use models::{Artifact, ArtifactKind, BuildStatus, IrFile, RepositoryDescriptor};
pub use pipeline::{PipelineOrchestrator, RunContext, RunReport};
pub use process::{CommandRunner, ProcessShim, ToolCommand};
pub use repository::{ArtifactInventory, ArtifactScanner, Workspace};
pub use utils::{StageTimer, Validator};

