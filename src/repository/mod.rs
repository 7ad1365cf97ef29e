// file: src/repository/mod.rs
// description: Repository workspace and artifact discovery exports
// reference: Internal module structure

pub mod scanner;
pub mod workspace;

pub use scanner::{ArtifactInventory, ArtifactScanner};
pub use workspace::Workspace;
