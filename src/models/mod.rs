// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod artifact;
pub mod descriptor;

pub use artifact::{Artifact, ArtifactKind, IrFile};
pub use descriptor::{ArtifactCounts, BuildStatus, RepositoryDescriptor};
