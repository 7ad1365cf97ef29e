// file: src/models/descriptor.rs
// description: repository descriptor record stored in the catalog
// reference: internal data structures

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    #[default]
    Unknown,
    Success,
    Failed,
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BuildStatus::Unknown => "UNKNOWN",
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Failed => "FAILED",
        };
        f.write_str(label)
    }
}

/// Number of discovered build outputs per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactCounts {
    pub executables: u32,
    pub libraries: u32,
    pub archives: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDescriptor {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub owner: String,
    pub name: String,
    pub clone_url: String,
    pub latest_commit_id: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub build_status: BuildStatus,
    #[serde(default)]
    pub executables: u32,
    #[serde(default)]
    pub libraries: u32,
    #[serde(default)]
    pub archives: u32,
    #[serde(default)]
    pub package_dependencies: Vec<String>,
    #[serde(default, rename = "errorMessage", alias = "errorMessages")]
    pub error_messages: Vec<String>,
    /// Catalog keys this crate does not interpret, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepositoryDescriptor {
    pub fn new(
        name: impl Into<String>,
        clone_url: impl Into<String>,
        latest_commit_id: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            owner: String::new(),
            name: name.into(),
            clone_url: clone_url.into(),
            latest_commit_id: latest_commit_id.into(),
            size: 0,
            build_status: BuildStatus::Unknown,
            executables: 0,
            libraries: 0,
            archives: 0,
            package_dependencies: Vec::new(),
            error_messages: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn set_artifact_counts(&mut self, counts: ArtifactCounts) {
        self.executables = counts.executables;
        self.libraries = counts.libraries;
        self.archives = counts.archives;
    }

    pub fn artifact_counts(&self) -> ArtifactCounts {
        ArtifactCounts {
            executables: self.executables,
            libraries: self.libraries,
            archives: self.archives,
        }
    }
}
