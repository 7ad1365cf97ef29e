// file: src/repository/scanner.rs
// description: discovery of build artifacts in the destination directories
// reference: https://docs.rs/walkdir

use super::workspace::Workspace;
use crate::models::{Artifact, ArtifactCounts, ArtifactKind};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Artifacts found after a successful build, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactInventory {
    pub executables: Vec<Artifact>,
    pub libraries: Vec<Artifact>,
    pub archives: Vec<Artifact>,
}

impl ArtifactInventory {
    pub fn of_kind(&self, kind: ArtifactKind) -> &[Artifact] {
        match kind {
            ArtifactKind::Executable => &self.executables,
            ArtifactKind::Library => &self.libraries,
            ArtifactKind::Archive => &self.archives,
        }
    }

    pub fn counts(&self) -> ArtifactCounts {
        ArtifactCounts {
            executables: self.executables.len() as u32,
            libraries: self.libraries.len() as u32,
            archives: self.archives.len() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.executables.is_empty() && self.libraries.is_empty() && self.archives.is_empty()
    }

    /// Executables, then libraries, then archives.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        ArtifactKind::ALL
            .into_iter()
            .flat_map(move |kind| self.of_kind(kind).iter())
    }
}

pub struct ArtifactScanner;

impl ArtifactScanner {
    pub fn scan(workspace: &Workspace) -> ArtifactInventory {
        let inventory = ArtifactInventory {
            executables: Self::scan_kind(workspace, ArtifactKind::Executable),
            libraries: Self::scan_kind(workspace, ArtifactKind::Library),
            archives: Self::scan_kind(workspace, ArtifactKind::Archive),
        };

        let counts = inventory.counts();
        info!(
            "Build summary: {} Executables {} Libraries {} Archives",
            counts.executables, counts.libraries, counts.archives
        );
        inventory
    }

    /// Regular files directly inside the category directory, sorted by name.
    pub fn scan_kind(workspace: &Workspace, kind: ArtifactKind) -> Vec<Artifact> {
        let dir = workspace.dest_dir(kind);
        let mut artifacts: Vec<Artifact> = list_files(&dir)
            .into_iter()
            .map(|path| Artifact::new(kind, path))
            .collect();
        artifacts.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Found {} {} artifacts in {}", artifacts.len(), kind, dir.display());
        artifacts
    }
}

fn list_files(dir: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
