// file: src/repository/workspace.rs
// description: filesystem layout of one repository run under the shared working root

use crate::models::ArtifactKind;
use std::path::{Path, PathBuf};

pub const BUILD_DIR: &str = "build";
pub const DEST_DIR: &str = "buildDest";

/// `<root>/<name>/` checkout, `build/` directory and `buildDest/{exe,lib,ar}/` destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    checkout: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, repository_name: &str) -> Self {
        let root = root.into();
        let checkout = root.join(repository_name);
        Self { root, checkout }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn checkout(&self) -> &Path {
        &self.checkout
    }

    pub fn build_dir(&self) -> PathBuf {
        self.checkout.join(BUILD_DIR)
    }

    pub fn dest_root(&self) -> PathBuf {
        self.checkout.join(DEST_DIR)
    }

    pub fn dest_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.dest_root().join(kind.dir_name())
    }

    /// Path relative to the checkout, or the path itself when it lies elsewhere.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.checkout).unwrap_or(path)
    }
}
