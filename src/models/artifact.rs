// file: src/models/artifact.rs
// description: build artifacts discovered after compilation and their IR outputs

use std::fmt;
use std::path::{Path, PathBuf};

/// Category of a build output, fixed by the destination directory it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Executable,
    Library,
    Archive,
}

impl ArtifactKind {
    /// Processing order of the extraction loops.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Executable,
        ArtifactKind::Library,
        ArtifactKind::Archive,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Executable => "exe",
            ArtifactKind::Library => "lib",
            ArtifactKind::Archive => "ar",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Executable => "EXECUTABLE",
            ArtifactKind::Library => "LIBRARY",
            ArtifactKind::Archive => "ARCHIVE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn bitcode_file_name(&self) -> String {
        format!("{}.bc", self.file_name())
    }

    pub fn ir_path(&self) -> PathBuf {
        self.directory().join(format!("{}.ll", self.file_name()))
    }
}

/// A disassembled IR file ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrFile {
    pub path: PathBuf,
    /// Path relative to the repository checkout, e.g. `buildDest/exe/app.ll`.
    pub relative_path: PathBuf,
}
