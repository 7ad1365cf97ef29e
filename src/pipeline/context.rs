// file: src/pipeline/context.rs
// description: run state accumulated across all stages of one pipeline run

use crate::models::BuildStatus;

/// Line fragment the package manager prints for every fetched package.
pub const DEPENDENCY_MARKER: &str = "Downloaded recipe";

/// Append-only dependency names and error messages plus the local build flag.
#[derive(Debug, Default)]
pub struct RunContext {
    dependencies: Vec<String>,
    errors: Vec<String>,
    build_status: BuildStatus,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects an output line for a fetched package.
    pub fn observe_output(&mut self, line: &str) {
        if let Some(dependency) = dependency_name(line) {
            self.dependencies.push(dependency);
        }
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn mark_build_succeeded(&mut self) {
        self.build_status = BuildStatus::Success;
    }

    pub fn build_succeeded(&self) -> bool {
        self.build_status == BuildStatus::Success
    }

    pub fn build_status(&self) -> BuildStatus {
        self.build_status
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.dependencies, self.errors)
    }
}

fn dependency_name(line: &str) -> Option<String> {
    if !line.contains(DEPENDENCY_MARKER) {
        return None;
    }

    let name = match line.find(':') {
        Some(colon) => &line[..colon],
        None => line,
    };
    Some(name.trim().to_string())
}
