// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};

pub struct Validator;

impl Validator {
    /// The repository name becomes a directory under the shared working root and is
    /// removed recursively during cleanup, so it must be one plain path component.
    pub fn validate_repository_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Repository name is empty".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(PipelineError::Validation(format!(
                "Repository name is not a directory name: {}",
                name
            )));
        }

        if name.contains(['/', '\\', '\0']) {
            return Err(PipelineError::Validation(format!(
                "Repository name must not contain path separators: {}",
                name
            )));
        }

        Ok(())
    }
}
