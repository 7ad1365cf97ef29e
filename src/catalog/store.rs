// file: src/catalog/store.rs
// description: JSON-array backed repository catalog addressed by index
// reference: metadata persistence with tokio::fs

use crate::error::{PipelineError, Result};
use crate::models::RepositoryDescriptor;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Reads descriptors from the catalog file and writes updated ones to the results file.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog_path: PathBuf,
    result_path: PathBuf,
}

impl CatalogStore {
    pub fn new(catalog_path: impl Into<PathBuf>, result_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            result_path: result_path.into(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    pub async fn load(&self, index: usize) -> Result<RepositoryDescriptor> {
        let mut entries = read_entries(&self.catalog_path).await?;
        let len = entries.len();
        if index >= len {
            return Err(PipelineError::OutOfRange { index, len });
        }

        let entry = entries.swap_remove(index);
        let descriptor = serde_json::from_value(entry).map_err(|e| {
            PipelineError::Catalog(format!(
                "Entry {} of {} is not a repository descriptor: {}",
                index,
                self.catalog_path.display(),
                e
            ))
        })?;

        debug!("Loaded descriptor {} from {:?}", index, self.catalog_path);
        Ok(descriptor)
    }

    /// Overwrites entry `index` of the results file. Entries the results file does not
    /// have yet, including all of them on first use, are taken from the catalog.
    pub async fn store(&self, index: usize, descriptor: &RepositoryDescriptor) -> Result<()> {
        let mut entries = if fs::try_exists(&self.result_path).await? {
            read_entries(&self.result_path).await?
        } else {
            Vec::new()
        };

        if entries.len() <= index {
            let catalog = read_entries(&self.catalog_path).await?;
            let len = catalog.len();
            if index >= len {
                return Err(PipelineError::OutOfRange { index, len });
            }
            let known = entries.len();
            debug!(
                "Extending {:?} with catalog entries {}..{}",
                self.result_path, known, len
            );
            entries.extend(catalog.into_iter().skip(known));
        }

        entries[index] = serde_json::to_value(descriptor)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;

        let contents = serde_json::to_string_pretty(&entries)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;

        let staging = self.result_path.with_extension("json.tmp");
        fs::write(&staging, contents)
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: staging.clone(),
                source,
            })?;
        fs::rename(&staging, &self.result_path)
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: self.result_path.clone(),
                source,
            })?;

        info!(
            "Stored descriptor {} ({}) in {:?}",
            index, descriptor.name, self.result_path
        );
        Ok(())
    }
}

async fn read_entries(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&contents).map_err(|e| {
        PipelineError::Catalog(format!(
            "{} is not a JSON array of repositories: {}",
            path.display(),
            e
        ))
    })
}
