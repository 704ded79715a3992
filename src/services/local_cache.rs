use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::utils::json::list_from_str;

/// Named JSON snapshots under a data folder, one file per name.
///
/// A save replaces the previous snapshot wholesale; there is no merge,
/// versioning or backup. Concurrent writers are not supported.
#[derive(Debug, Clone)]
pub struct LocalQuestionCache {
    base_path: PathBuf,
}

impl LocalQuestionCache {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }

    pub async fn save<T: Serialize>(&self, name: &str, data: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::create_dir_all(&self.base_path).await?;

        let path = self.file_path(name);
        tokio::fs::write(&path, json).await?;
        info!(path = %path.display(), count = data.len(), "Saved snapshot");
        Ok(())
    }

    /// Missing, blank and `null` snapshots read as an empty list. Keys are
    /// matched case-insensitively, so snapshots written with PascalCase
    /// property names load too.
    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.file_path(name);
        if !tokio::fs::try_exists(&path).await? {
            debug!(path = %path.display(), "No snapshot on disk");
            return Ok(Vec::new());
        }

        let json = tokio::fs::read_to_string(&path).await?;
        let items: Vec<T> = list_from_str(&json)?;
        debug!(path = %path.display(), count = items.len(), "Loaded snapshot");
        Ok(items)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }
}
