use crate::repo;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

pub const CACHE_FILE_NAME: &str = ".nocomms-cache.json";

/// Modification-time cache keyed by repo-relative path, persisted as JSON
/// at the git root. A file is reprocessed only when its mtime is newer than
/// the recorded one.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileCache {
    #[serde(default)]
    pub processed_files: HashMap<String, SystemTime>,
}

impl FileCache {
    /// Loads the cache from the repository root. A missing cache file is
    /// not an error; it yields an empty cache.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CACHE_FILE_NAME);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read cache file {}", path.display()));
            }
        };
        serde_json::from_slice(&data)
            .with_context(|| format!("failed to parse cache file {}", path.display()))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CACHE_FILE_NAME);
        let data = serde_json::to_vec_pretty(self).context("failed to serialize cache")?;
        fs::write(&path, data)
            .with_context(|| format!("failed to write cache file {}", path.display()))
    }

    /// Unknown files are processed; known files only when modified after
    /// their last processing time.
    pub fn should_process(&self, root: &Path, path: &Path) -> Result<bool> {
        let modified = file_mtime(path)?;
        let key = cache_key(root, path)?;
        match self.processed_files.get(&key) {
            Some(last_processed) => Ok(modified > *last_processed),
            None => Ok(true),
        }
    }

    /// Records the file's modification time, not the current time, so a
    /// file that is touched but not changed does not look stale later.
    pub fn mark_processed(&mut self, root: &Path, path: &Path) -> Result<()> {
        let modified = file_mtime(path)?;
        let key = cache_key(root, path)?;
        self.processed_files.insert(key, modified);
        Ok(())
    }
}

fn file_mtime(path: &Path) -> Result<SystemTime> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    metadata
        .modified()
        .with_context(|| format!("no modification time for {}", path.display()))
}

fn cache_key(root: &Path, path: &Path) -> Result<String> {
    let rel = repo::to_relative_path(root, path)?;
    Ok(rel.to_string_lossy().into_owned())
}
