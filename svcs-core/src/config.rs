use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORE_DIR: &str = "store";
pub const CONFIG_FILE: &str = "config";
pub const INDEX_FILE: &str = "index";
pub const LOG_FILE: &str = "log";
pub const COMMITS_DIR: &str = "commits";
pub const STAGING_DIR: &str = "tmp";

/// Paths of a repository, all derived from the working directory root.
///
/// ```text
/// <root>/
///   store/
///     config        committer name
///     index         tracked paths, one per line
///     log           commit blocks, newest first
///     commits/
///       <hash>/     one snapshot per commit
///     tmp/          snapshot staging
/// ```
#[derive(Debug, Clone)]
pub struct RepoConfig {
    root: PathBuf,
}

impl RepoConfig {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_dir(&self) -> PathBuf {
        self.root.join(STORE_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.store_dir().join(CONFIG_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.store_dir().join(INDEX_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.store_dir().join(LOG_FILE)
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.store_dir().join(COMMITS_DIR)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.store_dir().join(STAGING_DIR)
    }

    pub fn snapshot_dir(&self, hash: &str) -> PathBuf {
        self.commits_dir().join(hash)
    }

    /// Resolves a tracked path against the working directory.
    pub fn working_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates any missing part of the store layout. Existing files are left
    /// untouched.
    pub fn bootstrap(&self) -> Result<()> {
        fs::create_dir_all(self.commits_dir())?;
        fs::create_dir_all(self.staging_dir())?;

        for file in [self.config_path(), self.index_path(), self.log_path()] {
            if !file.exists() {
                debug!("Creating {:?}", file);
                fs::write(&file, "")?;
            }
        }

        Ok(())
    }
}
