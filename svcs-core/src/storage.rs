use crate::config::RepoConfig;
use crate::error::{Error, Result};
use crate::models::{parse_log, CommitRecord};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File-backed persistence for identity, tracked set, history log and
/// snapshots. Holds no open handles between calls.
pub struct Storage {
    config: RepoConfig,
}

impl Storage {
    pub fn new(config: RepoConfig) -> Result<Self> {
        config.bootstrap()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    // Identity operations
    pub fn get_identity(&self) -> Result<String> {
        Ok(fs::read_to_string(self.config.config_path())?)
    }

    pub fn set_identity(&self, name: &str) -> Result<()> {
        fs::write(self.config.config_path(), name)?;
        Ok(())
    }

    // Tracked-set operations
    pub fn get_tracked_files(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(self.config.index_path())?;
        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn track_file(&self, path: &str) -> Result<()> {
        use std::io::Write;

        let mut index = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.config.index_path())?;
        writeln!(index, "{}", path)?;
        Ok(())
    }

    // Log operations
    pub fn get_log_text(&self) -> Result<String> {
        Ok(fs::read_to_string(self.config.log_path())?)
    }

    pub fn get_history(&self) -> Result<Vec<CommitRecord>> {
        parse_log(&self.get_log_text()?)
    }

    /// Exact match against the log's commit header lines.
    pub fn has_commit(&self, hash: &str) -> Result<bool> {
        Ok(self
            .get_history()?
            .iter()
            .any(|record| record.hash == hash))
    }

    /// Writes `record` in front of the existing log content. The new log is
    /// written beside the old one and renamed over it.
    pub fn prepend_commit(&self, record: &CommitRecord) -> Result<()> {
        let previous = self.get_log_text()?;
        let staged = self.config.staging_dir().join("log.new");

        fs::write(&staged, format!("{}{}", record.render(), previous))?;
        fs::rename(&staged, self.config.log_path())?;

        debug!("Prepended commit {} to log", record.hash);
        Ok(())
    }

    // Snapshot operations
    pub fn snapshot_exists(&self, hash: &str) -> bool {
        self.config.snapshot_dir(hash).is_dir()
    }

    /// Starts a snapshot in the staging area. Nothing is visible under
    /// `commits/` until [`SnapshotWriter::finish`] runs.
    pub fn begin_snapshot(&self, hash: &str) -> Result<SnapshotWriter> {
        let staging = self.config.staging_dir().join(hash);
        if staging.exists() {
            warn!("Removing stale staging directory {:?}", staging);
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        Ok(SnapshotWriter {
            hash: hash.to_string(),
            staging,
            target: self.config.snapshot_dir(hash),
            finished: false,
        })
    }

    pub fn read_snapshot_file(&self, hash: &str, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.config.snapshot_dir(hash).join(name);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    /// All `(name, content)` entries of a snapshot, sorted by name.
    pub fn get_snapshot_entries(&self, hash: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let dir = self.config.snapshot_dir(hash);
        if !dir.is_dir() {
            return Err(Error::SnapshotMissing(hash.to_string()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push((name, fs::read(entry.path())?));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(entries)
    }
}

/// Handle to a snapshot being assembled in the staging area.
pub struct SnapshotWriter {
    hash: String,
    staging: PathBuf,
    target: PathBuf,
    finished: bool,
}

impl SnapshotWriter {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn write_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        fs::write(self.staging.join(name), content)?;
        Ok(())
    }

    /// Moves the staged snapshot into `commits/<hash>`. When a snapshot with
    /// the same hash already exists, staged entries replace same-named
    /// entries inside it and the rest of it is kept.
    pub fn finish(mut self) -> Result<()> {
        if !self.target.exists() {
            fs::rename(&self.staging, &self.target)?;
        } else {
            warn!(
                "Snapshot {} already exists, overwriting its entries",
                self.hash
            );
            for entry in fs::read_dir(&self.staging)? {
                let entry = entry?;
                let destination = self.target.join(entry.file_name());
                if destination.exists() {
                    fs::remove_file(&destination)?;
                }
                fs::rename(entry.path(), destination)?;
            }
            fs::remove_dir(&self.staging)?;
        }

        self.finished = true;
        debug!("Snapshot {} written", self.hash);
        Ok(())
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        if !self.finished && self.staging.exists() {
            if let Err(e) = fs::remove_dir_all(&self.staging) {
                warn!("Failed to clean staging directory {:?}: {}", self.staging, e);
            }
        }
    }
}
