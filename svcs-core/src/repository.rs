use crate::config::RepoConfig;
use crate::detector;
use crate::error::{Error, Result};
use crate::models::{parse_log, snapshot_key, CommitRecord, FileState, StatusEntry};
use crate::storage::Storage;
use std::fs;
use tracing::{debug, info};

/// Entry point for every repository operation. Each call reads what it needs
/// from disk and writes its result back before returning.
pub struct Repository {
    storage: Storage,
}

impl Repository {
    pub fn open(config: RepoConfig) -> Result<Self> {
        Ok(Self {
            storage: Storage::new(config)?,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // Identity
    pub fn identity(&self) -> Result<Option<String>> {
        let name = self.storage.get_identity()?;
        Ok((!name.is_empty()).then_some(name))
    }

    pub fn set_identity(&self, words: &[String]) -> Result<String> {
        if words.is_empty() {
            return Err(Error::MissingArgument("name"));
        }
        let name = words.join(" ");
        self.storage.set_identity(&name)?;
        info!("Committer name set to {:?}", name);
        Ok(name)
    }

    // Tracked set
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        self.storage.get_tracked_files()
    }

    pub fn add(&self, path: &str) -> Result<()> {
        let working = self.storage.config().working_path(path);
        if !working.exists() {
            return Err(Error::FileNotFound(path.to_string()));
        }
        if !working.is_file() {
            return Err(Error::NotAFile(path.to_string()));
        }

        self.storage.track_file(path)?;
        info!("Tracking {}", path);
        Ok(())
    }

    // History
    pub fn history(&self) -> Result<Vec<CommitRecord>> {
        self.storage.get_history()
    }

    pub fn log_text(&self) -> Result<String> {
        self.storage.get_log_text()
    }

    /// Snapshots the tracked files under the hash of `message` and records
    /// the commit at the front of the log.
    ///
    /// Fails with [`Error::NothingToCommit`] when nothing is tracked or the
    /// tracked files match the latest snapshot, and with
    /// [`Error::InvalidMessage`] when the message would read back from the
    /// log as more than one record. Nothing is written in either case.
    pub fn commit(&self, message: &str) -> Result<CommitRecord> {
        let record = CommitRecord::new(message.to_string(), self.storage.get_identity()?);
        if parse_log(&record.render())?.len() != 1 {
            return Err(Error::InvalidMessage(message.to_string()));
        }

        let tracked = self.storage.get_tracked_files()?;
        if tracked.is_empty() {
            debug!("No tracked files");
            return Err(Error::NothingToCommit);
        }

        let history = self.storage.get_history()?;
        if !detector::should_commit(&self.storage, &history, &tracked)? {
            debug!("Tracked files match the latest snapshot");
            return Err(Error::NothingToCommit);
        }

        let mut snapshot = self.storage.begin_snapshot(&record.hash)?;
        for path in &tracked {
            let working = self.storage.config().working_path(path);
            let content = fs::read(&working).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::FileNotFound(path.clone()),
                _ => Error::Io(e),
            })?;
            snapshot.write_file(&snapshot_key(path), &content)?;
        }
        snapshot.finish()?;

        self.storage.prepend_commit(&record)?;
        info!("Committed {} ({} file(s))", record.hash, tracked.len());

        Ok(record)
    }

    /// Overlays the files of snapshot `hash` onto the working directory.
    /// Files absent from the snapshot are left alone. Returns the names
    /// written.
    pub fn checkout(&self, hash: &str) -> Result<Vec<String>> {
        if !self.storage.has_commit(hash)? {
            return Err(Error::CommitNotFound(hash.to_string()));
        }

        let entries = self.storage.get_snapshot_entries(hash)?;
        let mut restored = Vec::with_capacity(entries.len());

        for (name, content) in entries {
            let destination = self.storage.config().working_path(&name);
            fs::write(&destination, content)?;
            debug!("Restored {:?}", destination);
            restored.push(name);
        }

        info!("Checked out {} ({} file(s))", hash, restored.len());
        Ok(restored)
    }

    /// State of each tracked path relative to the latest snapshot.
    pub fn status(&self) -> Result<Vec<StatusEntry>> {
        let history = self.storage.get_history()?;
        let tracked = self.storage.get_tracked_files()?;

        tracked
            .into_iter()
            .map(|path| {
                let state = match history.first() {
                    Some(latest) => detector::file_state(&self.storage, &latest.hash, &path)?,
                    None if self.storage.config().working_path(&path).is_file() => FileState::New,
                    None => FileState::Missing,
                };
                Ok(StatusEntry { path, state })
            })
            .collect()
    }
}
