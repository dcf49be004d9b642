//! Change detection against the latest snapshot.
//!
//! Tracked files are looked up inside a snapshot by basename, the same key
//! the commit engine stores them under. Comparison is whole-content bytes.

use crate::error::{Error, Result};
use crate::models::{snapshot_key, CommitRecord, FileState};
use crate::storage::Storage;
use std::fs;
use tracing::debug;

/// Decides whether the tracked files differ from the newest snapshot in
/// `history`. The first difference found wins.
///
/// When several tracked paths share a basename, only the last one is
/// compared: it is the one whose content the snapshot holds.
pub fn should_commit(
    storage: &Storage,
    history: &[CommitRecord],
    tracked: &[String],
) -> Result<bool> {
    let Some(latest) = history.first() else {
        return Ok(true);
    };

    for (i, path) in tracked.iter().enumerate() {
        if is_shadowed(tracked, i) {
            if !storage.config().working_path(path).is_file() {
                return Err(Error::FileNotFound(path.clone()));
            }
            continue;
        }

        match file_state(storage, &latest.hash, path)? {
            FileState::Unchanged => continue,
            FileState::Missing => return Err(Error::FileNotFound(path.clone())),
            state => {
                debug!("{} is {} since {}", path, state.as_str(), latest.hash);
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// True when a later tracked path maps to the same snapshot key as
/// `tracked[index]`.
pub fn is_shadowed(tracked: &[String], index: usize) -> bool {
    let key = snapshot_key(&tracked[index]);
    tracked[index + 1..]
        .iter()
        .any(|later| snapshot_key(later) == key)
}

/// Compares one tracked file in the working directory with its copy in the
/// snapshot `hash`.
pub fn file_state(storage: &Storage, hash: &str, path: &str) -> Result<FileState> {
    let working = storage.config().working_path(path);
    if !working.is_file() {
        return Ok(FileState::Missing);
    }

    let Some(stored) = storage.read_snapshot_file(hash, &snapshot_key(path))? else {
        return Ok(FileState::New);
    };

    if fs::read(&working)? == stored {
        Ok(FileState::Unchanged)
    } else {
        Ok(FileState::Modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoConfig;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(RepoConfig::new(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn snapshot(
        storage: &Storage,
        message: &str,
        files: &[(&str, &str)],
    ) -> Vec<CommitRecord> {
        let record = CommitRecord::new(message.to_string(), String::new());
        let mut writer = storage.begin_snapshot(&record.hash).unwrap();
        for (name, content) in files {
            writer.write_file(name, content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        vec![record]
    }

    #[test]
    fn test_empty_history_always_commits() {
        let (_temp_dir, storage) = setup();

        assert!(should_commit(&storage, &[], &[]).unwrap());
    }

    #[test]
    fn test_unchanged_files_do_not_commit() {
        let (temp_dir, storage) = setup();
        fs::write(temp_dir.path().join("a.txt"), "x").unwrap();
        let history = snapshot(&storage, "m1", &[("a.txt", "x")]);

        assert!(!should_commit(&storage, &history, &["a.txt".to_string()]).unwrap());
    }

    #[test]
    fn test_modified_file_commits() {
        let (temp_dir, storage) = setup();
        fs::write(temp_dir.path().join("a.txt"), "y").unwrap();
        let history = snapshot(&storage, "m1", &[("a.txt", "x")]);

        assert!(should_commit(&storage, &history, &["a.txt".to_string()]).unwrap());
    }

    #[test]
    fn test_newly_tracked_file_commits() {
        let (temp_dir, storage) = setup();
        fs::write(temp_dir.path().join("a.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        let history = snapshot(&storage, "m1", &[("a.txt", "x")]);

        let tracked = vec!["a.txt".to_string(), "b.txt".to_string()];
        assert!(should_commit(&storage, &history, &tracked).unwrap());
    }

    #[test]
    fn test_nested_path_is_matched_by_basename() {
        let (temp_dir, storage) = setup();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs/readme.md"), "doc").unwrap();
        let history = snapshot(&storage, "m1", &[("readme.md", "doc")]);

        assert_eq!(
            file_state(&storage, &history[0].hash, "docs/readme.md").unwrap(),
            FileState::Unchanged
        );
        let tracked = vec!["docs/readme.md".to_string()];
        assert!(!should_commit(&storage, &history, &tracked).unwrap());
    }

    #[test]
    fn test_only_last_path_per_basename_is_compared() {
        let (temp_dir, storage) = setup();
        for dir in ["x", "y"] {
            fs::create_dir(temp_dir.path().join(dir)).unwrap();
        }
        fs::write(temp_dir.path().join("x/a.txt"), "one").unwrap();
        fs::write(temp_dir.path().join("y/a.txt"), "two").unwrap();
        let history = snapshot(&storage, "m1", &[("a.txt", "two")]);

        let tracked = vec!["x/a.txt".to_string(), "y/a.txt".to_string()];
        assert!(is_shadowed(&tracked, 0));
        assert!(!is_shadowed(&tracked, 1));
        assert!(!should_commit(&storage, &history, &tracked).unwrap());

        fs::write(temp_dir.path().join("y/a.txt"), "three").unwrap();
        assert!(should_commit(&storage, &history, &tracked).unwrap());
    }

    #[test]
    fn test_missing_working_file_is_reported() {
        let (_temp_dir, storage) = setup();
        let history = snapshot(&storage, "m1", &[("a.txt", "x")]);

        assert!(matches!(
            should_commit(&storage, &history, &["a.txt".to_string()]),
            Err(Error::FileNotFound(path)) if path == "a.txt"
        ));
    }
}
