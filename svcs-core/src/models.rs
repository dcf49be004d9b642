use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const HEADER_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author: ";

/// One entry of the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(message: String, author: String) -> Self {
        Self {
            hash: hash_message(&message),
            author,
            message,
        }
    }

    /// Renders the record as a log block, separator line included.
    pub fn render(&self) -> String {
        format!(
            "{}{}\n{}{}\n{}\n\n",
            HEADER_PREFIX, self.hash, AUTHOR_PREFIX, self.author, self.message
        )
    }
}

/// Lowercase hex SHA-256 of the commit message.
pub fn hash_message(message: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hex::encode(hasher.finalize())
}

/// Key under which a tracked path is stored inside a snapshot.
pub fn snapshot_key(tracked: &str) -> String {
    Path::new(tracked)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| tracked.to_string())
}

/// Parses persisted log text back into records, newest first.
///
/// A block starts at a `commit <hash>` line that is either the first line or
/// follows a blank line, and is immediately followed by an `Author:` line.
/// Everything up to the next block is the message, minus the trailing
/// separator.
pub fn parse_log(text: &str) -> Result<Vec<CommitRecord>> {
    let lines: Vec<&str> = text.lines().collect();
    let is_header = |i: usize| {
        lines[i].starts_with(HEADER_PREFIX)
            && (i == 0 || lines[i - 1].is_empty())
            && lines.get(i + 1).is_some_and(|l| l.starts_with(AUTHOR_PREFIX))
    };

    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() && lines[i].is_empty() {
        i += 1;
    }

    while i < lines.len() {
        if !is_header(i) {
            return Err(Error::MalformedLog(format!(
                "expected commit header at line {}",
                i + 1
            )));
        }

        let hash = lines[i][HEADER_PREFIX.len()..].to_string();
        let author = lines[i + 1][AUTHOR_PREFIX.len()..].to_string();

        let start = i + 2;
        let mut end = start;
        while end < lines.len() && !is_header(end) {
            end += 1;
        }

        let mut body = &lines[start..end];
        while let Some((last, rest)) = body.split_last() {
            if !last.is_empty() {
                break;
            }
            body = rest;
        }

        records.push(CommitRecord {
            hash,
            author,
            message: body.join("\n"),
        });
        i = end;
    }

    Ok(records)
}

/// State of a tracked file relative to the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileState {
    Unchanged,
    Modified,
    New,
    Missing,
}

impl FileState {
    pub fn as_str(&self) -> &str {
        match self {
            FileState::Unchanged => "unchanged",
            FileState::Modified => "modified",
            FileState::New => "new",
            FileState::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub state: FileState,
}
