use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Snapshot directory missing for commit {0}")]
    SnapshotMissing(String),

    #[error("Commit message contains a log header: {0:?}")]
    InvalidMessage(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Malformed log: {0}")]
    MalformedLog(String),
}
