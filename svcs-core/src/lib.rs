//! # svcs-core
//!
//! Core library for svcs - a minimal local version control system.
//!
//! Tracked files are copied into immutable snapshots named by the SHA-256 of
//! the commit message, commits are recorded in a newest-first log, and any
//! logged snapshot can be copied back over the working directory.

pub mod config;
pub mod detector;
pub mod error;
pub mod models;
pub mod repository;
pub mod storage;

pub use config::RepoConfig;
pub use error::{Error, Result};
pub use models::{CommitRecord, FileState, StatusEntry};
pub use repository::Repository;
pub use storage::Storage;
