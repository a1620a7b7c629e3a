//! 同步模块 - the recursive directory sync engine and its collaborators

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use storage::StorageError;
use thiserror::Error;

mod engine;
pub mod prompt;
pub mod report;


pub use engine::SyncEngine;
pub use prompt::{ConsolePrompt, Prompt};
pub use report::{ConsoleReporter, Reporter};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Reading an answer or writing a report line failed
    #[error("Console I/O failed: {0}")]
    Console(#[source] io::Error),
}

impl From<SyncError> for utils::error::Error {
    fn from(err: SyncError) -> Self {
        utils::error::Error::with_source("Sync failed", Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Policy flags of one `sync` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Delete destination entries missing from the source, at the requested level only
    pub hard_sync: bool,
    /// Never descend into directories present on both sides
    pub top_level_only: bool,
}

/// Record of one top-level `sync` run.
///
/// Every mutation performed during the run appends exactly one item, after
/// the mutation succeeded: copied files and created directories by their
/// source path, deletions by their destination path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSession {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub copied_items: Vec<PathBuf>,
    pub deleted_items: Vec<PathBuf>,
}

impl SyncSession {
    pub fn new(source_root: &Path, destination_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            copied_items: Vec::new(),
            deleted_items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.copied_items.is_empty() && self.deleted_items.is_empty()
    }
}

/// Top-level names present on only one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub source_only: BTreeSet<OsString>,
    pub destination_only: BTreeSet<OsString>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.source_only.is_empty() && self.destination_only.is_empty()
    }
}

/// Result of a bidirectional top-level sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidirectionalOutcome {
    pub diff: DiffReport,
    /// Source to destination pass
    pub forward: SyncSession,
    /// Destination to source pass
    pub backward: SyncSession,
}
