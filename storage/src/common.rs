use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a path resolves to at the moment it is looked up.
///
/// Kinds are never cached: every decision re-resolves the path, so a tree
/// changed by someone else mid-run is seen as it is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file, or a symbolic link of any target (links are opaque)
    File,
    Directory,
    /// Nothing at this path
    Missing,
    /// Sockets, fifos, devices
    Other,
}

impl EntryKind {
    pub fn is_file(self) -> bool {
        self == EntryKind::File
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
}

impl StorageError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            StorageError::Io { path, .. } => path,
            StorageError::DestinationExists(path) => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
