pub mod common;
pub mod file;

pub use common::*;
pub use file::*;

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;

/// Filesystem operations the sync engine depends on.
///
/// The query half (`list_directory`, `kind`, `file_size`) never mutates;
/// the executor half performs exactly one mutation per successful call.
pub trait Storage {
    /// Names of the immediate entries of `path`, in lexicographic order.
    fn list_directory(&self, path: &Path) -> Result<BTreeSet<OsString>>;

    /// Classify `path` without following symbolic links.
    fn kind(&self, path: &Path) -> EntryKind;

    fn is_file(&self, path: &Path) -> bool {
        self.kind(path).is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.kind(path).is_dir()
    }

    /// Size in bytes of a single file (a symlink's own size).
    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Copy one file, keeping its modification time and permission bits.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Create exactly one directory; fails with
    /// [`StorageError::DestinationExists`] if anything is already there.
    fn create_directory(&self, path: &Path) -> Result<()>;

    fn delete_file(&self, path: &Path) -> Result<()>;

    fn delete_directory_recursive(&self, path: &Path) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn list_directory(&self, path: &Path) -> Result<BTreeSet<OsString>> {
        (**self).list_directory(path)
    }

    fn kind(&self, path: &Path) -> EntryKind {
        (**self).kind(path)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        (**self).file_size(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        (**self).copy_file(src, dst)
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        (**self).create_directory(path)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        (**self).delete_file(path)
    }

    fn delete_directory_recursive(&self, path: &Path) -> Result<()> {
        (**self).delete_directory_recursive(path)
    }
}
