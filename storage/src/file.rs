use filetime::FileTime;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::common::{EntryKind, Result, StorageError};
use crate::Storage;

/// Local filesystem storage on top of `std::fs`.
///
/// Symbolic links are treated as opaque files: they are listed, sized,
/// copied and deleted as links and never followed, so a link pointing at
/// one of its own ancestors cannot send a traversal into a loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Create new local storage instance
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn list_directory(&self, path: &Path) -> Result<BTreeSet<OsString>> {
        let entries = fs::read_dir(path).map_err(|e| StorageError::io(path, e))?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(path, e))?;
            names.insert(entry.file_name());
        }

        log::trace!("Listed {} entries in {}", names.len(), path.display());
        Ok(names)
    }

    fn kind(&self, path: &Path) -> EntryKind {
        match fs::symlink_metadata(path) {
            Ok(meta) => {
                let file_type = meta.file_type();
                if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() || file_type.is_symlink() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                }
            }
            Err(_) => EntryKind::Missing,
        }
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        fs::symlink_metadata(path)
            .map(|meta| meta.len())
            .map_err(|e| StorageError::io(path, e))
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        let meta = fs::symlink_metadata(src).map_err(|e| StorageError::io(src, e))?;

        if meta.file_type().is_symlink() {
            return copy_symlink(src, dst, &meta);
        }

        // fs::copy carries the permission bits over
        fs::copy(src, dst).map_err(|e| StorageError::io(dst, e))?;

        let atime = FileTime::from_last_access_time(&meta);
        let mtime = FileTime::from_last_modification_time(&meta);
        filetime::set_file_times(dst, atime, mtime).map_err(|e| StorageError::io(dst, e))?;

        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StorageError::DestinationExists(path.to_path_buf()),
            _ => StorageError::io(path, e),
        })
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| StorageError::io(path, e))
    }

    fn delete_directory_recursive(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| StorageError::io(path, e))
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<()> {
    let target = fs::read_link(src).map_err(|e| StorageError::io(src, e))?;
    std::os::unix::fs::symlink(&target, dst).map_err(|e| StorageError::io(dst, e))?;

    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    filetime::set_symlink_file_times(dst, atime, mtime).map_err(|e| StorageError::io(dst, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path, _meta: &fs::Metadata) -> Result<()> {
    // Creating links needs privileges on some platforms; copy the target's content
    fs::copy(src, dst).map_err(|e| StorageError::io(dst, e))?;
    Ok(())
}
