//! Subtree size estimation and the large-copy threshold.

use std::path::Path;
use storage::{EntryKind, Storage};

/// Bytes per gigabyte as used for the confirmation threshold (decimal, not GiB).
pub const BYTES_PER_GB: f64 = 1e9;

/// Default confirmation threshold in gigabytes.
pub const DEFAULT_SIZE_LIMIT_GB: f64 = 4.0;

/// Directory size above which copying it needs an explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeThreshold {
    gigabytes: f64,
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self::from_gigabytes(DEFAULT_SIZE_LIMIT_GB)
    }
}

impl SizeThreshold {
    pub fn from_gigabytes(gigabytes: f64) -> Self {
        Self { gigabytes }
    }

    pub fn gigabytes(self) -> f64 {
        self.gigabytes
    }

    /// True when `bytes` is strictly larger than the threshold.
    pub fn is_exceeded_by(self, bytes: u64) -> bool {
        to_gigabytes(bytes) > self.gigabytes
    }
}

pub fn to_gigabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Total size in bytes of every file reachable under `path`.
///
/// Directories add nothing themselves. Symbolic links count as files and are
/// not followed, so a link adds its own length rather than its target's.
/// Any listing or stat failure aborts the estimate.
pub fn estimate_size<S: Storage + ?Sized>(storage: &S, path: &Path) -> storage::Result<u64> {
    let mut total = 0u64;
    let mut pending = vec![path.to_path_buf()];

    while let Some(current) = pending.pop() {
        match storage.kind(&current) {
            EntryKind::File => total += storage.file_size(&current)?,
            EntryKind::Directory => {
                for name in storage.list_directory(&current)? {
                    pending.push(current.join(name));
                }
            }
            EntryKind::Missing | EntryKind::Other => {}
        }
    }

    log::debug!("Estimated {} bytes under {}", total, path.display());
    Ok(total)
}
