use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use super::SyncSession;

/// Line-oriented progress and result output of the sync engine.
pub trait Reporter {
    /// Header naming the root whose extra entries follow.
    fn diff_header(&mut self, root: &Path) -> io::Result<()>;

    fn diff_entry(&mut self, name: &OsStr) -> io::Result<()>;

    /// Called right before a file is copied.
    fn copying(&mut self, source: &Path, destination: &Path) -> io::Result<()>;

    /// Called right before an entry is deleted.
    fn deleting(&mut self, path: &Path) -> io::Result<()>;

    /// Final listing of what the given sessions changed.
    fn summary(&mut self, sessions: &[&SyncSession]) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn diff_header(&mut self, root: &Path) -> io::Result<()> {
        (**self).diff_header(root)
    }

    fn diff_entry(&mut self, name: &OsStr) -> io::Result<()> {
        (**self).diff_entry(name)
    }

    fn copying(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        (**self).copying(source, destination)
    }

    fn deleting(&mut self, path: &Path) -> io::Result<()> {
        (**self).deleting(path)
    }

    fn summary(&mut self, sessions: &[&SyncSession]) -> io::Result<()> {
        (**self).summary(sessions)
    }
}

/// Plain-text reporter, stdout by default.
pub struct ConsoleReporter<W> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn diff_header(&mut self, root: &Path) -> io::Result<()> {
        writeln!(self.out, "{}", root.display())
    }

    fn diff_entry(&mut self, name: &OsStr) -> io::Result<()> {
        writeln!(self.out, "  +{}", name.to_string_lossy())
    }

    fn copying(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        let parent = destination.parent().unwrap_or(destination);
        writeln!(
            self.out,
            "Copying {} --> {}",
            item_name(source),
            parent.display()
        )
    }

    fn deleting(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Deleting {}", path.display())
    }

    fn summary(&mut self, sessions: &[&SyncSession]) -> io::Result<()> {
        writeln!(self.out, "Summary:")?;
        for item in sessions.iter().flat_map(|s| &s.copied_items) {
            writeln!(self.out, "  + {}", item_name(item))?;
        }
        for item in sessions.iter().flat_map(|s| &s.deleted_items) {
            writeln!(self.out, "  - {}", item_name(item))?;
        }
        self.out.flush()
    }
}

/// Last path component, or the whole path when it has none (e.g. `/`).
pub(crate) fn item_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
