use std::path::Path;
use storage::{EntryKind, Storage};

use super::prompt::Prompt;
use super::report::{item_name, Reporter};
use super::{BidirectionalOutcome, DiffReport, Result, SyncError, SyncOptions, SyncSession};
use crate::size::{estimate_size, to_gigabytes, SizeThreshold};

/// Copies entries missing from a destination tree, optionally deleting
/// destination-only entries.
///
/// The engine holds only its collaborators; all per-run state lives in the
/// [`SyncSession`] each run creates and returns.
pub struct SyncEngine<S, P, R> {
    storage: S,
    prompt: P,
    reporter: R,
    threshold: SizeThreshold,
}

impl<S: Storage, P: Prompt, R: Reporter> SyncEngine<S, P, R> {
    pub fn new(storage: S, prompt: P, reporter: R) -> Self {
        Self {
            storage,
            prompt,
            reporter,
            threshold: SizeThreshold::default(),
        }
    }

    pub fn with_threshold(mut self, threshold: SizeThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> SizeThreshold {
        self.threshold
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Copy `source` to `destination`, recording every mutation in `session`.
    ///
    /// With `prompt_enabled`, a directory over the size threshold is only
    /// copied after confirmation; its contents are never asked about again.
    /// Anything that is neither a file nor a directory is ignored.
    pub fn copy(
        &mut self, session: &mut SyncSession, source: &Path, destination: &Path,
        prompt_enabled: bool,
    ) -> Result<()> {
        match self.storage.kind(source) {
            EntryKind::File => {
                self.reporter
                    .copying(source, destination)
                    .map_err(SyncError::Console)?;
                self.storage.copy_file(source, destination)?;
                session.copied_items.push(source.to_path_buf());
            }
            EntryKind::Directory => {
                if prompt_enabled && !self.confirm_directory(source)? {
                    log::info!("Copy of {} declined", source.display());
                    return Ok(());
                }

                self.storage.create_directory(destination)?;
                session.copied_items.push(source.to_path_buf());

                for name in self.storage.list_directory(source)? {
                    self.copy(
                        session,
                        &source.join(&name),
                        &destination.join(&name),
                        false,
                    )?;
                }
            }
            EntryKind::Missing | EntryKind::Other => {
                log::debug!("Skipping {}: not a file or directory", source.display());
            }
        }

        Ok(())
    }

    /// Bring `destination` up to date with `source` and return what changed.
    pub fn sync(
        &mut self, source: &Path, destination: &Path, options: SyncOptions,
    ) -> Result<SyncSession> {
        log::info!(
            "Syncing {} -> {} ({:?})",
            source.display(),
            destination.display(),
            options
        );

        let mut session = SyncSession::new(source, destination);
        self.sync_level(
            &mut session,
            source,
            destination,
            options.hard_sync,
            options.top_level_only,
        )?;

        log::info!(
            "Sync of {} finished: {} copied, {} deleted",
            source.display(),
            session.copied_items.len(),
            session.deleted_items.len()
        );
        Ok(session)
    }

    fn sync_level(
        &mut self, session: &mut SyncSession, source: &Path, destination: &Path,
        hard_sync: bool, top_level_only: bool,
    ) -> Result<()> {
        let source_names = self.storage.list_directory(source)?;
        let destination_names = self.storage.list_directory(destination)?;

        for name in &source_names {
            let source_item = source.join(name);
            let destination_item = destination.join(name);

            if !destination_names.contains(name) {
                self.copy(session, &source_item, &destination_item, true)?;
            } else if !top_level_only && self.storage.is_dir(&source_item) {
                // hard_sync only ever applies to the level it was requested for
                self.sync_level(session, &source_item, &destination_item, false, false)?;
            } else {
                log::debug!("Keeping {}: present on both sides", destination_item.display());
            }
        }

        if hard_sync {
            for name in destination_names.difference(&source_names) {
                let path = destination.join(name);
                self.reporter.deleting(&path).map_err(SyncError::Console)?;

                if self.storage.is_dir(&path) {
                    self.storage.delete_directory_recursive(&path)?;
                } else {
                    self.storage.delete_file(&path)?;
                }
                session.deleted_items.push(path);
            }
        }

        Ok(())
    }

    /// Report the top-level names present on only one side. Mutates nothing.
    pub fn diff(&mut self, source: &Path, destination: &Path) -> Result<DiffReport> {
        let source_names = self.storage.list_directory(source)?;
        let destination_names = self.storage.list_directory(destination)?;

        let report = DiffReport {
            source_only: source_names.difference(&destination_names).cloned().collect(),
            destination_only: destination_names.difference(&source_names).cloned().collect(),
        };

        for (root, names) in [
            (source, &report.source_only),
            (destination, &report.destination_only),
        ] {
            self.reporter.diff_header(root).map_err(SyncError::Console)?;
            for name in names {
                self.reporter.diff_entry(name).map_err(SyncError::Console)?;
            }
        }

        Ok(report)
    }

    /// Give each side the top-level entries only the other side has.
    /// Never deletes and never descends below the top level.
    pub fn bidirectional_sync(
        &mut self, source: &Path, destination: &Path,
    ) -> Result<BidirectionalOutcome> {
        let top_level = SyncOptions {
            hard_sync: false,
            top_level_only: true,
        };

        let diff = self.diff(source, destination)?;
        let forward = self.sync(source, destination, top_level)?;
        let backward = self.sync(destination, source, top_level)?;

        Ok(BidirectionalOutcome {
            diff,
            forward,
            backward,
        })
    }

    fn confirm_directory(&mut self, source: &Path) -> Result<bool> {
        let size = estimate_size(&self.storage, source)?;
        if !self.threshold.is_exceeded_by(size) {
            return Ok(true);
        }

        let message = format!(
            "{} is {:.1} GB, still copy?",
            item_name(source),
            to_gigabytes(size)
        );
        self.prompt.ask(&message).map_err(SyncError::Console)
    }
}
