use std::path::Path;

use app::prelude::*;
use storage::LocalStorage;
use utils::app_config::AppConfig;
use utils::error::{Error, Result};

type ConsoleEngine = SyncEngine<
    LocalStorage,
    ConsolePrompt<std::io::StdinLock<'static>, std::io::Stdout>,
    ConsoleReporter<std::io::Stdout>,
>;

fn console_engine() -> Result<ConsoleEngine> {
    let config = AppConfig::fetch()?;
    let threshold = SizeThreshold::from_gigabytes(config.sync.size_limit_gb);
    log::debug!("Confirmation threshold: {} GB", threshold.gigabytes());

    Ok(SyncEngine::new(
        LocalStorage::new(),
        ConsolePrompt::stdio(),
        ConsoleReporter::stdout(),
    )
    .with_threshold(threshold))
}

fn print_summary(engine: &mut ConsoleEngine, sessions: &[&SyncSession]) -> Result<()> {
    engine
        .reporter_mut()
        .summary(sessions)
        .map_err(|e| Error::with_source("Failed to print summary", Box::new(e)))
}

pub fn diff_cmd(src: &Path, dst: &Path) -> Result<()> {
    log::info!("Diffing {} and {}", src.display(), dst.display());

    let mut engine = console_engine()?;
    let report = engine.diff(src, dst)?;

    log::info!(
        "Diff finished: {} only in source, {} only in destination",
        report.source_only.len(),
        report.destination_only.len()
    );
    Ok(())
}

pub fn bi_cmd(src: &Path, dst: &Path) -> Result<()> {
    log::info!("Starting bidirectional sync...");

    let mut engine = console_engine()?;
    let outcome = engine.bidirectional_sync(src, dst)?;
    print_summary(&mut engine, &[&outcome.forward, &outcome.backward])?;

    log::info!("Bidirectional sync completed");
    Ok(())
}

pub fn sync_cmd(src: &Path, dst: &Path, options: SyncOptions) -> Result<()> {
    log::info!("Starting sync operation...");

    let mut engine = console_engine()?;
    let session = engine.sync(src, dst, options)?;
    print_summary(&mut engine, &[&session])?;

    log::info!("Sync operation completed");
    Ok(())
}
