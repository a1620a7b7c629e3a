use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use app::sync::SyncOptions;
use utils::app_config::AppConfig;
use utils::error::{Error, Result};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dirsync", version)]
#[command(
    about = "Copy entries missing from a destination directory tree",
    long_about = None
)]
pub struct Cli {
    /// Source directory
    #[arg(long = "src", value_name = "PATH")]
    pub src: PathBuf,

    /// Destination directory
    #[arg(long = "dst", value_name = "PATH")]
    pub dst: PathBuf,

    /// Delete items in dst that are not in src
    #[arg(long = "hard_sync")]
    pub hard_sync: bool,

    /// Only sync the top level items between src and dst
    #[arg(long = "top_level")]
    pub top_level: bool,

    /// Perform a bidirectional top-level sync of src and dst
    #[arg(long = "bi")]
    pub bi: bool,

    /// Print diff of top-level items in src and dst
    #[arg(long = "diff")]
    pub diff: bool,

    /// Directory size in GB above which copying asks for confirmation
    #[arg(long = "size_limit", value_name = "GB")]
    pub size_limit: Option<f64>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the logging level (debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// What a run does, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Diff,
    Bidirectional,
    Sync(SyncOptions),
}

impl Cli {
    /// Parse the process arguments, accepting `-src`/`-dst` spellings.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// `--diff` wins over everything, then `--bi`, then a plain sync.
    pub fn mode(&self) -> Mode {
        if self.diff {
            Mode::Diff
        } else if self.bi {
            Mode::Bidirectional
        } else {
            Mode::Sync(SyncOptions {
                hard_sync: self.hard_sync,
                top_level_only: self.top_level,
            })
        }
    }

    /// Fold command line settings into the global configuration.
    pub fn apply_to_config(&self) -> Result<()> {
        AppConfig::merge_config(self.config.as_deref())?;

        if let Some(level) = &self.log_level {
            AppConfig::set("log.level", level)?;
        }
        if let Some(limit) = self.size_limit {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::new(format!(
                    "--size_limit must be a non-negative number of GB, got {}",
                    limit
                )));
            }
            AppConfig::set("sync.size_limit_gb", &limit.to_string())?;
        }

        Ok(())
    }
}

/// Rewrite the single-dash long options `-src` and `-dst` to their
/// `--` form so clap accepts them.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let rewritten = arg.to_str().and_then(|s| {
                ["-src", "-dst"].iter().find_map(|flag| {
                    let rest = s.strip_prefix(flag)?;
                    (rest.is_empty() || rest.starts_with('=')).then(|| format!("-{}", s))
                })
            });
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

pub fn cli_match(cli: Cli) -> Result<()> {
    match cli.mode() {
        Mode::Diff => commands::diff_cmd(&cli.src, &cli.dst)?,
        Mode::Bidirectional => commands::bi_cmd(&cli.src, &cli.dst)?,
        Mode::Sync(options) => commands::sync_cmd(&cli.src, &cli.dst, options)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args(
            ["dirsync", "-src", "a", "-dst=b", "--hard_sync", "-src-like"]
                .iter()
                .map(OsString::from),
        );
        assert_eq!(
            args,
            vec!["dirsync", "--src", "a", "--dst=b", "--hard_sync", "-src-like"]
        );
    }

    #[test]
    fn test_default_mode_is_soft_recursive_sync() {
        let cli = parse(&["dirsync", "-src", "a", "-dst", "b"]);

        assert_eq!(cli.src, PathBuf::from("a"));
        assert_eq!(cli.dst, PathBuf::from("b"));
        assert_eq!(cli.mode(), Mode::Sync(SyncOptions::default()));
    }

    #[test]
    fn test_sync_flags() {
        let cli = parse(&["dirsync", "--src", "a", "--dst", "b", "--hard_sync", "--top_level"]);

        assert_eq!(
            cli.mode(),
            Mode::Sync(SyncOptions {
                hard_sync: true,
                top_level_only: true,
            })
        );
    }

    #[test]
    fn test_mode_precedence() {
        let cli = parse(&["dirsync", "-src", "a", "-dst", "b", "--bi", "--hard_sync"]);
        assert_eq!(cli.mode(), Mode::Bidirectional);

        let cli = parse(&["dirsync", "-src", "a", "-dst", "b", "--bi", "--diff"]);
        assert_eq!(cli.mode(), Mode::Diff);
    }

    #[test]
    fn test_src_and_dst_are_required() {
        let result = Cli::try_parse_from(["dirsync", "--src", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_size_limit_and_log_level() {
        let cli = parse(&[
            "dirsync", "-src", "a", "-dst", "b", "--size_limit", "0.5", "-l", "debug",
        ]);

        assert_eq!(cli.size_limit, Some(0.5));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
