//! Command-line interface module for mediatidy.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Validation of the directory to organize
//! - Merging CLI flags over file configuration
//! - Running the organizer with progress output and a final summary

use crate::config::{CollisionPolicy, Config};
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_organizer::{Organizer, RunReport, collect_entries};
use crate::output::OutputFormatter;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sort photos and videos into date folders.
///
/// Pictures and videos in DIRECTORY are moved to
/// `pictures/YYYYMMDD/` and `videos/YYYYMMDD/` beneath it, using each
/// file's modification date. Other files are left alone.
#[derive(Parser, Debug, Default)]
#[command(name = "mediatidy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to organize. Asked for interactively when omitted.
    pub directory: Option<PathBuf>,

    /// Path to a configuration file (TOML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Show what would be moved without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Put date folders directly in DIRECTORY, without pictures/ and videos/
    #[arg(long)]
    pub flat: bool,

    /// Keep original file names instead of lowercase ASCII snake case
    #[arg(long)]
    pub keep_names: bool,

    /// What to do when the time-prefixed name is also taken
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies CLI flags on top of file configuration.
    /// Flags only ever switch features off or pick a policy, so absent
    /// flags leave the file values alone.
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if self.flat {
            config.organize.use_category_subfolders = false;
        }
        if self.keep_names {
            config.organize.sanitize_filenames = false;
        }
        if let Some(policy) = self.collision {
            config.organize.collision_policy = policy;
        }
        config
    }

    /// Loads configuration (see [`Config::load`]) and merges the flags.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let config = Config::load(self.config.as_deref()).context("Error loading configuration")?;
        Ok(self.merge_with_config(config))
    }
}

/// Expands a leading `~` to `$HOME`.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    path.to_path_buf()
}

/// Checks that `input` names an existing directory and returns its canonical path.
///
/// This is a single check; retrying is up to the caller.
pub fn validate_directory(input: &Path) -> OrganizeResult<PathBuf> {
    if input.as_os_str().is_empty() {
        return Err(OrganizeError::InvalidBasePath {
            path: input.to_path_buf(),
            reason: "no path given".to_string(),
        });
    }

    let expanded = expand_home(input);
    let resolved = expanded
        .canonicalize()
        .map_err(|e| OrganizeError::InvalidBasePath {
            path: expanded.clone(),
            reason: e.to_string(),
        })?;

    if !resolved.is_dir() {
        return Err(OrganizeError::InvalidBasePath {
            path: resolved,
            reason: "not a directory".to_string(),
        });
    }

    Ok(resolved)
}

/// Organizes `base_path` with the given configuration, printing progress.
///
/// `base_path` must already be validated. Returns the run report; per-file
/// failures are in the report, not in the error.
///
/// # Examples
///
/// ```no_run
/// use mediatidy::cli::organize_directory;
/// use mediatidy::config::Config;
/// use std::path::Path;
///
/// let report = organize_directory(Path::new("/path/to/photos"), &Config::default(), true)?;
/// println!("{} files would move", report.planned_count());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn organize_directory(
    base_path: &Path,
    config: &Config,
    dry_run: bool,
) -> anyhow::Result<RunReport> {
    let organizer = Organizer::new(config)
        .context("Error compiling filters")?
        .with_dry_run(dry_run);

    if dry_run {
        OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", base_path.display()));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", base_path.display()));
    }
    info!(
        base = %base_path.display(),
        dry_run,
        categories = config.organize.use_category_subfolders,
        sanitize = config.organize.sanitize_filenames,
        policy = ?config.organize.collision_policy,
        "Starting pass"
    );

    let entries = collect_entries(base_path)?;
    if entries.is_empty() {
        OutputFormatter::plain("No files found to organize.");
    }

    let pb = OutputFormatter::create_progress_bar(entries.len() as u64);
    let report = organizer.run_entries(base_path, &entries, |outcome| {
        pb.suspend(|| OutputFormatter::outcome(outcome));
        pb.inc(1);
    });
    pb.finish_and_clear();

    OutputFormatter::run_summary(&report);

    if report.has_failures() {
        OutputFormatter::warning("Some files could not be organized. Please review errors above.");
    } else if dry_run {
        OutputFormatter::success("Dry run complete. No files were modified.");
    } else {
        OutputFormatter::success("Organization complete!");
    }

    Ok(report)
}

/// Runs the CLI against an already validated directory.
pub fn run_cli(cli: &Cli, base_path: &Path) -> anyhow::Result<RunReport> {
    let config = cli.resolve_config()?;
    organize_directory(base_path, &config, cli.dry_run)
}
