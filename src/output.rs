//! Output formatting and styling module.
//!
//! All user-facing terminal output goes through here: progress lines,
//! warnings, and the end-of-run summary. Diagnostics go through `tracing`
//! instead.

use crate::file_organizer::{FileOutcome, RunReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for a pass over `total` files.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// The line printed for a single outcome, or `None` for silent skips.
    ///
    /// Moves print `Moved: <name> -> <relative destination>`.
    pub fn outcome_line(outcome: &FileOutcome) -> Option<String> {
        match outcome {
            FileOutcome::Moved(record) => Some(format!(
                "Moved: {} -> {}",
                record.original_name,
                record.relative_destination.display()
            )),
            FileOutcome::Planned(record) => Some(format!(
                "Would move: {} -> {}",
                record.original_name,
                record.relative_destination.display()
            )),
            FileOutcome::Failed { path, error } => Some(format!(
                "Skipped {} ({}): {}",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                error.kind_label(),
                error
            )),
            FileOutcome::Skipped { .. } => None,
        }
    }

    /// Prints one outcome with the matching style.
    pub fn outcome(outcome: &FileOutcome) {
        let Some(line) = Self::outcome_line(outcome) else {
            return;
        };
        match outcome {
            FileOutcome::Moved(_) => Self::plain(&line),
            FileOutcome::Planned(_) => Self::dry_run_notice(&line),
            FileOutcome::Failed { .. } => Self::error(&line),
            FileOutcome::Skipped { .. } => {}
        }
    }

    /// Prints a summary table with moved files per category.
    pub fn summary_table(category_counts: &BTreeMap<&'static str, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let max_category_len = category_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        for (category, count) in category_counts {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                plural(*count),
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files),
            width = max_category_len
        );
    }

    /// Prints the end-of-run totals and lists every failed file.
    pub fn run_summary(report: &RunReport) {
        let handled = if report.dry_run {
            report.planned_count()
        } else {
            report.moved_count()
        };
        Self::summary_table(&report.category_counts(), handled);

        let verb = if report.dry_run { "Would move" } else { "Moved" };
        println!(
            "\n{}: {}  Skipped: {}  Failed: {}",
            verb,
            handled.to_string().green(),
            report.skipped_count().to_string().yellow(),
            report.failed_count().to_string().red()
        );

        if report.has_failures() {
            Self::header("FAILED");
            for (path, error) in report.failures() {
                Self::error(&format!("{}: {}", path.display(), error));
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrganizeError;
    use crate::file_category::MediaCategory;
    use crate::file_organizer::{MoveRecord, SkipReason};
    use std::path::PathBuf;

    fn record() -> MoveRecord {
        MoveRecord {
            original_name: "IMG 0001.JPG".to_string(),
            source: PathBuf::from("/in/IMG 0001.JPG"),
            destination: PathBuf::from("/in/pictures/20250609/img_0001.jpg"),
            relative_destination: PathBuf::from("pictures/20250609/img_0001.jpg"),
            category: MediaCategory::Picture,
            renamed_on_collision: false,
        }
    }

    #[test]
    fn test_moved_line_format() {
        let line = OutputFormatter::outcome_line(&FileOutcome::Moved(record())).unwrap();
        assert_eq!(line, "Moved: IMG 0001.JPG -> pictures/20250609/img_0001.jpg");
    }

    #[test]
    fn test_planned_line_format() {
        let line = OutputFormatter::outcome_line(&FileOutcome::Planned(record())).unwrap();
        assert!(line.starts_with("Would move: IMG 0001.JPG -> "));
    }

    #[test]
    fn test_skipped_is_silent() {
        let outcome = FileOutcome::Skipped {
            path: PathBuf::from("/in/notes.txt"),
            reason: SkipReason::NotMedia,
        };
        assert!(OutputFormatter::outcome_line(&outcome).is_none());
    }

    #[test]
    fn test_failed_line_mentions_reason() {
        let outcome = FileOutcome::Failed {
            path: PathBuf::from("/in/a.jpg"),
            error: OrganizeError::CollisionUnresolved {
                dir: PathBuf::from("/in/pictures/20250609"),
                name: "a.jpg".to_string(),
            },
        };
        let line = OutputFormatter::outcome_line(&outcome).unwrap();
        assert!(line.starts_with("Skipped a.jpg (name collision)"));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1), "file");
        assert_eq!(plural(0), "files");
        assert_eq!(plural(2), "files");
    }
}
