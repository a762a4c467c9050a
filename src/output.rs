//! Run logging and console output.
//!
//! Every move record produces one line of the form
//! `[<timestamp>] <outcome>: <source> -> <destination>`, written colorized to
//! the console and, unless disabled, appended verbatim to the log file. A log
//! file that cannot be opened degrades to console-only output with a warning;
//! it never aborts the run.

use crate::mover::{MoveOutcome, MoveRecord};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Default name of the append-mode log file, created in the target directory.
pub const LOG_FILE_NAME: &str = "organizer.log";

/// Formats one move record as a log line.
///
/// Skipped records carry the failure reason in a trailing parenthetical.
///
/// # Examples
///
/// ```
/// use organizer::mover::{MoveOutcome, MoveRecord};
/// use organizer::output::format_record;
/// use std::path::PathBuf;
///
/// let record = MoveRecord {
///     source: PathBuf::from("/d/photo.jpg"),
///     destination: PathBuf::from("/d/Images/photo.jpg"),
///     outcome: MoveOutcome::Moved,
/// };
/// assert_eq!(
///     format_record("2026-08-07 12:00:00", &record),
///     "[2026-08-07 12:00:00] moved: /d/photo.jpg -> /d/Images/photo.jpg"
/// );
/// ```
pub fn format_record(timestamp: &str, record: &MoveRecord) -> String {
    let base = format!(
        "[{}] {}: {} -> {}",
        timestamp,
        record.outcome.label(),
        record.source.display(),
        record.destination.display()
    );
    match &record.outcome {
        MoveOutcome::Skipped { reason } => format!("{} ({})", base, reason),
        _ => base,
    }
}

fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Writes run output to the console and optionally to an append-mode log file.
///
/// Holds the only mutable state of a run (the open log file and the progress
/// bar); the processing loop itself stays free of output concerns.
pub struct RunLogger {
    log_file: Option<File>,
    progress: Option<ProgressBar>,
}

impl RunLogger {
    /// Creates a logger that writes to the console only.
    pub fn console_only() -> Self {
        Self {
            log_file: None,
            progress: None,
        }
    }

    /// Creates a logger that also appends to the log file at `path`.
    ///
    /// The file is opened in append mode so repeated runs accumulate. If it
    /// cannot be opened a warning is printed and logging continues
    /// console-only.
    pub fn with_log_file(path: &Path) -> Self {
        let log_file = match OpenOptions::new().append(true).create(true).open(path) {
            Ok(file) => Some(file),
            Err(e) => {
                println!(
                    "{} {}",
                    "⚠".yellow(),
                    format!("Could not open log file {}: {}", path.display(), e)
                );
                None
            }
        };
        Self {
            log_file,
            progress: None,
        }
    }

    /// Logs one move record: colorized console line plus plain log-file line.
    pub fn record(&mut self, record: &MoveRecord) {
        let line = format_record(&timestamp_now(), record);

        let colored_line = match record.outcome {
            MoveOutcome::Moved => line.green(),
            MoveOutcome::Simulated => line.yellow(),
            MoveOutcome::Skipped { .. } => line.red(),
        };
        self.console_line(colored_line.to_string());

        if let Some(file) = self.log_file.as_mut() {
            // A failed log write must not abort the run
            let _ = writeln!(file, "{}", line);
        }
    }

    /// Prints an informational message in cyan.
    pub fn info(&self, message: &str) {
        self.console_line(message.cyan().to_string());
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(&self, message: &str) {
        self.console_line(format!("{} {}", "⚠".yellow(), message));
    }

    /// Prints an error message in red with an X mark.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Starts a progress bar over `total` files.
    pub fn start_progress(&mut self, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        self.progress = Some(pb);
    }

    /// Advances the progress bar by one file.
    pub fn advance_progress(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    /// Finishes and removes the progress bar.
    pub fn finish_progress(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    /// Prints the end-of-run summary: totals plus a per-category table.
    pub fn summary(
        &self,
        category_counts: &HashMap<String, usize>,
        moved: usize,
        skipped: usize,
        dry_run: bool,
    ) {
        let headline = if dry_run {
            "DRY RUN SUMMARY"
        } else {
            "SUMMARY"
        };
        self.console_line(format!("\n{}", headline.bold()));

        // Sort categories for consistent output
        let mut categories: Vec<_> = category_counts.iter().collect();
        categories.sort_by_key(|&(name, _)| name);

        let max_category_len = categories
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        self.console_line(format!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        ));
        self.console_line("-".repeat(max_category_len + 10));

        for (category, count) in &categories {
            let file_word = if **count == 1 { "file" } else { "files" };
            self.console_line(format!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_category_len
            ));
        }

        self.console_line("-".repeat(max_category_len + 10));
        let verb = if dry_run { "would move" } else { "moved" };
        self.console_line(format!(
            "Files {}: {}   skipped: {}",
            verb,
            moved.to_string().green().bold(),
            if skipped == 0 {
                skipped.to_string().normal()
            } else {
                skipped.to_string().red().bold()
            }
        ));
    }

    fn console_line(&self, line: String) {
        match &self.progress {
            // Print above the bar so lines survive bar redraws
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::MoveRecord;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn moved_record() -> MoveRecord {
        MoveRecord {
            source: PathBuf::from("/dir/photo.jpg"),
            destination: PathBuf::from("/dir/Images/photo.jpg"),
            outcome: MoveOutcome::Moved,
        }
    }

    #[test]
    fn test_format_record_moved() {
        let line = format_record("2026-08-07 10:30:00", &moved_record());
        assert_eq!(
            line,
            "[2026-08-07 10:30:00] moved: /dir/photo.jpg -> /dir/Images/photo.jpg"
        );
    }

    #[test]
    fn test_format_record_skipped_includes_reason() {
        let record = MoveRecord::skipped(
            PathBuf::from("/dir/locked.txt"),
            PathBuf::from("/dir/Documents/locked.txt"),
            "permission denied".to_string(),
        );
        let line = format_record("2026-08-07 10:30:00", &record);
        assert!(line.starts_with("[2026-08-07 10:30:00] skipped:"));
        assert!(line.ends_with("(permission denied)"));
    }

    #[test]
    fn test_format_record_simulated() {
        let record = MoveRecord {
            outcome: MoveOutcome::Simulated,
            ..moved_record()
        };
        let line = format_record("2026-08-07 10:30:00", &record);
        assert!(line.contains("] simulated: "));
    }

    #[test]
    fn test_log_file_receives_plain_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join(LOG_FILE_NAME);

        let mut logger = RunLogger::with_log_file(&log_path);
        logger.record(&moved_record());
        drop(logger);

        let content = fs::read_to_string(&log_path).expect("Failed to read log");
        assert_eq!(content.lines().count(), 1);
        let line = content.lines().next().expect("empty log");
        assert!(line.contains("moved: /dir/photo.jpg -> /dir/Images/photo.jpg"));
        assert!(line.starts_with('['), "Log lines are timestamped: {line}");
    }

    #[test]
    fn test_log_file_appends_across_runs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join(LOG_FILE_NAME);

        let mut first = RunLogger::with_log_file(&log_path);
        first.record(&moved_record());
        drop(first);

        let mut second = RunLogger::with_log_file(&log_path);
        second.record(&moved_record());
        drop(second);

        let content = fs::read_to_string(&log_path).expect("Failed to read log");
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_console_only_writes_no_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut logger = RunLogger::console_only();
        logger.record(&moved_record());

        assert!(!temp_dir.path().join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_unopenable_log_path_degrades_to_console_only() {
        // A directory path cannot be opened as a file
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut logger = RunLogger::with_log_file(temp_dir.path());
        // Must not panic
        logger.record(&moved_record());
    }
}
