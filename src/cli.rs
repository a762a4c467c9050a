//! Command-line interface module for organizer.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - The fixed exclusion set (the tool's own files and category folders)
//! - Directory scanning and classification
//! - Move orchestration with per-file failure recovery

use crate::classifier::Classifier;
use crate::config::CategoryConfig;
use crate::mover::{MoveRecord, Mover};
use crate::output::{LOG_FILE_NAME, RunLogger};
use clap::Parser;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Organize the files of a directory into category subfolders by extension.
#[derive(Parser, Debug, Clone)]
#[command(name = "organizer", version)]
pub struct Args {
    /// The directory to scan and organize
    pub target_directory: PathBuf,

    /// Path to the JSON category mapping
    #[arg(long, default_value = "file_types.json")]
    pub config: PathBuf,

    /// Compute and log intended moves without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Disable the append-mode log file
    #[arg(long)]
    pub no_log_file: bool,

    /// Also report entries excluded from the scan
    #[arg(short, long)]
    pub verbose: bool,
}

/// File names that are never classified or moved.
///
/// Covers the tool's own footprint in the target directory: the config file,
/// the log file, the running executable, and every category folder name
/// (including the default). Matching is by plain file name.
#[derive(Debug, Clone)]
pub struct Exclusions {
    names: HashSet<String>,
}

impl Exclusions {
    /// Builds the exclusion set for one run.
    pub fn for_run(config_path: &Path, classifier: &Classifier) -> Self {
        let mut names = HashSet::new();
        names.insert(LOG_FILE_NAME.to_string());

        if let Some(name) = config_path.file_name() {
            names.insert(name.to_string_lossy().into_owned());
        }

        // The compiled binary is this tool's equivalent of "the script itself"
        if let Ok(exe) = std::env::current_exe()
            && let Some(name) = exe.file_name()
        {
            names.insert(name.to_string_lossy().into_owned());
        }

        for category in classifier.category_names() {
            names.insert(category.clone());
        }

        Self { names }
    }

    /// Returns true if a file name is protected from organization.
    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }
}

/// Runs the organizer with parsed arguments.
///
/// This is the main entry point for CLI operations. Fatal errors (missing or
/// malformed config, missing or unreadable target directory) are returned as
/// `Err`; per-file move failures are logged as skipped and do not fail the
/// run.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use organizer::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["organizer", "/home/user/Downloads", "--dry-run"]);
/// if let Err(e) = run_cli(&args) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(args: &Args) -> Result<(), String> {
    let config = CategoryConfig::load(&args.config)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let classifier = Classifier::from_config(&config);

    let base_path = &args.target_directory;
    if !base_path.is_dir() {
        return Err(format!(
            "Target directory {} not found or is not a directory",
            base_path.display()
        ));
    }

    let exclusions = Exclusions::for_run(&args.config, &classifier);
    let mut logger = if args.no_log_file {
        RunLogger::console_only()
    } else {
        RunLogger::with_log_file(&base_path.join(LOG_FILE_NAME))
    };

    organize_directory(
        base_path,
        &classifier,
        &exclusions,
        &mut logger,
        args.dry_run,
        args.verbose,
    )
}

/// Scans the target directory and moves (or simulates moving) every
/// non-excluded file into its category subfolder.
///
/// Entries are processed one at a time in file-name order so runs are
/// deterministic. Directories are never touched; excluded names are never
/// classified. A per-file failure becomes a skipped record and the loop
/// continues with the next file.
fn organize_directory(
    base_path: &Path,
    classifier: &Classifier,
    exclusions: &Exclusions,
    logger: &mut RunLogger,
    dry_run: bool,
    verbose: bool,
) -> Result<(), String> {
    logger.info(&format!(
        "Scanning directory: {}{}",
        base_path.display(),
        if dry_run { " (dry run)" } else { "" }
    ));

    let entries = fs::read_dir(base_path)
        .map_err(|e| format!("Error reading directory {}: {}", base_path.display(), e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);

        if !is_file {
            if verbose {
                logger.info(&format!("Skipping directory: {}", name));
            }
            continue;
        }
        if exclusions.contains(&name) {
            if verbose {
                logger.info(&format!("Skipping protected file: {}", name));
            }
            continue;
        }
        files.push(entry.path());
    }

    if files.is_empty() {
        logger.info("No files found to organize.");
        return Ok(());
    }

    // Directory-listing order is not guaranteed; sort for determinism
    files.sort();

    let mover = Mover::new(base_path, dry_run);
    let mut category_counts: HashMap<String, usize> = HashMap::new();
    let mut moved = 0usize;
    let mut skipped = 0usize;

    if !dry_run {
        logger.start_progress(files.len() as u64);
    }

    for file_path in &files {
        let category = classifier.classify_path(file_path);

        match mover.move_to_category(file_path, category) {
            Ok(record) => {
                logger.record(&record);
                *category_counts.entry(category.to_string()).or_insert(0) += 1;
                moved += 1;
            }
            Err(e) => {
                let record = MoveRecord::skipped(
                    file_path.clone(),
                    mover.intended_destination(file_path, category),
                    e.to_string(),
                );
                logger.record(&record);
                skipped += 1;
            }
        }
        logger.advance_progress();
    }

    logger.finish_progress();
    logger.summary(&category_counts, moved, skipped, dry_run);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier_from(json: &str) -> Classifier {
        let config: CategoryConfig = serde_json::from_str(json).expect("Invalid test config");
        Classifier::from_config(&config)
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["organizer", "/tmp/downloads"]).expect("parse failed");
        assert_eq!(args.target_directory, PathBuf::from("/tmp/downloads"));
        assert_eq!(args.config, PathBuf::from("file_types.json"));
        assert!(!args.dry_run);
        assert!(!args.no_log_file);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "organizer",
            "/tmp/downloads",
            "--dry-run",
            "--no-log-file",
            "--config",
            "custom.json",
            "--verbose",
        ])
        .expect("parse failed");

        assert!(args.dry_run);
        assert!(args.no_log_file);
        assert!(args.verbose);
        assert_eq!(args.config, PathBuf::from("custom.json"));
    }

    #[test]
    fn test_args_require_target() {
        assert!(Args::try_parse_from(["organizer"]).is_err());
    }

    #[test]
    fn test_exclusions_protect_tool_files() {
        let classifier = classifier_from(r#"{"Images": [".jpg"]}"#);
        let exclusions = Exclusions::for_run(Path::new("file_types.json"), &classifier);

        assert!(exclusions.contains("file_types.json"));
        assert!(exclusions.contains(LOG_FILE_NAME));
        assert!(!exclusions.contains("photo.jpg"));
    }

    #[test]
    fn test_exclusions_protect_category_names() {
        let classifier = classifier_from(r#"{"Images": [".jpg"], "Documents": [".txt"]}"#);
        let exclusions = Exclusions::for_run(Path::new("file_types.json"), &classifier);

        assert!(exclusions.contains("Images"));
        assert!(exclusions.contains("Documents"));
        assert!(exclusions.contains("Others"));
    }

    #[test]
    fn test_exclusions_use_config_file_name_only() {
        let classifier = classifier_from("{}");
        let exclusions =
            Exclusions::for_run(Path::new("/etc/organizer/custom_types.json"), &classifier);

        assert!(exclusions.contains("custom_types.json"));
        assert!(!exclusions.contains("file_types.json"));
    }

    #[test]
    fn test_run_cli_missing_target_directory() {
        use std::io::Write;
        let mut config = tempfile::NamedTempFile::new().expect("temp file");
        config
            .write_all(br#"{"Images": [".jpg"]}"#)
            .expect("write config");

        let args = Args {
            target_directory: PathBuf::from("/non/existent/dir"),
            config: config.path().to_path_buf(),
            dry_run: false,
            no_log_file: true,
            verbose: false,
        };

        let err = run_cli(&args).expect_err("should fail");
        assert!(err.contains("Target directory"));
    }

    #[test]
    fn test_run_cli_missing_config() {
        let temp_dir = tempfile::TempDir::new().expect("temp dir");
        let args = Args {
            target_directory: temp_dir.path().to_path_buf(),
            config: PathBuf::from("/non/existent/file_types.json"),
            dry_run: false,
            no_log_file: true,
            verbose: false,
        };

        let err = run_cli(&args).expect_err("should fail");
        assert!(err.contains("configuration"));
    }
}
