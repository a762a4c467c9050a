//! Collision-safe file moves into category directories.
//!
//! This module computes the destination path for a file inside its category
//! subfolder, resolves name collisions with a numeric suffix, and performs
//! (or, in dry-run mode, only simulates) the move. Every action produces a
//! [`MoveRecord`] for logging; nothing here writes to the console.

use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while moving a file.
#[derive(Debug)]
pub enum OrganizeError {
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file move operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What happened (or would happen) to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The file was moved to its destination.
    Moved,
    /// Dry-run mode: the move was computed but not performed.
    Simulated,
    /// The move failed; the reason is reported and the run continues.
    Skipped { reason: String },
}

impl MoveOutcome {
    /// The outcome word used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::Simulated => "simulated",
            MoveOutcome::Skipped { .. } => "skipped",
        }
    }
}

/// A single file move, resolved and (possibly) performed.
///
/// Records are only used for logging; they are not persisted as state.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// Where the file was before the move.
    pub source: PathBuf,
    /// The collision-resolved destination path.
    pub destination: PathBuf,
    /// What happened.
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    /// Builds a skipped record for a move that failed.
    pub fn skipped(source: PathBuf, destination: PathBuf, reason: String) -> Self {
        Self {
            source,
            destination,
            outcome: MoveOutcome::Skipped { reason },
        }
    }
}

/// Resolves a destination path that may already be occupied.
///
/// If the path is free it is returned unchanged. Otherwise a numeric suffix
/// is appended before the extension (`name_1.ext`, `name_2.ext`, ...) and
/// incremented until a free name is found. Extensionless files get the bare
/// `name_1`, `name_2`, ... series. An existing file is never overwritten, and
/// the loop terminates for any finite number of collisions.
pub fn resolve_collision(destination: &Path) -> PathBuf {
    if !destination.exists() {
        return destination.to_path_buf();
    }

    let parent = destination.parent().unwrap_or_else(|| Path::new(""));
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = destination
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let candidate = parent.join(format!("{}_{}{}", stem, counter, suffix));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves files into category subdirectories of a base directory.
///
/// A `Mover` is constructed once per run with the base path and the dry-run
/// flag; both are immutable afterwards. In dry-run mode destinations are
/// resolved exactly as in live mode but the filesystem is never touched.
#[derive(Debug, Clone)]
pub struct Mover {
    base_path: PathBuf,
    dry_run: bool,
}

impl Mover {
    /// Creates a mover rooted at `base_path`.
    pub fn new(base_path: &Path, dry_run: bool) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            dry_run,
        }
    }

    /// Moves (or simulates moving) a file into its category directory.
    ///
    /// The destination is `<base>/<category>/<filename>`, collision-resolved.
    /// The category directory is created if missing; creating it again is not
    /// an error. In dry-run mode the returned record carries
    /// [`MoveOutcome::Simulated`] and no directory or file is touched.
    ///
    /// # Errors
    ///
    /// Returns an `OrganizeError` if the base path does not exist, the
    /// category directory cannot be created, or the rename fails. Callers are
    /// expected to turn per-file errors into skipped records and continue.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use organizer::mover::Mover;
    /// use std::path::Path;
    ///
    /// let mover = Mover::new(Path::new("/path/to/downloads"), false);
    /// let record = mover.move_to_category(Path::new("/path/to/downloads/photo.jpg"), "Images");
    ///
    /// match record {
    ///     Ok(r) => println!("{} -> {}", r.source.display(), r.destination.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category(&self, file_path: &Path, category: &str) -> OrganizeResult<MoveRecord> {
        if !self.base_path.exists() {
            return Err(OrganizeError::InvalidBasePath {
                path: self.base_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let category_path = self.base_path.join(category);

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination = resolve_collision(&category_path.join(file_name));

        if self.dry_run {
            return Ok(MoveRecord {
                source: file_path.to_path_buf(),
                destination,
                outcome: MoveOutcome::Simulated,
            });
        }

        fs::create_dir_all(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: category_path.clone(),
            source: e,
        })?;

        fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(MoveRecord {
            source: file_path.to_path_buf(),
            destination,
            outcome: MoveOutcome::Moved,
        })
    }

    /// The intended, unresolved destination for a file and category.
    ///
    /// Used to report a meaningful destination when the move itself failed
    /// before a resolved path existed.
    pub fn intended_destination(&self, file_path: &Path, category: &str) -> PathBuf {
        match file_path.file_name() {
            Some(name) => self.base_path.join(category).join(name),
            None => self.base_path.join(category),
        }
    }
}
