use crate::matcher::{find_all, Pattern};
use crate::rebuild::rebuild;
use crate::source::SourceFile;
use crate::writer::write_replacing;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReplaceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{} doesn't exist or cannot be read: {source}", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot change permissions of {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} cannot be written to: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Output of {matches} replacements ({new_len} bytes each) in a {file_len}-byte file does not fit in memory"
    )]
    CapacityOverflow {
        file_len: usize,
        matches: usize,
        new_len: usize,
    },
}

/// Result of a replace operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "ReplaceOutcome should be checked for the number of replacements"]
pub enum ReplaceOutcome {
    /// Pattern did not occur; the file was not opened for writing
    NoMatch { file: PathBuf },
    /// Every occurrence was replaced and the file rewritten
    Applied {
        file: PathBuf,
        matches: usize,
        original_len: usize,
        new_len: usize,
    },
}

impl ReplaceOutcome {
    pub fn matches(&self) -> usize {
        match self {
            ReplaceOutcome::NoMatch { .. } => 0,
            ReplaceOutcome::Applied { matches, .. } => *matches,
        }
    }

    pub fn file(&self) -> &Path {
        match self {
            ReplaceOutcome::NoMatch { file } | ReplaceOutcome::Applied { file, .. } => file,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ReplaceOutcome::Applied { .. })
    }
}

impl fmt::Display for ReplaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaceOutcome::NoMatch { file } => {
                write!(f, "No match in {}", file.display())
            }
            ReplaceOutcome::Applied {
                file,
                matches,
                original_len,
                new_len,
            } => write!(
                f,
                "Replaced {} occurrence(s) in {} ({} -> {} bytes)",
                matches,
                file.display(),
                original_len,
                new_len
            ),
        }
    }
}

/// A whole-file literal replacement, validated but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Replacement does nothing until apply() is called"]
pub struct Replacement {
    /// Target file
    pub file: PathBuf,
    /// Bytes to search for (never empty)
    pub pattern: Pattern,
    /// Bytes written in place of each occurrence (may be empty)
    pub replacement: Vec<u8>,
}

impl Replacement {
    /// Validate arguments. Fails with [`ReplaceError::InvalidArgument`] on an
    /// empty search pattern, before any file is touched.
    pub fn new(
        file: impl Into<PathBuf>,
        search: impl Into<Vec<u8>>,
        replacement: impl Into<Vec<u8>>,
    ) -> Result<Self, ReplaceError> {
        Ok(Self {
            file: file.into(),
            pattern: Pattern::new(search)?,
            replacement: replacement.into(),
        })
    }

    /// Load, scan, rebuild and rewrite the file once each.
    ///
    /// When the pattern does not occur the file is left byte-for-byte
    /// unchanged and never opened for writing.
    pub fn apply(&self) -> Result<ReplaceOutcome, ReplaceError> {
        let source = SourceFile::load(&self.file)?;

        let offsets = find_all(source.bytes(), &self.pattern);
        debug!(
            path = %source.path().display(),
            matches = offsets.len(),
            "scanned for pattern"
        );

        if offsets.is_empty() {
            return Ok(ReplaceOutcome::NoMatch {
                file: self.file.clone(),
            });
        }

        let original_len = source.len();
        let output = rebuild(
            source.bytes(),
            &offsets,
            self.pattern.len(),
            &self.replacement,
        )?;
        let (path, permissions) = source.release();

        write_replacing(&path, &output, permissions)?;

        Ok(ReplaceOutcome::Applied {
            file: self.file.clone(),
            matches: offsets.len(),
            original_len,
            new_len: output.len(),
        })
    }
}

/// Replace every non-overlapping occurrence of `search` in `file`.
pub fn replace_in_file(
    file: impl AsRef<Path>,
    search: &[u8],
    replacement: &[u8],
) -> Result<ReplaceOutcome, ReplaceError> {
    Replacement::new(file.as_ref(), search, replacement)?.apply()
}
