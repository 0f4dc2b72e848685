//! Whole-file loading.

use crate::permissions::PermissionSnapshot;
use crate::replace::ReplaceError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file read fully into memory, together with the metadata needed to
/// rewrite it.
#[derive(Debug)]
pub struct SourceFile {
    /// Canonical path; symlinks are resolved so the rewrite lands on the target.
    path: PathBuf,
    bytes: Vec<u8>,
    permissions: PermissionSnapshot,
}

impl SourceFile {
    /// Read `path` verbatim.
    ///
    /// Any failure to resolve, open or read the file is reported as
    /// [`ReplaceError::NotFound`].
    pub fn load(path: &Path) -> Result<Self, ReplaceError> {
        let not_found = |source| ReplaceError::NotFound {
            path: path.to_path_buf(),
            source,
        };

        let canonical = path.canonicalize().map_err(not_found)?;
        let permissions = PermissionSnapshot::capture(&canonical).map_err(not_found)?;
        let bytes = fs::read(&canonical).map_err(not_found)?;

        debug!(path = %canonical.display(), len = bytes.len(), "loaded source file");

        Ok(Self {
            path: canonical,
            bytes,
            permissions,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn permissions(&self) -> &PermissionSnapshot {
        &self.permissions
    }

    /// Drop the loaded bytes, keeping what the writer still needs.
    pub fn release(self) -> (PathBuf, PermissionSnapshot) {
        (self.path, self.permissions)
    }
}
