use std::fs::{self, Permissions};
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
const OWNER_WRITE: u32 = 0o200;

/// The mode bits of a file, captured before it is mutated.
///
/// A snapshot is restored by value, consuming it, so a single rewrite can
/// restore the original mode at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a captured snapshot should be restored"]
pub struct PermissionSnapshot {
    original: Permissions,
}

impl PermissionSnapshot {
    /// Query the current permission bits of `path`.
    pub fn capture(path: &Path) -> io::Result<Self> {
        let original = fs::metadata(path)?.permissions();
        Ok(Self { original })
    }

    pub fn permissions(&self) -> &Permissions {
        &self.original
    }

    /// Raw mode bits (Unix) of the snapshot.
    #[cfg(unix)]
    pub fn mode(&self) -> u32 {
        self.original.mode()
    }

    /// Whether the owner can already write without relaxing anything.
    pub fn is_owner_writable(&self) -> bool {
        #[cfg(unix)]
        {
            self.original.mode() & OWNER_WRITE != 0
        }
        #[cfg(not(unix))]
        {
            !self.original.readonly()
        }
    }

    /// Grant the owner write access on `path`, changing nothing else.
    ///
    /// Returns `false` when the file was already owner-writable and no change
    /// was made.
    pub fn relax(&self, path: &Path) -> io::Result<bool> {
        if self.is_owner_writable() {
            return Ok(false);
        }

        #[cfg(unix)]
        let relaxed = Permissions::from_mode(self.original.mode() | OWNER_WRITE);
        #[cfg(not(unix))]
        let relaxed = {
            let mut p = self.original.clone();
            p.set_readonly(false);
            p
        };

        fs::set_permissions(path, relaxed)?;
        Ok(true)
    }

    /// Put the captured bits back on `path`.
    pub fn restore(self, path: &Path) -> io::Result<()> {
        fs::set_permissions(path, self.original)
    }
}
