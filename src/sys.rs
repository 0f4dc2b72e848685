//! Single-call operating system helpers used around relocation.
//!
//! Each function wraps one OS facility and returns its result unchanged; none
//! of them is part of the replace pipeline.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// The process file-creation mask.
///
/// The mask can only be read by setting it, so it is set and immediately
/// restored. Not thread-safe with respect to concurrent file creation.
#[cfg(unix)]
pub fn umask() -> u32 {
    use nix::sys::stat::{umask as set_umask, Mode};

    let previous = set_umask(Mode::empty());
    set_umask(previous);
    u32::from(previous.bits())
}

/// Raise the soft open-file-descriptor limit towards `target`.
///
/// The soft limit is never raised above the hard limit and never lowered.
/// Returns the soft limit in effect afterwards.
#[cfg(unix)]
pub fn raise_open_file_limit(target: u64) -> io::Result<u64> {
    use nix::sys::resource::{getrlimit, setrlimit, Resource};

    let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE)?;
    let wanted = target.min(hard);
    if wanted <= soft {
        return Ok(soft);
    }

    setrlimit(Resource::RLIMIT_NOFILE, wanted, hard)?;
    Ok(wanted)
}

/// Give every entry under `root` (including `root`) owner write access.
///
/// Symlinks are not followed. Returns the number of entries whose
/// permissions were changed.
pub fn clear_readonly_recursive(root: &Path) -> io::Result<usize> {
    let mut changed = 0;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.path_is_symlink() {
            continue;
        }

        let mut permissions = entry.metadata().map_err(io::Error::from)?.permissions();
        #[cfg(unix)]
        let locked = permissions.mode() & 0o200 == 0;
        #[cfg(not(unix))]
        let locked = permissions.readonly();
        if !locked {
            continue;
        }

        #[cfg(unix)]
        permissions.set_mode(permissions.mode() | 0o200);
        #[cfg(not(unix))]
        permissions.set_readonly(false);

        fs::set_permissions(entry.path(), permissions)?;
        changed += 1;
    }

    Ok(changed)
}

/// Move `from` to `to`, replacing an existing destination file.
pub fn move_path(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if to.is_file() {
            fs::remove_file(to)?;
        }
    }

    fs::rename(from, to)
}
