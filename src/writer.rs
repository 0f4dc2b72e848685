use crate::permissions::PermissionSnapshot;
use crate::replace::ReplaceError;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Replace the content of `path` with `content`, preserving its mode bits.
///
/// The owner-write bit is added if missing, the new content is written
/// atomically, and `snapshot` is restored on `path` afterwards whether or not
/// the write succeeded. A write failure takes precedence over a restore
/// failure in the returned error.
pub fn write_replacing(
    path: &Path,
    content: &[u8],
    snapshot: PermissionSnapshot,
) -> Result<(), ReplaceError> {
    let permissions_error = |source| ReplaceError::Permissions {
        path: path.to_path_buf(),
        source,
    };

    let relaxed = snapshot.relax(path).map_err(permissions_error)?;
    if relaxed {
        debug!(path = %path.display(), "added owner write permission");
    }

    let written = atomic_write(path, content, &snapshot).map_err(|source| ReplaceError::Write {
        path: path.to_path_buf(),
        source,
    });
    let restored = snapshot.restore(path);

    match (written, restored) {
        (Ok(()), Ok(())) => {
            debug!(path = %path.display(), len = content.len(), "rewrote file");
            Ok(())
        }
        (Ok(()), Err(source)) => Err(permissions_error(source)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_err)) => {
            warn!(
                path = %path.display(),
                error = %restore_err,
                "could not restore permissions after failed write"
            );
            Err(e)
        }
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The temp file lives in the target's directory so the final rename stays
/// on one filesystem, and it carries the snapshot's permission bits before
/// it replaces the target. The directory itself must be writable.
pub fn atomic_write(path: &Path, content: &[u8], snapshot: &PermissionSnapshot) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".fastreplace")
        .tempfile_in(parent)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.as_file()
        .set_permissions(snapshot.permissions().clone())?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
