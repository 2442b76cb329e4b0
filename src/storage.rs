//! Crash-safe file replacement shared by key files and vault files.
//!
//! Data is written to a uniquely named temp file in the same directory,
//! flushed to disk, then renamed over the target.  The rename is atomic on
//! the same filesystem, so a reader sees either the old content or the new
//! content, never a half-written file.
//!
//! The temp file is created owner-only and only takes on the target's
//! permissions once the write is complete.  It is removed on any failure.
//!
//! No file locking is done: two processes rewriting the same path at the
//! same time is the caller's problem.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::errors::Result;

/// Permissions to give the file that replaces the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permissions {
    /// Owner read/write only (`0o600` on Unix).  Used for key files.
    OwnerOnly,
    /// Keep whatever the replaced file had; a new file stays owner-only.
    /// Used for vault files.
    Preserve,
}

/// Replace the contents of `path` with `bytes` atomically.
pub fn write_atomic(path: &Path, bytes: &[u8], permissions: Permissions) -> Result<()> {
    let target_permissions = match permissions {
        Permissions::OwnerOnly => None,
        Permissions::Preserve => match fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        },
    };

    let mut tmp = create_temp(path)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Some(perms) = target_permissions {
        tmp.as_file().set_permissions(perms)?;
    }

    // On error the temp file is still owned by `PersistError` and is
    // removed when it drops.
    tmp.persist(path).map_err(|e| e.error)?;

    sync_parent(path);
    Ok(())
}

/// A fresh `.<name>.XXXXXX.tmp` beside the target, created owner-only.
///
/// The random part means an existing file is never reused or clobbered.
fn create_temp(path: &Path) -> io::Result<NamedTempFile> {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let prefix = format!(".{name}.");
    let mut builder = Builder::new();
    builder.prefix(&prefix).suffix(".tmp");
    builder.tempfile_in(parent_dir(path))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Flush the directory entry for the rename.  Failure is logged, not fatal:
/// the data itself is already on disk.
fn sync_parent(path: &Path) {
    #[cfg(unix)]
    {
        let dir = parent_dir(path);
        if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
            tracing::warn!(dir = %dir.display(), "could not sync directory: {e}");
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}
