//! Portable backend for Unix targets without `copyfile(3)`.
//!
//! Implements the same contract: content plus permission bits travel,
//! symlink sources are recreated when following is disabled, and a
//! symlink destination is written through when file data is copied.
//! When both ends are symlinks and following is disabled, the
//! destination link is replaced — not written through — so the result
//! is a link to the source's target, and a stale referent is left
//! untouched. File flags are a BSD notion with no equivalent here; the
//! native backend covers them.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;

use crate::error::CopyError;
use crate::options::CopyOptions;

/// Performs the copy with plain filesystem calls.
pub(super) fn copy_contents(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<(), CopyError> {
    if !options.follows_symlinks()
        && fs::symlink_metadata(src)
            .map_err(|error| CopyError::io("inspect copy source", src, error))?
            .file_type()
            .is_symlink()
    {
        return recreate_symlink(src, dst);
    }

    // Opening with truncate writes through a symlink destination, and
    // creates the referent of a dangling one.
    let mut reader =
        fs::File::open(src).map_err(|error| CopyError::io("open copy source", src, error))?;
    let mut writer = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dst)
        .map_err(|error| CopyError::io("open copy destination", dst, error))?;
    let written = io::copy(&mut reader, &mut writer)
        .map_err(|error| CopyError::io("copy file", src, error))?;
    trace!(written, "portable backend copied file data");

    let permissions = reader
        .metadata()
        .map_err(|error| CopyError::io("inspect copy source", src, error))?
        .permissions();
    writer
        .set_permissions(permissions)
        .map_err(|error| CopyError::io("set permissions on", dst, error))?;
    Ok(())
}

/// Recreates a symlink source at the destination, replacing a stale link
/// or file left from an earlier run.
fn recreate_symlink(src: &Path, dst: &Path) -> Result<(), CopyError> {
    let target =
        fs::read_link(src).map_err(|error| CopyError::io("read symlink target of", src, error))?;
    match std::os::unix::fs::symlink(&target, dst) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
            fs::remove_file(dst)
                .map_err(|error| CopyError::io("replace copy destination", dst, error))?;
            std::os::unix::fs::symlink(&target, dst)
                .map_err(|error| CopyError::io("create symlink at", dst, error))
        }
        Err(error) => Err(CopyError::io("create symlink at", dst, error)),
    }
}
