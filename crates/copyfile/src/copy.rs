//! The copy primitive: pre-flight checks shared by every platform plus a
//! per-platform backend that performs the actual transfer.
//!
//! Special-file sources and destinations are rejected before any data
//! moves, a directory destination is reported as such, and copying a file
//! onto itself is refused. Only failures past pre-flight come from the
//! platform backend.

use std::fs;
use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CopyError;
use crate::options::CopyOptions;

#[cfg(target_os = "macos")]
mod native;
#[cfg(target_os = "macos")]
use native as backend;

#[cfg(not(target_os = "macos"))]
mod portable;
#[cfg(not(target_os = "macos"))]
use portable as backend;

/// Copies `src` to `dst` with default options (symlink sources followed).
///
/// See [`copy_with`] for the full contract.
///
/// # Errors
///
/// Returns [`CopyError`] as described in [`copy_with`].
pub fn copy(src: &Path, dst: &Path) -> Result<PathBuf, CopyError> {
    copy_with(src, dst, &CopyOptions::new())
}

/// Copies `src` to `dst` and returns the destination path.
///
/// Regular file content and POSIX permission bits travel with the copy;
/// file flags travel where the platform supports them, except a
/// "restricted" flag the primitive refuses to propagate. Extended
/// attributes, ACLs, resource forks, and the owning group stay behind.
///
/// When `options` disables symlink following and `src` is a symlink, a new
/// link with the same target is created at `dst` instead of copying the
/// referent. An existing symlink at `dst` is always followed: its referent
/// is overwritten, or created when it does not yet exist.
///
/// # Errors
///
/// - [`CopyError::SpecialFile`] when `src` is not a regular file or
///   symlink (directories included), or when `dst` is a named pipe.
/// - [`CopyError::TargetIsDirectory`] when `dst` exists and is a
///   directory.
/// - [`CopyError::SameFile`] when both paths resolve to one filesystem
///   entity.
/// - [`CopyError::Io`] for anything the operating system reports,
///   errno intact.
pub fn copy_with(src: &Path, dst: &Path, options: &CopyOptions) -> Result<PathBuf, CopyError> {
    let src_meta = if options.follows_symlinks() {
        fs::metadata(src)
    } else {
        fs::symlink_metadata(src)
    }
    .map_err(|error| CopyError::io("inspect copy source", src, error))?;

    let src_type = src_meta.file_type();
    if !src_type.is_file() && !src_type.is_symlink() {
        return Err(CopyError::special_file(
            src,
            "is not a regular file or symbolic link",
        ));
    }

    // The destination is always inspected with its symlinks resolved; a
    // dangling symlink reports NotFound and is treated as absent.
    match fs::metadata(dst) {
        Ok(dst_meta) => {
            if dst_meta.is_dir() {
                return Err(CopyError::TargetIsDirectory(dst.to_path_buf()));
            }
            if dst_meta.file_type().is_fifo() {
                return Err(CopyError::special_file(dst, "is a named pipe"));
            }
            if src_meta.dev() == dst_meta.dev() && src_meta.ino() == dst_meta.ino() {
                return Err(CopyError::SameFile {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                });
            }
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(CopyError::io("inspect copy destination", dst, error)),
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        follow_symlinks = options.follows_symlinks(),
        "copying file"
    );
    backend::copy_contents(src, dst, options)?;
    Ok(dst.to_path_buf())
}
