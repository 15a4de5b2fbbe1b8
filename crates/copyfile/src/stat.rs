//! `lstat`-style probes and mutators used by the conformance suite.
//!
//! Everything here inspects the link itself, never the referent, so
//! symlink fixtures report what they are.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use rustix::fs::{AtFlags, CWD};

use crate::error::MetaError;

fn probe(path: &Path) -> Result<fs::Metadata, MetaError> {
    fs::symlink_metadata(path).map_err(|error| MetaError::new("inspect", path, error))
}

/// Whether `path` is a regular file (not following symlinks).
///
/// # Errors
///
/// Returns [`MetaError`] when `path` cannot be inspected.
pub fn is_regular_file(path: &Path) -> Result<bool, MetaError> {
    Ok(probe(path)?.file_type().is_file())
}

/// Whether `path` is a symlink.
///
/// # Errors
///
/// Returns [`MetaError`] when `path` cannot be inspected.
pub fn is_symlink(path: &Path) -> Result<bool, MetaError> {
    Ok(probe(path)?.file_type().is_symlink())
}

/// Returns the permission bits of `path` (not following symlinks).
///
/// # Errors
///
/// Returns [`MetaError`] when `path` cannot be inspected.
pub fn file_mode(path: &Path) -> Result<u32, MetaError> {
    Ok(probe(path)?.permissions().mode() & 0o7777)
}

/// Changes the permission bits of `path`.
///
/// # Errors
///
/// Returns [`MetaError`] when the mode cannot be changed.
pub fn set_file_mode(path: &Path, mode: u32) -> Result<(), MetaError> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|error| MetaError::new("change mode of", path, error))
}

/// Changes the owning group of `path` without following symlinks.
///
/// # Errors
///
/// Returns [`MetaError`] when the group cannot be changed (typically
/// `EPERM` for a group the caller is not a member of).
pub fn change_group(path: &Path, gid: u32) -> Result<(), MetaError> {
    #[allow(unsafe_code)]
    // Safety: any raw gid value is representable; validity is the kernel's
    // concern and surfaces as EPERM/EINVAL.
    let gid = unsafe { rustix::fs::Gid::from_raw(gid) };
    rustix::fs::chownat(
        CWD,
        path,
        None,
        Some(gid),
        AtFlags::SYMLINK_NOFOLLOW,
    )
    .map_err(|errno| MetaError::new("change owning group of", path, io::Error::from(errno)))
}

/// Returns the BSD file flags of `path` (not following symlinks).
///
/// # Errors
///
/// Returns [`MetaError`] when `path` cannot be inspected.
#[cfg(target_os = "macos")]
pub fn file_flags(path: &Path) -> Result<u32, MetaError> {
    use std::os::macos::fs::MetadataExt;
    Ok(probe(path)?.st_flags())
}

/// Changes the BSD file flags of `path` without following symlinks.
///
/// # Errors
///
/// Returns [`MetaError`] when the flags cannot be changed.
#[cfg(target_os = "macos")]
#[allow(unsafe_code)]
pub fn set_file_flags(path: &Path, flags: u32) -> Result<(), MetaError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        MetaError::new(
            "change flags of",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path contains interior NUL"),
        )
    })?;
    // Safety: the path pointer remains valid for the duration of the call.
    let result = unsafe { libc::lchflags(c_path.as_ptr(), flags) };
    if result == 0 {
        Ok(())
    } else {
        Err(MetaError::new(
            "change flags of",
            path,
            io::Error::last_os_error(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn probes_distinguish_files_and_symlinks() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        File::create(&file).expect("create file");
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&file, &link).expect("create link");

        assert!(is_regular_file(&file).unwrap());
        assert!(!is_symlink(&file).unwrap());
        assert!(is_symlink(&link).unwrap());
        assert!(!is_regular_file(&link).unwrap());
    }

    #[test]
    fn mode_roundtrips_through_set() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        File::create(&file).expect("create file");

        set_file_mode(&file, 0o640).expect("chmod");
        assert_eq!(file_mode(&file).unwrap(), 0o640);
    }

    #[test]
    fn change_group_to_own_group_succeeds() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        File::create(&file).expect("create file");

        // Safety: getegid has no failure mode.
        let gid = unsafe { libc::getegid() };
        change_group(&file, gid).expect("chgrp to own group");
    }

    #[test]
    fn probe_reports_missing_path() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("missing");

        let error = file_mode(&missing).expect_err("missing path");
        assert_eq!(error.source_error().kind(), io::ErrorKind::NotFound);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn flags_roundtrip_through_set() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        File::create(&file).expect("create file");

        let flags = file_flags(&file).unwrap() ^ libc::UF_HIDDEN;
        set_file_flags(&file, flags).expect("chflags");
        assert_eq!(file_flags(&file).unwrap(), flags);
    }
}
