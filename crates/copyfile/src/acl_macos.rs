#![allow(unsafe_code)]

//! macOS ACL accessors in the long text format.
//!
//! Uses the POSIX.1e text interface from libSystem: `acl_get_link_np` /
//! `acl_to_text` for reading and `acl_from_text` / `acl_set_file` for
//! writing. `ACL_TYPE_EXTENDED` is the only ACL type macOS supports.
//!
//! Errno expectations the conformance suite relies on:
//!
//! - reading a file with no ACL set fails with `ENOENT`
//! - writing malformed ACL text fails with `EINVAL`

use std::ffi::{CStr, CString};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::error::MetaError;

mod sys {
    #![allow(non_camel_case_types)]

    use libc::{c_char, c_int, c_void, ssize_t};

    pub type acl_t = *mut c_void;
    pub type acl_type_t = c_int;

    /// The only ACL type supported by macOS.
    pub const ACL_TYPE_EXTENDED: acl_type_t = 0x0000_0100;

    unsafe extern "C" {
        pub fn acl_get_link_np(path_p: *const c_char, ty: acl_type_t) -> acl_t;
        pub fn acl_set_file(path_p: *const c_char, ty: acl_type_t, acl: acl_t) -> c_int;
        pub fn acl_free(obj_p: *mut c_void) -> c_int;
        pub fn acl_from_text(buf_p: *const c_char) -> acl_t;
        pub fn acl_to_text(acl: acl_t, len_p: *mut ssize_t) -> *mut c_char;
    }
}

/// Wrapper around a raw macOS ACL pointer with automatic cleanup.
struct AclHandle(sys::acl_t);

impl AclHandle {
    const fn as_ptr(&self) -> sys::acl_t {
        self.0
    }
}

impl Drop for AclHandle {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // Safety: the pointer originates from libSystem allocation APIs.
            unsafe {
                sys::acl_free(self.0);
            }
        }
    }
}

fn path_to_c(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains interior NUL"))
}

/// Reads the ACL on `path` as long text, without following symlinks.
///
/// # Errors
///
/// Fails with `ENOENT` as the raw OS error when no ACL is set, and with
/// the untouched OS error for any other failure.
pub fn get_text(path: &Path) -> Result<String, MetaError> {
    let c_path = path_to_c(path).map_err(|error| MetaError::new("read ACL", path, error))?;

    // Safety: the path pointer remains valid for the duration of the call.
    let acl = unsafe { sys::acl_get_link_np(c_path.as_ptr(), sys::ACL_TYPE_EXTENDED) };
    if acl.is_null() {
        return Err(MetaError::new("read ACL", path, io::Error::last_os_error()));
    }
    let acl = AclHandle(acl);

    let mut len: libc::ssize_t = 0;
    // Safety: the ACL handle is valid; the returned buffer is released
    // below with acl_free as the man page requires.
    let text = unsafe { sys::acl_to_text(acl.as_ptr(), &mut len) };
    if text.is_null() {
        return Err(MetaError::new(
            "render ACL as text",
            path,
            io::Error::last_os_error(),
        ));
    }
    // Safety: acl_to_text returns a NUL-terminated string.
    let rendered = unsafe { CStr::from_ptr(text) }
        .to_string_lossy()
        .into_owned();
    // Safety: the buffer was allocated by acl_to_text.
    unsafe {
        sys::acl_free(text.cast());
    }
    Ok(rendered)
}

/// Parses `text` as a long-text ACL and sets it on `path`.
///
/// # Errors
///
/// Fails with `EINVAL` as the raw OS error when the text is malformed,
/// and with the untouched OS error when applying the ACL fails.
pub fn set_text(path: &Path, text: &str) -> Result<(), MetaError> {
    let c_text = CString::new(text).map_err(|error| {
        MetaError::new(
            "parse ACL text",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, error),
        )
    })?;

    // Safety: the text pointer remains valid for the duration of the call.
    let acl = unsafe { sys::acl_from_text(c_text.as_ptr()) };
    if acl.is_null() {
        return Err(MetaError::new(
            "parse ACL text",
            path,
            io::Error::last_os_error(),
        ));
    }
    let acl = AclHandle(acl);

    let c_path = path_to_c(path).map_err(|error| MetaError::new("apply ACL", path, error))?;
    // Safety: both pointers are valid; libSystem owns the ACL data.
    let result =
        unsafe { sys::acl_set_file(c_path.as_ptr(), sys::ACL_TYPE_EXTENDED, acl.as_ptr()) };
    if result == 0 {
        Ok(())
    } else {
        Err(MetaError::new("apply ACL", path, io::Error::last_os_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn get_text_fails_on_file_without_acl() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("plain");
        File::create(&file).expect("create file");

        let error = get_text(&file).expect_err("no ACL set");
        assert_eq!(error.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn set_text_rejects_malformed_text() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("plain");
        File::create(&file).expect("create file");

        let error = set_text(&file, "not an acl").expect_err("malformed text");
        assert_eq!(error.raw_os_error(), Some(libc::EINVAL));
    }
}
