//! Extended-attribute accessors.
//!
//! Thin wrappers over `getxattr(2)`/`setxattr(2)` that never follow
//! symlinks, surfacing the platform's "no such attribute" errno when an
//! attribute is absent so conformance tests can assert on it.

use std::io;
use std::path::Path;

use crate::error::MetaError;

/// Errno reported when a named attribute does not exist.
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd"
))]
pub const NO_SUCH_ATTRIBUTE: i32 = libc::ENOATTR;
/// Errno reported when a named attribute does not exist.
#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd"
)))]
pub const NO_SUCH_ATTRIBUTE: i32 = libc::ENODATA;

/// Reads the extended attribute `name` from `path`.
///
/// Empty values round-trip: an attribute set to zero bytes reads back as
/// an empty vector, not an error.
///
/// # Errors
///
/// Fails with [`NO_SUCH_ATTRIBUTE`] as the raw OS error when the attribute
/// is absent, and with the untouched OS error for any other failure.
pub fn get(path: &Path, name: &str) -> Result<Vec<u8>, MetaError> {
    match xattr::get(path, name) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(MetaError::new(
            "read extended attribute",
            path,
            io::Error::from_raw_os_error(NO_SUCH_ATTRIBUTE),
        )),
        Err(error) => Err(MetaError::new("read extended attribute", path, error)),
    }
}

/// Writes the extended attribute `name` on `path`.
///
/// # Errors
///
/// Returns [`MetaError`] with the untouched OS error when the attribute
/// cannot be written.
pub fn set(path: &Path, name: &str, value: &[u8]) -> Result<(), MetaError> {
    xattr::set(path, name, value)
        .map_err(|error| MetaError::new("write extended attribute", path, error))
}
