//! ACL accessor stub for platforms without the text-format ACL API.
//!
//! Both accessors fail with [`io::ErrorKind::Unsupported`] so callers can
//! detect the missing capability instead of silently reading nothing.

use std::io;
use std::path::Path;

use crate::error::MetaError;

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "text-format ACLs are not supported on this platform",
    )
}

/// Reads the ACL on `path` as long text.
///
/// # Errors
///
/// Always fails with [`io::ErrorKind::Unsupported`] on this platform.
pub fn get_text(path: &Path) -> Result<String, MetaError> {
    Err(MetaError::new("read ACL", path, unsupported()))
}

/// Parses `text` as a long-text ACL and sets it on `path`.
///
/// # Errors
///
/// Always fails with [`io::ErrorKind::Unsupported`] on this platform.
pub fn set_text(path: &Path, _text: &str) -> Result<(), MetaError> {
    Err(MetaError::new("apply ACL", path, unsupported()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn accessors_report_unsupported() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("plain");
        File::create(&file).expect("create file");

        let read = get_text(&file).expect_err("unsupported");
        assert_eq!(read.source_error().kind(), io::ErrorKind::Unsupported);

        let write = set_text(&file, "user::rwx").expect_err("unsupported");
        assert_eq!(write.source_error().kind(), io::ErrorKind::Unsupported);
    }
}
