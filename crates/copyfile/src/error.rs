use std::io;
use std::path::{Path, PathBuf};

/// Error produced by the copy primitive.
///
/// The first three variants mirror the pre-flight taxonomy of the
/// underlying platform call; [`CopyError::Io`] carries everything the
/// operating system reports during the copy itself, with the failing path
/// and untouched errno.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// The source or destination is a special file the primitive refuses
    /// to handle (directories, named pipes, devices, sockets).
    #[error("`{}` {reason}", .path.display())]
    SpecialFile {
        /// The offending path.
        path: PathBuf,
        /// Why the file was rejected.
        reason: &'static str,
    },

    /// The destination exists and is a directory.
    #[error("`{}` is a directory", .0.display())]
    TargetIsDirectory(PathBuf),

    /// Source and destination resolve to the identical filesystem entity.
    #[error("'{}' and '{}' are the same file", .src.display(), .dst.display())]
    SameFile {
        /// The copy source.
        src: PathBuf,
        /// The copy destination.
        dst: PathBuf,
    },

    /// An operating-system call failed.
    #[error("failed to {context} '{}': {source}", .path.display())]
    Io {
        /// The operation being performed.
        context: &'static str,
        /// The path involved in the failing operation.
        path: PathBuf,
        /// The underlying I/O error, errno intact.
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// Creates an I/O error with path context.
    pub(crate) fn io(context: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a special-file rejection for the given path.
    pub(crate) fn special_file(path: &Path, reason: &'static str) -> Self {
        Self::SpecialFile {
            path: path.to_path_buf(),
            reason,
        }
    }

    /// Returns the underlying [`io::Error`] when one is attached.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error produced when a metadata accessor fails.
///
/// Keeps the raw OS error untouched so callers can assert on the platform
/// taxonomy (`ENOATTR`, `EINVAL`, `ENOENT`, ...).
#[derive(Debug)]
pub struct MetaError {
    context: &'static str,
    path: PathBuf,
    source: io::Error,
}

impl MetaError {
    /// Creates a new [`MetaError`] from the supplied context, path, and
    /// source error.
    pub(crate) fn new(context: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the operation being performed when the error occurred.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// Returns the path involved in the failing operation.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying [`io::Error`] that triggered this failure.
    #[must_use]
    pub fn source_error(&self) -> &io::Error {
        &self.source
    }

    /// Returns the raw OS errno when the source error carries one.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        self.source.raw_os_error()
    }
}

impl std::fmt::Display for MetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to {} '{}': {}",
            self.context,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for MetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
