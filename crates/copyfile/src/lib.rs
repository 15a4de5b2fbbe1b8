#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `copyfile` is a thin, safe wrapper around the platform file-copy
//! primitive together with the metadata accessors its conformance suite
//! needs. On macOS the transfer is delegated to `copyfile(3)`; elsewhere a
//! portable backend implements the same contract with plain filesystem
//! calls, so the suite runs on any Unix.
//!
//! # Design
//!
//! [`copy_with`] performs the pre-flight checks itself — special-file
//! sources, directory and named-pipe destinations, copying a file onto
//! itself — and only then hands the transfer to the platform backend.
//! Content and permission bits travel with the copy; extended attributes,
//! ACLs, resource forks, and the owning group deliberately do not. The
//! [`xattr`], [`acl`], and [`stat`] modules expose the state the suite
//! asserts on, preserving raw OS errnos end to end.
//!
//! # Errors
//!
//! The copy engine reports [`CopyError`]; metadata accessors report
//! [`MetaError`]. Neither wraps or rewrites the operating system's errno —
//! a failure observed during a conformance run is attributable to the
//! platform, not to this crate.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let src = dir.path().join("src.txt");
//! fs::write(&src, "hello world").unwrap();
//!
//! let dst = dir.path().join("dst.txt");
//! copyfile::copy(&src, &dst).unwrap();
//! assert_eq!(fs::read_to_string(&dst).unwrap(), "hello world");
//! ```

mod copy;
mod error;
mod options;

pub mod stat;
#[cfg(unix)]
pub mod xattr;

#[cfg(target_os = "macos")]
#[path = "acl_macos.rs"]
pub mod acl;

#[cfg(not(target_os = "macos"))]
#[path = "acl_stub.rs"]
pub mod acl;

pub use copy::{copy, copy_with};
pub use error::{CopyError, MetaError};
pub use options::CopyOptions;
