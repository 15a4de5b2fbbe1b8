#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fixture` owns the scratch directory and fixture naming used by the
//! copyfile conformance suites. A [`FixtureDir`] creates one private
//! scratch directory per suite and removes it on drop; [`FixtureNamer`]
//! hands out unique, human-traceable paths inside it so individual tests
//! never have to manage naming collisions themselves.
//!
//! # Design
//!
//! Each fixture path encodes the requesting call site: the test name
//! supplied when the namer was opened, the source line recovered through
//! `#[track_caller]` and [`Location::caller`], and a per-site ordinal
//! that disambiguates repeated requests from the same line. A
//! namer opened without a test name ([`FixtureDir::anonymous`]) falls back
//! to a random alphanumeric token, which is unique unconditionally.
//!
//! Naming is pure path computation — nothing touches the filesystem until
//! a caller materializes the path with one of the `create_*` helpers.
//!
//! # Invariants
//!
//! - Per-site ordinals start at 1, strictly increase, and are never reused
//!   within a run.
//! - No two fixture requests yield the same path, including repeated
//!   requests from one source line and requests from anonymous call sites.
//!
//! # Examples
//!
//! ```
//! use fixture::FixtureDir;
//!
//! let fixtures = FixtureDir::new().unwrap();
//! let namer = fixtures.namer("overwrite");
//! let first = namer.next_path("file");
//! let second = namer.next_path("file");
//! assert_ne!(first, second);
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tempfile::TempDir;

/// Environment variable that retains the scratch directory for inspection.
const KEEP_ENV: &str = "FIXTURE_KEEP";

/// Length of the random token used for anonymous fixture names.
const TOKEN_LEN: usize = 12;

/// Characters used for random token generation (alphanumeric, matching
/// typical `mkstemp` implementations).
const RAND_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A call site requesting fixtures: test name plus source line.
type CallSite = (String, u32);

/// Scratch directory root, either temporary or retained for debugging.
#[derive(Debug)]
enum Root {
    /// Removed when the [`FixtureDir`] is dropped.
    Temporary(TempDir),
    /// Retained on disk because `FIXTURE_KEEP` was set.
    Kept(PathBuf),
}

impl Root {
    fn path(&self) -> &Path {
        match self {
            Self::Temporary(dir) => dir.path(),
            Self::Kept(path) => path,
        }
    }
}

/// Suite-scoped scratch directory with per-call-site fixture counters.
///
/// The directory is created once per suite and removed when the value is
/// dropped, unless the `FIXTURE_KEEP` environment variable is set to a
/// value other than `0`. Counters are shared by every [`FixtureNamer`]
/// opened from this directory, so names stay unique across tests.
#[derive(Debug)]
pub struct FixtureDir {
    root: Root,
    counters: Mutex<HashMap<CallSite, u64>>,
}

impl FixtureDir {
    /// Creates the scratch directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] when the temporary directory
    /// cannot be created.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("fixture-").tempdir()?;
        let root = if keep_requested() {
            Root::Kept(dir.keep())
        } else {
            Root::Temporary(dir)
        };
        Ok(Self {
            root,
            counters: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the scratch directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Opens a namer bound to `test`, the name of the requesting test.
    ///
    /// Paths produced through the returned namer embed `test`, the caller's
    /// source line, and a per-site ordinal.
    #[must_use]
    pub fn namer(&self, test: &str) -> FixtureNamer<'_> {
        FixtureNamer {
            dir: self,
            test: Some(test.to_owned()),
        }
    }

    /// Opens a namer with no associated test.
    ///
    /// Paths produced through the returned namer carry a random token
    /// instead of a call-site key.
    #[must_use]
    pub fn anonymous(&self) -> FixtureNamer<'_> {
        FixtureNamer {
            dir: self,
            test: None,
        }
    }

    /// Increments and returns the ordinal for the given call site.
    ///
    /// Ordinals start at 1 on first use and never repeat within a run.
    fn next_ordinal(&self, test: &str, line: u32) -> u64 {
        let mut counters = self
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let counter = counters.entry((test.to_owned(), line)).or_insert(0);
        *counter += 1;
        *counter
    }
}

/// Hands out fixture paths and materializes fixtures for one call-site
/// scope.
///
/// Borrowed from a [`FixtureDir`]; all namers share the directory's
/// counter table.
#[derive(Debug)]
pub struct FixtureNamer<'a> {
    dir: &'a FixtureDir,
    test: Option<String>,
}

impl FixtureNamer<'_> {
    /// Computes the next unique path for a fixture of the given kind.
    ///
    /// The path is `<scratch>/<test>_line-<line>_<ordinal>_<kind>` for a
    /// named namer and `<scratch>/<kind>-<token>` for an anonymous one.
    /// This never fails and never touches the filesystem.
    #[must_use]
    #[track_caller]
    pub fn next_path(&self, kind: &str) -> PathBuf {
        let name = match &self.test {
            Some(test) => {
                let line = Location::caller().line();
                let ordinal = self.dir.next_ordinal(test, line);
                format!("{test}_line-{line}_{ordinal}_{kind}")
            }
            None => format!("{kind}-{}", random_token()),
        };
        self.dir.path().join(name)
    }

    /// Creates a regular file with the given contents and returns its path.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] when the file cannot be
    /// written.
    #[track_caller]
    pub fn create_file(&self, contents: &str) -> io::Result<PathBuf> {
        let path = self.next_path("file");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Creates an empty directory and returns its path.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] when the directory cannot be
    /// created.
    #[track_caller]
    pub fn create_dir(&self) -> io::Result<PathBuf> {
        let path = self.next_path("dir");
        fs::create_dir(&path)?;
        Ok(path)
    }

    /// Creates a symlink pointing at `target` and returns the link's path.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] when the link cannot be
    /// created.
    #[cfg(unix)]
    #[track_caller]
    pub fn create_symlink(&self, target: &Path) -> io::Result<PathBuf> {
        let path = self.next_path("link");
        std::os::unix::fs::symlink(target, &path)?;
        Ok(path)
    }

    /// Creates a symlink whose target does not exist and returns the
    /// link's path.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] when the link cannot be
    /// created.
    #[cfg(unix)]
    #[track_caller]
    pub fn create_hanging_symlink(&self) -> io::Result<PathBuf> {
        let target = self.next_path("doesnt_exist");
        let path = self.next_path("bad_link");
        std::os::unix::fs::symlink(&target, &path)?;
        Ok(path)
    }
}

/// Whether `FIXTURE_KEEP` asks to retain the scratch directory.
fn keep_requested() -> bool {
    std::env::var_os(KEEP_ENV).is_some_and(|value| value != "0")
}

/// Produces a random alphanumeric token from OS entropy.
fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    getrandom::fill(&mut bytes).expect("getrandom failed");
    bytes
        .iter()
        .map(|&b| RAND_CHARS[(b as usize) % RAND_CHARS.len()] as char)
        .collect()
}
