#![allow(unsafe_code)]

//! macOS backend: delegates the transfer to `copyfile(3)`.
//!
//! `COPYFILE_DATA | COPYFILE_STAT` copies the content, permission bits,
//! and file flags. The library itself withholds the `SF_RESTRICTED` flag
//! unless the destination directory carries it, and it handles the
//! follow/no-follow symlink cases when asked via `COPYFILE_NOFOLLOW_SRC`.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tracing::trace;

use crate::error::CopyError;
use crate::options::CopyOptions;

mod sys {
    #![allow(non_camel_case_types)]

    use libc::{c_char, c_int, c_void};

    pub type copyfile_state_t = *mut c_void;
    pub type copyfile_flags_t = u32;

    pub const COPYFILE_STAT: copyfile_flags_t = 1 << 1;
    pub const COPYFILE_DATA: copyfile_flags_t = 1 << 3;
    pub const COPYFILE_NOFOLLOW_SRC: copyfile_flags_t = 1 << 18;

    unsafe extern "C" {
        pub fn copyfile(
            from: *const c_char,
            to: *const c_char,
            state: copyfile_state_t,
            flags: copyfile_flags_t,
        ) -> c_int;
    }
}

fn path_to_c(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains interior NUL"))
}

/// Performs the copy via `copyfile(3)`.
pub(super) fn copy_contents(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<(), CopyError> {
    let c_src = path_to_c(src).map_err(|error| CopyError::io("copy file", src, error))?;
    let c_dst = path_to_c(dst).map_err(|error| CopyError::io("copy file", dst, error))?;

    let mut flags = sys::COPYFILE_DATA | sys::COPYFILE_STAT;
    if !options.follows_symlinks() {
        flags |= sys::COPYFILE_NOFOLLOW_SRC;
    }

    // Safety: both pointers reference NUL-terminated buffers that outlive
    // the call; a null state asks the library to manage its own.
    let result = unsafe {
        sys::copyfile(c_src.as_ptr(), c_dst.as_ptr(), std::ptr::null_mut(), flags)
    };
    trace!(result, flags, "copyfile(3) returned");
    if result == 0 {
        Ok(())
    } else {
        Err(CopyError::io("copy file", src, io::Error::last_os_error()))
    }
}
