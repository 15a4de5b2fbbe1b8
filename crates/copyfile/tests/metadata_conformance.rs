//! Conformance tests for what the copy primitive carries across and what
//! it deliberately leaves behind: permission bits travel, extended
//! attributes and resource forks do not, and on macOS file flags travel
//! minus the restricted flag.

use copyfile::{copy, stat, xattr};
use fixture::FixtureDir;

const ATTR: &str = "user.copyfile.test";

#[test]
fn permission_bits_are_copied() {
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("permission_bits_are_copied");

    let src = fx.create_file("data").expect("create src");
    let dst = fx.next_path("file");

    // Flip a bit away from the default so equality is meaningful.
    let mode = stat::file_mode(&src).unwrap() ^ 0o010;
    stat::set_file_mode(&src, mode).expect("chmod src");

    copy(&src, &dst).expect("copy");
    assert_eq!(stat::file_mode(&dst).unwrap(), mode);
}

#[test]
fn extended_attributes_are_not_copied() {
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("extended_attributes_are_not_copied");

    let src = fx.create_file("data").expect("create src");
    let dst = fx.next_path("file");

    xattr::set(&src, ATTR, b"hello world").expect("set xattr");
    copy(&src, &dst).expect("copy");

    let error = xattr::get(&dst, ATTR).expect_err("xattr must not travel");
    assert_eq!(error.raw_os_error(), Some(xattr::NO_SUCH_ATTRIBUTE));
}

#[test]
fn owning_group_is_not_copied() {
    // Needs a supplementary group distinct from the effective gid to
    // make the source's group observable; skip when the caller has none.
    let Some(other) = supplementary_group() else {
        return;
    };
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("owning_group_is_not_copied");

    let src = fx.create_file("data").expect("create src");
    let dst = fx.next_path("file");

    stat::change_group(&src, other).expect("chgrp src to supplementary group");
    assert_eq!(file_group(&src), other, "precondition: chgrp must stick");

    copy(&src, &dst).expect("copy");
    assert_ne!(file_group(&dst), other, "group must not travel");
}

/// Returns the gid of `path` without following symlinks.
fn file_group(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::MetadataExt;
    std::fs::symlink_metadata(path).expect("lstat").gid()
}

/// Returns a supplementary group of the caller distinct from the
/// effective gid, when one exists.
fn supplementary_group() -> Option<u32> {
    let mut groups: [libc::gid_t; 64] = [0; 64];
    // Safety: the buffer length is passed alongside the buffer.
    let count = unsafe { libc::getgroups(groups.len() as libc::c_int, groups.as_mut_ptr()) };
    if count < 0 {
        return None;
    }
    // Safety: getegid has no failure mode.
    let egid = unsafe { libc::getegid() };
    groups[..count as usize].iter().copied().find(|&gid| gid != egid)
}

#[cfg(target_os = "macos")]
#[test]
fn file_flags_are_copied() {
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("file_flags_are_copied");

    let src = fx.create_file("data").expect("create src");
    let dst = fx.next_path("file");

    let flags = stat::file_flags(&src).unwrap() ^ libc::UF_HIDDEN;
    stat::set_file_flags(&src, flags).expect("chflags src");

    copy(&src, &dst).expect("copy");
    assert_eq!(stat::file_flags(&dst).unwrap() & libc::UF_HIDDEN, flags & libc::UF_HIDDEN);
}

#[cfg(target_os = "macos")]
#[test]
fn restricted_flag_is_not_copied() {
    // copyfile(3) withholds SF_RESTRICTED unless the destination
    // directory carries it; the scratch directory never does.
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("restricted_flag_is_not_copied");

    let src = std::path::Path::new("/System/Library/CoreServices/SystemVersion.plist");
    let dst = fx.next_path("file");

    assert_ne!(
        stat::file_flags(src).unwrap() & libc::SF_RESTRICTED,
        0,
        "precondition: source must carry SF_RESTRICTED"
    );
    copy(src, &dst).expect("copy");
    assert_eq!(stat::file_flags(&dst).unwrap() & libc::SF_RESTRICTED, 0);
}

#[cfg(target_os = "macos")]
#[test]
fn resource_fork_is_not_copied() {
    let fixtures = FixtureDir::new().expect("scratch dir");
    let fx = fixtures.namer("resource_fork_is_not_copied");

    let src = fx.create_file("data").expect("create src");
    let dst = fx.next_path("file");

    let fork = |path: &std::path::Path| path.join("..namedfork").join("rsrc");
    std::fs::write(fork(&src), "hello world").expect("write resource fork");

    copy(&src, &dst).expect("copy");
    assert!(!fork(&dst).exists());
}
