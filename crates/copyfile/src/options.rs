/// Options that control the copy primitive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CopyOptions {
    follow_symlinks: bool,
}

impl CopyOptions {
    /// Creates a new [`CopyOptions`] value with defaults applied.
    ///
    /// By default symlink sources are followed and their referent is
    /// copied, matching the platform primitive's default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_symlinks: true,
        }
    }

    /// Requests that a symlink source be recreated as a symlink instead of
    /// copying its referent.
    ///
    /// Only affects the source; an existing symlink destination is always
    /// followed.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Whether a symlink source will be followed.
    #[must_use]
    pub const fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self::new()
    }
}
