use crate::error::WalkError;
use crate::visited::VisitedSet;
use crate::walker::Walker;
use std::fmt;
use std::path::PathBuf;

/// Callback invoked with every failure the walker skips over.
pub(crate) type ErrorObserver<'a> = Box<dyn FnMut(&WalkError) + 'a>;

/// Configures a traversal rooted at a specific directory.
///
/// Defaults: top-down order, symbolic links followed, a fresh
/// [`VisitedSet`], and no error observer.
pub struct WalkBuilder<'a> {
    top: PathBuf,
    topdown: bool,
    follow_links: bool,
    visited: VisitedSet,
    on_error: Option<ErrorObserver<'a>>,
}

impl<'a> WalkBuilder<'a> {
    /// Creates a new builder that will traverse `top`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(top: P) -> Self {
        Self {
            top: top.into(),
            topdown: true,
            follow_links: true,
            visited: VisitedSet::new(),
            on_error: None,
        }
    }

    /// Selects pre-order (`true`) or post-order (`false`) production.
    ///
    /// In pre-order a directory is produced before any of its descendants;
    /// in post-order it is produced after all of them.
    #[must_use]
    pub fn topdown(mut self, topdown: bool) -> Self {
        self.topdown = topdown;
        self
    }

    /// Configures whether symbolic links to directories are traversed.
    ///
    /// When enabled, every directory is identified by device and inode
    /// before it is produced, and a directory that was already entered is
    /// skipped; this is what stops symlink cycles. When disabled, a symlink
    /// to a directory is reported among its parent's files and never
    /// entered.
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Seeds the traversal with directories that must not be entered.
    ///
    /// Use [`Walker::into_visited`] to carry a set from one traversal to
    /// the next.
    #[must_use]
    pub fn visited(mut self, visited: VisitedSet) -> Self {
        self.visited = visited;
        self
    }

    /// Installs an observer that sees each failure as it happens.
    ///
    /// Failures are also retained by the walker, see [`Walker::errors`].
    #[must_use]
    pub fn on_error<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&WalkError) + 'a,
    {
        self.on_error = Some(Box::new(observer));
        self
    }

    /// Builds a [`Walker`] using the configured options.
    ///
    /// No filesystem access happens until the walker is first advanced.
    #[must_use]
    pub fn build(self) -> Walker<'a> {
        Walker::new(
            self.top,
            self.topdown,
            self.follow_links,
            self.visited,
            self.on_error,
        )
    }
}

impl fmt::Debug for WalkBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkBuilder")
            .field("top", &self.top)
            .field("topdown", &self.topdown)
            .field("follow_links", &self.follow_links)
            .field("visited", &self.visited.len())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
