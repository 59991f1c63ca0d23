use crate::builder::ErrorObserver;
use crate::entry::WalkEntry;
use crate::error::WalkError;
use crate::visited::{DirectoryId, VisitedSet};
use logging::{debug_log, info_log};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::iter::FusedIterator;
use std::path::PathBuf;

/// Lazy depth-first iterator over directories.
///
/// Each call to [`next`](Iterator::next) performs only the listing and stat
/// calls needed to produce one [`WalkEntry`]. Directories that cannot be
/// listed or identified are skipped together with their descendants; the
/// failures are collected in [`errors`](Self::errors) and forwarded to the
/// observer installed with [`WalkBuilder::on_error`](crate::WalkBuilder::on_error).
pub struct Walker<'a> {
    pending: Option<PathBuf>,
    stack: Vec<DirectoryFrame>,
    topdown: bool,
    follow_links: bool,
    visited: VisitedSet,
    errors: Vec<WalkError>,
    on_error: Option<ErrorObserver<'a>>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        top: PathBuf,
        topdown: bool,
        follow_links: bool,
        visited: VisitedSet,
        on_error: Option<ErrorObserver<'a>>,
    ) -> Self {
        debug_log!(
            Walk,
            1,
            "walking {:?} (topdown={}, follow_links={}, seeded={})",
            top,
            topdown,
            follow_links,
            visited.len()
        );

        Self {
            pending: Some(top),
            stack: Vec::new(),
            topdown,
            follow_links,
            visited,
            errors: Vec::new(),
            on_error,
        }
    }

    /// Failures recorded so far, in the order they occurred.
    #[must_use]
    pub fn errors(&self) -> &[WalkError] {
        &self.errors
    }

    /// Removes and returns the failures recorded so far.
    pub fn take_errors(&mut self) -> Vec<WalkError> {
        std::mem::take(&mut self.errors)
    }

    /// Directories entered so far (only populated when following links).
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Consumes the walker, returning its visited set for reuse.
    #[must_use]
    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }

    /// Drains the remaining entries and returns them with every failure.
    pub fn collect_with_errors(mut self) -> (Vec<WalkEntry>, Vec<WalkError>) {
        let entries: Vec<WalkEntry> = self.by_ref().collect();
        (entries, self.errors)
    }

    fn report(&mut self, error: WalkError) {
        debug_log!(Walk, 1, "{}", error);
        info_log!(Skip, 1, "skipping {:?}: {}", error.path(), error.io_error());
        if let Some(observer) = self.on_error.as_mut() {
            observer(&error);
        }
        self.errors.push(error);
    }

    /// Lists, identifies and classifies one directory.
    ///
    /// Returns `None` when the directory must be skipped: it could not be
    /// listed or identified, or it was already entered.
    fn open_directory(&mut self, path: PathBuf) -> Option<WalkEntry> {
        let read_dir = match fs::read_dir(&path) {
            Ok(read_dir) => read_dir,
            Err(error) => {
                self.report(WalkError::read_dir(path, error));
                return None;
            }
        };

        let mut listing = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => listing.push(entry),
                Err(error) => {
                    self.report(WalkError::read_dir_entry(path, error));
                    return None;
                }
            }
        }

        if self.follow_links {
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(error) => {
                    self.report(WalkError::identity(path, error));
                    return None;
                }
            };
            if let Some(id) = DirectoryId::of(&metadata)
                && !self.visited.insert(id)
            {
                debug_log!(Dup, 1, "skipping already visited directory: {:?}", path);
                return None;
            }
        }

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in listing {
            let is_dir = if self.follow_links {
                fs::metadata(entry.path()).is_ok_and(|metadata| metadata.is_dir())
            } else {
                entry.file_type().is_ok_and(|file_type| file_type.is_dir())
            };
            if is_dir {
                subdirs.push(entry.file_name());
            } else {
                files.push(entry.file_name());
            }
        }

        debug_log!(
            Walk,
            2,
            "entering {:?}: {} subdirectories, {} files",
            path,
            subdirs.len(),
            files.len()
        );

        Some(WalkEntry {
            path,
            subdirs,
            files,
        })
    }
}

impl Iterator for Walker<'_> {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.pending.take() {
                if let Some(entry) = self.open_directory(path) {
                    if self.topdown {
                        self.stack.push(DirectoryFrame::new(&entry, None));
                        return Some(entry);
                    }
                    let frame = DirectoryFrame::new(&entry, Some(entry.clone()));
                    self.stack.push(frame);
                }
                continue;
            }

            let frame = self.stack.last_mut()?;
            let child = frame.next_subdir().map(|name| frame.path.join(name));
            if let Some(child) = child {
                self.pending = Some(child);
                continue;
            }

            if let Some(entry) = self.stack.pop().and_then(|frame| frame.deferred) {
                return Some(entry);
            }
        }
    }
}

impl FusedIterator for Walker<'_> {}

impl fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("pending", &self.pending)
            .field("depth", &self.stack.len())
            .field("topdown", &self.topdown)
            .field("follow_links", &self.follow_links)
            .field("visited", &self.visited.len())
            .field("errors", &self.errors.len())
            .finish_non_exhaustive()
    }
}

/// A directory on the current descent path whose subdirectories are still
/// being visited.
struct DirectoryFrame {
    path: PathBuf,
    subdirs: std::vec::IntoIter<OsString>,
    /// Entry held back until the subtree is exhausted (bottom-up only).
    deferred: Option<WalkEntry>,
}

impl DirectoryFrame {
    fn new(entry: &WalkEntry, deferred: Option<WalkEntry>) -> Self {
        Self {
            path: entry.path.clone(),
            subdirs: entry.subdirs.clone().into_iter(),
            deferred,
        }
    }

    fn next_subdir(&mut self) -> Option<OsString> {
        self.subdirs.next()
    }
}
