use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure observed while traversing one directory.
///
/// The walker never yields these from its iterator. Each one is handed to
/// the optional observer and kept in the walker's error list; the affected
/// directory is skipped along with everything beneath it.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDirEntry { path, source })
    }

    pub(crate) fn identity(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::Identity { path, source })
    }

    /// Returns the specific failure.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the directory the failure applies to.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Returns the underlying operating-system error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match &self.kind {
            WalkErrorKind::ReadDir { source, .. }
            | WalkErrorKind::ReadDirEntry { source, .. }
            | WalkErrorKind::Identity { source, .. } => source,
        }
    }

    /// Consumes the error, returning the underlying operating-system error.
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        match self.kind {
            WalkErrorKind::ReadDir { source, .. }
            | WalkErrorKind::ReadDirEntry { source, .. }
            | WalkErrorKind::Identity { source, .. } => source,
        }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::ReadDirEntry { path, source } => {
                write!(
                    f,
                    "failed to read entry in '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Identity { path, source } => {
                write!(
                    f,
                    "failed to resolve identity of '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.io_error())
    }
}

/// Classification of traversal failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// Failed to open a directory for listing.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to obtain a directory entry part-way through a listing.
    ReadDirEntry {
        /// Directory containing the problematic entry.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to stat a directory while checking for cycles.
    Identity {
        /// Directory whose device and inode could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}

impl WalkErrorKind {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            WalkErrorKind::ReadDir { path, .. }
            | WalkErrorKind::ReadDirEntry { path, .. }
            | WalkErrorKind::Identity { path, .. } => path,
        }
    }

    /// Reports whether the failure happened while listing the directory, as
    /// opposed to while resolving its identity.
    #[must_use]
    pub const fn is_listing(&self) -> bool {
        matches!(
            self,
            WalkErrorKind::ReadDir { .. } | WalkErrorKind::ReadDirEntry { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(message: &'static str) -> io::Error {
        io::Error::other(message)
    }

    #[test]
    fn walk_error_path_matches_variant_path() {
        let read_dir = WalkError::read_dir(PathBuf::from("dir"), io_error("dir"));
        assert_eq!(Path::new("dir"), read_dir.path());

        let read_dir_entry = WalkError::read_dir_entry(PathBuf::from("entry"), io_error("entry"));
        assert_eq!(Path::new("entry"), read_dir_entry.path());

        let identity = WalkError::identity(PathBuf::from("ident"), io_error("ident"));
        assert_eq!(Path::new("ident"), identity.path());
    }

    #[test]
    fn walk_error_display_is_specific_per_variant() {
        let read_dir = WalkError::read_dir(PathBuf::from("dir"), io_error("boom"));
        assert_eq!(
            "failed to read directory 'dir': boom",
            read_dir.to_string()
        );

        let read_dir_entry = WalkError::read_dir_entry(PathBuf::from("entry"), io_error("boom"));
        assert_eq!(
            "failed to read entry in 'entry': boom",
            read_dir_entry.to_string()
        );

        let identity = WalkError::identity(PathBuf::from("ident"), io_error("boom"));
        assert_eq!(
            "failed to resolve identity of 'ident': boom",
            identity.to_string()
        );
    }

    #[test]
    fn listing_and_identity_kinds_are_distinguished() {
        assert!(WalkError::read_dir(PathBuf::new(), io_error("x")).kind().is_listing());
        assert!(WalkError::read_dir_entry(PathBuf::new(), io_error("x")).kind().is_listing());
        assert!(!WalkError::identity(PathBuf::new(), io_error("x")).kind().is_listing());
    }

    #[test]
    fn walk_error_source_refers_to_underlying_io_error() {
        let error = WalkError::read_dir(
            PathBuf::from("dir"),
            io::Error::new(io::ErrorKind::PermissionDenied, "source"),
        );
        let source_ref = error
            .source()
            .and_then(|err| err.downcast_ref::<io::Error>())
            .expect("walk error should expose the underlying io::Error");
        assert_eq!(source_ref.to_string(), "source");
        assert_eq!(error.into_io_error().kind(), io::ErrorKind::PermissionDenied);
    }
}
