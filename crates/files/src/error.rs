//! Error type shared by the file helpers.

use std::io;
use std::path::{Path, PathBuf};

/// Failure raised by a file helper.
///
/// Every variant that touches the filesystem keeps the path it was working
/// on and the underlying [`io::Error`] as its source.
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// The mode string could not be parsed.
    #[error("invalid open mode '{mode}'")]
    InvalidMode {
        /// The rejected mode string.
        mode: String,
    },

    /// A standard stream descriptor was passed where a file was expected.
    #[error("descriptor {fd} is a standard stream and cannot be reopened")]
    StandardStream {
        /// The rejected descriptor number.
        fd: i32,
    },

    /// Duplicating a caller-supplied descriptor failed.
    #[error("failed to duplicate descriptor {fd}: {source}")]
    Duplicate {
        /// The descriptor being duplicated.
        fd: i32,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Opening a file failed.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// The path being opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Marking a descriptor close-on-exec failed.
    #[error("failed to set close-on-exec on '{}': {source}", path.display())]
    CloseOnExec {
        /// The file whose descriptor was being updated.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Acquiring or releasing an advisory lock failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Lock {
        /// `"lock"` or `"unlock"`.
        action: &'static str,
        /// The locked file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Removing a file failed for a reason other than it being absent.
    #[error("failed to remove '{}': {source}", path.display())]
    Remove {
        /// The file being removed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Renaming failed.
    #[error("failed to rename '{}' to '{}': {source}", from.display(), to.display())]
    Rename {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An existing rename destination could not be cleared.
    #[error("unable to remove '{}' before renaming over it: {source}", path.display())]
    ReplaceDestination {
        /// The destination that could not be removed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Creating a destination directory failed.
    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir {
        /// The directory being created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Copying a file failed.
    #[error("failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl FilesError {
    /// Returns the primary path involved in the failure, if any.
    ///
    /// For two-path failures ([`Rename`](Self::Rename),
    /// [`Copy`](Self::Copy)) this is the source path.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidMode { .. } | Self::StandardStream { .. } | Self::Duplicate { .. } => None,
            Self::Open { path, .. }
            | Self::CloseOnExec { path, .. }
            | Self::Lock { path, .. }
            | Self::Remove { path, .. }
            | Self::ReplaceDestination { path, .. }
            | Self::CreateDir { path, .. } => Some(path),
            Self::Rename { from, .. } | Self::Copy { from, .. } => Some(from),
        }
    }

    /// Returns the underlying I/O error kind, if the failure came from the
    /// operating system.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::InvalidMode { .. } | Self::StandardStream { .. } => None,
            Self::Duplicate { source, .. }
            | Self::Open { source, .. }
            | Self::CloseOnExec { source, .. }
            | Self::Lock { source, .. }
            | Self::Remove { source, .. }
            | Self::Rename { source, .. }
            | Self::ReplaceDestination { source, .. }
            | Self::CreateDir { source, .. }
            | Self::Copy { source, .. } => Some(source.kind()),
        }
    }
}
