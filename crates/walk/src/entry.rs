use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One directory produced by a traversal.
///
/// Holds the directory path together with the names of its immediate
/// subdirectories and of everything else it contains. Names keep the order
/// the operating system listed them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) subdirs: Vec<OsString>,
    pub(crate) files: Vec<OsString>,
}

impl WalkEntry {
    /// Returns the directory path, built by joining names onto the root the
    /// walk started from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of entries classified as directories.
    #[must_use]
    pub fn subdirs(&self) -> &[OsString] {
        &self.subdirs
    }

    /// Names of every other entry.
    #[must_use]
    pub fn files(&self) -> &[OsString] {
        &self.files
    }

    /// Decomposes the entry into `(path, subdirs, files)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// std::fs::write(temp.path().join("notes.txt"), b"data")?;
    ///
    /// let entry = walk::walk(temp.path()).next().expect("root entry");
    /// let (path, subdirs, files) = entry.into_parts();
    /// assert_eq!(path, temp.path());
    /// assert!(subdirs.is_empty());
    /// assert_eq!(files, vec![std::ffi::OsString::from("notes.txt")]);
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, Vec<OsString>, Vec<OsString>) {
        (self.path, self.subdirs, self.files)
    }
}
