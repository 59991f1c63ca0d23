#![deny(unsafe_code)]

//! Test fixtures shared by the workspace crates.
//!
//! [`TempTree`] builds small directory trees under a temporary root and
//! removes them when dropped. [`PermissionGuard`] temporarily revokes access
//! to a path so tests can exercise unreadable-directory handling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree addressed by relative paths.
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Creates an empty tree rooted in a fresh temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temporary directory");
        Self { dir }
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Resolves `relative` against the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root().to_path_buf()
        } else {
            self.root().join(relative)
        }
    }

    /// Creates a directory (and any missing parents).
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("create directory");
        path
    }

    /// Writes a file, creating parent directories as needed.
    pub fn file(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    /// Creates a symbolic link at `relative` pointing to `target`.
    ///
    /// `target` is used verbatim, so relative targets resolve against the
    /// link's parent directory.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, relative: &str) -> PathBuf {
        let path = self.path(relative);
        std::os::unix::fs::symlink(target, &path).expect("create symlink");
        path
    }
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Revokes every permission bit on a path until dropped.
///
/// The original mode is restored on drop so the temporary tree can still be
/// cleaned up.
#[cfg(unix)]
pub struct PermissionGuard {
    path: PathBuf,
    original: fs::Permissions,
}

#[cfg(unix)]
impl PermissionGuard {
    /// Makes `path` inaccessible.
    ///
    /// Returns `Ok(None)` when the current user can still read the path
    /// afterwards (for example when running as root); callers should skip
    /// the test in that case.
    pub fn deny_all(path: impl Into<PathBuf>) -> io::Result<Option<Self>> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.into();
        let original = fs::metadata(&path)?.permissions();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000))?;
        let guard = Self { path, original };

        let still_readable = if guard.path.is_dir() {
            fs::read_dir(&guard.path).is_ok()
        } else {
            fs::File::open(&guard.path).is_ok()
        };
        if still_readable {
            return Ok(None);
        }
        Ok(Some(guard))
    }

    /// Returns the guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
impl Drop for PermissionGuard {
    fn drop(&mut self) {
        let _ = fs::set_permissions(&self.path, self.original.clone());
    }
}
