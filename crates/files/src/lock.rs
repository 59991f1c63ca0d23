//! Advisory whole-file locking.

use crate::error::FilesError;
use crate::open::{OpenMode, open};
use fs2::FileExt;
use logging::debug_log;
use std::fs::File;
use std::io::{self, IoSlice, IoSliceMut, Read, Seek, SeekFrom, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// The kind of advisory lock held by a [`LockedFile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockKind {
    /// Shared lock; any number of readers may hold one at once.
    Shared,
    /// Exclusive lock; excludes every other lock on the file.
    Exclusive,
}

impl LockKind {
    /// Selects the lock kind for files opened in `mode`.
    #[must_use]
    pub const fn for_mode(mode: OpenMode) -> Self {
        if mode.is_write() {
            Self::Exclusive
        } else {
            Self::Shared
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Exclusive => "exclusive",
        }
    }
}

/// An open file holding an advisory lock until it is dropped.
///
/// Write modes take an exclusive lock; read modes, `r+` included, take a
/// shared one. The lock is released on drop, or explicitly with
/// [`unlock`](Self::unlock) when the caller wants to see release failures.
///
/// ```
/// use files::{LockKind, LockedFile, OpenMode};
/// use std::io::Write;
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let mut file = LockedFile::open(dir.path().join("state"), OpenMode::WRITE)?;
/// assert_eq!(file.kind(), LockKind::Exclusive);
/// file.write_all(b"ok")?;
/// file.unlock()?;
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    kind: LockKind,
    locked: bool,
}

impl LockedFile {
    /// Opens `path` in `mode` and blocks until the matching lock is held.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self, FilesError> {
        let path = path.as_ref();
        let file = open(path, mode)?;
        let kind = LockKind::for_mode(mode);
        let locked = match kind {
            LockKind::Shared => FileExt::lock_shared(&file),
            LockKind::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|source| lock_error("lock", path, source))?;
        debug_log!(Lock, 1, "acquired {} lock on {:?}", kind.name(), path);
        Ok(Self::new(file, path, kind))
    }

    /// Opens `path` in `mode` and tries to take the lock without blocking.
    ///
    /// Returns `Ok(None)` when a conflicting lock is already held.
    pub fn try_open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Option<Self>, FilesError> {
        let path = path.as_ref();
        let file = open(path, mode)?;
        let kind = LockKind::for_mode(mode);
        let attempt = match kind {
            LockKind::Shared => FileExt::try_lock_shared(&file),
            LockKind::Exclusive => FileExt::try_lock_exclusive(&file),
        };
        match attempt {
            Ok(()) => {
                debug_log!(Lock, 1, "acquired {} lock on {:?}", kind.name(), path);
                Ok(Some(Self::new(file, path, kind)))
            }
            Err(error) if is_contended(&error) => {
                debug_log!(Lock, 2, "{} lock on {:?} is contended", kind.name(), path);
                Ok(None)
            }
            Err(error) => Err(lock_error("lock", path, error)),
        }
    }

    fn new(file: File, path: &Path, kind: LockKind) -> Self {
        Self {
            file,
            path: path.to_path_buf(),
            kind,
            locked: true,
        }
    }

    /// Returns the path the file was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the kind of lock held.
    #[must_use]
    pub const fn kind(&self) -> LockKind {
        self.kind
    }

    /// Releases the lock and closes the file, reporting any failure.
    pub fn unlock(mut self) -> Result<(), FilesError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), FilesError> {
        if !self.locked {
            return Ok(());
        }
        self.locked = false;
        FileExt::unlock(&self.file).map_err(|source| lock_error("unlock", &self.path, source))?;
        debug_log!(Lock, 1, "released {} lock on {:?}", self.kind.name(), self.path);
        Ok(())
    }
}

fn lock_error(action: &'static str, path: &Path, source: io::Error) -> FilesError {
    FilesError::Lock {
        action,
        path: path.to_path_buf(),
        source,
    }
}

fn is_contended(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::WouldBlock
        || error.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            debug_log!(Lock, 1, "{}", error);
        }
    }
}

impl Deref for LockedFile {
    type Target = File;

    fn deref(&self) -> &File {
        &self.file
    }
}

impl DerefMut for LockedFile {
    fn deref_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl Read for LockedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.file.read_vectored(bufs)
    }
}

impl Write for LockedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        self.file.write_vectored(bufs)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for LockedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
