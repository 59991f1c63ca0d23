//! Opening files with close-on-exec descriptors.

use crate::error::FilesError;
use logging::debug_log;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    Append,
    CreateNew,
}

/// How a file is opened, parsed from a stdio-style mode string.
///
/// The first character selects the access (`r`, `w`, `a` or `x`); it may be
/// followed by `+` (also allow the opposite direction) and by `b` or `t`,
/// which are accepted and ignored since all I/O here is byte-oriented.
///
/// ```
/// use files::OpenMode;
///
/// let mode: OpenMode = "rb+".parse().unwrap();
/// assert!(!mode.is_write());
/// assert_eq!(mode.to_string(), "r+");
/// assert!("wq".parse::<OpenMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenMode {
    access: Access,
    update: bool,
}

impl OpenMode {
    /// Read-only (`r`).
    pub const READ: Self = Self::new(Access::Read, false);
    /// Truncating write (`w`).
    pub const WRITE: Self = Self::new(Access::Write, false);
    /// Append (`a`).
    pub const APPEND: Self = Self::new(Access::Append, false);

    const fn new(access: Access, update: bool) -> Self {
        Self { access, update }
    }

    /// Parses a mode string such as `"r"`, `"wb"` or `"a+"`.
    pub fn parse(mode: &str) -> Result<Self, FilesError> {
        let invalid = || FilesError::InvalidMode {
            mode: mode.to_string(),
        };

        let mut chars = mode.chars();
        let access = match chars.next() {
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            Some('x') => Access::CreateNew,
            _ => return Err(invalid()),
        };

        let mut update = false;
        let mut text_or_binary = false;
        for modifier in chars {
            match modifier {
                '+' if !update => update = true,
                'b' | 't' if !text_or_binary => text_or_binary = true,
                _ => return Err(invalid()),
            }
        }

        Ok(Self::new(access, update))
    }

    /// Reports whether the mode writes, which selects an exclusive lock in
    /// [`LockedFile`](crate::LockedFile).
    ///
    /// `r+` counts as a read mode here.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self.access, Access::Read)
    }

    /// Builds the [`OpenOptions`] matching this mode.
    #[must_use]
    pub fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self.access {
            Access::Read => {
                options.read(true).write(self.update);
            }
            Access::Write => {
                options
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .read(self.update);
            }
            Access::Append => {
                options.append(true).create(true).read(self.update);
            }
            Access::CreateNew => {
                options.write(true).create_new(true).read(self.update);
            }
        }
        options
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::READ
    }
}

impl FromStr for OpenMode {
    type Err = FilesError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        Self::parse(mode)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access = match self.access {
            Access::Read => "r",
            Access::Write => "w",
            Access::Append => "a",
            Access::CreateNew => "x",
        };
        f.write_str(access)?;
        if self.update {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Opens `path` in `mode` and guarantees the descriptor is close-on-exec.
///
/// The standard library already requests `O_CLOEXEC`; the flag is checked
/// and set again afterwards so the guarantee does not depend on that.
pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<File, FilesError> {
    let path = path.as_ref();
    let file = mode.options().open(path).map_err(|source| FilesError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    set_cloexec(&file).map_err(|source| FilesError::CloseOnExec {
        path: path.to_path_buf(),
        source,
    })?;
    debug_log!(Open, 2, "opened {:?} with mode {}", path, mode);
    Ok(file)
}

/// Reports whether descriptors can be marked close-on-exec on this platform.
#[must_use]
pub const fn is_cloexec_supported() -> bool {
    cfg!(unix)
}

/// Marks the descriptor behind `file` close-on-exec.
#[cfg(unix)]
pub fn set_cloexec(file: &File) -> std::io::Result<()> {
    use rustix::io::{FdFlags, fcntl_getfd, fcntl_setfd};

    let flags = fcntl_getfd(file)?;
    if !flags.contains(FdFlags::CLOEXEC) {
        fcntl_setfd(file, flags | FdFlags::CLOEXEC)?;
    }
    Ok(())
}

/// Marks the descriptor behind `file` close-on-exec.
///
/// Handles are not inherited by default on this platform, so this is a
/// no-op.
#[cfg(not(unix))]
pub fn set_cloexec(_file: &File) -> std::io::Result<()> {
    Ok(())
}

/// Reports whether the descriptor behind `file` is close-on-exec.
#[cfg(unix)]
pub fn is_cloexec(file: &File) -> std::io::Result<bool> {
    use rustix::io::{FdFlags, fcntl_getfd};

    Ok(fcntl_getfd(file)?.contains(FdFlags::CLOEXEC))
}

/// Duplicates an existing descriptor into an owned, close-on-exec [`File`].
///
/// Standard input, output and error (descriptors 0 to 2) are refused.
#[cfg(unix)]
pub fn open_descriptor(fd: impl std::os::fd::AsFd) -> Result<File, FilesError> {
    use std::os::fd::AsRawFd;

    let borrowed = fd.as_fd();
    let raw = borrowed.as_raw_fd();
    if (0..=2).contains(&raw) {
        return Err(FilesError::StandardStream { fd: raw });
    }

    let owned = borrowed
        .try_clone_to_owned()
        .map_err(|source| FilesError::Duplicate { fd: raw, source })?;
    let file = File::from(owned);
    set_cloexec(&file).map_err(|source| FilesError::Duplicate { fd: raw, source })?;
    debug_log!(Open, 2, "duplicated descriptor {}", raw);
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use test_support::TempTree;

    #[test]
    fn parse_accepts_stdio_modes() {
        for (text, canonical, write) in [
            ("r", "r", false),
            ("rb", "r", false),
            ("rt", "r", false),
            ("r+", "r+", false),
            ("rb+", "r+", false),
            ("w", "w", true),
            ("wb", "w", true),
            ("a+", "a+", true),
            ("x", "x", true),
        ] {
            let mode = OpenMode::parse(text).unwrap_or_else(|e| panic!("{text}: {e}"));
            assert_eq!(mode.to_string(), canonical, "{text}");
            assert_eq!(mode.is_write(), write, "{text}");
        }
    }

    #[test]
    fn parse_rejects_malformed_modes() {
        for text in ["", "b", "q", "r++", "rbt", "wz", "+r"] {
            assert!(
                matches!(OpenMode::parse(text), Err(FilesError::InvalidMode { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn write_then_read_round_trips_contents() {
        let tree = TempTree::new();
        let path = tree.path("data.bin");

        let mut file = open(&path, OpenMode::WRITE).expect("open for write");
        file.write_all(b"hello").expect("write");
        drop(file);

        let mut file = open(&path, "a".parse().expect("mode")).expect("open for append");
        file.write_all(b" world").expect("append");
        drop(file);

        let mut contents = String::new();
        open(&path, OpenMode::READ)
            .expect("open for read")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "hello world");
    }

    #[test]
    fn create_new_refuses_existing_file() {
        let tree = TempTree::new();
        let path = tree.file("exists.txt", b"x");

        let error = open(&path, "x".parse().expect("mode")).expect_err("exists");
        assert_eq!(error.io_kind(), Some(std::io::ErrorKind::AlreadyExists));
        assert_eq!(error.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_reports_open_error() {
        let tree = TempTree::new();
        let error = open(tree.path("missing"), OpenMode::READ).expect_err("missing");
        assert!(matches!(error, FilesError::Open { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn opened_descriptors_are_close_on_exec() {
        assert!(is_cloexec_supported());
        let tree = TempTree::new();
        let path = tree.file("f.txt", b"x");
        let file = open(&path, OpenMode::READ).expect("open");
        assert!(is_cloexec(&file).expect("fcntl"));
    }

    #[cfg(unix)]
    #[test]
    fn set_cloexec_restores_a_cleared_flag() {
        use rustix::io::{FdFlags, fcntl_setfd};

        let tree = TempTree::new();
        let file = File::open(tree.file("f.txt", b"x")).expect("open");
        fcntl_setfd(&file, FdFlags::empty()).expect("clear flag");
        assert!(!is_cloexec(&file).expect("fcntl"));

        set_cloexec(&file).expect("set flag");
        assert!(is_cloexec(&file).expect("fcntl"));
    }

    #[cfg(unix)]
    #[test]
    fn standard_streams_are_refused() {
        let error = open_descriptor(std::io::stdin()).expect_err("stdin refused");
        assert!(matches!(error, FilesError::StandardStream { fd: 0 }));
        let error = open_descriptor(std::io::stderr()).expect_err("stderr refused");
        assert!(matches!(error, FilesError::StandardStream { fd: 2 }));
    }

    #[cfg(unix)]
    #[test]
    fn duplicated_descriptor_shares_the_file() {
        let tree = TempTree::new();
        let original = File::open(tree.file("f.txt", b"shared")).expect("open");

        let mut duplicate = open_descriptor(&original).expect("duplicate");
        assert!(is_cloexec(&duplicate).expect("fcntl"));
        let mut contents = String::new();
        duplicate.read_to_string(&mut contents).expect("read");
        assert_eq!(contents, "shared");
    }
}
