//! Recursive directory copy built on the walker.

use crate::error::FilesError;
use logging::{debug_log, info_log};
use std::fs;
use std::path::{Path, PathBuf};
use walk::{WalkBuilder, WalkError};

/// Outcome of [`recursive_copy`].
#[derive(Debug, Default)]
pub struct CopySummary {
    /// Destination directories that had to be created.
    pub directories_created: usize,
    /// Regular files copied.
    pub files_copied: usize,
    /// Total bytes copied.
    pub bytes_copied: u64,
    /// Source entries that were neither directories nor regular files
    /// (sockets, FIFOs, dangling links) and were left out.
    pub skipped: Vec<PathBuf>,
    /// Source directories the walker could not read; their subtrees are
    /// missing from the copy.
    pub errors: Vec<WalkError>,
}

impl CopySummary {
    /// Reports whether every source directory was read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Copies the tree rooted at `source` into `dest`, merging with whatever
/// `dest` already contains.
///
/// Directories are created as needed and files are overwritten. Symbolic
/// links are followed, so a linked directory is copied as a real one, and
/// a directory reachable through several links is copied once. Unreadable
/// source directories are skipped and listed in [`CopySummary::errors`];
/// a file that cannot be copied aborts the copy.
pub fn recursive_copy(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
) -> Result<CopySummary, FilesError> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    let mut summary = CopySummary::default();
    let mut walker = WalkBuilder::new(source).build();

    for entry in walker.by_ref() {
        // Entry paths are built by joining names onto `source`.
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if !target.is_dir() {
            fs::create_dir_all(&target).map_err(|source| FilesError::CreateDir {
                path: target.clone(),
                source,
            })?;
            summary.directories_created += 1;
            debug_log!(Copy, 1, "created {:?}", target);
        }

        for name in entry.files() {
            let from = entry.path().join(name);
            let to = target.join(name);
            if !from.is_file() {
                info_log!(Skip, 1, "skipping non-regular file {:?}", from);
                summary.skipped.push(from);
                continue;
            }
            let bytes = fs::copy(&from, &to).map_err(|source| FilesError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            info_log!(Copy, 1, "copied {:?} to {:?} ({} bytes)", from, to, bytes);
            summary.files_copied += 1;
            summary.bytes_copied += bytes;
        }
    }

    summary.errors = walker.take_errors();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::TempTree;

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).expect("read copied file")
    }

    #[test]
    fn copies_nested_tree() {
        let src = TempTree::new();
        src.file("a.txt", "alpha");
        src.file("sub/b.txt", "beta");
        src.file("sub/deeper/c.txt", "gamma");
        src.dir("empty");
        let dst = TempTree::new();
        let dest = dst.path("copy");

        let summary = recursive_copy(src.root(), &dest).expect("copy");

        assert_eq!(read(dest.join("a.txt")), "alpha");
        assert_eq!(read(dest.join("sub/b.txt")), "beta");
        assert_eq!(read(dest.join("sub/deeper/c.txt")), "gamma");
        assert!(dest.join("empty").is_dir());
        assert_eq!(summary.files_copied, 3);
        assert_eq!(summary.bytes_copied, 14);
        assert_eq!(summary.directories_created, 4);
        assert!(summary.is_complete());
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn merges_into_existing_destination() {
        let src = TempTree::new();
        src.file("shared.txt", "new");
        src.file("sub/only-src.txt", "src");
        let dst = TempTree::new();
        dst.file("shared.txt", "old");
        dst.file("sub/only-dst.txt", "dst");

        let summary = recursive_copy(src.root(), dst.root()).expect("copy");

        assert_eq!(read(dst.path("shared.txt")), "new");
        assert_eq!(read(dst.path("sub/only-src.txt")), "src");
        assert_eq!(read(dst.path("sub/only-dst.txt")), "dst");
        assert_eq!(summary.directories_created, 0);
        assert_eq!(summary.files_copied, 2);
    }

    #[test]
    fn missing_source_is_reported_not_fatal() {
        let tree = TempTree::new();
        let summary = recursive_copy(tree.path("missing"), tree.path("dest")).expect("copy");

        assert_eq!(summary.files_copied, 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(!summary.is_complete());
        assert!(!tree.path("dest").exists());
    }

    #[test]
    fn file_copy_failure_aborts() {
        let src = TempTree::new();
        src.file("blocked/inner.txt", "x");
        let dst = TempTree::new();
        // A regular file where the destination directory should go.
        dst.file("blocked", "not a directory");

        let error = recursive_copy(src.root(), dst.root()).expect_err("blocked");
        assert!(matches!(error, FilesError::CreateDir { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[test]
        fn linked_directories_are_copied_once() {
            let src = TempTree::new();
            src.file("real/data.txt", "payload");
            src.symlink("real", "alias");
            src.symlink("..", "real/up");
            let dst = TempTree::new();

            let summary = recursive_copy(src.root(), dst.root()).expect("copy");

            assert_eq!(summary.files_copied, 1);
            let copied_real = dst.path("real/data.txt").exists();
            let copied_alias = dst.path("alias/data.txt").exists();
            assert!(copied_real ^ copied_alias);
            assert!(!dst.path("real/up").exists());
        }

        #[test]
        fn dangling_links_are_skipped() {
            let src = TempTree::new();
            src.file("kept.txt", "k");
            let dangling = src.symlink("nowhere", "dangling");
            let dst = TempTree::new();

            let summary = recursive_copy(src.root(), dst.root()).expect("copy");

            assert_eq!(summary.files_copied, 1);
            assert_eq!(summary.skipped, vec![dangling]);
            assert!(!dst.path("dangling").exists());
        }

        #[test]
        fn unreadable_subdirectory_is_left_out() {
            let src = TempTree::new();
            src.file("open/a.txt", "a");
            let closed = src.dir("closed");
            src.file("closed/b.txt", "b");
            let Some(_guard) = test_support::PermissionGuard::deny_all(&closed).expect("chmod")
            else {
                return;
            };
            let dst = TempTree::new();

            let summary = recursive_copy(src.root(), dst.root()).expect("copy");

            assert_eq!(summary.files_copied, 1);
            assert_eq!(summary.errors.len(), 1);
            assert_eq!(summary.errors[0].path(), closed.as_path());
            assert!(!dst.path("closed/b.txt").exists());
        }
    }
}
