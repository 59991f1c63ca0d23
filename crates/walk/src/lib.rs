#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` enumerates a directory tree one directory at a time. Every
//! produced [`WalkEntry`] names a directory together with the subdirectories
//! and other entries it contains, in the order the operating system listed
//! them. Symbolic links are followed by default, and a directory reachable
//! through several links (or through a link back to one of its ancestors)
//! is produced only once.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the traversal: pre- or post-order, whether
//!   to follow links, a [`VisitedSet`] to seed, and an optional error
//!   observer.
//! - [`Walker`] implements [`Iterator`]. Work happens only inside `next`,
//!   driven by an explicit stack of open directories rather than recursion,
//!   so arbitrarily deep trees never exhaust the call stack.
//! - [`VisitedSet`] tracks the [`DirectoryId`] (device and inode) of every
//!   directory entered while following links. It is threaded through the
//!   whole traversal by value and can be taken back with
//!   [`Walker::into_visited`].
//!
//! # Invariants
//!
//! - With links followed, no physical directory is produced twice during
//!   one traversal, so traversal terminates even in the presence of symlink
//!   cycles. Directories reporting inode `0` are exempt from tracking.
//! - In pre-order a directory precedes all of its descendants; in
//!   post-order it follows all of them.
//! - Traversal never panics and never stops early because of an I/O
//!   failure.
//!
//! # Errors
//!
//! A directory that cannot be listed, or whose identity cannot be
//! resolved, is skipped along with its subtree. The failure is recorded as
//! a [`WalkError`], passed to the observer installed with
//! [`WalkBuilder::on_error`], and kept in [`Walker::errors`] so callers that
//! need strict behaviour can check it once iteration finishes.
//!
//! # Examples
//!
//! ```
//! use std::ffi::OsString;
//! use std::fs;
//! use walk::WalkBuilder;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::create_dir(root.join("nested"))?;
//! fs::write(root.join("top.txt"), b"data")?;
//! fs::write(root.join("nested/inner.txt"), b"data")?;
//!
//! let mut walker = WalkBuilder::new(root).build();
//! let first = walker.next().expect("root entry");
//! assert_eq!(first.path(), root);
//! assert_eq!(first.subdirs(), [OsString::from("nested")]);
//! assert_eq!(first.files(), [OsString::from("top.txt")]);
//!
//! let second = walker.next().expect("nested entry");
//! assert_eq!(second.path(), root.join("nested"));
//! assert!(walker.next().is_none());
//! assert!(walker.errors().is_empty());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod visited;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use visited::{DirectoryId, VisitedSet};
pub use walker::Walker;

use std::path::PathBuf;

/// Walks `top` with the default options: pre-order, following links, no
/// observer.
///
/// Equivalent to `WalkBuilder::new(top).build()`.
#[must_use]
pub fn walk<P: Into<PathBuf>>(top: P) -> Walker<'static> {
    WalkBuilder::new(top).build()
}
