#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `files` collects small filesystem helpers used around the [`walk`]
//! crate:
//!
//! - [`open`] opens a file from a stdio-style [`OpenMode`] and guarantees
//!   the descriptor is close-on-exec; [`open_descriptor`] does the same for
//!   an existing descriptor.
//! - [`LockedFile`] holds a shared or exclusive advisory lock for as long
//!   as the file is open.
//! - [`is_binary`] and [`is_binary_text`] tell text from binary data.
//! - [`remove`], [`safe_rm`] and [`rename`] smooth over missing files and
//!   existing destinations.
//! - [`recursive_copy`] mirrors a tree using the cycle-safe walker.
//!
//! # Errors
//!
//! Fallible helpers return [`FilesError`], which keeps the path involved
//! and the underlying I/O error. [`safe_rm`] and [`is_binary`] never fail.
//!
//! # Logging
//!
//! Activity is reported through the `logging` macros: copies and removals
//! under the `copy`, `remove` and `skip` info flags, and lock, open, delete
//! and rename details under the matching debug flags.

mod binary;
mod copy;
mod error;
mod lock;
mod open;
mod remove;

pub use binary::{SAMPLE_SIZE, is_binary, is_binary_text};
pub use copy::{CopySummary, recursive_copy};
pub use error::FilesError;
pub use lock::{LockKind, LockedFile};
#[cfg(unix)]
pub use open::{is_cloexec, open_descriptor};
pub use open::{OpenMode, is_cloexec_supported, open, set_cloexec};
pub use remove::{remove, rename, safe_rm};
