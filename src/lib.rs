#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fsutils` bundles the workspace crates behind one dependency:
//!
//! - [`walk`]: a lazy directory walker that follows symbolic links without
//!   revisiting a physical directory, so link cycles terminate.
//! - [`files`]: close-on-exec opening, advisory locking, binary detection,
//!   forgiving remove/rename and a recursive copy built on the walker.
//! - [`logging`]: the flag-and-level diagnostics both of them report
//!   through.
//!
//! The most common entry points are re-exported at the crate root.
//!
//! # Features
//!
//! - `tracing`: forward `tracing` events into the diagnostic flags.
//! - `serde`: (de)serialize [`logging::VerbosityConfig`].
//!
//! # Examples
//!
//! ```
//! use fsutils::{WalkBuilder, recursive_copy};
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = tempfile::tempdir()?;
//! fs::create_dir(source.path().join("conf"))?;
//! fs::write(source.path().join("conf/app.toml"), "debug = false\n")?;
//!
//! let dest = tempfile::tempdir()?;
//! let summary = recursive_copy(source.path(), dest.path())?;
//! assert_eq!(summary.files_copied, 1);
//!
//! let directories = WalkBuilder::new(dest.path())
//!     .topdown(false)
//!     .build()
//!     .map(|entry| entry.path().to_path_buf())
//!     .collect::<Vec<_>>();
//! assert_eq!(directories, [dest.path().join("conf"), dest.path().to_path_buf()]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

pub use files;
pub use logging;
pub use walk;

pub use files::{
    FilesError, LockedFile, OpenMode, is_binary, recursive_copy, remove, rename, safe_rm,
};
pub use walk::{VisitedSet, WalkBuilder, WalkEntry, WalkError, Walker};
