#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostic plumbing shared by the workspace crates.
//! Output is organised into named categories ([`InfoFlag`] for user-facing
//! reports, [`DebugFlag`] for internals), each with an independent numeric
//! level. Library code records diagnostics through [`info_log!`] and
//! [`debug_log!`], which consult the calling thread's [`VerbosityConfig`]
//! before formatting anything.
//!
//! # Design
//!
//! - Configuration and collected events live in thread-local storage, so
//!   independent traversals on different threads never contend on a lock.
//! - Events are buffered as [`DiagnosticEvent`] values until the embedding
//!   application calls [`drain_events`] and decides where to print them.
//! - With the `tracing` feature enabled, [`FsLayer`] lets applications that
//!   already emit `tracing` events feed the same buffer.
//!
//! # Examples
//!
//! ```
//! use logging::{VerbosityConfig, debug_log, drain_events, init};
//!
//! init(VerbosityConfig::from_verbose_level(2));
//! debug_log!(Dup, 1, "skipping already visited directory {:?}", "/srv/a");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert!(events[0].to_string().starts_with("[dup1]"));
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, current, debug_gte, drain_events,
    emit_debug, emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{FsLayer, init_tracing, init_tracing_with_filter};
