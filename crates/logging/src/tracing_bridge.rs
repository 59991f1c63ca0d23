//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the flag-based verbosity system.
//!
//! Applications that already instrument with `tracing` can install
//! [`FsLayer`] so events whose target names a known category (for example
//! `fsutils::walk` or `fsutils::copy`) are filtered through the thread's
//! [`VerbosityConfig`] and recorded as [`DiagnosticEvent`](crate::DiagnosticEvent)
//! values alongside those produced by [`debug_log!`](crate::debug_log).
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "fsutils::walk", "scanning");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that records events through the verbosity flags.
///
/// `INFO` and more severe events map to info flags; `DEBUG` and `TRACE`
/// events map to debug flags.
pub struct FsLayer {
    _config: VerbosityConfig,
}

impl FsLayer {
    /// Create a new layer with the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { _config: config }
    }

    /// Returns the final `::`-separated segment of a target.
    fn category(target: &str) -> &str {
        target.rsplit("::").next().unwrap_or(target)
    }

    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        match Self::category(target) {
            "copy" => Some(InfoFlag::Copy),
            "remove" | "rename" => Some(InfoFlag::Remove),
            "skip" => Some(InfoFlag::Skip),
            "walk" | "walker" => Some(InfoFlag::Walk),
            _ => None,
        }
    }

    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match Self::category(target) {
            "copy" => Some(DebugFlag::Copy),
            "del" | "delete" | "remove" | "rename" => Some(DebugFlag::Del),
            "dup" | "visited" => Some(DebugFlag::Dup),
            "io" => Some(DebugFlag::Io),
            "lock" | "flock" => Some(DebugFlag::Lock),
            "open" => Some(DebugFlag::Open),
            "walk" | "walker" => Some(DebugFlag::Walk),
            _ => None,
        }
    }

    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }

    const fn is_info_level(level: &Level) -> bool {
        matches!(*level, Level::ERROR | Level::WARN | Level::INFO)
    }
}

impl<S> Layer<S> for FsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let level = metadata.level();
        let verbosity_level = Self::level_to_verbosity_level(level);

        if Self::is_info_level(level) {
            if let Some(flag) = Self::target_to_info_flag(target) {
                if info_gte(flag, verbosity_level) {
                    if let Some(message) = MessageVisitor::extract(event) {
                        emit_info(flag, verbosity_level, message);
                    }
                }
            }
            return;
        }

        if let Some(flag) = Self::target_to_debug_flag(target) {
            if debug_gte(flag, verbosity_level) {
                if let Some(message) = MessageVisitor::extract(event) {
                    emit_debug(flag, verbosity_level, message);
                }
            }
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl MessageVisitor {
    fn extract(event: &tracing::Event<'_>) -> Option<String> {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        visitor.message
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global subscriber that routes tracing events through [`FsLayer`].
///
/// Also initializes the calling thread's verbosity configuration.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());
    tracing_subscriber::registry()
        .with(FsLayer::new(config))
        .init();
}

/// Like [`init_tracing`], with an additional filter layer (for example an
/// `EnvFilter`) placed in front of [`FsLayer`].
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());
    tracing_subscriber::registry()
        .with(filter)
        .with(FsLayer::new(config))
        .init();
}
