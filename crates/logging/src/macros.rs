//! crates/logging/src/macros.rs
//! Level-checked diagnostic macros.
//!
//! The format arguments are only evaluated when the flag is enabled at the
//! requested level for the current thread.

/// Record an info diagnostic when `flag` is enabled at `level` or above.
///
/// ```
/// use logging::{InfoFlag, VerbosityConfig, drain_events, info_log, init};
///
/// let mut config = VerbosityConfig::default();
/// config.info.copy = 1;
/// init(config);
///
/// info_log!(Copy, 1, "copied {}", "a.txt");
/// info_log!(Copy, 2, "not recorded");
///
/// let events = drain_events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message(), "copied a.txt");
/// ```
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, ::std::format!($($arg)+));
        }
    };
}

/// Record a debug diagnostic when `flag` is enabled at `level` or above.
///
/// ```
/// use logging::{VerbosityConfig, debug_log, drain_events, init};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.walk = 2;
/// init(config);
///
/// debug_log!(Walk, 2, "entering {:?}", "/tmp");
/// debug_log!(Dup, 1, "not recorded");
///
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, ::std::format!($($arg)+));
        }
    };
}
