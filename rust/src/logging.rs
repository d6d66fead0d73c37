//! Diagnostic output for planning sessions, written to stderr.
//!
//! Each session carries a `verbosity` from its [`PlannerConfig`](crate::PlannerConfig).
//! A message is printed when the session verbosity reaches the message level:
//! a summary line per query at 1, construction and phase entry at 2, and
//! every enumerated path or governing-variance choice at 3. At 0 the
//! macros expand to a single integer comparison.

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_STEPS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Whether a session at `verbosity` prints messages of `level`.
#[inline]
pub fn enabled(verbosity: u8, level: u8) -> bool {
    level > VERBOSITY_SILENT && verbosity >= level
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $level) {
            eprintln!("[netplan] {}", format_args!($($arg)*));
        }
    };
}

/// Headline results: critical length, number of full paths.
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_SUMMARY, $verbosity, $($arg)*)
    };
}

/// Resolved source and runoff, start of each calculation.
#[macro_export]
macro_rules! log_steps {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_STEPS, $verbosity, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}
