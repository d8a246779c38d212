//! Opt-in verbose logging.
//!
//! The CLI enables this with `--verbose`; everything else stays quiet.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging for the whole process.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a formatted line to stderr when verbose mode is on.
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[murmur] {}", format!($($arg)*));
        }
    };
}
