//! Console logging.
//!
//! In the browser everything goes to `console.log` / `console.warn`. Native
//! builds (tests, tooling) only print to stderr once verbose mode is on.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a scope prefix.
///
/// ```ignore
/// log!("search"; "found after {} candidates", n);
/// ```
#[macro_export]
macro_rules! log {
    ($scope:expr; $($arg:tt)*) => {{
        $crate::log::info($scope, &format!($($arg)*))
    }};
}

/// Same as `log!`, routed to `console.warn`.
#[macro_export]
macro_rules! warn {
    ($scope:expr; $($arg:tt)*) => {{
        $crate::log::warning($scope, &format!($($arg)*))
    }};
}

#[cfg(target_arch = "wasm32")]
pub fn info(scope: &str, message: &str) {
    web_sys::console::log_1(&format!("[{}] {}", scope, message).into());
}

#[cfg(target_arch = "wasm32")]
pub fn warning(scope: &str, message: &str) {
    web_sys::console::warn_1(&format!("[{}] {}", scope, message).into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(scope: &str, message: &str) {
    if is_verbose() {
        eprintln!("[{}] {}", scope, message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warning(scope: &str, message: &str) {
    if is_verbose() {
        eprintln!("[{}] warning: {}", scope, message);
    }
}
