//! Platform abstraction layer
//!
//! The engine itself is platform-free; this module only wires up logging for
//! whichever host is embedding it.

/// Install the logger for the browser console. Safe to call more than once;
/// later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the env_logger-backed logger for native hosts and tests
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
