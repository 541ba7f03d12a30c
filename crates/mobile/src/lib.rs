pub mod logging;
pub mod state;

uniffi::setup_scaffolding!();

/// Initialize logging and panic reporting.
/// Call this once at startup from Kotlin/Swift
#[uniffi::export]
pub fn init_runtime() {
    logging::setup_logging();
}
