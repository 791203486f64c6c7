//! Logging initialization helpers

/// Initialize env_logger with sane defaults for the engine
///
/// Respects `RUST_LOG` if set; defaults to `info` otherwise. Safe to call
/// more than once (later calls are ignored).
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
