//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still wins when it is set. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_with_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
