//! Tracing setup for binaries embedding the lobby.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `info` when the variable is unset or unparsable.
///
/// Returns `false` if a global subscriber was already installed (for
/// example by a test harness); the existing one is left in place.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
