//! Logger setup shared by the arena binaries.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger from `RUST_LOG`.
///
/// Without `RUST_LOG`, shows `info` and above, or `debug` and above when
/// `verbose` is set.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // A logger may already be installed (tests, embedding hosts).
    let _ = builder.try_init();
}
