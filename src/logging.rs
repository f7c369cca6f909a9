//! Logging setup for the binary.
//!
//! Library code only emits `tracing` events; this installs a stderr
//! subscriber. `RUST_LOG` wins over the verbosity flag when set.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
