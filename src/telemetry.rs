//! Tracing subscriber setup for the binaries.
//!
//! `RUST_LOG` controls the filter (default `info`), e.g.
//! `RUST_LOG=postboard=debug postboard-backend`.

use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Installs a compact `fmt` subscriber as the global default.
pub fn init() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(Error::Telemetry)
}
