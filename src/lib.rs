//! Per-tick vehicle physics: raycast suspension, smoothed throttle and
//! propulsion forces pushed into a host-owned rigid body.

pub mod consts;
mod logging;
pub mod math;
pub mod sandbox;
pub mod sim;

pub use ahash;
pub use glam;

/// Installs the crate's `env_logger` formatter.
///
/// Safe to call more than once; later calls leave the first logger in place.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    if logging::try_init().is_ok() {
        log::info!(
            "Initialized SteerSim version {}",
            env!("CARGO_PKG_VERSION")
        );
    }
}
