//! Mission-constrained conceptual sizing for small electric fixed-wing UAVs.
//!
//! The physics lives in the member crates; this crate re-exports them under short names so
//! front-ends (the `size` CLI, report generators) depend on one library.

pub mod summary;

pub use uav_aero as aero;
pub use uav_config as config;
pub use uav_core as physics;
pub use uav_export as export;
pub use uav_mission as mission;
pub use uav_propulsion as propulsion;
pub use uav_sizing as sizing;
pub use uav_structures as structures;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
