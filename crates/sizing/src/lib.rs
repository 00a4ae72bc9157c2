//! Sizing façade crate consolidating the weight loop and exposing supporting crates.

pub mod case;
pub mod convergence;
pub mod matching;
pub mod performance;
pub mod sweep;

pub use facade::*;
pub use uav_aero as aero;
pub use uav_mission as mission;
pub use uav_propulsion as propulsion;
pub use uav_structures as structures;

mod facade;

use thiserror::Error;
use uav_core::DomainError;
use uav_structures::StructuresError;

#[derive(Debug, Error)]
pub enum SizingError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Structures(#[from] StructuresError),
    #[error(
        "weight loop did not converge after {iterations} iterations (last delta {last_delta_kg:.5} kg, last mass {last_mass_kg:.4} kg)"
    )]
    Diverged {
        iterations: usize,
        last_delta_kg: f64,
        last_mass_kg: f64,
    },
    #[error("design case '{0}' not found in catalog")]
    CaseNotFound(String),
    #[error("design case catalog is empty")]
    EmptyCatalog,
}
