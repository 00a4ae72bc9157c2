//! Primary wing structure: spanwise loads, tubular spar sizing, and bending deflection.
//!
//! The chain runs once on a converged design: [`loads::elliptical_distribution`] builds the
//! ultimate-load curve, [`spar::size_spar`] picks a standard tube for strength and stiffness,
//! and [`deflection::deflection_profile`] integrates the resulting curvature twice.

pub mod airframe;
pub mod deflection;
pub mod loads;
pub mod spar;

use serde::Serialize;
use thiserror::Error;
use uav_core::{DomainError, ensure_positive};

pub use deflection::{DeflectionProfile, DeflectionStation, deflection_profile};
pub use loads::{SpanwiseLoadDistribution, SpanwiseStation, elliptical_distribution};
pub use spar::{SizingCriterion, SparDesign, SparSpecification, size_spar};

/// Isotropic material properties used for spar and boom checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SparMaterial {
    pub tensile_strength_pa: f64,
    pub elastic_modulus_pa: f64,
    pub density_kg_m3: f64,
}

impl SparMaterial {
    /// Pultruded unidirectional carbon tube.
    pub const CARBON_TUBE: SparMaterial = SparMaterial {
        tensile_strength_pa: 600e6,
        elastic_modulus_pa: 70e9,
        density_kg_m3: 1_600.0,
    };

    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("tensile strength", self.tensile_strength_pa)?;
        ensure_positive("elastic modulus", self.elastic_modulus_pa)?;
        ensure_positive("material density", self.density_kg_m3)?;
        Ok(())
    }

    /// Design allowable stress after applying `safety_factor`.
    pub fn allowable_stress(&self, safety_factor: f64) -> Result<f64, DomainError> {
        ensure_positive("safety factor", safety_factor)?;
        Ok(self.tensile_strength_pa / safety_factor)
    }
}

impl Default for SparMaterial {
    fn default() -> Self {
        Self::CARBON_TUBE
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuresError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(
        "no standard spar size fits: {criterion} requires {required_outer_diameter_mm:.2} mm, largest available is {largest_available_mm:.2} mm"
    )]
    SizingInfeasible {
        required_outer_diameter_mm: f64,
        largest_available_mm: f64,
        criterion: SizingCriterion,
    },
    #[error("standard spar size list is empty")]
    NoStandardSizes,
}
