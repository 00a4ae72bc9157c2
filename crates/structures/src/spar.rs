//! Thin-walled circular tube spar sized for strength and tip-deflection stiffness.

use std::fmt;

use serde::Serialize;
use uav_core::units::{m_to_mm, mm_to_m};
use uav_core::{DomainError, ensure_positive, ensure_within};

use crate::loads::SpanwiseLoadDistribution;
use crate::{SparMaterial, StructuresError};

/// Which requirement set the spar outer diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingCriterion {
    Strength,
    Stiffness,
}

impl fmt::Display for SizingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingCriterion::Strength => f.write_str("strength"),
            SizingCriterion::Stiffness => f.write_str("stiffness"),
        }
    }
}

/// Material, margins, and catalogue for the spar tube.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparSpecification {
    pub material: SparMaterial,
    pub safety_factor: f64,
    /// Allowed tip deflection as a fraction of the semi-span.
    pub deflection_ratio_limit: f64,
    /// Wall thickness over outer diameter.
    pub wall_thickness_ratio: f64,
    /// Tip-deflection coefficient for an elliptically loaded cantilever
    /// (0.125 would be uniform load).
    pub tip_deflection_coefficient: f64,
    /// Spar location as a fraction of the local chord from the leading edge.
    pub chord_fraction: f64,
    /// Available tube outer diameters (mm).
    pub standard_outer_diameters_mm: Vec<f64>,
}

impl Default for SparSpecification {
    fn default() -> Self {
        Self {
            material: SparMaterial::CARBON_TUBE,
            safety_factor: 1.5,
            deflection_ratio_limit: 0.08,
            wall_thickness_ratio: 0.12,
            tip_deflection_coefficient: 0.35,
            chord_fraction: 0.30,
            standard_outer_diameters_mm: vec![6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0],
        }
    }
}

impl SparSpecification {
    pub fn validate(&self) -> Result<(), StructuresError> {
        self.material.validate()?;
        ensure_positive("safety factor", self.safety_factor)?;
        ensure_positive("deflection ratio limit", self.deflection_ratio_limit)?;
        ensure_positive("wall thickness ratio", self.wall_thickness_ratio)?;
        ensure_within("wall thickness ratio", self.wall_thickness_ratio, 0.0, 0.5)?;
        ensure_positive("tip deflection coefficient", self.tip_deflection_coefficient)?;
        ensure_within("spar chord fraction", self.chord_fraction, 0.0, 1.0)?;
        if self.standard_outer_diameters_mm.is_empty() {
            return Err(StructuresError::NoStandardSizes);
        }
        for &size in &self.standard_outer_diameters_mm {
            ensure_positive("standard spar diameter", size)?;
        }
        Ok(())
    }
}

/// Geometric properties of a circular tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TubeSection {
    pub outer_diameter_m: f64,
    pub inner_diameter_m: f64,
    pub wall_thickness_m: f64,
    pub area_m2: f64,
    pub second_moment_m4: f64,
}

impl TubeSection {
    pub fn from_wall_ratio(outer_diameter_m: f64, wall_thickness_ratio: f64) -> Self {
        Self::from_diameters(
            outer_diameter_m,
            outer_diameter_m * (1.0 - 2.0 * wall_thickness_ratio),
        )
    }

    pub fn from_diameters(outer_diameter_m: f64, inner_diameter_m: f64) -> Self {
        let pi = std::f64::consts::PI;
        Self {
            outer_diameter_m,
            inner_diameter_m,
            wall_thickness_m: 0.5 * (outer_diameter_m - inner_diameter_m),
            area_m2: pi / 4.0 * (outer_diameter_m.powi(2) - inner_diameter_m.powi(2)),
            second_moment_m4: pi / 64.0 * (outer_diameter_m.powi(4) - inner_diameter_m.powi(4)),
        }
    }

    /// Elastic section modulus `I/c` with `c = D/2`.
    pub fn section_modulus(&self) -> f64 {
        self.second_moment_m4 / (0.5 * self.outer_diameter_m)
    }

    /// Peak bending stress `M·(D/2)/I`.
    pub fn bending_stress(&self, bending_moment_n_m: f64) -> f64 {
        bending_moment_n_m * (0.5 * self.outer_diameter_m) / self.second_moment_m4
    }
}

/// `1 − (1 − 2·w)⁴`, the hollow fraction of a solid circle's bending properties.
pub fn tube_section_factor(wall_thickness_ratio: f64) -> f64 {
    1.0 - (1.0 - 2.0 * wall_thickness_ratio).powi(4)
}

/// Outer diameter giving section modulus `S = (π/32)·D³·factor`.
pub fn diameter_for_section_modulus(section_modulus_m3: f64, wall_thickness_ratio: f64) -> f64 {
    (32.0 * section_modulus_m3 / (std::f64::consts::PI * tube_section_factor(wall_thickness_ratio)))
        .cbrt()
}

/// Outer diameter giving second moment `I = (π/64)·D⁴·factor`.
pub fn diameter_for_second_moment(second_moment_m4: f64, wall_thickness_ratio: f64) -> f64 {
    (64.0 * second_moment_m4 / (std::f64::consts::PI * tube_section_factor(wall_thickness_ratio)))
        .powf(0.25)
}

/// Final spar selection and its checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparDesign {
    pub section: TubeSection,
    pub governing: SizingCriterion,
    pub strength_diameter_m: f64,
    pub stiffness_diameter_m: f64,
    /// Diameter before rounding to the catalogue.
    pub required_outer_diameter_m: f64,
    pub required_section_modulus_m3: f64,
    pub required_second_moment_m4: f64,
    pub mass_per_length_kg_m: f64,
    /// Both wing halves.
    pub mass_kg: f64,
    pub design_moment_n_m: f64,
    pub max_stress_pa: f64,
    pub allowable_stress_pa: f64,
    /// `(allowable − actual)/allowable`.
    pub stress_margin: f64,
    /// Distance of the spar axis aft of the root leading edge.
    pub chordwise_position_m: f64,
    pub elastic_modulus_pa: f64,
}

/// Size a tube spar against the root bending moment and the tip-deflection limit.
pub fn size_spar(
    loads: &SpanwiseLoadDistribution,
    root_chord_m: f64,
    spec: &SparSpecification,
) -> Result<SparDesign, StructuresError> {
    spec.validate()?;
    ensure_positive("root chord", root_chord_m)?;
    loads.validate()?;

    let material = spec.material;
    let semi_span = loads.semi_span_m;
    let allowable_stress_pa = material.allowable_stress(spec.safety_factor)?;
    let design_moment_n_m = loads.root().bending_moment_n_m;

    let required_section_modulus_m3 = design_moment_n_m / allowable_stress_pa;
    let strength_diameter_m =
        diameter_for_section_modulus(required_section_modulus_m3, spec.wall_thickness_ratio);

    let max_deflection_m = spec.deflection_ratio_limit * semi_span;
    let half_lift = 0.5 * loads.total_lift_n;
    let required_second_moment_m4 = spec.tip_deflection_coefficient * half_lift * semi_span.powi(3)
        / (material.elastic_modulus_pa * max_deflection_m);
    let stiffness_diameter_m =
        diameter_for_second_moment(required_second_moment_m4, spec.wall_thickness_ratio);

    let (required_outer_diameter_m, governing) = if stiffness_diameter_m > strength_diameter_m {
        (stiffness_diameter_m, SizingCriterion::Stiffness)
    } else {
        (strength_diameter_m, SizingCriterion::Strength)
    };

    let outer_diameter_m = round_up_to_standard(
        required_outer_diameter_m,
        &spec.standard_outer_diameters_mm,
        governing,
    )?;
    let section = TubeSection::from_wall_ratio(outer_diameter_m, spec.wall_thickness_ratio);
    let mass_per_length_kg_m = section.area_m2 * material.density_kg_m3;
    let max_stress_pa = section.bending_stress(design_moment_n_m);

    Ok(SparDesign {
        section,
        governing,
        strength_diameter_m,
        stiffness_diameter_m,
        required_outer_diameter_m,
        required_section_modulus_m3,
        required_second_moment_m4,
        mass_per_length_kg_m,
        mass_kg: 2.0 * mass_per_length_kg_m * semi_span,
        design_moment_n_m,
        max_stress_pa,
        allowable_stress_pa,
        stress_margin: (allowable_stress_pa - max_stress_pa) / allowable_stress_pa,
        chordwise_position_m: spec.chord_fraction * root_chord_m,
        elastic_modulus_pa: material.elastic_modulus_pa,
    })
}

/// Smallest catalogue diameter at or above `required_m`.
fn round_up_to_standard(
    required_m: f64,
    standard_mm: &[f64],
    criterion: SizingCriterion,
) -> Result<f64, StructuresError> {
    let required_mm = m_to_mm(required_m);
    if !required_mm.is_finite() {
        return Err(DomainError::NonFinite {
            quantity: "required spar diameter",
            value: required_mm,
        }
        .into());
    }
    let mut sizes = standard_mm.to_vec();
    sizes.sort_by(f64::total_cmp);
    match sizes.iter().find(|&&size| size >= required_mm) {
        Some(&size) => Ok(mm_to_m(size)),
        None => Err(StructuresError::SizingInfeasible {
            required_outer_diameter_mm: required_mm,
            largest_available_mm: sizes.last().copied().unwrap_or(0.0),
            criterion,
        }),
    }
}
