//! Aerodynamic coefficient model for conceptual sizing.
//!
//! Lift comes from the steady level-flight lift equation and drag from the classic parabolic
//! polar `CD = CD0 + CL²/(π·AR·e)`. Everything here is a pure function of its arguments; the
//! [`polar`] module wraps the same relations behind a trait so tabulated data from an external
//! solver can stand in for the analytic polar.

pub mod geometry;
pub mod polar;
pub mod solver;

use serde::Serialize;
use uav_core::{DomainError, ensure_non_negative, ensure_positive};

pub use geometry::WingGeometry;
pub use polar::{DragPolar, ParabolicPolar, PolarSample, TabulatedPolar};

/// Drag coefficient split into its parasite and lift-induced parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragBreakdown {
    pub total: f64,
    pub parasite: f64,
    pub induced: f64,
}

impl DragBreakdown {
    /// Lift-to-drag ratio for the lift coefficient that produced this breakdown.
    pub fn lift_to_drag(&self, lift_coefficient: f64) -> f64 {
        lift_coefficient / self.total
    }
}

/// Operating point of best aerodynamic efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxLiftToDrag {
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub lift_to_drag: f64,
}

/// Dynamic pressure `q = ½·ρ·V²` (Pa).
#[inline]
pub fn dynamic_pressure(air_density_kg_m3: f64, velocity_m_s: f64) -> f64 {
    0.5 * air_density_kg_m3 * velocity_m_s * velocity_m_s
}

/// Lift coefficient required to support `weight_n` in level flight: `CL = W / (½·ρ·V²·S)`.
pub fn lift_coefficient(
    weight_n: f64,
    wing_area_m2: f64,
    velocity_m_s: f64,
    air_density_kg_m3: f64,
) -> Result<f64, DomainError> {
    ensure_non_negative("weight", weight_n)?;
    ensure_positive("wing area", wing_area_m2)?;
    ensure_positive("velocity", velocity_m_s)?;
    ensure_positive("air density", air_density_kg_m3)?;
    Ok(weight_n / (dynamic_pressure(air_density_kg_m3, velocity_m_s) * wing_area_m2))
}

/// Parabolic drag polar `CD = CD0 + CL²/(π·AR·e)`.
pub fn drag_coefficient(
    lift_coefficient: f64,
    aspect_ratio: f64,
    oswald_efficiency: f64,
    cd0: f64,
) -> DragBreakdown {
    let induced = lift_coefficient * lift_coefficient
        / (std::f64::consts::PI * aspect_ratio * oswald_efficiency);
    DragBreakdown {
        total: cd0 + induced,
        parasite: cd0,
        induced,
    }
}

/// Closed-form L/D optimum where induced drag equals parasite drag.
pub fn max_lift_to_drag(aspect_ratio: f64, oswald_efficiency: f64, cd0: f64) -> MaxLiftToDrag {
    let lift_coefficient = (std::f64::consts::PI * aspect_ratio * oswald_efficiency * cd0).sqrt();
    let drag_coefficient = 2.0 * cd0;
    MaxLiftToDrag {
        lift_coefficient,
        drag_coefficient,
        lift_to_drag: lift_coefficient / drag_coefficient,
    }
}

/// Airspeed at which the wing produces `weight_n` of lift at the given lift coefficient.
pub fn velocity_for_lift_coefficient(
    weight_n: f64,
    wing_area_m2: f64,
    lift_coefficient: f64,
    air_density_kg_m3: f64,
) -> Result<f64, DomainError> {
    ensure_non_negative("weight", weight_n)?;
    ensure_positive("wing area", wing_area_m2)?;
    ensure_positive("lift coefficient", lift_coefficient)?;
    ensure_positive("air density", air_density_kg_m3)?;
    Ok((2.0 * weight_n / (air_density_kg_m3 * wing_area_m2 * lift_coefficient)).sqrt())
}

/// Stall speed at the maximum lift coefficient.
pub fn stall_speed(
    weight_n: f64,
    wing_area_m2: f64,
    max_lift_coefficient: f64,
    air_density_kg_m3: f64,
) -> Result<f64, DomainError> {
    velocity_for_lift_coefficient(weight_n, wing_area_m2, max_lift_coefficient, air_density_kg_m3)
}

/// Chord Reynolds number `Re = V·c/ν`.
pub fn reynolds_number(
    velocity_m_s: f64,
    chord_m: f64,
    kinematic_viscosity_m2_s: f64,
) -> Result<f64, DomainError> {
    ensure_non_negative("velocity", velocity_m_s)?;
    ensure_positive("chord", chord_m)?;
    ensure_positive("kinematic viscosity", kinematic_viscosity_m2_s)?;
    Ok(velocity_m_s * chord_m / kinematic_viscosity_m2_s)
}
