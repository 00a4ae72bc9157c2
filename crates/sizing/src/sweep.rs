//! One-parameter trade studies over the weight loop.

use std::fmt;

use serde::Serialize;
use uav_core::integrate::uniform_grid;

use crate::case::DesignCase;
use crate::convergence::converge;

/// Design inputs that can be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    Cd0,
    AspectRatio,
    WingLoading,
    StructuralFraction,
    PayloadMass,
    OswaldEfficiency,
}

impl SweepParameter {
    pub fn label(self) -> &'static str {
        match self {
            SweepParameter::Cd0 => "cd0",
            SweepParameter::AspectRatio => "aspect_ratio",
            SweepParameter::WingLoading => "wing_loading_n_m2",
            SweepParameter::StructuralFraction => "structural_fraction",
            SweepParameter::PayloadMass => "payload_mass_kg",
            SweepParameter::OswaldEfficiency => "oswald_efficiency",
        }
    }

    /// Current value of this parameter in `case`.
    pub fn value_in(self, case: &DesignCase) -> f64 {
        match self {
            SweepParameter::Cd0 => case.design.cd0,
            SweepParameter::AspectRatio => case.design.aspect_ratio,
            SweepParameter::WingLoading => case.design.wing_loading_n_m2,
            SweepParameter::StructuralFraction => case.design.structural_fraction,
            SweepParameter::PayloadMass => case.mission.payload_mass_kg,
            SweepParameter::OswaldEfficiency => case.design.oswald_efficiency,
        }
    }

    /// Copy of `case` with this parameter replaced.
    pub fn apply(self, case: &DesignCase, value: f64) -> DesignCase {
        let mut case = case.clone();
        match self {
            SweepParameter::Cd0 => case.design.cd0 = value,
            SweepParameter::AspectRatio => case.design.aspect_ratio = value,
            SweepParameter::WingLoading => case.design.wing_loading_n_m2 = value,
            SweepParameter::StructuralFraction => case.design.structural_fraction = value,
            SweepParameter::PayloadMass => case.mission.payload_mass_kg = value,
            SweepParameter::OswaldEfficiency => case.design.oswald_efficiency = value,
        }
        case
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome at one sweep value. Failed points keep the error message instead of aborting the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub total_mass_kg: Option<f64>,
    pub wing_area_m2: Option<f64>,
    pub span_m: Option<f64>,
    pub battery_mass_kg: Option<f64>,
    pub iterations: Option<usize>,
    pub error: Option<String>,
}

impl SweepPoint {
    pub fn converged(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub case_name: String,
    pub parameter: SweepParameter,
    pub points: Vec<SweepPoint>,
}

/// Re-run the weight loop for each value.
pub fn sweep(case: &DesignCase, parameter: SweepParameter, values: &[f64]) -> SweepResult {
    let points = values
        .iter()
        .map(|&value| match converge(&parameter.apply(case, value)) {
            Ok(design) => SweepPoint {
                value,
                total_mass_kg: Some(design.budget.total_kg),
                wing_area_m2: Some(design.geometry.area_m2),
                span_m: Some(design.geometry.span_m),
                battery_mass_kg: Some(design.battery.mass_kg),
                iterations: Some(design.iterations()),
                error: None,
            },
            Err(err) => SweepPoint {
                value,
                total_mass_kg: None,
                wing_area_m2: None,
                span_m: None,
                battery_mass_kg: None,
                iterations: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    SweepResult {
        case_name: case.name.clone(),
        parameter,
        points,
    }
}

/// Sweep `steps` evenly spaced values from `from` to `to` inclusive.
pub fn sweep_range(
    case: &DesignCase,
    parameter: SweepParameter,
    from: f64,
    to: f64,
    steps: usize,
) -> SweepResult {
    sweep(case, parameter, &uniform_grid(from, to, steps))
}
