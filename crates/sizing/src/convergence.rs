//! Fixed-point weight convergence.
//!
//! Each pass sizes the wing for the current mass, integrates mission energy, sizes battery and
//! motor, then closes the budget with `total = fixed / (1 − structural fraction)`. The loop is
//! pure: it records every state and leaves reporting to the caller.

use serde::Serialize;
use uav_aero::{DragPolar, WingGeometry};
use uav_core::constants::GRAVITY_M_S2;
use uav_core::{DomainError, ensure_positive};
use uav_mission::{EnergyRequest, MissionEnergyResult, total_mission_energy};
use uav_propulsion::{BatterySizing, MotorSizing};

use crate::SizingError;
use crate::case::DesignCase;

/// Mass allocation by component (kg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightBudget {
    pub payload_kg: f64,
    pub avionics_kg: f64,
    pub battery_kg: f64,
    pub motor_kg: f64,
    pub propeller_kg: f64,
    pub structure_kg: f64,
    pub total_kg: f64,
}

impl WeightBudget {
    /// Everything except structure.
    pub fn fixed_kg(&self) -> f64 {
        self.payload_kg + self.avionics_kg + self.battery_kg + self.motor_kg + self.propeller_kg
    }

    pub fn sum_of_parts(&self) -> f64 {
        self.fixed_kg() + self.structure_kg
    }

    pub fn weight_n(&self) -> f64 {
        self.total_kg * GRAVITY_M_S2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    Init,
    Iterating,
    Converged,
    Diverged,
}

/// Snapshot of the loop after one pass. The `Init` entry carries the starting guess only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceState {
    pub iteration: usize,
    pub previous_mass_kg: f64,
    pub current_mass_kg: f64,
    pub delta_kg: Option<f64>,
    pub tolerance_kg: f64,
    pub max_iterations: usize,
    pub status: LoopStatus,
}

/// Sizing chain evaluated at one assumed mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationResult {
    pub assumed_mass_kg: f64,
    pub geometry: WingGeometry,
    pub energy: MissionEnergyResult,
    pub battery: BatterySizing,
    pub motor: MotorSizing,
    /// Budget closed around the updated total mass.
    pub budget: WeightBudget,
}

/// Complete record of one loop run, converged or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceRun {
    pub history: Vec<ConvergenceState>,
    pub last: IterationResult,
    pub status: LoopStatus,
}

impl ConvergenceRun {
    pub fn iterations(&self) -> usize {
        self.history.last().map(|s| s.iteration).unwrap_or(0)
    }

    /// Deltas of every completed pass in order.
    pub fn deltas(&self) -> Vec<f64> {
        self.history.iter().filter_map(|s| s.delta_kg).collect()
    }
}

/// Converged aircraft: budget, planform at the final mass, and the energy chain of the last pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergedDesign {
    pub budget: WeightBudget,
    pub geometry: WingGeometry,
    pub energy: MissionEnergyResult,
    pub battery: BatterySizing,
    pub motor: MotorSizing,
    pub history: Vec<ConvergenceState>,
}

impl ConvergedDesign {
    pub fn iterations(&self) -> usize {
        self.history.last().map(|s| s.iteration).unwrap_or(0)
    }
}

/// Run the sizing chain once at `mass_kg`.
pub fn evaluate_iteration<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
    mass_kg: f64,
) -> Result<IterationResult, DomainError> {
    ensure_positive("assumed mass", mass_kg)?;
    let design = &case.design;
    let weight_n = mass_kg * GRAVITY_M_S2;
    let geometry = WingGeometry::from_weight(
        weight_n,
        design.wing_loading_n_m2,
        design.aspect_ratio,
        design.taper_ratio,
    )?;

    let energy = total_mission_energy(
        &EnergyRequest {
            weight_n,
            wing_area_m2: geometry.area_m2,
            mission: &case.mission,
            climb: &case.climb,
            propulsive_efficiency: case.propulsion.propulsive_efficiency,
        },
        polar,
    )?;
    let battery = case.propulsion.battery_for(energy.battery_energy_wh)?;
    let motor = case.propulsion.motor_for(energy.cruise.power_w)?;

    let fixed_kg = case.mission.payload_mass_kg
        + design.avionics_mass_kg
        + battery.mass_kg
        + motor.mass_kg
        + case.propulsion.propeller_mass_kg;
    let total_kg = fixed_kg / (1.0 - design.structural_fraction);
    if !total_kg.is_finite() {
        return Err(DomainError::NonFinite {
            quantity: "total mass",
            value: total_kg,
        });
    }

    Ok(IterationResult {
        assumed_mass_kg: mass_kg,
        geometry,
        energy,
        battery,
        motor,
        budget: WeightBudget {
            payload_kg: case.mission.payload_mass_kg,
            avionics_kg: design.avionics_mass_kg,
            battery_kg: battery.mass_kg,
            motor_kg: motor.mass_kg,
            propeller_kg: case.propulsion.propeller_mass_kg,
            structure_kg: total_kg - fixed_kg,
            total_kg,
        },
    })
}

/// Iterate on the case's parabolic polar.
pub fn iterate(case: &DesignCase) -> Result<ConvergenceRun, DomainError> {
    case.validate()?;
    iterate_with(case, &case.design.polar()?)
}

/// Iterate until `|new − previous| < tolerance` or the iteration cap is reached.
///
/// Never fails on non-convergence; the returned run ends in `Converged` or `Diverged`.
pub fn iterate_with<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
) -> Result<ConvergenceRun, DomainError> {
    case.validate()?;
    let settings = case.convergence;

    let mut history = Vec::with_capacity(settings.max_iterations + 1);
    history.push(ConvergenceState {
        iteration: 0,
        previous_mass_kg: settings.initial_mass_kg,
        current_mass_kg: settings.initial_mass_kg,
        delta_kg: None,
        tolerance_kg: settings.tolerance_kg,
        max_iterations: settings.max_iterations,
        status: LoopStatus::Init,
    });

    let mut mass_kg = settings.initial_mass_kg;
    let mut iteration = 1;
    loop {
        let result = evaluate_iteration(case, polar, mass_kg)?;
        let new_mass_kg = result.budget.total_kg;
        let delta_kg = (new_mass_kg - mass_kg).abs();
        let status = if delta_kg < settings.tolerance_kg {
            LoopStatus::Converged
        } else if iteration >= settings.max_iterations {
            LoopStatus::Diverged
        } else {
            LoopStatus::Iterating
        };
        history.push(ConvergenceState {
            iteration,
            previous_mass_kg: mass_kg,
            current_mass_kg: new_mass_kg,
            delta_kg: Some(delta_kg),
            tolerance_kg: settings.tolerance_kg,
            max_iterations: settings.max_iterations,
            status,
        });
        if status != LoopStatus::Iterating {
            return Ok(ConvergenceRun {
                history,
                last: result,
                status,
            });
        }
        mass_kg = new_mass_kg;
        iteration += 1;
    }
}

/// Converge on the case's parabolic polar.
pub fn converge(case: &DesignCase) -> Result<ConvergedDesign, SizingError> {
    case.validate()?;
    converge_with(case, &case.design.polar()?)
}

/// Converge the weight budget, failing with [`SizingError::Diverged`] past the iteration cap.
pub fn converge_with<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
) -> Result<ConvergedDesign, SizingError> {
    let run = iterate_with(case, polar)?;
    let last_delta_kg = run.deltas().last().copied().unwrap_or(f64::INFINITY);
    if run.status != LoopStatus::Converged {
        return Err(SizingError::Diverged {
            iterations: run.iterations(),
            last_delta_kg,
            last_mass_kg: run.last.budget.total_kg,
        });
    }

    let IterationResult {
        energy,
        battery,
        motor,
        budget,
        ..
    } = run.last;
    let design = &case.design;
    let geometry = WingGeometry::from_weight(
        budget.weight_n(),
        design.wing_loading_n_m2,
        design.aspect_ratio,
        design.taper_ratio,
    )?;

    Ok(ConvergedDesign {
        budget,
        geometry,
        energy,
        battery,
        motor,
        history: run.history,
    })
}
