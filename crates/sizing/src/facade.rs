//! End-to-end sizing: weight loop, performance, wing structure, and airframe mass check.

use log::{debug, info, warn};
use serde::Serialize;
use uav_aero::{DragPolar, WingGeometry};
use uav_mission::{MissionEnergyResult, MissionProfile};
use uav_propulsion::{BatterySizing, MotorSizing};
use uav_structures::airframe::{AirframeMassBreakdown, AirframeRequest, estimate_airframe};
use uav_structures::loads::ultimate_lift;
use uav_structures::{
    DeflectionProfile, SparDesign, SpanwiseLoadDistribution, deflection_profile,
    elliptical_distribution, size_spar,
};

use crate::SizingError;
use crate::case::{DesignCase, DesignParameters};
use crate::convergence::{ConvergenceState, LoopStatus, WeightBudget, converge_with};
use crate::matching::{ConstraintDiagram, ConstraintSettings, constraint_diagram};
use crate::performance::{PerformanceSummary, performance_summary};

/// Everything produced for one design case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingReport {
    pub case_name: String,
    pub description: Option<String>,
    pub mission: MissionProfile,
    pub design: DesignParameters,
    pub budget: WeightBudget,
    pub geometry: WingGeometry,
    pub energy: MissionEnergyResult,
    pub battery: BatterySizing,
    pub motor: MotorSizing,
    pub performance: PerformanceSummary,
    pub constraints: ConstraintDiagram,
    pub ultimate_lift_n: f64,
    pub loads: SpanwiseLoadDistribution,
    pub spar: SparDesign,
    pub deflection: DeflectionProfile,
    pub airframe: AirframeMassBreakdown,
    pub convergence: Vec<ConvergenceState>,
}

impl SizingReport {
    pub fn iterations(&self) -> usize {
        self.convergence.last().map(|s| s.iteration).unwrap_or(0)
    }

    /// Tip deflection within the allowed fraction of semi-span.
    pub fn deflection_ok(&self, limit_ratio: f64) -> bool {
        self.deflection.deflection_ratio() <= limit_ratio
    }
}

/// Size a case with the default matching-chart settings.
pub fn run_sizing(case: &DesignCase) -> Result<SizingReport, SizingError> {
    run_sizing_with(case, &ConstraintSettings::default())
}

/// Size a case on its parabolic polar.
pub fn run_sizing_with(
    case: &DesignCase,
    constraint_settings: &ConstraintSettings,
) -> Result<SizingReport, SizingError> {
    case.validate()?;
    run_sizing_with_polar(case, &case.design.polar()?, constraint_settings)
}

/// Size a case on any drag polar, e.g. one tabulated from an external solver.
pub fn run_sizing_with_polar<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
    constraint_settings: &ConstraintSettings,
) -> Result<SizingReport, SizingError> {
    info!("sizing case '{}'", case.name);
    let converged = converge_with(case, polar).inspect_err(|err| {
        if let SizingError::Diverged { .. } = err {
            warn!("case '{}': {err}", case.name);
        }
    })?;
    log_history(&converged.history);

    let budget = converged.budget;
    let geometry = converged.geometry;
    let weight_n = budget.weight_n();

    let performance = performance_summary(
        case,
        polar,
        &geometry,
        weight_n,
        converged.energy.cruise.power_w,
    )?;
    let constraints = constraint_diagram(
        case,
        polar,
        constraint_settings,
        performance.power_loading_w_n,
    )?;

    let ultimate_lift_n = ultimate_lift(budget.total_kg, case.design.ultimate_load_factor)?;
    let loads = elliptical_distribution(
        ultimate_lift_n,
        geometry.span_m,
        geometry.taper_ratio,
        case.loads.taper_correction,
        case.loads.station_count,
    )?;
    let spar = size_spar(&loads, geometry.root_chord_m, &case.spar)?;
    let deflection = deflection_profile(
        &loads,
        spar.elastic_modulus_pa,
        spar.section.second_moment_m4,
    )?;
    debug!(
        "spar {:.0} mm ({} governs), root moment {:.2} N·m, tip deflection {:.1} mm",
        spar.section.outer_diameter_m * 1e3,
        spar.governing,
        spar.design_moment_n_m,
        deflection.tip_deflection_m() * 1e3,
    );

    let airframe = estimate_airframe(
        &AirframeRequest {
            spar: &spar,
            span_m: geometry.span_m,
            wing_area_m2: geometry.area_m2,
            structural_budget_kg: budget.structure_kg,
            material: case.spar.material,
            safety_factor: case.spar.safety_factor,
        },
        &case.airframe,
    )?;

    if !airframe.within_budget() {
        warn!(
            "case '{}': airframe estimate {:.3} kg exceeds structural budget {:.3} kg",
            case.name, airframe.total_kg, airframe.budget_kg
        );
    }
    if !airframe.fuselage.tail_boom_ok() {
        warn!(
            "case '{}': tail boom stress {:.1} MPa above allowable {:.1} MPa",
            case.name,
            airframe.fuselage.tail_boom_stress_pa / 1e6,
            airframe.fuselage.tail_boom_allowable_pa / 1e6
        );
    }
    if !performance.has_stall_margin() {
        warn!(
            "case '{}': cruise/stall ratio {:.2} is below the recommended margin",
            case.name, performance.cruise_to_stall_ratio
        );
    }

    info!(
        "case '{}' converged to {:.3} kg in {} iterations (span {:.2} m, battery {:.0} Wh)",
        case.name,
        budget.total_kg,
        converged.iterations(),
        geometry.span_m,
        converged.battery.energy_with_reserve_wh,
    );

    Ok(SizingReport {
        case_name: case.name.clone(),
        description: case.description.clone(),
        mission: case.mission.clone(),
        design: case.design,
        budget,
        geometry,
        energy: converged.energy,
        battery: converged.battery,
        motor: converged.motor,
        performance,
        constraints,
        ultimate_lift_n,
        loads,
        spar,
        deflection,
        airframe,
        convergence: converged.history,
    })
}

fn log_history(history: &[ConvergenceState]) {
    for state in history {
        match (state.status, state.delta_kg) {
            (LoopStatus::Init, _) | (_, None) => {
                debug!("iteration 0: initial guess {:.4} kg", state.current_mass_kg)
            }
            (_, Some(delta)) => debug!(
                "iteration {}: W = {:.4} kg (delta = {:.5})",
                state.iteration, state.current_mass_kg, delta
            ),
        }
    }
}
