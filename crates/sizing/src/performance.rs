//! Point performance at the converged design.

use serde::Serialize;
use uav_aero::{
    DragBreakdown, DragPolar, MaxLiftToDrag, WingGeometry, lift_coefficient, reynolds_number,
    stall_speed,
};
use uav_core::DomainError;
use uav_core::constants::KINEMATIC_VISCOSITY_M2_S;

use crate::case::DesignCase;

/// Below this cruise-to-stall speed ratio the design has too little gust and manoeuvre margin.
pub const MIN_CRUISE_TO_STALL_RATIO: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub air_density_kg_m3: f64,
    pub wing_loading_n_m2: f64,
    pub stall_speed_m_s: f64,
    pub cruise_to_stall_ratio: f64,
    /// Mean-chord Reynolds number at cruise.
    pub reynolds_number: f64,
    pub cruise_lift_coefficient: f64,
    pub cruise_drag: DragBreakdown,
    pub cruise_lift_to_drag: f64,
    pub max_lift_to_drag: MaxLiftToDrag,
    /// Cruise shaft power per unit weight (W/N).
    pub power_loading_w_n: f64,
}

impl PerformanceSummary {
    pub fn has_stall_margin(&self) -> bool {
        self.cruise_to_stall_ratio >= MIN_CRUISE_TO_STALL_RATIO
    }
}

pub fn performance_summary<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
    geometry: &WingGeometry,
    weight_n: f64,
    cruise_power_w: f64,
) -> Result<PerformanceSummary, DomainError> {
    let rho = case.mission.air_density()?;
    let cruise_velocity = case.mission.cruise_velocity_m_s;
    let stall_speed_m_s = stall_speed(weight_n, geometry.area_m2, case.design.cl_max, rho)?;
    let cruise_lift_coefficient =
        lift_coefficient(weight_n, geometry.area_m2, cruise_velocity, rho)?;
    let cruise_drag = polar.drag(cruise_lift_coefficient)?;

    Ok(PerformanceSummary {
        air_density_kg_m3: rho,
        wing_loading_n_m2: geometry.wing_loading(weight_n),
        stall_speed_m_s,
        cruise_to_stall_ratio: cruise_velocity / stall_speed_m_s,
        reynolds_number: reynolds_number(
            cruise_velocity,
            geometry.mean_chord_m,
            KINEMATIC_VISCOSITY_M2_S,
        )?,
        cruise_lift_coefficient,
        cruise_drag,
        cruise_lift_to_drag: cruise_drag.lift_to_drag(cruise_lift_coefficient),
        max_lift_to_drag: polar.max_lift_to_drag(),
        power_loading_w_n: cruise_power_w / weight_n,
    })
}
