//! Matching-chart data: power loading against wing loading for the cruise, climb, and stall
//! constraints. Rendering is left to whoever consumes the points.

use serde::Serialize;
use uav_aero::{DragPolar, dynamic_pressure};
use uav_core::integrate::uniform_grid;
use uav_core::{DomainError, ensure_non_negative, ensure_positive};

use crate::case::DesignCase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstraintSettings {
    pub wing_loading_min_n_m2: f64,
    pub wing_loading_max_n_m2: f64,
    pub samples: usize,
    pub stall_speed_target_m_s: f64,
    pub rate_of_climb_m_s: f64,
    /// Climb airspeed as a fraction of cruise speed.
    pub climb_speed_ratio: f64,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        Self {
            wing_loading_min_n_m2: 20.0,
            wing_loading_max_n_m2: 80.0,
            samples: 100,
            stall_speed_target_m_s: 12.0,
            rate_of_climb_m_s: 3.0,
            climb_speed_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstraintPoint {
    pub wing_loading_n_m2: f64,
    pub cruise_power_loading_w_n: f64,
    pub cruise_lift_to_drag: f64,
    pub climb_power_loading_w_n: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintDiagram {
    pub points: Vec<ConstraintPoint>,
    /// Highest wing loading that still stalls at or below the target speed.
    pub stall_wing_loading_limit_n_m2: f64,
    pub design_wing_loading_n_m2: f64,
    pub design_power_loading_w_n: f64,
}

impl ConstraintDiagram {
    pub fn design_meets_stall_limit(&self) -> bool {
        self.design_wing_loading_n_m2 <= self.stall_wing_loading_limit_n_m2
    }

    /// Sample with the lowest cruise power loading.
    pub fn best_cruise_point(&self) -> Option<&ConstraintPoint> {
        self.points.iter().min_by(|a, b| {
            a.cruise_power_loading_w_n
                .total_cmp(&b.cruise_power_loading_w_n)
        })
    }
}

/// Sweep wing loading and evaluate `P/W = V/(L/D)` for cruise and `V_climb/(L/D) + ROC` for climb.
///
/// Weight cancels out of both power loadings, so the chart depends only on the polar and speeds.
pub fn constraint_diagram<P: DragPolar + ?Sized>(
    case: &DesignCase,
    polar: &P,
    settings: &ConstraintSettings,
    design_power_loading_w_n: f64,
) -> Result<ConstraintDiagram, DomainError> {
    ensure_positive("minimum wing loading", settings.wing_loading_min_n_m2)?;
    ensure_positive("maximum wing loading", settings.wing_loading_max_n_m2)?;
    ensure_positive("stall speed target", settings.stall_speed_target_m_s)?;
    ensure_non_negative("rate of climb", settings.rate_of_climb_m_s)?;
    ensure_positive("climb speed ratio", settings.climb_speed_ratio)?;
    if settings.samples < 2 {
        return Err(DomainError::TooFewSamples {
            quantity: "wing loading samples",
            required: 2,
            actual: settings.samples,
        });
    }

    let rho = case.mission.air_density()?;
    let cruise_velocity = case.mission.cruise_velocity_m_s;
    let climb_velocity = settings.climb_speed_ratio * cruise_velocity;
    let q_cruise = dynamic_pressure(rho, cruise_velocity);
    let q_climb = dynamic_pressure(rho, climb_velocity);

    let points = uniform_grid(
        settings.wing_loading_min_n_m2,
        settings.wing_loading_max_n_m2,
        settings.samples,
    )
    .into_iter()
    .map(|wing_loading| {
        let cl_cruise = wing_loading / q_cruise;
        let cruise_lift_to_drag = polar.drag(cl_cruise)?.lift_to_drag(cl_cruise);
        let cl_climb = wing_loading / q_climb;
        let climb_lift_to_drag = polar.drag(cl_climb)?.lift_to_drag(cl_climb);
        Ok(ConstraintPoint {
            wing_loading_n_m2: wing_loading,
            cruise_power_loading_w_n: cruise_velocity / cruise_lift_to_drag,
            cruise_lift_to_drag,
            climb_power_loading_w_n: climb_velocity / climb_lift_to_drag
                + settings.rate_of_climb_m_s,
        })
    })
    .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(ConstraintDiagram {
        points,
        stall_wing_loading_limit_n_m2: dynamic_pressure(rho, settings.stall_speed_target_m_s)
            * case.design.cl_max,
        design_wing_loading_n_m2: case.design.wing_loading_n_m2,
        design_power_loading_w_n,
    })
}
