//! Mission energy integration over the ordered phases climb → cruise → loiter.
//!
//! Cruise is flown once over the full round-trip distance. Descent and landing draw no
//! propulsive energy in this model and are not represented as phases.

use serde::Serialize;
use uav_aero::{DragPolar, lift_coefficient, velocity_for_lift_coefficient};
use uav_core::atmosphere::isa_density;
use uav_core::units::joules_to_wh;
use uav_core::{DomainError, ensure_non_negative, ensure_positive, ensure_within};

/// Mission requirements, SI units throughout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionProfile {
    pub range_out_m: f64,
    pub range_back_m: f64,
    pub loiter_duration_s: f64,
    pub cruise_velocity_m_s: f64,
    pub loiter_velocity_m_s: f64,
    pub altitude_m: f64,
    pub payload_mass_kg: f64,
    pub payload_power_w: f64,
    /// Fixed operating density; `None` uses the ISA value at `altitude_m`.
    pub air_density_kg_m3: Option<f64>,
}

impl MissionProfile {
    /// Out-and-back distance flown in cruise.
    pub fn total_range_m(&self) -> f64 {
        self.range_out_m + self.range_back_m
    }

    /// Reject profiles that would poison downstream arithmetic.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_non_negative("outbound range", self.range_out_m)?;
        ensure_non_negative("return range", self.range_back_m)?;
        ensure_non_negative("loiter duration", self.loiter_duration_s)?;
        ensure_positive("cruise velocity", self.cruise_velocity_m_s)?;
        ensure_positive("loiter velocity", self.loiter_velocity_m_s)?;
        ensure_non_negative("altitude", self.altitude_m)?;
        ensure_non_negative("payload mass", self.payload_mass_kg)?;
        ensure_non_negative("payload power", self.payload_power_w)?;
        self.air_density().map(|_| ())
    }

    /// Operating air density.
    pub fn air_density(&self) -> Result<f64, DomainError> {
        match self.air_density_kg_m3 {
            Some(rho) => ensure_positive("air density", rho),
            None => isa_density(self.altitude_m),
        }
    }
}

/// Climb heuristics. Neither value is physically derived; both are overridable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimbSchedule {
    pub lift_coefficient: f64,
    pub climb_rate_m_s: f64,
}

impl Default for ClimbSchedule {
    fn default() -> Self {
        Self {
            lift_coefficient: 0.6,
            climb_rate_m_s: 2.0,
        }
    }
}

/// Mission phases in flight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Climb,
    Cruise,
    Loiter,
}

impl Phase {
    pub const ORDER: [Phase; 3] = [Phase::Climb, Phase::Cruise, Phase::Loiter];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Climb => "climb",
            Phase::Cruise => "cruise",
            Phase::Loiter => "loiter",
        }
    }
}

/// Energy bookkeeping for a single phase. Energy is shaft energy before efficiency losses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseEnergy {
    pub phase: Phase,
    pub duration_s: f64,
    pub velocity_m_s: f64,
    pub power_w: f64,
    pub energy_wh: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub lift_to_drag: f64,
}

/// Whole-mission energy budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionEnergyResult {
    pub climb: PhaseEnergy,
    pub cruise: PhaseEnergy,
    pub loiter: PhaseEnergy,
    pub payload_power_w: f64,
    pub payload_energy_wh: f64,
    pub total_flight_time_s: f64,
    pub shaft_energy_wh: f64,
    pub battery_energy_wh: f64,
    pub propulsive_efficiency: f64,
}

impl MissionEnergyResult {
    /// Phases in flight order.
    pub fn phases(&self) -> [&PhaseEnergy; 3] {
        [&self.climb, &self.cruise, &self.loiter]
    }

    pub fn phase(&self, phase: Phase) -> &PhaseEnergy {
        match phase {
            Phase::Climb => &self.climb,
            Phase::Cruise => &self.cruise,
            Phase::Loiter => &self.loiter,
        }
    }
}

/// Inputs for one evaluation of the mission energy chain.
#[derive(Debug, Clone, Copy)]
pub struct EnergyRequest<'a> {
    pub weight_n: f64,
    pub wing_area_m2: f64,
    pub mission: &'a MissionProfile,
    pub climb: &'a ClimbSchedule,
    /// Combined motor, ESC, and propeller efficiency from battery to thrust power.
    pub propulsive_efficiency: f64,
}

/// Integrate shaft energy over every phase, add payload draw, and derate by efficiency.
pub fn total_mission_energy<P: DragPolar + ?Sized>(
    request: &EnergyRequest<'_>,
    polar: &P,
) -> Result<MissionEnergyResult, DomainError> {
    ensure_positive("propulsive efficiency", request.propulsive_efficiency)?;
    ensure_within(
        "propulsive efficiency",
        request.propulsive_efficiency,
        0.0,
        1.0,
    )?;
    ensure_positive("weight", request.weight_n)?;
    ensure_positive("wing area", request.wing_area_m2)?;
    request.mission.validate()?;
    let rho = request.mission.air_density()?;

    let climb = climb_phase(request, polar, rho)?;
    let cruise = level_phase(
        Phase::Cruise,
        request,
        polar,
        rho,
        request.mission.cruise_velocity_m_s,
        request.mission.total_range_m() / request.mission.cruise_velocity_m_s,
    )?;
    let loiter = level_phase(
        Phase::Loiter,
        request,
        polar,
        rho,
        request.mission.loiter_velocity_m_s,
        request.mission.loiter_duration_s,
    )?;

    let total_flight_time_s = climb.duration_s + cruise.duration_s + loiter.duration_s;
    let payload_energy_wh = joules_to_wh(request.mission.payload_power_w * total_flight_time_s);
    let shaft_energy_wh = climb.energy_wh + cruise.energy_wh + loiter.energy_wh + payload_energy_wh;

    Ok(MissionEnergyResult {
        climb,
        cruise,
        loiter,
        payload_power_w: request.mission.payload_power_w,
        payload_energy_wh,
        total_flight_time_s,
        shaft_energy_wh,
        battery_energy_wh: shaft_energy_wh / request.propulsive_efficiency,
        propulsive_efficiency: request.propulsive_efficiency,
    })
}

/// Climb at a fixed CL and climb rate: `P = (W/LD)·V + W·ROC`.
pub fn climb_phase<P: DragPolar + ?Sized>(
    request: &EnergyRequest<'_>,
    polar: &P,
    air_density_kg_m3: f64,
) -> Result<PhaseEnergy, DomainError> {
    let schedule = request.climb;
    ensure_positive("climb rate", schedule.climb_rate_m_s)?;
    let cl = schedule.lift_coefficient;
    let velocity = velocity_for_lift_coefficient(
        request.weight_n,
        request.wing_area_m2,
        cl,
        air_density_kg_m3,
    )?;
    let drag = polar.drag(cl)?;
    let lift_to_drag = drag.lift_to_drag(cl);
    let power_w =
        (request.weight_n / lift_to_drag) * velocity + request.weight_n * schedule.climb_rate_m_s;
    let duration_s = request.mission.altitude_m / schedule.climb_rate_m_s;

    Ok(PhaseEnergy {
        phase: Phase::Climb,
        duration_s,
        velocity_m_s: velocity,
        power_w,
        energy_wh: joules_to_wh(power_w * duration_s),
        lift_coefficient: cl,
        drag_coefficient: drag.total,
        lift_to_drag,
    })
}

/// Steady level flight at `velocity_m_s` for `duration_s`: `P = (W/LD)·V`.
pub fn level_phase<P: DragPolar + ?Sized>(
    phase: Phase,
    request: &EnergyRequest<'_>,
    polar: &P,
    air_density_kg_m3: f64,
    velocity_m_s: f64,
    duration_s: f64,
) -> Result<PhaseEnergy, DomainError> {
    ensure_non_negative("phase duration", duration_s)?;
    let cl = lift_coefficient(
        request.weight_n,
        request.wing_area_m2,
        velocity_m_s,
        air_density_kg_m3,
    )?;
    let drag = polar.drag(cl)?;
    let lift_to_drag = drag.lift_to_drag(cl);
    let power_w = (request.weight_n / lift_to_drag) * velocity_m_s;

    Ok(PhaseEnergy {
        phase,
        duration_s,
        velocity_m_s,
        power_w,
        energy_wh: joules_to_wh(power_w * duration_s),
        lift_coefficient: cl,
        drag_coefficient: drag.total,
        lift_to_drag,
    })
}
