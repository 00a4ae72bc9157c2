//! Runtime design cases and their conversion from configuration records.

use serde::Serialize;
use uav_aero::ParabolicPolar;
use uav_config::DesignCaseConfig;
use uav_core::units::{km_to_m, minutes_to_seconds};
use uav_core::{DomainError, ensure_fraction, ensure_non_negative, ensure_positive, ensure_within};
use uav_mission::{ClimbSchedule, MissionProfile};
use uav_propulsion::PropulsionParameters;
use uav_structures::SparMaterial;
use uav_structures::airframe::AirframeAllowances;
use uav_structures::spar::SparSpecification;

use crate::SizingError;

/// Airframe-level design choices held fixed while the weight loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignParameters {
    pub aspect_ratio: f64,
    pub wing_loading_n_m2: f64,
    pub cd0: f64,
    pub oswald_efficiency: f64,
    pub cl_max: f64,
    /// Structure mass as a fraction of total mass.
    pub structural_fraction: f64,
    pub safety_factor: f64,
    pub ultimate_load_factor: f64,
    pub taper_ratio: f64,
    pub avionics_mass_kg: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            aspect_ratio: 12.0,
            wing_loading_n_m2: 80.0,
            cd0: 0.020,
            oswald_efficiency: 0.88,
            cl_max: 1.4,
            structural_fraction: 0.30,
            safety_factor: 1.5,
            ultimate_load_factor: 3.8,
            taper_ratio: 0.7,
            avionics_mass_kg: 0.15,
        }
    }
}

impl DesignParameters {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("aspect ratio", self.aspect_ratio)?;
        ensure_positive("wing loading", self.wing_loading_n_m2)?;
        ensure_positive("CD0", self.cd0)?;
        ensure_positive("Oswald efficiency", self.oswald_efficiency)?;
        ensure_within("Oswald efficiency", self.oswald_efficiency, 0.0, 1.0)?;
        ensure_positive("CLmax", self.cl_max)?;
        ensure_fraction("structural fraction", self.structural_fraction)?;
        ensure_positive("safety factor", self.safety_factor)?;
        ensure_positive("ultimate load factor", self.ultimate_load_factor)?;
        ensure_within("taper ratio", self.taper_ratio, 0.0, 1.0)?;
        ensure_non_negative("avionics mass", self.avionics_mass_kg)?;
        Ok(())
    }

    pub fn polar(&self) -> Result<ParabolicPolar, DomainError> {
        ParabolicPolar::new(self.aspect_ratio, self.oswald_efficiency, self.cd0)
    }
}

/// Fixed-point iteration controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceSettings {
    pub initial_mass_kg: f64,
    pub tolerance_kg: f64,
    pub max_iterations: usize,
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        Self {
            initial_mass_kg: 2.0,
            tolerance_kg: 0.001,
            max_iterations: 15,
        }
    }
}

impl ConvergenceSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("initial mass guess", self.initial_mass_kg)?;
        ensure_positive("convergence tolerance", self.tolerance_kg)?;
        if self.max_iterations == 0 {
            return Err(DomainError::TooFewSamples {
                quantity: "max iterations",
                required: 1,
                actual: 0,
            });
        }
        Ok(())
    }
}

/// Spanwise discretisation of the wing load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadSettings {
    pub station_count: usize,
    /// Strength of the linear taper correction applied on top of the elliptical shape.
    pub taper_correction: f64,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            station_count: 50,
            taper_correction: 0.1,
        }
    }
}

/// Everything needed to size one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignCase {
    pub name: String,
    pub description: Option<String>,
    pub mission: MissionProfile,
    pub design: DesignParameters,
    pub propulsion: PropulsionParameters,
    pub climb: ClimbSchedule,
    pub convergence: ConvergenceSettings,
    pub spar: SparSpecification,
    pub loads: LoadSettings,
    pub airframe: AirframeAllowances,
}

impl DesignCase {
    /// 50 km out and back at 50 kt with a 15 minute loiter and a 0.5 kg camera payload.
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            description: Some("100 km round trip surveillance, 0.5 kg payload".to_string()),
            mission: MissionProfile {
                range_out_m: km_to_m(50.0),
                range_back_m: km_to_m(50.0),
                loiter_duration_s: minutes_to_seconds(15.0),
                cruise_velocity_m_s: 25.72,
                loiter_velocity_m_s: 15.0,
                altitude_m: 150.0,
                payload_mass_kg: 0.5,
                payload_power_w: 5.0,
                air_density_kg_m3: None,
            },
            design: DesignParameters::default(),
            propulsion: PropulsionParameters::default(),
            climb: ClimbSchedule::default(),
            convergence: ConvergenceSettings::default(),
            spar: SparSpecification::default(),
            loads: LoadSettings::default(),
            airframe: AirframeAllowances::default(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.mission.validate()?;
        self.design.validate()?;
        self.propulsion.validate()?;
        self.convergence.validate()?;
        ensure_positive("climb rate", self.climb.climb_rate_m_s)?;
        ensure_positive("climb lift coefficient", self.climb.lift_coefficient)?;
        ensure_within("taper correction", self.loads.taper_correction, 0.0, 1.0)?;
        self.airframe.validate()
    }
}

/// Convert a configuration record into a runtime [`DesignCase`].
pub fn from_config(config: &DesignCaseConfig) -> Result<DesignCase, SizingError> {
    let mission = &config.mission;
    let design = &config.design;
    let propulsion = &config.propulsion;
    let structure = &config.structure;

    let spar = SparSpecification {
        material: SparMaterial {
            tensile_strength_pa: structure.tensile_strength_mpa * 1e6,
            elastic_modulus_pa: structure.elastic_modulus_gpa * 1e9,
            density_kg_m3: structure.density_kg_m3,
        },
        safety_factor: design.safety_factor,
        deflection_ratio_limit: structure.deflection_ratio_limit,
        wall_thickness_ratio: structure.wall_thickness_ratio,
        tip_deflection_coefficient: structure.tip_deflection_coefficient,
        chord_fraction: structure.spar_chord_fraction,
        standard_outer_diameters_mm: structure.standard_diameters_mm.clone(),
    };

    let case = DesignCase {
        name: config.name.clone(),
        description: config.description.clone(),
        mission: MissionProfile {
            range_out_m: km_to_m(mission.range_out_km),
            range_back_m: km_to_m(mission.range_back_km),
            loiter_duration_s: minutes_to_seconds(mission.loiter_min),
            cruise_velocity_m_s: mission.cruise_speed_m_s,
            loiter_velocity_m_s: mission.loiter_speed_m_s,
            altitude_m: mission.altitude_m,
            payload_mass_kg: mission.payload_mass_kg,
            payload_power_w: mission.payload_power_w,
            air_density_kg_m3: mission.air_density_kg_m3,
        },
        design: DesignParameters {
            aspect_ratio: design.aspect_ratio,
            wing_loading_n_m2: design.wing_loading_n_m2,
            cd0: design.cd0,
            oswald_efficiency: design.oswald_efficiency,
            cl_max: design.cl_max,
            structural_fraction: design.structural_fraction,
            safety_factor: design.safety_factor,
            ultimate_load_factor: design.ultimate_load_factor,
            taper_ratio: design.taper_ratio,
            avionics_mass_kg: design.avionics_mass_kg,
        },
        propulsion: PropulsionParameters {
            battery_reserve_factor: propulsion.battery_reserve_factor,
            battery_specific_energy_wh_kg: propulsion.battery_specific_energy_wh_kg,
            motor_power_margin: propulsion.motor_power_margin,
            motor_grams_per_watt: propulsion.motor_grams_per_watt,
            propulsive_efficiency: propulsion.propulsive_efficiency,
            propeller_mass_kg: propulsion.propeller_mass_kg,
        },
        climb: ClimbSchedule {
            lift_coefficient: config.climb.lift_coefficient,
            climb_rate_m_s: config.climb.rate_m_s,
        },
        convergence: ConvergenceSettings {
            initial_mass_kg: config.convergence.initial_mass_kg,
            tolerance_kg: config.convergence.tolerance_kg,
            max_iterations: config.convergence.max_iterations,
        },
        spar,
        loads: LoadSettings {
            station_count: structure.station_count,
            taper_correction: structure.taper_correction,
        },
        airframe: AirframeAllowances::default(),
    };
    case.validate()?;
    case.spar.validate()?;
    Ok(case)
}

/// Select a case by name (case-insensitive), defaulting to the first entry.
pub fn select(
    configs: &[DesignCaseConfig],
    requested: Option<&str>,
) -> Result<DesignCase, SizingError> {
    if configs.is_empty() {
        return Err(SizingError::EmptyCatalog);
    }

    let chosen = match requested {
        Some(name) => configs
            .iter()
            .find(|cfg| cfg.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SizingError::CaseNotFound(name.to_string()))?,
        None => &configs[0],
    };

    from_config(chosen)
}
