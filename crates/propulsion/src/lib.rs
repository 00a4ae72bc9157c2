//! Battery and motor sizing from mission energy and cruise power.

use serde::Serialize;
use uav_core::{DomainError, ensure_non_negative, ensure_positive};

/// Empirical propulsion parameters. None of these are physical laws; they are overridable
/// configuration describing the component technology level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropulsionParameters {
    /// Multiplier on mission energy kept as reserve (1.2 = 20 % reserve).
    pub battery_reserve_factor: f64,
    /// Pack-level specific energy (Wh/kg). LiPo packs sit around 150–200.
    pub battery_specific_energy_wh_kg: f64,
    /// Rated motor power as a multiple of cruise power, covering climb and manoeuvre.
    pub motor_power_margin: f64,
    /// Linear motor mass coefficient (grams per rated watt).
    pub motor_grams_per_watt: f64,
    /// Battery-to-thrust efficiency: motor × ESC × propeller.
    pub propulsive_efficiency: f64,
    /// Fixed propeller mass (kg).
    pub propeller_mass_kg: f64,
}

impl Default for PropulsionParameters {
    fn default() -> Self {
        Self {
            battery_reserve_factor: 1.2,
            battery_specific_energy_wh_kg: 180.0,
            motor_power_margin: 2.5,
            motor_grams_per_watt: 0.4,
            propulsive_efficiency: 0.70,
            propeller_mass_kg: 0.02,
        }
    }
}

/// Battery pack sized for a mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatterySizing {
    pub mass_kg: f64,
    pub energy_with_reserve_wh: f64,
}

/// Motor sized for cruise power plus margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotorSizing {
    pub rated_power_w: f64,
    pub mass_kg: f64,
}

/// `energy = required·reserve`, `mass = energy/specific_energy`.
pub fn size_battery(
    energy_required_wh: f64,
    reserve_factor: f64,
    specific_energy_wh_kg: f64,
) -> Result<BatterySizing, DomainError> {
    ensure_non_negative("required energy", energy_required_wh)?;
    ensure_positive("battery reserve factor", reserve_factor)?;
    ensure_positive("battery specific energy", specific_energy_wh_kg)?;
    let energy_with_reserve_wh = energy_required_wh * reserve_factor;
    Ok(BatterySizing {
        mass_kg: energy_with_reserve_wh / specific_energy_wh_kg,
        energy_with_reserve_wh,
    })
}

/// `rated = cruise·margin`, `mass = rated·grams_per_watt / 1000`.
pub fn size_motor(
    cruise_power_w: f64,
    power_margin: f64,
    grams_per_watt: f64,
) -> Result<MotorSizing, DomainError> {
    ensure_non_negative("cruise power", cruise_power_w)?;
    ensure_positive("motor power margin", power_margin)?;
    ensure_non_negative("motor mass coefficient", grams_per_watt)?;
    let rated_power_w = cruise_power_w * power_margin;
    Ok(MotorSizing {
        rated_power_w,
        mass_kg: rated_power_w * grams_per_watt / 1_000.0,
    })
}

impl PropulsionParameters {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("battery reserve factor", self.battery_reserve_factor)?;
        ensure_positive(
            "battery specific energy",
            self.battery_specific_energy_wh_kg,
        )?;
        ensure_positive("motor power margin", self.motor_power_margin)?;
        ensure_non_negative("motor mass coefficient", self.motor_grams_per_watt)?;
        ensure_positive("propulsive efficiency", self.propulsive_efficiency)?;
        ensure_non_negative("propeller mass", self.propeller_mass_kg)?;
        Ok(())
    }

    /// Battery sized with this parameter set.
    pub fn battery_for(&self, energy_required_wh: f64) -> Result<BatterySizing, DomainError> {
        size_battery(
            energy_required_wh,
            self.battery_reserve_factor,
            self.battery_specific_energy_wh_kg,
        )
    }

    /// Motor sized with this parameter set.
    pub fn motor_for(&self, cruise_power_w: f64) -> Result<MotorSizing, DomainError> {
        size_motor(
            cruise_power_w,
            self.motor_power_margin,
            self.motor_grams_per_watt,
        )
    }
}
