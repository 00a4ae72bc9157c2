//! Component-level structural mass estimate for wing, fuselage pod, and tail.
//!
//! Beyond the sized spar everything here is an allowance per part or per unit length/area.
//! The breakdown is compared against the structural budget carried by the weight loop.

use serde::Serialize;
use uav_core::{DomainError, ensure_non_negative, ensure_positive};

use crate::SparMaterial;
use crate::spar::{SparDesign, TubeSection};

/// Fixed allowances for the non-spar airframe parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirframeAllowances {
    pub ribs_per_half: u32,
    pub rib_mass_kg: f64,
    pub leading_edge_kg_per_m: f64,
    pub trailing_edge_kg_per_m: f64,
    pub skin_kg_per_m2: f64,
    pub wing_hardware_kg: f64,
    pub wing_joiner_kg: f64,
    pub pod_kg: f64,
    pub motor_mount_kg: f64,
    pub wing_mounts_kg: f64,
    pub boom_fitting_kg: f64,
    pub tail_boom: TailBoom,
    pub horizontal_tail_area_m2: f64,
    pub vertical_tail_area_m2: f64,
    pub tail_surface_kg_per_m2: f64,
    pub servo_count: u32,
    pub servo_mass_kg: f64,
}

impl Default for AirframeAllowances {
    fn default() -> Self {
        Self {
            ribs_per_half: 8,
            rib_mass_kg: 0.006,
            leading_edge_kg_per_m: 0.008,
            trailing_edge_kg_per_m: 0.005,
            skin_kg_per_m2: 0.030,
            wing_hardware_kg: 0.020,
            wing_joiner_kg: 0.015,
            pod_kg: 0.100,
            motor_mount_kg: 0.015,
            wing_mounts_kg: 0.025,
            boom_fitting_kg: 0.010,
            tail_boom: TailBoom::default(),
            horizontal_tail_area_m2: 0.037,
            vertical_tail_area_m2: 0.037,
            tail_surface_kg_per_m2: 0.8,
            servo_count: 3,
            servo_mass_kg: 0.012,
        }
    }
}

impl AirframeAllowances {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (quantity, value) in [
            ("rib mass", self.rib_mass_kg),
            ("leading edge mass per length", self.leading_edge_kg_per_m),
            ("trailing edge mass per length", self.trailing_edge_kg_per_m),
            ("skin areal mass", self.skin_kg_per_m2),
            ("wing hardware mass", self.wing_hardware_kg),
            ("wing joiner mass", self.wing_joiner_kg),
            ("pod mass", self.pod_kg),
            ("motor mount mass", self.motor_mount_kg),
            ("wing mounts mass", self.wing_mounts_kg),
            ("boom fitting mass", self.boom_fitting_kg),
            ("horizontal tail area", self.horizontal_tail_area_m2),
            ("vertical tail area", self.vertical_tail_area_m2),
            ("tail surface areal mass", self.tail_surface_kg_per_m2),
            ("servo mass", self.servo_mass_kg),
        ] {
            ensure_non_negative(quantity, value)?;
        }
        self.tail_boom.validate()
    }
}

/// Carbon tail boom carrying a fixed manoeuvre tail load at its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailBoom {
    pub length_m: f64,
    pub outer_diameter_m: f64,
    pub wall_thickness_m: f64,
    pub tail_load_n: f64,
}

impl Default for TailBoom {
    fn default() -> Self {
        Self {
            length_m: 0.50,
            outer_diameter_m: 0.012,
            wall_thickness_m: 0.001,
            tail_load_n: 5.0,
        }
    }
}

impl TailBoom {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("tail boom length", self.length_m)?;
        ensure_positive("tail boom diameter", self.outer_diameter_m)?;
        ensure_positive("tail boom wall", self.wall_thickness_m)?;
        if 2.0 * self.wall_thickness_m >= self.outer_diameter_m {
            return Err(DomainError::OutOfRange {
                quantity: "tail boom wall",
                value: self.wall_thickness_m,
                min: 0.0,
                max: 0.5 * self.outer_diameter_m,
            });
        }
        ensure_non_negative("tail load", self.tail_load_n)?;
        Ok(())
    }

    /// Thin-wall shell mass `π·D·t·L·ρ`.
    pub fn mass_kg(&self, density_kg_m3: f64) -> f64 {
        std::f64::consts::PI
            * self.outer_diameter_m
            * self.wall_thickness_m
            * self.length_m
            * density_kg_m3
    }

    pub fn section(&self) -> TubeSection {
        TubeSection::from_diameters(
            self.outer_diameter_m,
            self.outer_diameter_m - 2.0 * self.wall_thickness_m,
        )
    }

    /// Root bending stress with the tail load applied at the boom end.
    pub fn bending_stress_pa(&self) -> f64 {
        self.section().bending_stress(self.tail_load_n * self.length_m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WingStructure {
    pub spar_kg: f64,
    pub ribs_kg: f64,
    pub leading_edge_kg: f64,
    pub trailing_edge_kg: f64,
    pub skin_kg: f64,
    pub hardware_kg: f64,
    pub joiner_kg: f64,
}

impl WingStructure {
    pub fn total_kg(&self) -> f64 {
        self.spar_kg
            + self.ribs_kg
            + self.leading_edge_kg
            + self.trailing_edge_kg
            + self.skin_kg
            + self.hardware_kg
            + self.joiner_kg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuselageStructure {
    pub pod_kg: f64,
    pub motor_mount_kg: f64,
    pub wing_mounts_kg: f64,
    pub tail_boom_kg: f64,
    pub boom_fitting_kg: f64,
    pub tail_boom_stress_pa: f64,
    pub tail_boom_allowable_pa: f64,
}

impl FuselageStructure {
    pub fn total_kg(&self) -> f64 {
        self.pod_kg
            + self.motor_mount_kg
            + self.wing_mounts_kg
            + self.tail_boom_kg
            + self.boom_fitting_kg
    }

    pub fn tail_boom_ok(&self) -> bool {
        self.tail_boom_stress_pa <= self.tail_boom_allowable_pa
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailStructure {
    pub horizontal_kg: f64,
    pub vertical_kg: f64,
    pub servos_kg: f64,
}

impl TailStructure {
    pub fn total_kg(&self) -> f64 {
        self.horizontal_kg + self.vertical_kg + self.servos_kg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirframeMassBreakdown {
    pub wing: WingStructure,
    pub fuselage: FuselageStructure,
    pub tail: TailStructure,
    pub total_kg: f64,
    /// `structural fraction × total aircraft mass`.
    pub budget_kg: f64,
    /// Positive when the estimate fits inside the budget.
    pub margin_kg: f64,
}

impl AirframeMassBreakdown {
    pub fn within_budget(&self) -> bool {
        self.margin_kg >= 0.0
    }
}

/// Inputs tying the breakdown to a converged design.
#[derive(Debug, Clone, Copy)]
pub struct AirframeRequest<'a> {
    pub spar: &'a SparDesign,
    pub span_m: f64,
    pub wing_area_m2: f64,
    pub structural_budget_kg: f64,
    pub material: SparMaterial,
    pub safety_factor: f64,
}

pub fn estimate_airframe(
    request: &AirframeRequest<'_>,
    allowances: &AirframeAllowances,
) -> Result<AirframeMassBreakdown, DomainError> {
    allowances.validate()?;
    let span = ensure_positive("span", request.span_m)?;
    let area = ensure_positive("wing area", request.wing_area_m2)?;
    ensure_non_negative("structural budget", request.structural_budget_kg)?;
    request.material.validate()?;

    let wing = WingStructure {
        spar_kg: request.spar.mass_kg,
        ribs_kg: 2.0 * f64::from(allowances.ribs_per_half) * allowances.rib_mass_kg,
        leading_edge_kg: span * allowances.leading_edge_kg_per_m,
        trailing_edge_kg: span * allowances.trailing_edge_kg_per_m,
        skin_kg: area * allowances.skin_kg_per_m2,
        hardware_kg: allowances.wing_hardware_kg,
        joiner_kg: allowances.wing_joiner_kg,
    };

    let boom = allowances.tail_boom;
    let fuselage = FuselageStructure {
        pod_kg: allowances.pod_kg,
        motor_mount_kg: allowances.motor_mount_kg,
        wing_mounts_kg: allowances.wing_mounts_kg,
        tail_boom_kg: boom.mass_kg(request.material.density_kg_m3),
        boom_fitting_kg: allowances.boom_fitting_kg,
        tail_boom_stress_pa: boom.bending_stress_pa(),
        tail_boom_allowable_pa: request.material.allowable_stress(request.safety_factor)?,
    };

    let tail = TailStructure {
        horizontal_kg: allowances.horizontal_tail_area_m2 * allowances.tail_surface_kg_per_m2,
        vertical_kg: allowances.vertical_tail_area_m2 * allowances.tail_surface_kg_per_m2,
        servos_kg: f64::from(allowances.servo_count) * allowances.servo_mass_kg,
    };

    let total_kg = wing.total_kg() + fuselage.total_kg() + tail.total_kg();
    Ok(AirframeMassBreakdown {
        wing,
        fuselage,
        tail,
        total_kg,
        budget_kg: request.structural_budget_kg,
        margin_kg: request.structural_budget_kg - total_kg,
    })
}
