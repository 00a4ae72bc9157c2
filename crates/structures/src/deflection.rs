//! Euler–Bernoulli bending deflection of the spar under the spanwise moment curve.

use serde::Serialize;
use uav_core::integrate::cumulative_from_start;
use uav_core::{DomainError, ensure_positive};

use crate::loads::SpanwiseLoadDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeflectionStation {
    pub y_m: f64,
    pub slope_rad: f64,
    pub deflection_m: f64,
}

/// Stations ordered root → tip, clamped at the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeflectionProfile {
    pub stations: Vec<DeflectionStation>,
}

impl DeflectionProfile {
    pub fn tip(&self) -> &DeflectionStation {
        &self.stations[self.stations.len() - 1]
    }

    pub fn tip_deflection_m(&self) -> f64 {
        self.tip().deflection_m
    }

    pub fn tip_slope_rad(&self) -> f64 {
        self.tip().slope_rad
    }

    /// Tip deflection as a fraction of the semi-span.
    pub fn deflection_ratio(&self) -> f64 {
        let tip = self.tip();
        if tip.y_m > 0.0 {
            tip.deflection_m / tip.y_m
        } else {
            0.0
        }
    }
}

/// Integrate curvature `M/(E·I)` twice from the root with zero slope and deflection there.
pub fn deflection_profile(
    loads: &SpanwiseLoadDistribution,
    elastic_modulus_pa: f64,
    second_moment_m4: f64,
) -> Result<DeflectionProfile, DomainError> {
    loads.validate()?;
    let stiffness = ensure_positive("elastic modulus", elastic_modulus_pa)?
        * ensure_positive("second moment of area", second_moment_m4)?;
    let dy = loads.station_spacing();
    let curvature: Vec<f64> = loads
        .stations
        .iter()
        .map(|s| s.bending_moment_n_m / stiffness)
        .collect();
    let slope = cumulative_from_start(&curvature, dy);
    let deflection = cumulative_from_start(&slope, dy);

    let stations = loads
        .stations
        .iter()
        .zip(slope)
        .zip(deflection)
        .map(|((station, slope_rad), deflection_m)| DeflectionStation {
            y_m: station.y_m,
            slope_rad,
            deflection_m,
        })
        .collect();
    Ok(DeflectionProfile { stations })
}
