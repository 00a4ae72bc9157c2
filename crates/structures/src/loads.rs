//! Elliptical spanwise lift and the shear/moment it induces in one wing half.

use serde::Serialize;
use uav_core::constants::GRAVITY_M_S2;
use uav_core::integrate::{cumulative_from_end, uniform_grid};
use uav_core::{DomainError, ensure_non_negative, ensure_positive, ensure_within};

/// Loads at one spanwise station, `y_m` measured outboard from the root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanwiseStation {
    pub y_m: f64,
    pub lift_per_span_n_m: f64,
    pub shear_n: f64,
    pub bending_moment_n_m: f64,
}

/// Stations ordered root → tip on a uniform grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanwiseLoadDistribution {
    pub total_lift_n: f64,
    pub semi_span_m: f64,
    pub stations: Vec<SpanwiseStation>,
}

impl SpanwiseLoadDistribution {
    /// Checks a distribution that may have been assembled by hand rather than by
    /// [`elliptical_distribution`].
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_non_negative("total lift", self.total_lift_n)?;
        ensure_positive("semi-span", self.semi_span_m)?;
        if self.stations.len() < 2 {
            return Err(DomainError::TooFewSamples {
                quantity: "spanwise stations",
                required: 2,
                actual: self.stations.len(),
            });
        }
        Ok(())
    }

    pub fn station_spacing(&self) -> f64 {
        self.semi_span_m / (self.stations.len() - 1) as f64
    }

    pub fn root(&self) -> &SpanwiseStation {
        &self.stations[0]
    }

    pub fn tip(&self) -> &SpanwiseStation {
        &self.stations[self.stations.len() - 1]
    }

    pub fn max_bending_moment(&self) -> f64 {
        self.stations
            .iter()
            .map(|s| s.bending_moment_n_m)
            .fold(0.0, f64::max)
    }

    pub fn max_shear(&self) -> f64 {
        self.stations.iter().map(|s| s.shear_n).fold(0.0, f64::max)
    }
}

/// Total lift at the ultimate load factor: `m·g·n`.
pub fn ultimate_lift(total_mass_kg: f64, ultimate_load_factor: f64) -> Result<f64, DomainError> {
    ensure_non_negative("total mass", total_mass_kg)?;
    ensure_non_negative("ultimate load factor", ultimate_load_factor)?;
    Ok(total_mass_kg * GRAVITY_M_S2 * ultimate_load_factor)
}

/// Elliptical lift `L(y) = (4·L/(π·b))·sqrt(1 − (y/s)²)` with a linear taper correction
/// `1 − k·(1 − λ)·(y/s)`, integrated tip → root into shear and bending moment.
///
/// Shear and moment are zero at the tip and grow monotonically toward the root.
pub fn elliptical_distribution(
    total_lift_n: f64,
    span_m: f64,
    taper_ratio: f64,
    taper_correction: f64,
    station_count: usize,
) -> Result<SpanwiseLoadDistribution, DomainError> {
    ensure_non_negative("total lift", total_lift_n)?;
    ensure_positive("span", span_m)?;
    ensure_within("taper ratio", taper_ratio, 0.0, 1.0)?;
    ensure_within("taper correction", taper_correction, 0.0, 1.0)?;
    if station_count < 2 {
        return Err(DomainError::TooFewSamples {
            quantity: "spanwise stations",
            required: 2,
            actual: station_count,
        });
    }

    let semi_span_m = 0.5 * span_m;
    let peak = 4.0 * total_lift_n / (std::f64::consts::PI * span_m);
    let positions = uniform_grid(0.0, semi_span_m, station_count);
    let lift: Vec<f64> = positions
        .iter()
        .map(|&y| {
            let eta = y / semi_span_m;
            let elliptical = peak * (1.0 - eta * eta).max(0.0).sqrt();
            elliptical * (1.0 - taper_correction * (1.0 - taper_ratio) * eta)
        })
        .collect();

    let dy = semi_span_m / (station_count - 1) as f64;
    let shear = cumulative_from_end(&lift, dy);
    let moment = cumulative_from_end(&shear, dy);

    let stations = positions
        .into_iter()
        .zip(lift)
        .zip(shear)
        .zip(moment)
        .map(|(((y_m, lift_per_span_n_m), shear_n), bending_moment_n_m)| SpanwiseStation {
            y_m,
            lift_per_span_n_m,
            shear_n,
            bending_moment_n_m,
        })
        .collect();

    Ok(SpanwiseLoadDistribution {
        total_lift_n,
        semi_span_m,
        stations,
    })
}
