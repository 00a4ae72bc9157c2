//! Core units, constants, and shared primitives for the UAV sizing workspace.

use thiserror::Error;

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration used throughout the sizing chain (m/s²).
    pub const GRAVITY_M_S2: f64 = 9.81;
    /// ISA sea-level air density (kg/m³).
    pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
    /// ISA sea-level temperature (K).
    pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
    /// ISA tropospheric temperature lapse rate (K/m).
    pub const TROPOSPHERE_LAPSE_RATE_K_M: f64 = 0.0065;
    /// Upper bound of the ISA troposphere (m).
    pub const TROPOPAUSE_ALTITUDE_M: f64 = 11_000.0;
    /// Specific gas constant for dry air (J/(kg·K)).
    pub const AIR_GAS_CONSTANT: f64 = 287.052_87;
    /// Standard gravity used by the ISA hydrostatic relation (m/s²).
    pub const ISA_GRAVITY_M_S2: f64 = 9.806_65;
    /// Kinematic viscosity of air near sea level (m²/s).
    pub const KINEMATIC_VISCOSITY_M2_S: f64 = 1.5e-5;
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert millimetres to metres.
    #[inline]
    pub fn mm_to_m(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres to millimetres.
    #[inline]
    pub fn m_to_mm(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert minutes to seconds.
    #[inline]
    pub fn minutes_to_seconds(v: f64) -> f64 {
        v * SECONDS_PER_MINUTE
    }

    /// Convert seconds to minutes.
    #[inline]
    pub fn seconds_to_minutes(v: f64) -> f64 {
        v / SECONDS_PER_MINUTE
    }

    /// Convert joules (watt-seconds) to watt-hours.
    #[inline]
    pub fn joules_to_wh(v: f64) -> f64 {
        v / SECONDS_PER_HOUR
    }

    /// Convert metres per second to knots.
    #[inline]
    pub fn ms_to_knots(v: f64) -> f64 {
        v / 0.5144
    }
}

/// International Standard Atmosphere, troposphere only.
pub mod atmosphere {
    use super::DomainError;
    use super::constants::{
        AIR_GAS_CONSTANT, ISA_GRAVITY_M_S2, SEA_LEVEL_DENSITY_KG_M3, SEA_LEVEL_TEMPERATURE_K,
        TROPOPAUSE_ALTITUDE_M, TROPOSPHERE_LAPSE_RATE_K_M,
    };

    /// Lowest altitude accepted by the atmosphere model (m).
    pub const MIN_ALTITUDE_M: f64 = -500.0;

    /// ISA temperature at a geopotential altitude inside the troposphere (K).
    pub fn isa_temperature(altitude_m: f64) -> Result<f64, DomainError> {
        check_altitude(altitude_m)?;
        Ok(SEA_LEVEL_TEMPERATURE_K - TROPOSPHERE_LAPSE_RATE_K_M * altitude_m)
    }

    /// ISA air density at a geopotential altitude inside the troposphere (kg/m³).
    pub fn isa_density(altitude_m: f64) -> Result<f64, DomainError> {
        let temperature = isa_temperature(altitude_m)?;
        let exponent = ISA_GRAVITY_M_S2 / (TROPOSPHERE_LAPSE_RATE_K_M * AIR_GAS_CONSTANT) - 1.0;
        Ok(SEA_LEVEL_DENSITY_KG_M3 * (temperature / SEA_LEVEL_TEMPERATURE_K).powf(exponent))
    }

    fn check_altitude(altitude_m: f64) -> Result<(), DomainError> {
        if !altitude_m.is_finite() {
            return Err(DomainError::NonFinite {
                quantity: "altitude",
                value: altitude_m,
            });
        }
        if !(MIN_ALTITUDE_M..=TROPOPAUSE_ALTITUDE_M).contains(&altitude_m) {
            return Err(DomainError::OutOfRange {
                quantity: "altitude",
                value: altitude_m,
                min: MIN_ALTITUDE_M,
                max: TROPOPAUSE_ALTITUDE_M,
            });
        }
        Ok(())
    }
}

/// Trapezoidal quadrature on uniform grids.
///
/// Spanwise structural quantities are small fixed-size arrays, so everything here
/// works on plain slices and returns owned vectors of the same length.
pub mod integrate {
    /// Evenly spaced samples from `start` to `end` inclusive.
    pub fn uniform_grid(start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count).map(|i| start + step * i as f64).collect()
            }
        }
    }

    /// Running integral starting from zero at the first sample.
    pub fn cumulative_from_start(values: &[f64], step: f64) -> Vec<f64> {
        let mut out = vec![0.0; values.len()];
        for i in 1..values.len() {
            out[i] = out[i - 1] + 0.5 * (values[i] + values[i - 1]) * step;
        }
        out
    }

    /// Running integral starting from zero at the last sample and accumulating toward index 0.
    pub fn cumulative_from_end(values: &[f64], step: f64) -> Vec<f64> {
        let n = values.len();
        let mut out = vec![0.0; n];
        for i in (0..n.saturating_sub(1)).rev() {
            out[i] = out[i + 1] + 0.5 * (values[i] + values[i + 1]) * step;
        }
        out
    }
}

/// Invalid numeric input detected before a computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{quantity} must be positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must not be negative (got {value})")]
    Negative { quantity: &'static str, value: f64 },
    #[error("{quantity} must be finite (got {value})")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("{quantity} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{quantity} needs at least {required} samples (got {actual})")]
    TooFewSamples {
        quantity: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("external aerodynamic solver failed: {0}")]
    External(String),
}

/// Reject NaN/infinite values and anything not strictly greater than zero.
pub fn ensure_positive(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { quantity, value });
    }
    if value <= 0.0 {
        return Err(DomainError::NonPositive { quantity, value });
    }
    Ok(value)
}

/// Reject NaN/infinite values and anything below zero.
pub fn ensure_non_negative(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { quantity, value });
    }
    if value < 0.0 {
        return Err(DomainError::Negative { quantity, value });
    }
    Ok(value)
}

/// Require `min <= value <= max`.
pub fn ensure_within(
    quantity: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { quantity, value });
    }
    if value < min || value > max {
        return Err(DomainError::OutOfRange {
            quantity,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Require a strictly open fraction `0 < value < 1`.
pub fn ensure_fraction(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    ensure_positive(quantity, value)?;
    if value >= 1.0 {
        return Err(DomainError::OutOfRange {
            quantity,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(value)
}
