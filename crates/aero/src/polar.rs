//! Drag polars: the analytic parabolic model and a tabulated stand-in for solver data.

use serde::Serialize;
use uav_core::{DomainError, ensure_positive, ensure_within};

use crate::{DragBreakdown, MaxLiftToDrag};

/// Maps a lift coefficient to the drag it costs.
pub trait DragPolar {
    /// Drag breakdown at `lift_coefficient`.
    fn drag(&self, lift_coefficient: f64) -> Result<DragBreakdown, DomainError>;

    /// Best lift-to-drag operating point of this polar.
    fn max_lift_to_drag(&self) -> MaxLiftToDrag;
}

/// Parabolic polar with validated coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParabolicPolar {
    aspect_ratio: f64,
    oswald_efficiency: f64,
    cd0: f64,
}

impl ParabolicPolar {
    pub fn new(aspect_ratio: f64, oswald_efficiency: f64, cd0: f64) -> Result<Self, DomainError> {
        ensure_positive("aspect ratio", aspect_ratio)?;
        ensure_positive("Oswald efficiency", oswald_efficiency)?;
        ensure_within("Oswald efficiency", oswald_efficiency, 0.0, 1.0)?;
        ensure_positive("parasite drag coefficient", cd0)?;
        Ok(Self {
            aspect_ratio,
            oswald_efficiency,
            cd0,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn oswald_efficiency(&self) -> f64 {
        self.oswald_efficiency
    }

    pub fn cd0(&self) -> f64 {
        self.cd0
    }
}

impl DragPolar for ParabolicPolar {
    fn drag(&self, lift_coefficient: f64) -> Result<DragBreakdown, DomainError> {
        if !lift_coefficient.is_finite() {
            return Err(DomainError::NonFinite {
                quantity: "lift coefficient",
                value: lift_coefficient,
            });
        }
        Ok(crate::drag_coefficient(
            lift_coefficient,
            self.aspect_ratio,
            self.oswald_efficiency,
            self.cd0,
        ))
    }

    fn max_lift_to_drag(&self) -> MaxLiftToDrag {
        crate::max_lift_to_drag(self.aspect_ratio, self.oswald_efficiency, self.cd0)
    }
}

/// One (CL, CD) pair, typically returned by an external solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarSample {
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
}

/// Piecewise-linear polar through sampled points.
///
/// Lookups outside the sampled CL range fail rather than extrapolate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabulatedPolar {
    samples: Vec<PolarSample>,
    parasite: f64,
}

impl TabulatedPolar {
    pub fn new(mut samples: Vec<PolarSample>) -> Result<Self, DomainError> {
        for sample in &samples {
            if !sample.lift_coefficient.is_finite() {
                return Err(DomainError::NonFinite {
                    quantity: "sampled lift coefficient",
                    value: sample.lift_coefficient,
                });
            }
            ensure_positive("sampled drag coefficient", sample.drag_coefficient)?;
        }
        samples.sort_by(|a, b| a.lift_coefficient.total_cmp(&b.lift_coefficient));
        samples.dedup_by(|a, b| a.lift_coefficient == b.lift_coefficient);
        if samples.len() < 2 {
            return Err(DomainError::TooFewSamples {
                quantity: "tabulated polar",
                required: 2,
                actual: samples.len(),
            });
        }

        let first = samples[0].lift_coefficient;
        let last = samples[samples.len() - 1].lift_coefficient;
        let mut polar = Self {
            samples,
            parasite: 0.0,
        };
        polar.parasite = if (first..=last).contains(&0.0) {
            polar.interpolate(0.0)
        } else {
            polar
                .samples
                .iter()
                .map(|s| s.drag_coefficient)
                .fold(f64::INFINITY, f64::min)
        };
        Ok(polar)
    }

    pub fn samples(&self) -> &[PolarSample] {
        &self.samples
    }

    /// Sampled CL range `(min, max)`.
    pub fn lift_range(&self) -> (f64, f64) {
        (
            self.samples[0].lift_coefficient,
            self.samples[self.samples.len() - 1].lift_coefficient,
        )
    }

    fn interpolate(&self, lift_coefficient: f64) -> f64 {
        let upper = self
            .samples
            .partition_point(|s| s.lift_coefficient < lift_coefficient)
            .clamp(1, self.samples.len() - 1);
        let a = self.samples[upper - 1];
        let b = self.samples[upper];
        let t = (lift_coefficient - a.lift_coefficient) / (b.lift_coefficient - a.lift_coefficient);
        a.drag_coefficient + t * (b.drag_coefficient - a.drag_coefficient)
    }
}

impl DragPolar for TabulatedPolar {
    fn drag(&self, lift_coefficient: f64) -> Result<DragBreakdown, DomainError> {
        let (min, max) = self.lift_range();
        ensure_within("lift coefficient", lift_coefficient, min, max)?;
        let total = self.interpolate(lift_coefficient);
        // Induced part is the excess over zero-lift drag; cambered data can make it negative.
        Ok(DragBreakdown {
            total,
            parasite: self.parasite,
            induced: total - self.parasite,
        })
    }

    fn max_lift_to_drag(&self) -> MaxLiftToDrag {
        self.samples
            .iter()
            .filter(|s| s.lift_coefficient > 0.0)
            .map(|s| MaxLiftToDrag {
                lift_coefficient: s.lift_coefficient,
                drag_coefficient: s.drag_coefficient,
                lift_to_drag: s.lift_coefficient / s.drag_coefficient,
            })
            .fold(
                MaxLiftToDrag {
                    lift_coefficient: 0.0,
                    drag_coefficient: self.parasite,
                    lift_to_drag: 0.0,
                },
                |best, candidate| {
                    if candidate.lift_to_drag > best.lift_to_drag {
                        candidate
                    } else {
                        best
                    }
                },
            )
    }
}
