//! Contract for external aerodynamic solvers (VLM, CFD) that may replace the analytic polar.
//!
//! A solver answers "given this wing, airspeed, and angle of attack, what are CL, CD, and CM?"
//! or fails. Solvers that shell out to other programs must not hang the caller, so
//! [`BoundedSolver`] runs any solver on a worker thread and gives up after a fixed timeout.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use serde::Serialize;
use thiserror::Error;
use uav_core::{DomainError, ensure_positive};

use crate::geometry::WingGeometry;
use crate::polar::{DragPolar, ParabolicPolar, PolarSample, TabulatedPolar};

/// Free-stream condition handed to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightCondition {
    pub velocity_m_s: f64,
    pub alpha_deg: f64,
    pub air_density_kg_m3: f64,
}

/// Force and moment coefficients returned by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coefficients {
    pub lift: f64,
    pub drag: f64,
    pub moment: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("solver did not return within {0:?}")]
    Timeout(Duration),
    #[error("solver worker exited without producing a result")]
    Disconnected,
    #[error("solver rejected the request: {0}")]
    Rejected(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<SolverError> for DomainError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Domain(inner) => inner,
            other => DomainError::External(other.to_string()),
        }
    }
}

/// Anything able to produce (CL, CD, CM) for a wing at a flight condition.
pub trait AeroSolver: Send + Sync {
    fn solve(
        &self,
        geometry: &WingGeometry,
        condition: &FlightCondition,
    ) -> Result<Coefficients, SolverError>;
}

/// Reference solver evaluating the parabolic polar with a finite-wing lift slope.
#[derive(Debug, Clone, Copy)]
pub struct PolarSolver {
    polar: ParabolicPolar,
    zero_lift_alpha_deg: f64,
}

impl PolarSolver {
    pub fn new(polar: ParabolicPolar, zero_lift_alpha_deg: f64) -> Self {
        Self {
            polar,
            zero_lift_alpha_deg,
        }
    }

    /// Finite-wing lift-curve slope `2π·AR/(AR + 2/e)` per radian.
    pub fn lift_slope_per_rad(&self) -> f64 {
        let ar = self.polar.aspect_ratio();
        2.0 * std::f64::consts::PI * ar / (ar + 2.0 / self.polar.oswald_efficiency())
    }
}

impl AeroSolver for PolarSolver {
    fn solve(
        &self,
        _geometry: &WingGeometry,
        condition: &FlightCondition,
    ) -> Result<Coefficients, SolverError> {
        ensure_positive("velocity", condition.velocity_m_s)?;
        ensure_positive("air density", condition.air_density_kg_m3)?;
        let alpha_rad = (condition.alpha_deg - self.zero_lift_alpha_deg).to_radians();
        let lift = self.lift_slope_per_rad() * alpha_rad;
        let drag = self.polar.drag(lift)?;
        Ok(Coefficients {
            lift,
            drag: drag.total,
            moment: 0.0,
        })
    }
}

/// Wraps a solver so that every call either returns or fails within `timeout`.
pub struct BoundedSolver<S> {
    inner: Arc<S>,
    timeout: Duration,
}

impl<S: AeroSolver + 'static> BoundedSolver<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S: AeroSolver + 'static> AeroSolver for BoundedSolver<S> {
    fn solve(
        &self,
        geometry: &WingGeometry,
        condition: &FlightCondition,
    ) -> Result<Coefficients, SolverError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let solver = Arc::clone(&self.inner);
        let geometry = *geometry;
        let condition = *condition;
        // A worker that outlives the timeout is detached; its late result is dropped.
        thread::spawn(move || {
            let _ = tx.send(solver.solve(&geometry, &condition));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(SolverError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::Disconnected),
        }
    }
}

/// Sweep angle of attack through a solver and tabulate the resulting polar.
pub fn sample_polar<S: AeroSolver + ?Sized>(
    solver: &S,
    geometry: &WingGeometry,
    velocity_m_s: f64,
    air_density_kg_m3: f64,
    alphas_deg: &[f64],
) -> Result<TabulatedPolar, DomainError> {
    let samples = alphas_deg
        .iter()
        .map(|&alpha_deg| {
            let coefficients = solver.solve(
                geometry,
                &FlightCondition {
                    velocity_m_s,
                    alpha_deg,
                    air_density_kg_m3,
                },
            )?;
            Ok(PolarSample {
                lift_coefficient: coefficients.lift,
                drag_coefficient: coefficients.drag,
            })
        })
        .collect::<Result<Vec<_>, SolverError>>()?;
    TabulatedPolar::new(samples)
}
