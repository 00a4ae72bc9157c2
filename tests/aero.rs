use std::thread;
use std::time::Duration;

use approx::assert_relative_eq;
use uav_sizer::aero::solver::{
    AeroSolver, BoundedSolver, Coefficients, FlightCondition, PolarSolver, SolverError,
    sample_polar,
};
use uav_sizer::aero::{
    DragPolar, ParabolicPolar, PolarSample, TabulatedPolar, WingGeometry, drag_coefficient,
    lift_coefficient, max_lift_to_drag, stall_speed,
};
use uav_sizer::physics::DomainError;

#[test]
fn zero_lift_drag_equals_parasite_drag() {
    for cd0 in [0.015, 0.020, 0.035] {
        let drag = drag_coefficient(0.0, 12.0, 0.88, cd0);
        assert_eq!(drag.total, cd0);
        assert_eq!(drag.induced, 0.0);
    }
}

#[test]
fn drag_at_best_lift_to_drag_is_twice_parasite() {
    let best = max_lift_to_drag(12.0, 0.88, 0.020);
    let drag = drag_coefficient(best.lift_coefficient, 12.0, 0.88, 0.020);
    assert_relative_eq!(drag.total, 0.040, epsilon = 1e-12);
    assert_relative_eq!(drag.induced, drag.parasite, epsilon = 1e-12);
    assert_relative_eq!(best.lift_to_drag, 20.364, epsilon = 1e-3);
}

#[test]
fn lift_coefficient_rejects_bad_inputs() {
    assert!(matches!(
        lift_coefficient(20.0, 0.0, 25.0, 1.2),
        Err(DomainError::NonPositive { .. })
    ));
    assert!(lift_coefficient(20.0, 0.25, -1.0, 1.2).is_err());
    assert!(lift_coefficient(20.0, 0.25, 25.0, 0.0).is_err());
    let cl = lift_coefficient(19.62, 0.24525, 25.72, 1.21).expect("valid inputs");
    assert_relative_eq!(cl, 19.62 / (0.5 * 1.21 * 25.72 * 25.72 * 0.24525), epsilon = 1e-12);
}

#[test]
fn geometry_follows_wing_loading_and_taper() {
    let wing = WingGeometry::from_weight(19.62, 80.0, 12.0, 0.7).expect("geometry");
    assert_relative_eq!(wing.area_m2, 0.24525, epsilon = 1e-9);
    assert_relative_eq!(wing.span_m * wing.mean_chord_m, wing.area_m2, epsilon = 1e-12);
    assert_relative_eq!(wing.root_chord_m, 2.0 * wing.mean_chord_m / 1.7, epsilon = 1e-12);
    assert_relative_eq!(wing.tip_chord_m, 0.7 * wing.root_chord_m, epsilon = 1e-12);
    assert_relative_eq!(wing.chord_at(wing.semi_span_m), wing.tip_chord_m, epsilon = 1e-12);
}

#[test]
fn stall_speed_matches_lift_equation() {
    let v = stall_speed(19.62, 0.24525, 1.4, 1.21).expect("stall");
    let cl = lift_coefficient(19.62, 0.24525, v, 1.21).expect("cl");
    assert_relative_eq!(cl, 1.4, epsilon = 1e-12);
}

#[test]
fn tabulated_polar_interpolates_and_refuses_to_extrapolate() {
    let polar = TabulatedPolar::new(vec![
        PolarSample {
            lift_coefficient: 1.0,
            drag_coefficient: 0.060,
        },
        PolarSample {
            lift_coefficient: 0.0,
            drag_coefficient: 0.020,
        },
        PolarSample {
            lift_coefficient: 0.5,
            drag_coefficient: 0.030,
        },
    ])
    .expect("polar");

    assert_eq!(polar.lift_range(), (0.0, 1.0));
    let mid = polar.drag(0.75).expect("inside range");
    assert_relative_eq!(mid.total, 0.045, epsilon = 1e-12);
    assert_relative_eq!(mid.parasite, 0.020, epsilon = 1e-12);
    assert!(matches!(
        polar.drag(1.2),
        Err(DomainError::OutOfRange { .. })
    ));
    assert_relative_eq!(polar.max_lift_to_drag().lift_to_drag, 0.5 / 0.030, epsilon = 1e-12);
}

#[test]
fn tabulated_polar_needs_two_distinct_samples() {
    let single = vec![
        PolarSample {
            lift_coefficient: 0.3,
            drag_coefficient: 0.02,
        };
        3
    ];
    assert!(matches!(
        TabulatedPolar::new(single),
        Err(DomainError::TooFewSamples { actual: 1, .. })
    ));
}

#[test]
fn sampled_polar_reproduces_parabolic_polar() {
    let parabolic = ParabolicPolar::new(12.0, 0.88, 0.020).expect("polar");
    let solver = PolarSolver::new(parabolic, -2.0);
    let wing = WingGeometry::from_area(0.24, 12.0, 0.7).expect("geometry");
    let alphas: Vec<f64> = (-2..=10).map(f64::from).collect();
    let tabulated = sample_polar(&solver, &wing, 20.0, 1.2, &alphas).expect("samples");

    for sample in tabulated.samples() {
        let exact = parabolic.drag(sample.lift_coefficient).expect("drag");
        assert_relative_eq!(sample.drag_coefficient, exact.total, epsilon = 1e-12);
    }
    assert_relative_eq!(tabulated.drag(0.0).expect("cd0").total, 0.020, epsilon = 1e-12);
}

#[test]
fn finite_wing_lift_slope_includes_oswald_efficiency() {
    let parabolic = ParabolicPolar::new(12.0, 0.88, 0.020).expect("polar");
    let solver = PolarSolver::new(parabolic, 0.0);
    let expected = 2.0 * std::f64::consts::PI * 12.0 / (12.0 + 2.0 / 0.88);
    assert_relative_eq!(solver.lift_slope_per_rad(), expected, epsilon = 1e-12);

    let ideal = PolarSolver::new(ParabolicPolar::new(12.0, 1.0, 0.020).expect("polar"), 0.0);
    assert!(solver.lift_slope_per_rad() < ideal.lift_slope_per_rad());
}

struct SlowSolver;

impl AeroSolver for SlowSolver {
    fn solve(
        &self,
        _geometry: &WingGeometry,
        _condition: &FlightCondition,
    ) -> Result<Coefficients, SolverError> {
        thread::sleep(Duration::from_millis(500));
        Ok(Coefficients {
            lift: 0.5,
            drag: 0.03,
            moment: 0.0,
        })
    }
}

#[test]
fn bounded_solver_times_out_and_maps_to_domain_error() {
    let bounded = BoundedSolver::new(SlowSolver, Duration::from_millis(20));
    let wing = WingGeometry::from_area(0.24, 12.0, 0.7).expect("geometry");
    let condition = FlightCondition {
        velocity_m_s: 20.0,
        alpha_deg: 4.0,
        air_density_kg_m3: 1.2,
    };
    let err = bounded.solve(&wing, &condition).unwrap_err();
    assert_eq!(err, SolverError::Timeout(Duration::from_millis(20)));

    let err = sample_polar(&bounded, &wing, 20.0, 1.2, &[0.0, 4.0]).unwrap_err();
    assert!(matches!(err, DomainError::External(_)), "got {err:?}");
}

#[test]
fn bounded_solver_passes_through_fast_results() {
    let parabolic = ParabolicPolar::new(10.0, 0.85, 0.025).expect("polar");
    let bounded = BoundedSolver::new(PolarSolver::new(parabolic, 0.0), Duration::from_secs(5));
    let wing = WingGeometry::from_area(0.3, 10.0, 1.0).expect("geometry");
    let result = bounded
        .solve(
            &wing,
            &FlightCondition {
                velocity_m_s: 18.0,
                alpha_deg: 0.0,
                air_density_kg_m3: 1.225,
            },
        )
        .expect("fast solver");
    assert_eq!(result.lift, 0.0);
    assert_relative_eq!(result.drag, 0.025, epsilon = 1e-12);
}
