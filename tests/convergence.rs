use approx::assert_relative_eq;
use uav_sizer::aero::solver::{PolarSolver, sample_polar};
use uav_sizer::aero::{TabulatedPolar, WingGeometry};
use uav_sizer::physics::DomainError;
use uav_sizer::sizing::case::DesignCase;
use uav_sizer::sizing::convergence::{LoopStatus, converge, converge_with, iterate, iterate_with};
use uav_sizer::sizing::matching::ConstraintSettings;
use uav_sizer::sizing::sweep::{SweepParameter, sweep, sweep_range};
use uav_sizer::sizing::{SizingError, run_sizing, run_sizing_with_polar};

/// Baseline polar as an external solver would report it, sampled every 0.1° up to 17°.
fn solver_polar(case: &DesignCase) -> TabulatedPolar {
    let solver = PolarSolver::new(case.design.polar().expect("polar"), 0.0);
    let wing = WingGeometry::from_area(0.24, case.design.aspect_ratio, case.design.taper_ratio)
        .expect("geometry");
    let alphas: Vec<f64> = (-10..=170).map(|i| f64::from(i) * 0.1).collect();
    sample_polar(&solver, &wing, case.mission.cruise_velocity_m_s, 1.2, &alphas).expect("samples")
}

fn reference_density_case() -> DesignCase {
    let mut case = DesignCase::baseline();
    case.mission.air_density_kg_m3 = Some(1.21);
    case
}

#[test]
fn baseline_converges_near_two_kilograms() {
    let design = converge(&DesignCase::baseline()).expect("baseline converges");
    let mass = design.budget.total_kg;
    assert!((mass - 1.96).abs() < 0.01, "mass = {}", mass);
    assert!(
        (design.geometry.area_m2 - 0.241).abs() < 0.002,
        "area = {}",
        design.geometry.area_m2
    );
    assert!(design.iterations() <= 15);
}

#[test]
fn reference_density_reproduces_hand_calculation() {
    let design = converge(&reference_density_case()).expect("converges");
    assert_relative_eq!(design.budget.total_kg, 1.96206, epsilon = 5e-4);
    assert_relative_eq!(design.geometry.area_m2, 0.24060, epsilon = 1e-4);
    assert_relative_eq!(design.battery.mass_kg, 0.651, epsilon = 2e-3);
    assert_relative_eq!(design.motor.mass_kg, 0.0525, epsilon = 5e-4);
    assert_eq!(design.iterations(), 5);
}

#[test]
fn deltas_strictly_decrease_until_tolerance() {
    let run = iterate(&DesignCase::baseline()).expect("runs");
    assert_eq!(run.status, LoopStatus::Converged);
    assert_eq!(run.history[0].status, LoopStatus::Init);
    assert!(run.history[0].delta_kg.is_none());

    let deltas = run.deltas();
    assert!(deltas.len() >= 2);
    for pair in deltas.windows(2) {
        assert!(pair[1] < pair[0], "deltas = {:?}", deltas);
    }
    let tolerance = run.history[0].tolerance_kg;
    assert!(*deltas.last().unwrap() < tolerance);
    assert!(deltas[..deltas.len() - 1].iter().all(|d| *d >= tolerance));

    for window in run.history.windows(2) {
        assert_eq!(window[1].previous_mass_kg, window[0].current_mass_kg);
    }
}

#[test]
fn identical_inputs_give_identical_budgets() {
    let case = DesignCase::baseline();
    let first = converge(&case).expect("first");
    let second = converge(&case).expect("second");
    assert_eq!(first, second);
}

#[test]
fn budget_closes_on_structural_fraction() {
    let case = DesignCase::baseline();
    let budget = converge(&case).expect("converges").budget;
    assert_relative_eq!(budget.total_kg, budget.sum_of_parts(), epsilon = 1e-12);
    assert_relative_eq!(
        budget.structure_kg,
        budget.total_kg * case.design.structural_fraction,
        epsilon = 1e-12
    );
}

#[test]
fn single_iteration_cap_reports_divergence() {
    let mut case = DesignCase::baseline();
    case.convergence.max_iterations = 1;
    match converge(&case) {
        Err(SizingError::Diverged {
            iterations,
            last_delta_kg,
            last_mass_kg,
        }) => {
            assert_eq!(iterations, 1);
            assert!(last_delta_kg > case.convergence.tolerance_kg);
            assert!(last_mass_kg > 1.9 && last_mass_kg < 2.0, "mass = {last_mass_kg}");
        }
        other => panic!("expected divergence, got {other:?}"),
    }

    let run = iterate(&case).expect("runs");
    assert_eq!(run.status, LoopStatus::Diverged);
    assert_eq!(run.history.last().map(|s| s.status), Some(LoopStatus::Diverged));
}

#[test]
fn higher_parasite_drag_means_heavier_aircraft() {
    let base = DesignCase::baseline();
    let masses: Vec<f64> = [0.016, 0.018, 0.020, 0.022, 0.025]
        .into_iter()
        .map(|cd0| {
            converge(&SweepParameter::Cd0.apply(&base, cd0))
                .expect("converges")
                .budget
                .total_kg
        })
        .collect();
    for pair in masses.windows(2) {
        assert!(pair[1] > pair[0], "masses = {:?}", masses);
    }
    assert!((masses[3] - 2.13).abs() < 0.02, "cd0 0.022 mass = {}", masses[3]);
}

#[test]
fn invalid_design_is_rejected_before_iterating() {
    let mut case = DesignCase::baseline();
    case.design.structural_fraction = 1.0;
    assert!(matches!(
        converge(&case),
        Err(SizingError::Domain(DomainError::OutOfRange { .. }))
    ));

    let mut case = DesignCase::baseline();
    case.propulsion.battery_specific_energy_wh_kg = 0.0;
    assert!(matches!(
        converge(&case),
        Err(SizingError::Domain(DomainError::NonPositive { .. }))
    ));
}

#[test]
fn sweep_keeps_failed_points() {
    let base = DesignCase::baseline();
    let result = sweep(&base, SweepParameter::StructuralFraction, &[0.25, 0.30, 0.95]);
    assert_eq!(result.points.len(), 3);
    assert!(result.points[0].converged());
    assert!(result.points[1].converged());
    assert!(!result.points[2].converged());
    assert!(result.points[2].total_mass_kg.is_none());

    let ranged = sweep_range(&base, SweepParameter::AspectRatio, 8.0, 14.0, 4);
    let values: Vec<f64> = ranged.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![8.0, 10.0, 12.0, 14.0]);
    assert!(ranged.points.iter().all(|p| p.converged()));
}

#[test]
fn full_report_for_baseline() {
    let report = run_sizing(&DesignCase::baseline()).expect("report");
    assert!(
        (report.performance.max_lift_to_drag.lift_to_drag - 20.4).abs() < 0.1,
        "max L/D = {}",
        report.performance.max_lift_to_drag.lift_to_drag
    );
    assert!(
        (report.performance.cruise_lift_to_drag - 9.4).abs() < 0.2,
        "cruise L/D = {}",
        report.performance.cruise_lift_to_drag
    );
    assert!(report.performance.stall_speed_m_s < report.mission.cruise_velocity_m_s);
    assert_eq!(report.constraints.points.len(), 100);
    assert!(report.constraints.design_meets_stall_limit());
    assert!(report.spar.max_stress_pa <= report.spar.allowable_stress_pa);
    assert!(report.deflection_ok(0.08));
    assert_relative_eq!(
        report.airframe.budget_kg,
        report.budget.structure_kg,
        epsilon = 1e-12
    );
}

#[test]
fn sampled_solver_polar_converges_like_parabolic_polar() {
    let case = DesignCase::baseline();
    let tabulated = solver_polar(&case);

    let parabolic = converge(&case).expect("parabolic");
    let sampled = converge_with(&case, &tabulated).expect("tabulated");
    assert!(
        (sampled.budget.total_kg - parabolic.budget.total_kg).abs() < 1e-3,
        "tabulated {} vs parabolic {}",
        sampled.budget.total_kg,
        parabolic.budget.total_kg
    );

    let run = iterate_with(&case, &tabulated).expect("run");
    assert_eq!(run.status, LoopStatus::Converged);
    assert!(run.deltas().windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn report_on_sampled_polar_matches_parabolic_report() {
    let case = DesignCase::baseline();
    let tabulated = solver_polar(&case);
    let parabolic = run_sizing(&case).expect("parabolic report");
    let sampled = run_sizing_with_polar(&case, &tabulated, &ConstraintSettings::default())
        .expect("tabulated report");

    assert_relative_eq!(
        sampled.performance.max_lift_to_drag.lift_to_drag,
        parabolic.performance.max_lift_to_drag.lift_to_drag,
        max_relative = 0.01
    );
    assert_eq!(
        sampled.spar.section.outer_diameter_m,
        parabolic.spar.section.outer_diameter_m
    );
    assert_eq!(sampled.constraints.points.len(), 100);
}

#[test]
fn polar_missing_the_climb_lift_coefficient_is_a_domain_error() {
    let case = DesignCase::baseline();
    let solver = PolarSolver::new(case.design.polar().expect("polar"), 0.0);
    let wing = WingGeometry::from_area(0.24, 12.0, 0.7).expect("geometry");
    let narrow = sample_polar(&solver, &wing, 25.7, 1.2, &[0.0, 1.0, 2.0]).expect("samples");
    assert!(matches!(
        iterate_with(&case, &narrow),
        Err(DomainError::OutOfRange { .. })
    ));
}
