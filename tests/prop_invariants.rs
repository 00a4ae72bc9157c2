//! Property-based checks on the aerodynamic and structural models.

use proptest::prelude::*;
use uav_sizer::aero::{DragPolar, ParabolicPolar, drag_coefficient, max_lift_to_drag};
use uav_sizer::structures::{
    SparSpecification, StructuresError, deflection_profile, elliptical_distribution, size_spar,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parabolic_polar_anchors(
        aspect_ratio in 4.0f64..25.0,
        oswald in 0.5f64..1.0,
        cd0 in 0.008f64..0.06,
    ) {
        prop_assert_eq!(drag_coefficient(0.0, aspect_ratio, oswald, cd0).total, cd0);

        let best = max_lift_to_drag(aspect_ratio, oswald, cd0);
        let at_best = drag_coefficient(best.lift_coefficient, aspect_ratio, oswald, cd0);
        prop_assert!((at_best.total - 2.0 * cd0).abs() < 1e-12);

        // No other CL beats the closed-form optimum.
        let polar = ParabolicPolar::new(aspect_ratio, oswald, cd0).unwrap();
        for factor in [0.5, 0.9, 1.1, 2.0] {
            let cl = factor * best.lift_coefficient;
            let ld = polar.drag(cl).unwrap().lift_to_drag(cl);
            prop_assert!(ld <= best.lift_to_drag + 1e-12);
        }
    }

    #[test]
    fn prop_shear_and_moment_vanish_at_tip_and_peak_at_root(
        lift in 0.0f64..2_000.0,
        span in 0.5f64..4.0,
        taper in 0.3f64..1.0,
        stations in 2usize..200,
    ) {
        let loads = elliptical_distribution(lift, span, taper, 0.1, stations).unwrap();
        prop_assert_eq!(loads.stations.len(), stations);
        prop_assert_eq!(loads.tip().shear_n, 0.0);
        prop_assert_eq!(loads.tip().bending_moment_n_m, 0.0);
        prop_assert_eq!(loads.max_bending_moment(), loads.root().bending_moment_n_m);
        prop_assert!(loads.stations.iter().all(|s| s.shear_n >= 0.0));
    }

    #[test]
    fn prop_feasible_spar_stays_below_allowable(
        mass in 0.5f64..6.0,
        load_factor in 1.0f64..6.0,
        span in 1.0f64..3.5,
        wall_ratio in 0.05f64..0.3,
    ) {
        let loads = elliptical_distribution(mass * 9.81 * load_factor, span, 0.7, 0.1, 50).unwrap();
        let spec = SparSpecification {
            wall_thickness_ratio: wall_ratio,
            ..SparSpecification::default()
        };
        match size_spar(&loads, 0.2, &spec) {
            Ok(spar) => {
                let moment = loads.max_bending_moment();
                let stress = moment * spar.section.outer_diameter_m / 2.0 / spar.section.second_moment_m4;
                prop_assert!(stress <= spar.allowable_stress_pa * (1.0 + 1e-9));
                prop_assert!(spar.section.outer_diameter_m >= spar.required_outer_diameter_m);

                let profile = deflection_profile(
                    &loads,
                    spar.elastic_modulus_pa,
                    spar.section.second_moment_m4,
                ).unwrap();
                prop_assert!(profile.deflection_ratio() <= spec.deflection_ratio_limit);
            }
            Err(StructuresError::SizingInfeasible { required_outer_diameter_mm, largest_available_mm, .. }) => {
                prop_assert!(required_outer_diameter_mm > largest_available_mm);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
