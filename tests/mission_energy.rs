use approx::assert_relative_eq;
use uav_sizer::aero::ParabolicPolar;
use uav_sizer::mission::{
    ClimbSchedule, EnergyRequest, MissionProfile, Phase, total_mission_energy,
};
use uav_sizer::physics::DomainError;
use uav_sizer::physics::atmosphere::isa_density;

fn reference_mission() -> MissionProfile {
    MissionProfile {
        range_out_m: 50_000.0,
        range_back_m: 50_000.0,
        loiter_duration_s: 900.0,
        cruise_velocity_m_s: 25.72,
        loiter_velocity_m_s: 15.0,
        altitude_m: 150.0,
        payload_mass_kg: 0.5,
        payload_power_w: 5.0,
        air_density_kg_m3: Some(1.21),
    }
}

fn polar() -> ParabolicPolar {
    ParabolicPolar::new(12.0, 0.88, 0.020).expect("polar")
}

#[test]
fn phases_follow_climb_cruise_loiter_order() {
    let mission = reference_mission();
    let climb = ClimbSchedule::default();
    let weight_n = 1.962 * 9.81;
    let result = total_mission_energy(
        &EnergyRequest {
            weight_n,
            wing_area_m2: weight_n / 80.0,
            mission: &mission,
            climb: &climb,
            propulsive_efficiency: 0.70,
        },
        &polar(),
    )
    .expect("energy");

    let order: Vec<Phase> = result.phases().iter().map(|p| p.phase).collect();
    assert_eq!(order, Phase::ORDER.to_vec());

    assert_relative_eq!(result.climb.duration_s, 75.0, epsilon = 1e-9);
    assert_relative_eq!(result.cruise.duration_s, 100_000.0 / 25.72, epsilon = 1e-9);
    assert_relative_eq!(result.loiter.duration_s, 900.0, epsilon = 1e-9);

    let flight_time = 75.0 + 100_000.0 / 25.72 + 900.0;
    assert_relative_eq!(result.total_flight_time_s, flight_time, epsilon = 1e-9);
    assert_relative_eq!(result.payload_energy_wh, 5.0 * flight_time / 3600.0, epsilon = 1e-9);

    let phase_sum: f64 = result.phases().iter().map(|p| p.energy_wh).sum();
    assert_relative_eq!(
        result.shaft_energy_wh,
        phase_sum + result.payload_energy_wh,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        result.battery_energy_wh,
        result.shaft_energy_wh / 0.70,
        epsilon = 1e-9
    );
}

#[test]
fn cruise_power_matches_reference_design() {
    let mission = reference_mission();
    let climb = ClimbSchedule::default();
    let weight_n = 1.962_06 * 9.81;
    let result = total_mission_energy(
        &EnergyRequest {
            weight_n,
            wing_area_m2: weight_n / 80.0,
            mission: &mission,
            climb: &climb,
            propulsive_efficiency: 0.70,
        },
        &polar(),
    )
    .expect("energy");

    assert!(
        (result.cruise.lift_to_drag - 9.43).abs() < 0.05,
        "cruise L/D = {}",
        result.cruise.lift_to_drag
    );
    assert!(
        (result.cruise.power_w - 52.5).abs() < 0.5,
        "cruise power = {}",
        result.cruise.power_w
    );
    assert!(
        (result.battery_energy_wh - 97.6).abs() < 1.0,
        "battery energy = {}",
        result.battery_energy_wh
    );
    // Climb adds W·ROC on top of the drag power.
    assert!(result.climb.power_w > weight_n * climb.climb_rate_m_s);
}

#[test]
fn efficiency_outside_unit_interval_is_rejected() {
    let mission = reference_mission();
    let climb = ClimbSchedule::default();
    for efficiency in [0.0, -0.3, 1.2] {
        let err = total_mission_energy(
            &EnergyRequest {
                weight_n: 19.0,
                wing_area_m2: 0.24,
                mission: &mission,
                climb: &climb,
                propulsive_efficiency: efficiency,
            },
            &polar(),
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                DomainError::NonPositive { .. } | DomainError::OutOfRange { .. }
            ),
            "efficiency {efficiency}: {err:?}"
        );
    }
}

#[test]
fn density_defaults_to_standard_atmosphere() {
    let mut mission = reference_mission();
    mission.air_density_kg_m3 = None;
    let rho = mission.air_density().expect("isa");
    assert_relative_eq!(rho, isa_density(150.0).expect("isa"), epsilon = 1e-12);
    assert!(rho < 1.225 && rho > 1.20, "rho = {rho}");

    mission.air_density_kg_m3 = Some(-1.0);
    assert!(mission.validate().is_err());
}

#[test]
fn zero_loiter_contributes_no_energy() {
    let mut mission = reference_mission();
    mission.loiter_duration_s = 0.0;
    let climb = ClimbSchedule::default();
    let result = total_mission_energy(
        &EnergyRequest {
            weight_n: 19.0,
            wing_area_m2: 0.24,
            mission: &mission,
            climb: &climb,
            propulsive_efficiency: 0.7,
        },
        &polar(),
    )
    .expect("energy");
    assert_eq!(result.loiter.energy_wh, 0.0);
    assert!(result.loiter.power_w > 0.0);
}
