use approx::assert_relative_eq;
use uav_sizer::physics::DomainError;
use uav_sizer::propulsion::{PropulsionParameters, size_battery, size_motor};

#[test]
fn battery_mass_includes_reserve() {
    let battery = size_battery(97.6, 1.2, 180.0).expect("battery");
    assert_relative_eq!(battery.energy_with_reserve_wh, 117.12, epsilon = 1e-9);
    assert_relative_eq!(battery.mass_kg, 117.12 / 180.0, epsilon = 1e-12);
}

#[test]
fn battery_rejects_non_positive_specific_energy() {
    for specific in [0.0, -150.0] {
        assert!(matches!(
            size_battery(100.0, 1.2, specific),
            Err(DomainError::NonPositive { .. })
        ));
    }
}

#[test]
fn motor_rating_and_mass_scale_with_cruise_power() {
    let motor = size_motor(52.5, 2.5, 0.4).expect("motor");
    assert_relative_eq!(motor.rated_power_w, 131.25, epsilon = 1e-12);
    assert_relative_eq!(motor.mass_kg, 0.0525, epsilon = 1e-12);
}

#[test]
fn default_parameters_drive_the_helpers() {
    let params = PropulsionParameters::default();
    params.validate().expect("defaults are valid");
    let battery = params.battery_for(90.0).expect("battery");
    assert_relative_eq!(battery.mass_kg, 90.0 * 1.2 / 180.0, epsilon = 1e-12);
    let motor = params.motor_for(40.0).expect("motor");
    assert_relative_eq!(motor.mass_kg, 40.0 * 2.5 * 0.4 / 1000.0, epsilon = 1e-12);
}
