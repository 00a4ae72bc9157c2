use std::fs;

use tempfile::tempdir;
use uav_sizer::config::{ConfigError, load_design_cases, parse_design_case};
use uav_sizer::sizing::SizingError;
use uav_sizer::sizing::case::{self, DesignCase};

#[test]
fn shipped_design_directory_loads_sorted() {
    let cases = load_design_cases("configs/designs").expect("design cases");
    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["baseline", "long_endurance"]);
    assert_eq!(cases[1].mission.loiter_min, 45.0);
    // Sections not present in the file fall back to defaults.
    assert_eq!(cases[1].mission.range_out_km, 50.0);
    assert_eq!(cases[1].propulsion.battery_specific_energy_wh_kg, 180.0);
}

#[test]
fn baseline_file_matches_built_in_case() {
    let cases = load_design_cases("configs/designs/baseline.toml").expect("baseline");
    let from_file = case::from_config(&cases[0]).expect("conversion");
    let built_in = DesignCase::baseline();
    assert_eq!(from_file.mission, built_in.mission);
    assert_eq!(from_file.design, built_in.design);
    assert_eq!(from_file.propulsion, built_in.propulsion);
    assert_eq!(from_file.convergence, built_in.convergence);
    assert_eq!(from_file.spar, built_in.spar);
}

#[test]
fn yaml_catalog_selects_by_name() {
    let cases = load_design_cases("configs/cases.yaml").expect("yaml catalog");
    assert_eq!(cases.len(), 3);

    let reference = case::select(&cases, Some("SEA_LEVEL_REFERENCE")).expect("select");
    assert_eq!(reference.mission.air_density_kg_m3, Some(1.21));

    let first = case::select(&cases, None).expect("default");
    assert_eq!(first.name, "baseline");

    assert!(matches!(
        case::select(&cases, Some("missing")),
        Err(SizingError::CaseNotFound(name)) if name == "missing"
    ));
    assert!(matches!(case::select(&[], None), Err(SizingError::EmptyCatalog)));
}

#[test]
fn partial_toml_uses_defaults() {
    let config = parse_design_case(
        r#"
name = "short_hop"

[mission]
range_out_km = 10.0
range_back_km = 10.0
"#,
    )
    .expect("parse");
    let design = case::from_config(&config).expect("conversion");
    assert_eq!(design.mission.range_out_m, 10_000.0);
    assert_eq!(design.mission.loiter_duration_s, 900.0);
    assert_eq!(design.design.aspect_ratio, 12.0);
    assert_eq!(design.loads.station_count, 50);
}

#[test]
fn invalid_values_fail_conversion() {
    let config = parse_design_case(
        r#"
name = "broken"

[propulsion]
battery_specific_energy_wh_kg = 0.0
"#,
    )
    .expect("parse");
    assert!(matches!(case::from_config(&config), Err(SizingError::Domain(_))));
}

#[test]
fn duplicate_and_empty_catalogs_are_errors() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("a.toml"), "name = \"same\"\n").expect("write");
    fs::write(dir.path().join("b.toml"), "name = \"same\"\n").expect("write");
    assert!(matches!(
        load_design_cases(dir.path()),
        Err(ConfigError::DuplicateCase(name)) if name == "same"
    ));

    let empty = tempdir().expect("tempdir");
    assert!(matches!(
        load_design_cases(empty.path()),
        Err(ConfigError::Empty(_))
    ));

    let bad = dir.path().join("bad.yaml");
    fs::write(&bad, "- name: [unterminated\n").expect("write");
    assert!(matches!(load_design_cases(&bad), Err(ConfigError::Parse(_))));
}
