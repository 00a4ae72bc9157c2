//! Configuration models and loaders for UAV design cases.
//!
//! Every section falls back to the baseline heuristics, so a case file only needs to name
//! the values it changes.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One sizing case as written in a manifest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DesignCaseConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mission: MissionConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub propulsion: PropulsionConfig,
    #[serde(default)]
    pub climb: ClimbConfig,
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub convergence: ConvergenceConfig,
}

/// Mission requirements.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MissionConfig {
    pub range_out_km: f64,
    pub range_back_km: f64,
    pub loiter_min: f64,
    pub cruise_speed_m_s: f64,
    pub loiter_speed_m_s: f64,
    pub altitude_m: f64,
    pub payload_mass_kg: f64,
    pub payload_power_w: f64,
    /// Overrides the standard-atmosphere density at `altitude_m`.
    pub air_density_kg_m3: Option<f64>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            range_out_km: 50.0,
            range_back_km: 50.0,
            loiter_min: 15.0,
            // 50 kt
            cruise_speed_m_s: 25.72,
            loiter_speed_m_s: 15.0,
            altitude_m: 150.0,
            payload_mass_kg: 0.5,
            payload_power_w: 5.0,
            air_density_kg_m3: None,
        }
    }
}

/// Airframe design choices.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DesignConfig {
    pub aspect_ratio: f64,
    pub wing_loading_n_m2: f64,
    pub cd0: f64,
    pub oswald_efficiency: f64,
    pub cl_max: f64,
    pub structural_fraction: f64,
    pub taper_ratio: f64,
    pub avionics_mass_kg: f64,
    pub safety_factor: f64,
    pub ultimate_load_factor: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 12.0,
            wing_loading_n_m2: 80.0,
            cd0: 0.020,
            oswald_efficiency: 0.88,
            cl_max: 1.4,
            structural_fraction: 0.30,
            taper_ratio: 0.7,
            avionics_mass_kg: 0.15,
            safety_factor: 1.5,
            ultimate_load_factor: 3.8,
        }
    }
}

/// Battery and motor heuristics.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PropulsionConfig {
    pub propulsive_efficiency: f64,
    pub battery_reserve_factor: f64,
    pub battery_specific_energy_wh_kg: f64,
    pub motor_power_margin: f64,
    pub motor_grams_per_watt: f64,
    pub propeller_mass_kg: f64,
}

impl Default for PropulsionConfig {
    fn default() -> Self {
        Self {
            propulsive_efficiency: 0.70,
            battery_reserve_factor: 1.2,
            battery_specific_energy_wh_kg: 180.0,
            motor_power_margin: 2.5,
            motor_grams_per_watt: 0.4,
            propeller_mass_kg: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClimbConfig {
    pub lift_coefficient: f64,
    pub rate_m_s: f64,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            lift_coefficient: 0.6,
            rate_m_s: 2.0,
        }
    }
}

/// Spar material, sizing limits, and load discretisation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StructureConfig {
    pub tensile_strength_mpa: f64,
    pub elastic_modulus_gpa: f64,
    pub density_kg_m3: f64,
    pub wall_thickness_ratio: f64,
    pub deflection_ratio_limit: f64,
    pub tip_deflection_coefficient: f64,
    pub spar_chord_fraction: f64,
    pub standard_diameters_mm: Vec<f64>,
    pub station_count: usize,
    pub taper_correction: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            tensile_strength_mpa: 600.0,
            elastic_modulus_gpa: 70.0,
            density_kg_m3: 1_600.0,
            wall_thickness_ratio: 0.12,
            deflection_ratio_limit: 0.08,
            tip_deflection_coefficient: 0.35,
            spar_chord_fraction: 0.30,
            standard_diameters_mm: vec![6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0],
            station_count: 50,
            taper_correction: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    pub initial_mass_kg: f64,
    pub tolerance_kg: f64,
    pub max_iterations: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            initial_mass_kg: 2.0,
            tolerance_kg: 0.001,
            max_iterations: 15,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no design cases found in {0}")]
    Empty(PathBuf),
    #[error("design case '{0}' is defined more than once")]
    DuplicateCase(String),
}

/// Load design cases from a TOML file, a YAML list, or a directory of TOML files.
pub fn load_design_cases<P: AsRef<Path>>(path: P) -> Result<Vec<DesignCaseConfig>, ConfigError> {
    let path = path.as_ref();
    let cases: Vec<DesignCaseConfig> = load_records(path)?;
    if cases.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    for (idx, case) in cases.iter().enumerate() {
        if cases[..idx].iter().any(|other| other.name == case.name) {
            return Err(ConfigError::DuplicateCase(case.name.clone()));
        }
    }
    Ok(cases)
}

/// Parse a single TOML design case from a string.
pub fn parse_design_case(contents: &str) -> Result<DesignCaseConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_extension(path, "toml") {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, "toml"))
        .collect();
    entries.sort();
    let mut records = Vec::with_capacity(entries.len());
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}
