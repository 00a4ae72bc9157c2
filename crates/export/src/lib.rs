//! Export helpers for sizing reports: flat key/value records, CSV, and JSON.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod records {
    use serde::Serialize;
    use uav_sizing::SizingReport;
    use uav_sizing::mission::Phase;

    /// One flat report value. Keys are dotted paths, stable across runs.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Record {
        pub key: String,
        pub value: f64,
        pub unit: &'static str,
    }

    impl Record {
        fn new(key: impl Into<String>, value: f64, unit: &'static str) -> Self {
            Self {
                key: key.into(),
                value,
                unit,
            }
        }
    }

    /// Flatten a report into ordered records for BOM and document generators.
    pub fn flatten(report: &SizingReport) -> Vec<Record> {
        let mut out = Vec::with_capacity(64);
        let budget = &report.budget;
        out.extend([
            Record::new("mass.payload", budget.payload_kg, "kg"),
            Record::new("mass.avionics", budget.avionics_kg, "kg"),
            Record::new("mass.battery", budget.battery_kg, "kg"),
            Record::new("mass.motor", budget.motor_kg, "kg"),
            Record::new("mass.propeller", budget.propeller_kg, "kg"),
            Record::new("mass.structure", budget.structure_kg, "kg"),
            Record::new("mass.total", budget.total_kg, "kg"),
        ]);

        let wing = &report.geometry;
        out.extend([
            Record::new("wing.area", wing.area_m2, "m^2"),
            Record::new("wing.span", wing.span_m, "m"),
            Record::new("wing.mean_chord", wing.mean_chord_m, "m"),
            Record::new("wing.root_chord", wing.root_chord_m, "m"),
            Record::new("wing.tip_chord", wing.tip_chord_m, "m"),
            Record::new("wing.aspect_ratio", wing.aspect_ratio, "-"),
            Record::new("wing.taper_ratio", wing.taper_ratio, "-"),
        ]);

        for phase in Phase::ORDER {
            let p = report.energy.phase(phase);
            let label = phase.label();
            out.extend([
                Record::new(format!("energy.{label}.duration"), p.duration_s, "s"),
                Record::new(format!("energy.{label}.power"), p.power_w, "W"),
                Record::new(format!("energy.{label}.energy"), p.energy_wh, "Wh"),
                Record::new(format!("energy.{label}.lift_to_drag"), p.lift_to_drag, "-"),
            ]);
        }
        let energy = &report.energy;
        out.extend([
            Record::new("energy.payload", energy.payload_energy_wh, "Wh"),
            Record::new("energy.flight_time", energy.total_flight_time_s, "s"),
            Record::new("energy.shaft", energy.shaft_energy_wh, "Wh"),
            Record::new("energy.battery", energy.battery_energy_wh, "Wh"),
            Record::new(
                "propulsion.battery_capacity",
                report.battery.energy_with_reserve_wh,
                "Wh",
            ),
            Record::new("propulsion.motor_rated_power", report.motor.rated_power_w, "W"),
        ]);

        let perf = &report.performance;
        out.extend([
            Record::new("performance.air_density", perf.air_density_kg_m3, "kg/m^3"),
            Record::new("performance.stall_speed", perf.stall_speed_m_s, "m/s"),
            Record::new("performance.cruise_to_stall", perf.cruise_to_stall_ratio, "-"),
            Record::new("performance.reynolds", perf.reynolds_number, "-"),
            Record::new("performance.cruise_cl", perf.cruise_lift_coefficient, "-"),
            Record::new("performance.cruise_cd", perf.cruise_drag.total, "-"),
            Record::new("performance.cruise_lift_to_drag", perf.cruise_lift_to_drag, "-"),
            Record::new(
                "performance.max_lift_to_drag",
                perf.max_lift_to_drag.lift_to_drag,
                "-",
            ),
            Record::new(
                "performance.cl_at_max_lift_to_drag",
                perf.max_lift_to_drag.lift_coefficient,
                "-",
            ),
            Record::new("performance.power_loading", perf.power_loading_w_n, "W/N"),
        ]);

        let spar = &report.spar;
        out.extend([
            Record::new("spar.outer_diameter", spar.section.outer_diameter_m * 1e3, "mm"),
            Record::new("spar.inner_diameter", spar.section.inner_diameter_m * 1e3, "mm"),
            Record::new("spar.wall_thickness", spar.section.wall_thickness_m * 1e3, "mm"),
            Record::new("spar.second_moment", spar.section.second_moment_m4, "m^4"),
            Record::new("spar.mass", spar.mass_kg, "kg"),
            Record::new("spar.root_moment", spar.design_moment_n_m, "N*m"),
            Record::new("spar.max_stress", spar.max_stress_pa / 1e6, "MPa"),
            Record::new("spar.allowable_stress", spar.allowable_stress_pa / 1e6, "MPa"),
            Record::new("spar.stress_margin", spar.stress_margin, "-"),
            Record::new("spar.position", spar.chordwise_position_m, "m"),
            Record::new(
                "spar.tip_deflection",
                report.deflection.tip_deflection_m() * 1e3,
                "mm",
            ),
        ]);

        let airframe = &report.airframe;
        out.extend([
            Record::new("airframe.wing", airframe.wing.total_kg(), "kg"),
            Record::new("airframe.fuselage", airframe.fuselage.total_kg(), "kg"),
            Record::new("airframe.tail", airframe.tail.total_kg(), "kg"),
            Record::new("airframe.total", airframe.total_kg, "kg"),
            Record::new("airframe.budget", airframe.budget_kg, "kg"),
            Record::new("airframe.margin", airframe.margin_kg, "kg"),
            Record::new("convergence.iterations", report.iterations() as f64, "-"),
        ]);
        out
    }
}

pub mod csv_report {
    use std::io::Write;

    use uav_sizing::sweep::SweepResult;

    use crate::ExportError;
    use crate::records::Record;

    /// Write `key,value,unit` rows with a header.
    pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// One row per sweep value; failed points leave the numeric columns empty.
    pub fn write_sweep<W: Write>(writer: W, sweep: &SweepResult) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            sweep.parameter.label(),
            "total_mass_kg",
            "wing_area_m2",
            "span_m",
            "battery_mass_kg",
            "iterations",
            "error",
        ])?;
        for point in &sweep.points {
            csv.write_record([
                point.value.to_string(),
                optional(point.total_mass_kg),
                optional(point.wing_area_m2),
                optional(point.span_m),
                optional(point.battery_mass_kg),
                point.iterations.map(|n| n.to_string()).unwrap_or_default(),
                point.error.clone().unwrap_or_default(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }

    fn optional(value: Option<f64>) -> String {
        value.map(|v| format!("{v:.6}")).unwrap_or_default()
    }
}

pub mod json {
    use std::io::Write;

    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use uav_sizing::SizingReport;

    use crate::ExportError;
    use crate::records::{Record, flatten};

    #[derive(Serialize)]
    struct ReportDocument<'a> {
        generated_at: DateTime<Utc>,
        generator: &'static str,
        case: &'a str,
        summary: Vec<Record>,
        report: &'a SizingReport,
    }

    /// Write the full report plus its flat summary, stamped with the generation time.
    pub fn write_report<W: Write>(writer: W, report: &SizingReport) -> Result<(), ExportError> {
        write_report_at(writer, report, Utc::now())
    }

    pub fn write_report_at<W: Write>(
        writer: W,
        report: &SizingReport,
        generated_at: DateTime<Utc>,
    ) -> Result<(), ExportError> {
        let document = ReportDocument {
            generated_at,
            generator: concat!("uav_export ", env!("CARGO_PKG_VERSION")),
            case: &report.case_name,
            summary: flatten(report),
            report,
        };
        to_writer_pretty(writer, &document)?;
        Ok(())
    }
}
