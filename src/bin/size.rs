use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use uav_sizer::config::load_design_cases;
use uav_sizer::export::{csv_report, json, records, writer_for_path};
use uav_sizer::sizing::case::{self, DesignCase};
use uav_sizer::sizing::run_sizing;
use uav_sizer::sizing::sweep::{SweepParameter, sweep_range};
use uav_sizer::summary;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Mission-constrained conceptual sizing for small electric UAVs"
)]
struct Cli {
    /// Design case file (TOML or YAML list) or directory of TOML cases.
    /// Defaults to the built-in baseline.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Case name within the configuration (case-insensitive, defaults to the first)
    #[arg(long)]
    case: Option<String>,

    /// Print the full report as JSON instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write flat key/value/unit records (or sweep rows) as CSV; `-` writes to stdout
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print matching-chart data after the summary
    #[arg(long, default_value_t = false)]
    chart: bool,

    /// Re-run the weight loop across a range of one parameter
    #[arg(long, value_enum)]
    sweep: Option<SweepArg>,

    /// First sweep value
    #[arg(long, requires = "sweep", allow_negative_numbers = true)]
    from: Option<f64>,

    /// Last sweep value
    #[arg(long, requires = "sweep", allow_negative_numbers = true)]
    to: Option<f64>,

    /// Number of sweep samples
    #[arg(long, default_value_t = 11)]
    steps: usize,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum SweepArg {
    Cd0,
    AspectRatio,
    WingLoading,
    StructuralFraction,
    PayloadMass,
    OswaldEfficiency,
}

impl From<SweepArg> for SweepParameter {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::Cd0 => SweepParameter::Cd0,
            SweepArg::AspectRatio => SweepParameter::AspectRatio,
            SweepArg::WingLoading => SweepParameter::WingLoading,
            SweepArg::StructuralFraction => SweepParameter::StructuralFraction,
            SweepArg::PayloadMass => SweepParameter::PayloadMass,
            SweepArg::OswaldEfficiency => SweepParameter::OswaldEfficiency,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let design_case = match &cli.config {
        Some(path) => {
            let catalog = load_design_cases(path)
                .with_context(|| format!("loading design cases from {}", path.display()))?;
            log::info!("loaded {} design case(s) from {}", catalog.len(), path.display());
            case::select(&catalog, cli.case.as_deref())?
        }
        None => {
            if let Some(name) = &cli.case {
                if !name.eq_ignore_ascii_case("baseline") {
                    bail!("case '{name}' requested without --config; only 'baseline' is built in");
                }
            }
            DesignCase::baseline()
        }
    };

    if let Some(arg) = cli.sweep {
        return run_sweep(&cli, &design_case, arg.into());
    }

    let report = run_sizing(&design_case)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        json::write_report(&mut out, &report)?;
        writeln!(out)?;
    } else {
        summary::write_summary(&mut out, &report)?;
        if cli.chart {
            writeln!(out)?;
            summary::write_constraints(&mut out, &report.constraints, 10)?;
        }
    }

    if let Some(path) = &cli.csv {
        let writer = writer_for_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        csv_report::write_records(writer, &records::flatten(&report))?;
    }

    Ok(())
}

fn run_sweep(cli: &Cli, design_case: &DesignCase, parameter: SweepParameter) -> anyhow::Result<()> {
    let (Some(from), Some(to)) = (cli.from, cli.to) else {
        bail!("--sweep needs both --from and --to");
    };
    if cli.steps < 2 {
        bail!("--steps must be at least 2 (got {})", cli.steps);
    }

    let result = sweep_range(design_case, parameter, from, to, cli.steps);
    let failed = result.points.iter().filter(|p| !p.converged()).count();
    if failed > 0 {
        log::warn!("{failed} of {} sweep points did not size", result.points.len());
    }
    match &cli.csv {
        Some(path) => {
            let writer = writer_for_path(path)
                .with_context(|| format!("opening {}", path.display()))?;
            csv_report::write_sweep(writer, &result)?;
        }
        None => {
            let stdout = io::stdout();
            summary::write_sweep(&mut stdout.lock(), &result)?;
        }
    }
    Ok(())
}
