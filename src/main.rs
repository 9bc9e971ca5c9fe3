use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;

use zone_finder::import::ImportManager;
use zone_finder::logging;
use zone_finder::models::HeartRateZones;
use zone_finder::window::find_best_window;
use zone_finder::zones::ZoneCalculator;

/// Calculate heart rate training zones from FIT or TCX workout files using
/// the Lactate Threshold Heart Rate (LTHR) method.
///
/// By default the last 20 minutes of the workout are analyzed to estimate
/// LTHR; with --best-window the highest-average 20-minute segment is used
/// instead (useful when a cool-down tail follows the main effort). Five
/// training zones are then derived from percentages of LTHR.
#[derive(Debug, Parser)]
#[command(name = "zone-finder", version, about)]
struct Cli {
    /// Path to a workout file (.tcx or .fit)
    file: PathBuf,

    /// Estimate LTHR from the highest-average 20-minute window instead of
    /// the final 20 minutes
    #[arg(long)]
    best_window: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: u8,
    #[tabled(rename = "Range (bpm)")]
    range: String,
}

fn format_zones(zones: &HeartRateZones) -> String {
    let rows: Vec<ZoneRow> = zones
        .zones
        .iter()
        .map(|z| ZoneRow {
            zone: z.number,
            range: if z.number == 5 {
                format!("{}+", z.min)
            } else {
                format!("{}-{}", z.min, z.max)
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!("LTHR: {} bpm\n{}", zones.lthr, table)
}

fn run(cli: &Cli) -> Result<HeartRateZones> {
    let mut workout = ImportManager::new().import_file(&cli.file)?;

    if let Some(device) = &workout.device_name {
        info!(
            device = %device,
            product_id = ?workout.product_id,
            samples = workout.samples.len(),
            "decoded workout file"
        );
    }

    if cli.best_window {
        ZoneCalculator::sort_by_timestamp(&mut workout.samples);
        let best = find_best_window(&workout.samples)?;
        let lthr = ZoneCalculator::calculate_lthr(best)?;
        Ok(ZoneCalculator::calculate_zones(lthr))
    } else {
        Ok(ZoneCalculator::calculate_zones_from_hr_data(
            &mut workout.samples,
        )?)
    }
}

fn main() -> ExitCode {
    // Usage errors exit 1; --help and --version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(zones) => {
            println!("{}", format_zones(&zones));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
