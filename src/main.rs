use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use race_tally::output::ScoredDriver;
use race_tally::scoring::MultiplierTable;
use race_tally::telemetry::RaceTelemetryExport;

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_EXPORT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a telemetry export and print the result table
    Score {
        /// Path to the race telemetry export (JSON)
        export: PathBuf,

        /// Race identifier carried into every result record
        /// (defaults to the export file stem)
        #[arg(long)]
        race_id: Option<String>,

        /// Mark this event as double points (recorded with the results,
        /// never applied to the per-race scores)
        #[arg(long)]
        double_points: bool,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Score a telemetry export and write the results for persistence
    Export {
        /// Path to the race telemetry export (JSON)
        export: PathBuf,

        /// Output file for the result envelope (JSON)
        #[arg(short, long)]
        out: PathBuf,

        /// Race identifier carried into every result record
        /// (defaults to the export file stem)
        #[arg(long)]
        race_id: Option<String>,

        /// Mark this event as double points
        #[arg(long)]
        double_points: bool,
    },
    /// Write a starter config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "race-tally")]
#[command(about = "Race result scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/race-tally/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = cli.command {
        match race_tally::config::write_starter_config(config_path) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                println!("Edit the multipliers, then run `race-tally score <export.json>`.");
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config = match race_tally::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the multiplier table at startup
    if let Err(errors) = race_tally::scoring::validate_multipliers(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} team multipliers from config", config.multipliers.len());
    }

    let table: MultiplierTable = config
        .multipliers
        .iter()
        .map(|(team, mult)| (team.as_str(), *mult))
        .collect();

    let (export_path, race_id_flag, double_points_flag) = match &cli.command {
        Commands::Score {
            export,
            race_id,
            double_points,
            ..
        }
        | Commands::Export {
            export,
            race_id,
            double_points,
            ..
        } => (export.clone(), race_id.clone(), *double_points),
        Commands::Init => unreachable!(),
    };

    // Load the telemetry export
    let export = match race_tally::telemetry::load_export(&export_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Export error: {:#}", e);
            std::process::exit(EXIT_EXPORT);
        }
    };

    if cli.verbose {
        log_export_stats(&export);
    }

    let race_id = resolve_race_id(&export_path, race_id_flag);
    let double_points = double_points_flag || config.double_points.unwrap_or(false);

    // Score the race
    let records = match race_tally::scoring::score_race(&export, &table, &race_id) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Export rejected: {}", e);
            std::process::exit(EXIT_EXPORT);
        }
    };

    if cli.verbose {
        eprintln!("Scored {} drivers in {:?}", records.len(), start_time.elapsed());
    }

    // Records come back in classification-data order; pair them with the
    // driver names for display.
    let drivers = export.classification_data.as_deref().unwrap_or_default();
    let mut scored: Vec<ScoredDriver> = drivers
        .iter()
        .zip(records.iter())
        .map(|(driver, record)| ScoredDriver {
            name: &driver.driver_name,
            record,
        })
        .collect();

    match cli.command {
        Commands::Score { tsv, .. } => {
            // Present in race-finishing order
            scored.sort_by_key(|s| (s.record.position, s.record.driver_number));

            if tsv {
                let output = race_tally::output::format_tsv(&scored);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else {
                let use_colors = race_tally::output::should_use_colors();
                if let Some(info) = &export.session_info {
                    if let Some(track) = &info.track_name {
                        match info.session_started {
                            Some(started) => println!("{} - {}", track, started.format("%Y-%m-%d")),
                            None => println!("{}", track),
                        }
                        println!();
                    }
                }
                if cli.verbose && !scored.is_empty() {
                    for driver in &scored {
                        println!("{}", race_tally::output::format_driver_detail(driver, use_colors));
                        println!();
                    }
                } else {
                    println!("{}", race_tally::output::format_results_table(&scored, use_colors));
                }
                if double_points {
                    println!();
                    println!("Double points event: totals above are pre-multiplier.");
                }
            }
        }
        Commands::Export { out, .. } => {
            let envelope = race_tally::sink::ResultEnvelope {
                race_id: race_id.clone(),
                double_points,
                generated_at: chrono::Utc::now(),
                track_name: export
                    .session_info
                    .as_ref()
                    .and_then(|s| s.track_name.clone()),
                session_started: export
                    .session_info
                    .as_ref()
                    .and_then(|s| s.session_started),
                results: records,
            };

            if let Err(e) = race_tally::sink::write_results(&out, &envelope) {
                eprintln!("Failed to write results: {:#}", e);
                std::process::exit(EXIT_IO);
            }

            println!(
                "Wrote {} result records for race '{}' to {}",
                envelope.results.len(),
                race_id,
                out.display()
            );
        }
        Commands::Init => unreachable!(),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Race id defaults to the export file stem when not given explicitly.
fn resolve_race_id(export_path: &Path, flag: Option<String>) -> String {
    flag.unwrap_or_else(|| {
        export_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "race".to_string())
    })
}

fn log_export_stats(export: &RaceTelemetryExport) {
    let driver_count = export.classification_data.as_ref().map_or(0, |d| d.len());
    let overtake_count = export.overtakes.as_ref().map_or(0, |o| o.records.len());
    eprintln!(
        "Loaded export: {} classified drivers, {} overtake records",
        driver_count, overtake_count
    );

    // Overtake entries naming drivers outside the field don't score and
    // don't move the baseline; surface them so data artifacts stay visible.
    if let (Some(drivers), Some(overtakes)) = (&export.classification_data, &export.overtakes) {
        let field: HashSet<String> = drivers.iter().map(|d| d.name_key()).collect();
        let outside = overtakes
            .records
            .iter()
            .filter(|r| !field.contains(&r.overtaking_driver_name.trim().to_lowercase()))
            .count();
        if outside > 0 {
            eprintln!(
                "  {} overtake records name drivers outside the classification (ignored)",
                outside
            );
        }
    }
}
