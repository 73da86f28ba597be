//! # Railgen Main Entry Point
//!
//! Parses the command line, wires a content source into the generation
//! pipeline, and persists the output documents.

use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use railgen::{
    convert_train, GenerationConfig, LocalContentSource, RailgenResult, TrainGenerator,
    WagonRecord,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments for the railgen tool.
#[derive(Parser, Debug)]
#[command(name = "railgen")]
#[command(about = "Generates themed train content and reshapes it into game documents")]
#[command(version)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generates a train offline and writes wagons.json plus game_data.json
    Generate {
        /// Theme for the generated wagons
        #[arg(long)]
        theme: String,

        /// Number of themed wagons (1-10)
        #[arg(long, default_value_t = railgen::config::DEFAULT_WAGON_COUNT)]
        wagons: u32,

        /// Minimum passengers per wagon (inclusive)
        #[arg(long, default_value_t = railgen::config::DEFAULT_MIN_PASSENGERS)]
        min_passengers: u32,

        /// Maximum passengers per wagon (inclusive)
        #[arg(long, default_value_t = railgen::config::DEFAULT_MAX_PASSENGERS)]
        max_passengers: u32,

        /// Random seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory receiving the output files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Converts raw wagon files into the combined game document
    Convert {
        /// Raw wagon sequence files, concatenated in argument order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Random seed for reproducible placement
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file for the combined document
        #[arg(long, default_value = "game_data.json")]
        out: PathBuf,
    },
}

fn main() -> RailgenResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("railgen v{}", railgen::VERSION);

    match args.command {
        Command::Generate {
            theme,
            wagons,
            min_passengers,
            max_passengers,
            seed,
            out_dir,
        } => run_generate(theme, wagons, min_passengers, max_passengers, seed, &out_dir),
        Command::Convert { inputs, seed, out } => run_convert(&inputs, seed, &out),
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Generates a train with the offline source and writes both output files.
fn run_generate(
    theme: String,
    wagons: u32,
    min_passengers: u32,
    max_passengers: u32,
    seed: Option<u64>,
    out_dir: &Path,
) -> RailgenResult<()> {
    let config = GenerationConfig {
        theme,
        wagon_count: wagons,
        min_passengers,
        max_passengers,
    };
    let mut rng = build_rng(seed);

    let generator = TrainGenerator::new(LocalContentSource::new());
    let records = generator.generate(&config, &mut rng)?;
    let documents = convert_train(&records, &mut rng)?;

    fs::create_dir_all(out_dir)?;
    let wagons_path = out_dir.join("wagons.json");
    fs::write(&wagons_path, serde_json::to_string_pretty(&records)?)?;
    info!("wrote {}", wagons_path.display());

    let data_path = out_dir.join("game_data.json");
    fs::write(&data_path, serde_json::to_string_pretty(&documents)?)?;
    info!("wrote {}", data_path.display());

    Ok(())
}

/// Reads raw wagon files, concatenates their sequences, and writes the
/// combined document. Duplicate wagon ids across files fail the run.
fn run_convert(inputs: &[PathBuf], seed: Option<u64>, out: &Path) -> RailgenResult<()> {
    let mut records = Vec::new();
    for path in inputs {
        let text = fs::read_to_string(path)?;
        let mut batch: Vec<WagonRecord> = serde_json::from_str(&text)?;
        info!("read {} wagon(s) from {}", batch.len(), path.display());
        records.append(&mut batch);
    }

    let mut rng = build_rng(seed);
    let documents = convert_train(&records, &mut rng)?;

    fs::write(out, serde_json::to_string_pretty(&documents)?)?;
    info!("wrote {}", out.display());

    Ok(())
}

/// Builds the rng from an explicit seed, or entropy when none is given.
fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("seeding rng with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
