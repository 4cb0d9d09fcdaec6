//! Synthetic data generator for colstat

use anyhow::Result;
use clap::Parser;
use colstat::generator::{DataGenerator, DEFAULT_ROWS};
use colstat::util::logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// colstat-gen - write synthetic CSV input files
#[derive(Parser, Debug)]
#[command(name = "colstat-gen")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to write files into (created if missing)
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Data rows per file
    #[arg(short = 'r', long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of files to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    files: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut generator = match args.seed {
        Some(seed) => DataGenerator::with_seed(args.rows, seed),
        None => DataGenerator::new(args.rows),
    };

    for _ in 0..args.files {
        let path = generator.generate(&args.dir)?;
        info!(path = %path.display(), rows = args.rows, "generated data file");
        println!("{}", path.display());
    }

    Ok(())
}
