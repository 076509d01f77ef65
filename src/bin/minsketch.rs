use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, LevelFilter};

use minsketch::cmd::{compare_paths, ComputeParameters};
use minsketch::compare::{write_csv, write_report, EmptyPolicy};
use minsketch::errors::MinSketchErrorCode;
use minsketch::sketch::minhash::{DEFAULT_KSIZE, DEFAULT_NUM, DEFAULT_SEED};

/// Estimate pairwise Jaccard distances between sequences from MinHash sketches
#[derive(Parser)]
#[command(name = "minsketch", version, long_about = None)]
struct Cli {
    /// FASTA/FASTQ files, or directories holding them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// K-mer length
    #[arg(short, long, default_value_t = DEFAULT_KSIZE)]
    ksize: u32,

    /// Sketch size: number of smallest canonical hashes kept per sequence
    #[arg(short, long, default_value_t = DEFAULT_NUM)]
    num: u32,

    /// Hash seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Skip k-mers with bases other than ACGTN instead of failing
    #[arg(long)]
    force: bool,

    /// Fail when two sequences both have empty sketches (default: distance 0)
    #[arg(long)]
    strict_empty: bool,

    /// Write distances as CSV to this file instead of the plain report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: Cli) -> minsketch::Result<()> {
    let params = ComputeParameters::builder()
        .ksize(cli.ksize)
        .num(cli.num)
        .seed(cli.seed)
        .force(cli.force)
        .empty_policy(if cli.strict_empty {
            EmptyPolicy::Error
        } else {
            EmptyPolicy::Zero
        })
        .build();

    let pairs = compare_paths(&cli.inputs, &params)?;

    match cli.output {
        Some(path) => {
            info!("saving {} distances to \"{}\"", pairs.len(), path.display());
            write_csv(&pairs, File::create(path)?)?;
        }
        None => {
            let stdout = io::stdout();
            write_report(&pairs, &mut stdout.lock())?;
        }
    }

    info!("Done.");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.quiet {
        log::set_max_level(LevelFilter::Warn);
    }

    if let Err(err) = run(cli) {
        error!("{}", err);
        std::process::exit(MinSketchErrorCode::from_error(&err).exit_code());
    }
}
