//! Solve a dense linear system read from a file or stdin
//!
//! Usage:
//!   cargo run --release --bin gauss -- system.txt
//!   cargo run --release --bin gauss -- --format json -o result.json system.txt
//!   cargo run --release --bin gauss -- --generate 5 --seed 42 -o system.txt
//!   cargo run --release --bin gauss -- --help

use clap::{Parser, ValueEnum};
use math_audio_gauss::{
    Dataset, OutputFormat, PivotStrategy, Report, SolverConfig, generate_dataset, read_dataset,
    read_dataset_interactive, write_dataset,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "gauss",
    about = "Solve A·x = b by Gaussian elimination and report determinant and discrepancies"
)]
struct Args {
    /// File to read the system from (stdin if omitted)
    input: Option<PathBuf>,

    /// File to write the result to (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliFormat::Human)]
    format: CliFormat,

    /// Generate a random dataset of size N instead of solving
    #[arg(short, long, value_name = "N")]
    generate: Option<usize>,

    /// Random seed for --generate
    #[arg(long)]
    seed: Option<u64>,

    /// Pivot row selection (overrides --config)
    #[arg(long, value_enum)]
    pivoting: Option<CliPivoting>,

    /// JSON solver configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every elimination step (human format only)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Human,
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(choice: CliFormat) -> Self {
        match choice {
            CliFormat::Human => OutputFormat::Human,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPivoting {
    FirstNonZero,
    MaxMagnitude,
}

impl From<CliPivoting> for PivotStrategy {
    fn from(choice: CliPivoting) -> Self {
        match choice {
            CliPivoting::FirstNonZero => PivotStrategy::FirstNonZero,
            CliPivoting::MaxMagnitude => PivotStrategy::MaxMagnitude,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    if let Some(n) = args.generate {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let dataset = generate_dataset(n, &mut rng).unwrap_or_else(|err| exit_with(err));
        write_dataset(&dataset, &mut out)?;
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading solver configuration from {}", path.display());
            SolverConfig::from_file(path)?
        }
        None => SolverConfig::default(),
    };
    if let Some(pivoting) = args.pivoting {
        config.pivoting = pivoting.into();
    }

    let dataset = load_dataset(args.input.as_ref()).unwrap_or_else(|err| exit_with(err));
    let system = dataset.to_system().unwrap_or_else(|err| exit_with(err));
    let format = OutputFormat::from(args.format);
    let show_steps = args.verbose && format == OutputFormat::Human;

    let mut steps = Vec::new();
    let report = match Report::build_traced(&system, &config, |step| {
        if show_steps {
            steps.push(step.to_string());
        }
    }) {
        Ok(report) => report,
        Err(err) => {
            if err.is_singular() {
                log::warn!("no unique solution; determinant is {}", system.determinant());
            }
            exit_with(err);
        }
    };

    for step in &steps {
        writeln!(out, "{step}")?;
    }
    report.write(format, &mut out)?;

    Ok(())
}

fn load_dataset(input: Option<&PathBuf>) -> Result<Dataset, math_audio_gauss::DatasetError> {
    match input {
        Some(path) => {
            let file = File::open(path)?;
            read_dataset(BufReader::new(file))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                read_dataset_interactive(stdin.lock(), &mut io::stdout())
            } else {
                read_dataset(stdin.lock())
            }
        }
    }
}

fn exit_with(err: impl Display) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}
