//! Sandpile CLI - load a grid, topple it to a fixed point, report and export.
//!
//! # Examples
//!
//! ```bash
//! # Stabilize, print before/after, write an image
//! sandpile grid.csv --print --output out.png
//!
//! # Smaller partitions on a dedicated 8-thread pool
//! sandpile big.csv --cutoff 16 --threads 8 -v
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sandpile_core::Grid;
use sandpile_engine::{EngineConfig, Sandpile};
use sandpile_render::{write_png, TextGrid};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod input;

/// Abelian sandpile stabilizer
#[derive(Debug, Parser)]
#[command(name = "sandpile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid file: a `rows,cols` header, then one line of heights per row
    input: PathBuf,

    /// Write the settled grid to this PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows below which a partition is toppled sequentially
    #[arg(long, default_value_t = EngineConfig::DEFAULT_CUTOFF)]
    cutoff: usize,

    /// Run on a dedicated pool of this many workers
    #[arg(long)]
    threads: Option<usize>,

    /// Give up after this many changing steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print the grid before and after stabilizing
    #[arg(long)]
    print: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            cutoff: self.cutoff,
            threads: self.threads,
            max_steps: self.max_steps,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let rows = input::parse_grid(&text)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    let grid = Grid::from_rows(&rows)?;
    info!(rows = grid.rows(), cols = grid.cols(), mass = grid.mass(), "grid loaded");

    let mut pile = Sandpile::new(grid, cli.engine_config())?;
    if cli.print {
        print!("{}", TextGrid(pile.grid()));
    }

    let summary = pile.stabilize();
    if cli.print {
        print!("{}", TextGrid(pile.grid()));
    }
    if !cli.quiet {
        println!(
            "Rows: {}, Columns: {}",
            pile.grid().rows(),
            pile.grid().cols()
        );
        println!("Number of steps to stable state: {}", summary.steps);
        println!("Time: {} ms", summary.elapsed.as_millis());
    }
    if !summary.settled {
        warn!(steps = summary.steps, "stopped before reaching a stable state");
    }

    if let Some(path) = &cli.output {
        write_png(pile.grid(), path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "image written");
    }
    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
