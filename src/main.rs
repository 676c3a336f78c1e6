use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use treesort::{SortConfig, TreeSorter};

#[derive(Parser, Debug)]
#[command(name = "treesort", about = "Distributed byte sort over a binary process tree")]
struct Cli {
    /// File of raw byte values to sort.
    input: PathBuf,

    /// Total number of workers (root + mergers + leaves); must be odd.
    #[arg(short = 'n', long, default_value_t = 7)]
    world_size: usize,

    /// Skip the unsorted-input echo line.
    #[arg(long)]
    no_echo: bool,

    /// Per-worker progress diagnostics on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let bytes = read_input_bytes(&cli.input)
        .with_context(|| format!("failed to read input from {}", cli.input.display()))?;

    let config = SortConfig::with_world_size(cli.world_size)?;
    let result = TreeSorter::new(config).run(&bytes)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    result.emit(&mut out, !cli.no_echo)?;
    out.flush()?;

    Ok(())
}

/// Read the input file; a missing file is an empty dataset, not an error.
fn read_input_bytes(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "input missing, sorting an empty dataset");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("treesort=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
