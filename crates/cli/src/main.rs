//! Interactive shell for the pipeline simulator.
//!
//! This binary is a thin adapter over `mupipe-core`: it parses arguments,
//! loads the program, and hands control to the prompt loop in [`shell`].
//! All simulation semantics live in the core.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mupipe_core::{Config, Simulator};

mod shell;

#[derive(Parser, Debug)]
#[command(
    name = "mupipe",
    author,
    version,
    about = "Cycle-accurate 5-stage MIPS-like pipeline simulator",
    long_about = "Loads a flat hex-text program into the text region and drops into an \
                  interactive shell. Type '?' at the prompt for the command list."
)]
struct Cli {
    /// Program file: one hexadecimal 32-bit instruction word per line.
    program: PathBuf,

    /// Optional JSON configuration file (memory map, cache, pipeline).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with operand forwarding disabled (hazards stall instead).
    #[arg(long)]
    no_forwarding: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config file {}", path.display()))?;
            serde_json::from_str::<Config>(&text)
                .with_context(|| format!("cannot parse config file {}", path.display()))?
        }
        None => Config::default(),
    };
    if cli.no_forwarding {
        config.pipeline.forwarding = false;
    }

    let sim = Simulator::from_file(config, &cli.program)
        .context("failed to set up the simulation")?;

    println!("**************************");
    println!("Welcome to MUPIPE...");
    println!("**************************");
    println!(
        "{} words loaded at {:#010x}.\n",
        sim.program().len(),
        sim.config().memory.text_base
    );

    shell::repl(sim)
}
