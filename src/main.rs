use std::{fs, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use clap::{builder::PossibleValuesParser, Parser};
use sparselife::{
    advance, next_generation_with_radius, pattern, LiveSet, Radius, Sim, SimConfig, View,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Run Conway's game of life on an unbounded plane.
#[derive(Parser, Debug)]
#[command(name = "sparselife", version, about)]
struct Args {
    /// Plaintext pattern file to seed from (`#`, `O` or `*` for live cells).
    pattern: Option<PathBuf>,

    /// Builtin pattern used when no file is given.
    #[arg(long, default_value = "glider", value_parser = PossibleValuesParser::new(pattern::BUILTIN_NAMES.iter().copied()))]
    seed: String,

    /// Neighborhood radius; 1 is the classic 8-cell neighborhood.
    #[arg(long, default_value_t = 1)]
    radius: i64,

    /// Milliseconds between generations.
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// Start with the simulation paused, to edit the seed with the mouse.
    #[arg(long)]
    paused: bool,

    /// Run this many generations without the TUI and print the result.
    #[arg(long)]
    generations: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive("sparselife=info".parse()?),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // the TUI owns the terminal, so stay quiet unless asked
        None => tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("sparselife=warn".parse()?),
            )
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

fn load_seed(args: &Args) -> Result<LiveSet> {
    match &args.pattern {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read pattern: {}", path.display()))?;
            Ok(pattern::parse(&content))
        }
        None => pattern::builtin(&args.seed)
            .with_context(|| format!("Unknown builtin pattern: {}", args.seed)),
    }
}

fn run_headless(seed: &LiveSet, radius: Radius, generations: u64) -> Result<LiveSet> {
    if radius == Radius::MOORE {
        return Ok(advance(seed, generations));
    }
    let mut live = seed.clone();
    for _ in 0..generations {
        if live.is_empty() {
            break;
        }
        live = next_generation_with_radius(&live, radius.get())?;
    }
    Ok(live)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let radius = Radius::new(args.radius).context("Invalid --radius")?;
    let seed = load_seed(&args)?;
    info!(population = seed.len(), "seed loaded");

    if let Some(generations) = args.generations {
        let live = run_headless(&seed, radius, generations)?;
        info!(generations, population = live.len(), "headless run finished");
        match pattern::render(&live) {
            Some(rendered) => print!("{rendered}"),
            None => {
                warn!("pattern too spread out to draw, listing cells instead");
                print!("{}", pattern::render_cells(&live));
            }
        }
        return Ok(());
    }

    let config = SimConfig {
        radius,
        tick_interval: Duration::from_millis(args.tick_ms),
        start_paused: args.paused,
    };
    let simulation = Sim::spawn(seed, config)?;
    let handle = simulation.handle();
    let view = View::spawn(simulation.handle())?;

    let shown = view.join();
    if shown.is_err() {
        // the view normally stops the simulation on exit
        handle.stop().ok();
    }
    shown.context("Terminal view failed")?;
    simulation.join()?;
    Ok(())
}
