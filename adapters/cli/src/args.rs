use std::path::PathBuf;

use clap::Parser;
use life_sandbox_system_automaton::Engine;

use crate::config::Seeding;

/// Command-line options; any value given here overrides the config file.
#[derive(Debug, Parser)]
#[command(
    name = "life-sandbox",
    about = "Runs a Conway's Game of Life sandbox in the terminal."
)]
pub(crate) struct CliArgs {
    /// TOML file providing defaults for the options below.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    pub(crate) width: Option<u32>,

    /// Board height in cells.
    #[arg(long)]
    pub(crate) height: Option<u32>,

    /// Initial population: `random`, `blinker`, `block` or `glider`.
    #[arg(long, value_name = "NAME")]
    pub(crate) pattern: Option<Seeding>,

    /// Plaintext drawing to center on the board instead of a named pattern.
    #[arg(long, value_name = "PATH", conflicts_with = "pattern")]
    pub(crate) pattern_file: Option<PathBuf>,

    /// Fraction of cells to fill, or a whole cell count when at least one.
    #[arg(long)]
    pub(crate) density: Option<f64>,

    /// Seed for the random fill; drawn from the OS when omitted.
    #[arg(long, value_name = "SEED")]
    pub(crate) rng_seed: Option<u64>,

    /// Stop after this many generations.
    #[arg(long, value_name = "COUNT")]
    pub(crate) generations: Option<u64>,

    /// Generations per second; zero runs unpaced.
    #[arg(long)]
    pub(crate) fps: Option<f64>,

    /// Update engine: `sparse` or `dense`.
    #[arg(long)]
    pub(crate) engine: Option<Engine>,

    /// Advance exactly one generation and exit.
    #[arg(long)]
    pub(crate) step: bool,

    /// Draw every generation to stdout.
    #[arg(long)]
    pub(crate) show: bool,

    /// Write the final frame as a binary PGM image.
    #[arg(long, value_name = "PATH")]
    pub(crate) pgm: Option<PathBuf>,

    /// Write the final board as JSON.
    #[arg(long, value_name = "PATH")]
    pub(crate) snapshot: Option<PathBuf>,
}
