#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that seeds a board and runs the Life Sandbox.

mod args;
mod config;

use std::{
    fs::{self, File},
    io::{self, BufRead, BufWriter, Stdout, Write},
    ops::ControlFlow,
    path::Path,
    thread,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use life_sandbox_core::Board;
use life_sandbox_rendering::{RasterRenderer, RenderingBackend, TextRenderer};
use life_sandbox_system_scheduler::{
    status_line, FrameClock, Scheduler, StopHandle, TimerClock, UnpacedClock,
};
use life_sandbox_system_seeding::{random_fill, seed_shape, Density, PatternShape};
use rand::{rngs::OsRng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    args::CliArgs,
    config::{SandboxConfig, Seeding},
};

/// Entry point for the Life Sandbox command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let config = SandboxConfig::load(args.config.as_deref())?.with_overrides(&args);
    let board = build_board(&config)?;
    info!(
        width = board.width(),
        height = board.height(),
        population = board.population(),
        "board seeded"
    );

    let mut terminal = args
        .show
        .then(|| TextRenderer::new(io::stdout(), board.size()).with_clear_screen(!args.step));
    present(terminal.as_mut(), &board)?;

    let mut scheduler = Scheduler::new(board, config.engine);
    if args.step {
        let board = scheduler.step(|board| present(terminal.as_mut(), board))?;
        println!("{}", status_line(board));
    } else {
        let mut clock = frame_clock(config.fps)?;
        spawn_quit_watcher(scheduler.stop_handle());
        let summary = scheduler.run(clock.as_mut(), config.generations, |board| {
            present(terminal.as_mut(), board)?;
            Ok::<_, anyhow::Error>(ControlFlow::Continue(()))
        })?;
        println!("{summary}");
    }

    if let Some(path) = &args.pgm {
        write_pgm(scheduler.board(), path)?;
    }
    if let Some(path) = &args.snapshot {
        write_snapshot(scheduler.board(), path)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Creates the board and populates it as configured.
fn build_board(config: &SandboxConfig) -> Result<Board> {
    let mut board = Board::new(config.width, config.height).context("invalid board size")?;

    if let Some(path) = &config.pattern_file {
        let drawing = fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern file {}", path.display()))?;
        let shape: PatternShape = drawing
            .parse()
            .with_context(|| format!("failed to parse pattern file {}", path.display()))?;
        seed_shape(&mut board, &shape).context("pattern does not fit the board")?;
        return Ok(board);
    }

    match config.pattern {
        Seeding::Pattern(pattern) => {
            pattern
                .seed(&mut board)
                .with_context(|| format!("failed to seed {pattern}"))?;
        }
        Seeding::Random => {
            let density = Density::from_value(config.density)?;
            let seed = config.rng_seed.unwrap_or_else(|| OsRng.gen());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let placed = random_fill(&mut board, density, &mut rng)?;
            info!(seed, placed, "random fill");
        }
    }
    Ok(board)
}

fn frame_clock(fps: f64) -> Result<Box<dyn FrameClock>> {
    if fps == 0.0 {
        return Ok(Box::new(UnpacedClock));
    }
    match TimerClock::from_rate(fps) {
        Some(clock) => Ok(Box::new(clock)),
        None => bail!("fps must be zero or a positive rate (received {fps})"),
    }
}

/// Stops the scheduler once `q` is entered on stdin.
fn spawn_quit_watcher(stop: StopHandle) {
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => {
                    info!("quit requested");
                    stop.stop();
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "stopped watching stdin");
                    return;
                }
            }
        }
    });
}

/// Draws `board` on the terminal when `--show` asked for it.
fn present(terminal: Option<&mut TextRenderer<Stdout>>, board: &Board) -> Result<()> {
    match terminal {
        Some(terminal) => terminal
            .present_board(board)
            .context("failed to draw the board"),
        None => Ok(()),
    }
}

/// Paints the final board once and writes it as a greymap.
fn write_pgm(board: &Board, path: &Path) -> Result<()> {
    let mut raster = RasterRenderer::new(board.size()).context("cannot rasterize the board")?;
    raster.present_board(board)?;

    let file = File::create(path)
        .with_context(|| format!("failed to create image {}", path.display()))?;
    let mut out = BufWriter::new(file);
    raster
        .front()
        .write_pgm(&mut out)
        .with_context(|| format!("failed to write image {}", path.display()))?;
    out.flush()?;
    info!(path = %path.display(), "frame written");
    Ok(())
}

fn write_snapshot(board: &Board, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create snapshot {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, board)
        .with_context(|| format!("failed to serialize board to {}", path.display()))?;
    out.flush()?;
    info!(path = %path.display(), generation = board.generation(), "snapshot written");
    Ok(())
}
