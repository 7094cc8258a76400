#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Explicit tick loop that drives a Life Sandbox board.
//!
//! The engine never schedules itself. A [`Scheduler`] owns the board, asks a
//! [`FrameClock`] when the next tick is due, advances exactly one generation
//! per tick and hands the finished generation to a presenter closure. A
//! [`StopHandle`] is checked between ticks; a generation that has started is
//! always completed before the loop observes the flag.

mod clock;

pub use clock::{FrameClock, TimerClock, UnpacedClock};

use std::{
    fmt,
    ops::ControlFlow,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use life_sandbox_core::Board;
use life_sandbox_system_automaton::{Engine, GridTooLarge};
use tracing::{debug, info};

/// Shared cancellation flag for a running [`Scheduler`].
///
/// Clones observe and control the same flag, so a handle can be moved to
/// another thread that watches for user input.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests that the loop halts before its next tick.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Clears a previous stop request.
    pub fn resume(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Flips between stopped and running, returning whether the loop is now
    /// stopped.
    pub fn toggle(&self) -> bool {
        !self.stopped.fetch_xor(true, Ordering::SeqCst)
    }

    /// Reports whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Why [`Scheduler::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The stop flag was raised.
    Stopped,
    /// The requested number of generations elapsed.
    LimitReached,
    /// The presenter asked the loop to end.
    PresenterFinished,
}

/// Statistics collected over one call to [`Scheduler::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Generation of the board when the run began.
    pub start_generation: u64,
    /// Generation of the board when the run ended.
    pub end_generation: u64,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
    /// Reason the loop ended.
    pub outcome: RunOutcome,
}

impl RunSummary {
    /// Number of generations advanced during the run.
    #[must_use]
    pub const fn generations(&self) -> u64 {
        self.end_generation - self.start_generation
    }

    /// Average simulation rate, or zero when no time elapsed.
    #[must_use]
    pub fn generations_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.generations() as f64 / seconds
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation: {} | {:.2} generations per second.",
            self.end_generation,
            self.generations_per_second()
        )
    }
}

/// Status text shown while a board is running.
#[must_use]
pub fn status_line(board: &Board) -> String {
    format!("Generation: {}", board.generation())
}

/// Owner of a board and the loop that advances it.
#[derive(Debug)]
pub struct Scheduler {
    board: Board,
    engine: Engine,
    stop: StopHandle,
}

impl Scheduler {
    /// Creates a scheduler for `board` driven by `engine`.
    #[must_use]
    pub fn new(board: Board, engine: Engine) -> Self {
        Self {
            board,
            engine,
            stop: StopHandle::default(),
        }
    }

    /// Current generation of the owned board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Releases the owned board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Engine used for every tick.
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// Handle controlling the stop flag of this scheduler.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Advances exactly one generation and presents it, without scheduling
    /// any further tick.
    ///
    /// An engine failure leaves the board unchanged and skips the presenter.
    pub fn step<F, E>(&mut self, present: F) -> Result<&Board, E>
    where
        F: FnOnce(&Board) -> Result<(), E>,
        E: From<GridTooLarge>,
    {
        self.tick()?;
        present(&self.board)?;
        Ok(&self.board)
    }

    /// Runs ticks until the stop flag is raised, `limit` generations have been
    /// advanced, or `present` returns [`ControlFlow::Break`].
    ///
    /// Errors returned by `present` end the loop and are passed through; the
    /// board keeps the generation that failed to present. Engine failures end
    /// the loop the same way, converted into `E`.
    pub fn run<C, F, E>(
        &mut self,
        clock: &mut C,
        limit: Option<u64>,
        mut present: F,
    ) -> Result<RunSummary, E>
    where
        C: FrameClock + ?Sized,
        F: FnMut(&Board) -> Result<ControlFlow<()>, E>,
        E: From<GridTooLarge>,
    {
        let started = Instant::now();
        let start_generation = self.board.generation();
        info!(
            engine = %self.engine,
            width = self.board.width(),
            height = self.board.height(),
            population = self.board.population(),
            start_generation,
            "simulation started"
        );

        let outcome = loop {
            let advanced = self.board.generation() - start_generation;
            if limit.is_some_and(|limit| advanced >= limit) {
                break RunOutcome::LimitReached;
            }

            clock.wait_for_next_frame();
            if self.stop.is_stopped() {
                break RunOutcome::Stopped;
            }

            self.tick()?;
            if present(&self.board)?.is_break() {
                break RunOutcome::PresenterFinished;
            }
        };

        let summary = RunSummary {
            start_generation,
            end_generation: self.board.generation(),
            elapsed: started.elapsed(),
            outcome,
        };
        info!(
            generations = summary.generations(),
            rate = summary.generations_per_second(),
            outcome = ?summary.outcome,
            "{summary}"
        );
        Ok(summary)
    }

    fn tick(&mut self) -> Result<(), GridTooLarge> {
        self.board = self.engine.advance(&self.board)?;
        debug!(
            generation = self.board.generation(),
            population = self.board.population(),
            "generation advanced"
        );
        Ok(())
    }
}
