#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure generation update for Life Sandbox boards.
//!
//! [`advance`] derives the next generation from the neighborhoods of the
//! currently live cells only. Every live cell pushes one increment into each
//! of its in-bounds neighbors through a transient candidate map; the B3/S23
//! rule is then applied once per candidate. Positions with no live neighbor
//! never enter the map, so the cost follows the population rather than the
//! board area. [`dense::advance`] is the full-grid scan kept as an
//! alternative engine and as the oracle the sparse engine is checked against.

pub mod dense;

pub use dense::GridTooLarge;

use std::{collections::HashMap, fmt, str::FromStr};

use life_sandbox_core::{Board, Cell, CellCoord};

/// Computes the next generation of `board` by sparse neighbor accumulation.
///
/// The input board is only read. The returned board has the same dimensions,
/// `generation + 1`, and a freshly built live set.
#[must_use]
pub fn advance(board: &Board) -> Board {
    let size = board.size();
    let mut candidates: HashMap<CellCoord, Cell> =
        HashMap::with_capacity(board.population().saturating_mul(8));

    for center in board.live_cells() {
        for neighbor in size.neighbors(center) {
            let _ = candidates
                .entry(neighbor)
                .and_modify(Cell::record_neighbor)
                .or_insert_with(|| Cell::candidate(neighbor, board.is_alive(neighbor)));
        }
    }

    board.successor(
        candidates
            .into_values()
            .filter(Cell::is_alive_next)
            .map(|cell| cell.coord()),
    )
}

/// Selects which update implementation drives a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Sparse neighbor accumulation, proportional to the live population.
    #[default]
    Sparse,
    /// Full-grid double-buffer scan, proportional to the board area.
    Dense,
}

impl Engine {
    /// Every available engine.
    pub const ALL: [Engine; 2] = [Engine::Sparse, Engine::Dense];

    /// Advances `board` by one generation using the selected implementation.
    ///
    /// Only the dense engine can fail, on boards too large for its buffers.
    pub fn advance(self, board: &Board) -> Result<Board, GridTooLarge> {
        match self {
            Self::Sparse => Ok(advance(board)),
            Self::Dense => dense::advance(board),
        }
    }

    /// Short lowercase identifier used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sparse => "sparse",
            Self::Dense => "dense",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownEngine(value.to_owned()))
    }
}

/// Raised when an engine name does not match any [`Engine`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine '{0}' (expected 'sparse' or 'dense')")]
pub struct UnknownEngine(pub String);
