#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Initial live-cell sets for Life Sandbox boards.
//!
//! Every seeding entry point replaces the live set of a [`Board`] and resets
//! its generation to zero. Random fills validate the requested density before
//! sampling, so the rejection loop always has room to terminate.

mod pattern;

pub use pattern::{Pattern, PatternParseError, PatternShape, UnknownPattern};

use std::collections::HashSet;

use life_sandbox_core::{Board, BoardError, BoardSize, CellCoord};
use rand::Rng;

/// Requested occupancy for [`random_fill`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Density {
    /// Share of the board to fill, in `[0, 1)`.
    Fraction(f64),
    /// Exact number of live cells, strictly below the board area.
    Count(u64),
}

impl Density {
    /// Interprets a raw density value.
    ///
    /// Whole numbers of at least one are cell counts; anything else must be a
    /// fraction in `[0, 1)`.
    pub fn from_value(value: f64) -> Result<Self, SeedError> {
        if !value.is_finite() || value < 0.0 {
            return Err(SeedError::DensityOutOfRange { value });
        }
        if value < 1.0 {
            return Ok(Self::Fraction(value));
        }
        if value.fract() == 0.0 && value <= u64::MAX as f64 {
            return Ok(Self::Count(value as u64));
        }
        Err(SeedError::DensityOutOfRange { value })
    }

    /// Number of live cells this density asks for on a board of `size`.
    pub fn target(self, size: BoardSize) -> Result<u64, SeedError> {
        let capacity = size.area();
        let target = match self {
            Self::Fraction(value) => {
                if !(0.0..1.0).contains(&value) {
                    return Err(SeedError::DensityOutOfRange { value });
                }
                (value * capacity as f64).floor() as u64
            }
            Self::Count(count) => count,
        };
        if target >= capacity {
            return Err(SeedError::TargetExceedsCapacity { target, capacity });
        }
        Ok(target)
    }
}

/// Replaces the live set of `board` with uniformly sampled cells.
///
/// Candidates are drawn as random `(column, row)` pairs and accepted only if
/// not already chosen, until the target count is reached. Returns the number
/// of live cells placed.
pub fn random_fill<R>(board: &mut Board, density: Density, rng: &mut R) -> Result<usize, SeedError>
where
    R: Rng,
{
    let size = board.size();
    let target = density.target(size)?;
    let target = usize::try_from(target).map_err(|_| SeedError::TargetExceedsCapacity {
        target,
        capacity: size.area(),
    })?;

    let mut cells = HashSet::with_capacity(target);
    while cells.len() < target {
        let column = rng.gen_range(0..size.width());
        let row = rng.gen_range(0..size.height());
        let _ = cells.insert(CellCoord::new(column, row));
    }

    board.seed_pattern(cells)?;
    Ok(target)
}

/// Replaces the live set of `board` with `shape` centered on the board.
pub fn seed_shape(board: &mut Board, shape: &PatternShape) -> Result<(), SeedError> {
    let cells = shape.centered_on(board.size())?;
    board.seed_pattern(cells)?;
    Ok(())
}

/// Reasons a board could not be seeded.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SeedError {
    /// The density is negative, not finite, or a fraction at or above one.
    #[error("density {value} must be a fraction in [0, 1) or a whole cell count")]
    DensityOutOfRange {
        /// Rejected density value.
        value: f64,
    },
    /// The requested live cell count would fill the whole board or more.
    #[error("cannot place {target} live cells on a board of {capacity} cells")]
    TargetExceedsCapacity {
        /// Requested number of live cells.
        target: u64,
        /// Number of cells on the board.
        capacity: u64,
    },
    /// The pattern's bounding box is larger than the board.
    #[error("{pattern_width}x{pattern_height} pattern does not fit on a {width}x{height} board")]
    PatternTooLarge {
        /// Columns spanned by the pattern.
        pattern_width: u32,
        /// Rows spanned by the pattern.
        pattern_height: u32,
        /// Columns on the board.
        width: u32,
        /// Rows on the board.
        height: u32,
    },
    /// The board rejected the seed cells.
    #[error(transparent)]
    Board(#[from] BoardError),
}
