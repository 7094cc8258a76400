#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core data model shared across the Life Sandbox engine.
//!
//! This crate defines the board that every other crate passes around. A
//! [`Board`] is an owned value: engines read one generation and return the
//! next as a brand new board, seeding replaces its live set wholesale, and
//! renderers only ever see the lazy [`LiveCells`] sequence. Nothing in here
//! knows how generations are computed, scheduled or drawn.

use std::{
    collections::{hash_set, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};

/// Offsets of the eight cells surrounding a center cell, row by row.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Location of a single board cell expressed as column (`x`) and row (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Fixed dimensions of a board. Both axes are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize {
    width: u32,
    height: u32,
}

impl BoardSize {
    /// Validates the provided dimensions.
    pub const fn new(width: u32, height: u32) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Reports whether the coordinate lies within `[0, width) x [0, height)`.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.width && cell.row < self.height
    }

    /// Converts signed coordinates into a cell, returning `None` off the board.
    #[must_use]
    pub fn checked(&self, column: i64, row: i64) -> Option<CellCoord> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        let cell = CellCoord::new(column, row);
        self.contains(cell).then_some(cell)
    }

    /// Enumerates the in-bounds members of the 3x3 neighborhood around `cell`,
    /// excluding `cell` itself.
    ///
    /// Cells along the border get a clipped neighborhood: the board does not
    /// wrap around, so a corner cell has three neighbors and an edge cell five.
    pub fn neighbors(self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let column = i64::from(cell.column);
        let row = i64::from(cell.row);
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dc, dr)| self.checked(column + dc, row + dr))
    }
}

/// Candidate entry accumulated while computing the next generation.
///
/// A `Cell` only exists for the duration of one update: it records whether the
/// position was alive in the generation being read and how many live neighbors
/// have been counted so far. It is never stored on a [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    alive: bool,
    neighbor_count: u8,
}

impl Cell {
    /// Creates a candidate discovered through its first live neighbor.
    #[must_use]
    pub const fn candidate(coord: CellCoord, alive: bool) -> Self {
        Self::with_count(coord, alive, 1)
    }

    /// Creates a candidate with an already known neighbor count.
    #[must_use]
    pub const fn with_count(coord: CellCoord, alive: bool, neighbor_count: u8) -> Self {
        Self {
            coord,
            alive,
            neighbor_count,
        }
    }

    /// Counts one more live neighbor.
    pub fn record_neighbor(&mut self) {
        self.neighbor_count += 1;
    }

    /// Position of the candidate.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Whether the position was alive in the generation being read.
    #[must_use]
    pub const fn was_alive(&self) -> bool {
        self.alive
    }

    /// Live neighbors counted so far.
    #[must_use]
    pub const fn neighbor_count(&self) -> u8 {
        self.neighbor_count
    }

    /// Applies the B3/S23 rule.
    ///
    /// Exactly three neighbors keeps a cell alive or brings it to life through
    /// the same arm; two neighbors only sustain a cell that is already alive.
    #[must_use]
    pub const fn is_alive_next(&self) -> bool {
        matches!((self.alive, self.neighbor_count), (_, 3) | (true, 2))
    }
}

/// Sparse board: the set of live cells, the fixed dimensions and the
/// generation counter.
///
/// The live set never holds a dead cell and never holds a coordinate outside
/// the board. Boards are advanced by building a [`Board::successor`], so a
/// generation is always observed as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    size: BoardSize,
    live_cells: HashSet<CellCoord>,
    generation: u64,
}

impl Board {
    /// Creates an empty board at generation zero.
    pub fn new(width: u32, height: u32) -> Result<Self, BoardError> {
        Ok(Self::with_size(BoardSize::new(width, height)?))
    }

    /// Creates an empty board with already validated dimensions.
    #[must_use]
    pub fn with_size(size: BoardSize) -> Self {
        Self {
            size,
            live_cells: HashSet::new(),
            generation: 0,
        }
    }

    /// Dimensions of the board.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height
    }

    /// Number of updates applied since the board was last seeded.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.live_cells.len()
    }

    /// Reports whether no cell is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_cells.is_empty()
    }

    /// Reports whether the cell is alive in the current generation.
    #[must_use]
    pub fn is_alive(&self, cell: CellCoord) -> bool {
        self.live_cells.contains(&cell)
    }

    /// Lazy sequence of live cells in unspecified order.
    ///
    /// The iterator is finite and can be restarted by cloning it before
    /// consumption or by calling this method again.
    #[must_use]
    pub fn live_cells(&self) -> LiveCells<'_> {
        LiveCells {
            inner: self.live_cells.iter(),
        }
    }

    /// Live cells ordered by column, then row.
    #[must_use]
    pub fn sorted_live_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<_> = self.live_cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Replaces the live set with the provided cells and resets the generation.
    ///
    /// Every coordinate must lie on the board. The first offending coordinate
    /// aborts the call and the board is left untouched. Duplicates collapse
    /// into a single live cell.
    pub fn seed_pattern<I>(&mut self, cells: I) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let size = self.size;
        let live_cells = cells
            .into_iter()
            .map(|cell| {
                if size.contains(cell) {
                    Ok(cell)
                } else {
                    Err(BoardError::out_of_bounds(cell, size))
                }
            })
            .collect::<Result<HashSet<_>, _>>()?;

        self.live_cells = live_cells;
        self.generation = 0;
        Ok(())
    }

    /// Kills every cell and resets the generation.
    pub fn clear(&mut self) {
        self.live_cells.clear();
        self.generation = 0;
    }

    /// Builds the board for the following generation.
    ///
    /// This is the hook update engines return their result through; seeding
    /// goes through [`Board::seed_pattern`] instead. `live_cells` must be the
    /// complete, in-bounds live set of the next generation. Debug builds
    /// assert that contract; release builds drop off-board cells so the live
    /// set never leaves the board.
    #[doc(hidden)]
    #[must_use]
    pub fn successor<I>(&self, live_cells: I) -> Board
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let size = self.size;
        Board {
            size,
            live_cells: live_cells
                .into_iter()
                .filter(|cell| {
                    debug_assert!(
                        size.contains(*cell),
                        "engine produced {cell} outside the {}x{} board",
                        size.width,
                        size.height
                    );
                    size.contains(*cell)
                })
                .collect(),
            generation: self.generation + 1,
        }
    }
}

/// Iterator over the live cells of a [`Board`].
#[derive(Clone, Debug)]
pub struct LiveCells<'board> {
    inner: hash_set::Iter<'board, CellCoord>,
}

impl Iterator for LiveCells<'_> {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for LiveCells<'_> {}

/// Serialized form of a [`Board`]. Cells are written in sorted order so
/// snapshots of equal boards are byte-identical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct BoardSnapshot {
    width: u32,
    height: u32,
    generation: u64,
    cells: Vec<CellCoord>,
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            generation: board.generation,
            cells: board.sorted_live_cells(),
        }
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::new(snapshot.width, snapshot.height)?;
        board.seed_pattern(snapshot.cells)?;
        board.generation = snapshot.generation;
        Ok(board)
    }
}

/// Reasons a board could not be constructed or seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Width and height must both be positive.
    #[error("board dimensions must be positive (received {width}x{height})")]
    InvalidDimensions {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// A seed coordinate fell outside the board.
    #[error("cell ({column}, {row}) lies outside the {width}x{height} board")]
    OutOfBounds {
        /// Column of the rejected cell.
        column: u32,
        /// Row of the rejected cell.
        row: u32,
        /// Number of columns on the board.
        width: u32,
        /// Number of rows on the board.
        height: u32,
    },
}

impl BoardError {
    /// Builds a [`BoardError::OutOfBounds`] for the given cell and board.
    #[must_use]
    pub const fn out_of_bounds(cell: CellCoord, size: BoardSize) -> Self {
        Self::OutOfBounds {
            column: cell.column,
            row: cell.row,
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError, BoardSize, Cell, CellCoord};

    fn board_with(width: u32, height: u32, cells: &[(u32, u32)]) -> Board {
        let mut board = Board::new(width, height).expect("valid dimensions");
        board
            .seed_pattern(cells.iter().map(|&(c, r)| CellCoord::new(c, r)))
            .expect("cells on board");
        board
    }

    #[test]
    fn new_board_is_empty_at_generation_zero() {
        let board = Board::new(8, 5).expect("valid dimensions");
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 5);
        assert_eq!(board.generation(), 0);
        assert!(board.is_empty());
        assert_eq!(board.live_cells().count(), 0);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Board::new(0, 4),
            Err(BoardError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Board::new(4, 0).is_err());
    }

    #[test]
    fn neighbors_of_interior_cell_cover_full_ring() {
        let size = BoardSize::new(5, 5).expect("valid");
        let mut neighbors: Vec<_> = size.neighbors(CellCoord::new(2, 2)).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&CellCoord::new(2, 2)));
        assert!(neighbors.contains(&CellCoord::new(1, 1)));
        assert!(neighbors.contains(&CellCoord::new(3, 3)));
    }

    #[test]
    fn neighbors_are_clipped_at_corners_and_edges() {
        let size = BoardSize::new(4, 3).expect("valid");
        assert_eq!(size.neighbors(CellCoord::new(0, 0)).count(), 3);
        assert_eq!(size.neighbors(CellCoord::new(3, 2)).count(), 3);
        assert_eq!(size.neighbors(CellCoord::new(1, 0)).count(), 5);
        assert!(size
            .neighbors(CellCoord::new(3, 1))
            .all(|cell| cell.column() <= 3 && cell.row() <= 2));
    }

    #[test]
    fn neighbors_on_single_cell_board_are_empty() {
        let size = BoardSize::new(1, 1).expect("valid");
        assert_eq!(size.neighbors(CellCoord::new(0, 0)).count(), 0);
    }

    #[test]
    fn rule_treats_three_neighbors_identically_for_both_states() {
        let coord = CellCoord::new(0, 0);
        assert!(Cell::with_count(coord, false, 3).is_alive_next());
        assert!(Cell::with_count(coord, true, 3).is_alive_next());
        assert!(Cell::with_count(coord, true, 2).is_alive_next());
        assert!(!Cell::with_count(coord, false, 2).is_alive_next());
        assert!(!Cell::with_count(coord, true, 1).is_alive_next());
        assert!(!Cell::with_count(coord, true, 4).is_alive_next());
        assert!(!Cell::with_count(coord, false, 0).is_alive_next());
    }

    #[test]
    fn candidate_accumulates_neighbors() {
        let mut cell = Cell::candidate(CellCoord::new(1, 1), false);
        assert_eq!(cell.neighbor_count(), 1);
        cell.record_neighbor();
        cell.record_neighbor();
        assert_eq!(cell.neighbor_count(), 3);
        assert!(!cell.was_alive());
        assert!(cell.is_alive_next());
    }

    #[test]
    fn seed_pattern_replaces_cells_and_resets_generation() {
        let board = board_with(6, 6, &[(1, 1), (2, 2), (2, 2)]);
        let mut next = board.successor(board.live_cells());
        assert_eq!(next.generation(), 1);

        next.seed_pattern([CellCoord::new(4, 4)])
            .expect("cell on board");
        assert_eq!(next.generation(), 0);
        assert_eq!(next.sorted_live_cells(), vec![CellCoord::new(4, 4)]);
        assert_eq!(board.population(), 2, "duplicates collapse");
    }

    #[test]
    fn seed_pattern_rejects_out_of_bounds_without_mutation() {
        let mut board = board_with(4, 4, &[(0, 0)]);
        let error = board
            .seed_pattern([CellCoord::new(1, 1), CellCoord::new(4, 0)])
            .expect_err("column 4 is off a 4-wide board");

        assert_eq!(
            error,
            BoardError::OutOfBounds {
                column: 4,
                row: 0,
                width: 4,
                height: 4
            }
        );
        assert_eq!(board.sorted_live_cells(), vec![CellCoord::new(0, 0)]);
    }

    #[test]
    fn clear_kills_everything() {
        let mut board = board_with(3, 3, &[(0, 0), (1, 1)]);
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn successor_increments_generation_and_keeps_input() {
        let board = board_with(3, 3, &[(1, 1)]);
        let next = board.successor([CellCoord::new(2, 2), CellCoord::new(0, 1)]);
        assert_eq!(next.generation(), board.generation() + 1);
        assert_eq!(
            next.sorted_live_cells(),
            vec![CellCoord::new(0, 1), CellCoord::new(2, 2)]
        );
        assert!(board.is_alive(CellCoord::new(1, 1)), "input board untouched");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside the 3x3 board")]
    fn successor_rejects_off_board_cells_in_debug_builds() {
        let board = board_with(3, 3, &[(1, 1)]);
        let _ = board.successor([CellCoord::new(2, 2), CellCoord::new(3, 0)]);
    }

    #[test]
    fn live_cells_iterator_is_restartable() {
        let board = board_with(5, 5, &[(0, 0), (1, 2), (4, 4)]);
        let cells = board.live_cells();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells.clone().count(), 3);
        assert_eq!(cells.count(), 3);
        assert_eq!(board.live_cells().count(), 3);
    }

    #[test]
    fn sorted_live_cells_order_by_column_then_row() {
        let board = board_with(5, 5, &[(2, 0), (0, 3), (0, 1)]);
        assert_eq!(
            board.sorted_live_cells(),
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(0, 3),
                CellCoord::new(2, 0)
            ]
        );
    }

    #[test]
    fn board_round_trips_through_bincode() {
        let board = board_with(7, 3, &[(0, 0), (6, 2), (3, 1)]);
        let board = board.successor(board.live_cells());
        let bytes = bincode::serialize(&board).expect("serialize");
        let restored: Board = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, board);
        assert_eq!(restored.generation(), 1);
    }

    #[test]
    fn deserializing_rejects_cells_outside_the_board() {
        let forged = super::BoardSnapshot {
            width: 2,
            height: 2,
            generation: 0,
            cells: vec![CellCoord::new(5, 5)],
        };
        let bytes = bincode::serialize(&forged).expect("serialize");
        assert!(bincode::deserialize::<Board>(&bytes).is_err());
    }
}
