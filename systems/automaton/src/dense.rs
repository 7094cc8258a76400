//! Full-grid double-buffer scan.
//!
//! Every position of the board is visited every generation, regardless of
//! how sparse the board is. The live set is first blitted into a front
//! buffer; the next generation is written into a back buffer that is then
//! read back into a fresh board.

use life_sandbox_core::{Board, BoardSize, Cell, CellCoord};

/// Computes the next generation of `board` by scanning every cell.
///
/// Fails when the board is too large to hold in a single buffer.
pub fn advance(board: &Board) -> Result<Board, GridTooLarge> {
    let size = board.size();
    let front = Grid::from_board(board)?;
    let mut back = Grid::empty(size)?;

    for row in 0..size.height() {
        for column in 0..size.width() {
            let coord = CellCoord::new(column, row);
            let neighbor_count = size
                .neighbors(coord)
                .filter(|neighbor| front.get(*neighbor))
                .count();
            let cell = Cell::with_count(coord, front.get(coord), neighbor_count as u8);
            back.set(coord, cell.is_alive_next());
        }
    }

    Ok(board.successor(back.live_cells()))
}

/// Raised when a board has more cells than one buffer can address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a {width}x{height} board is too large for the dense engine")]
pub struct GridTooLarge {
    /// Columns on the rejected board.
    pub width: u32,
    /// Rows on the rejected board.
    pub height: u32,
}

/// Number of buffer slots a dense scan of `size` needs.
pub fn grid_len(size: BoardSize) -> Result<usize, GridTooLarge> {
    usize::try_from(size.area())
        .ok()
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(GridTooLarge {
            width: size.width(),
            height: size.height(),
        })
}

/// Row-major boolean buffer covering the whole board.
struct Grid {
    size: BoardSize,
    cells: Vec<bool>,
}

impl Grid {
    fn empty(size: BoardSize) -> Result<Self, GridTooLarge> {
        let len = grid_len(size)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridTooLarge {
                width: size.width(),
                height: size.height(),
            })?;
        cells.resize(len, false);
        Ok(Self { size, cells })
    }

    fn from_board(board: &Board) -> Result<Self, GridTooLarge> {
        let mut grid = Self::empty(board.size())?;
        for cell in board.live_cells() {
            grid.set(cell, true);
        }
        Ok(grid)
    }

    fn index(&self, cell: CellCoord) -> usize {
        cell.row() as usize * self.size.width() as usize + cell.column() as usize
    }

    fn get(&self, cell: CellCoord) -> bool {
        self.cells[self.index(cell)]
    }

    fn set(&mut self, cell: CellCoord, alive: bool) {
        let index = self.index(cell);
        self.cells[index] = alive;
    }

    fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let width = self.size.width() as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| CellCoord::new((index % width) as u32, (index / width) as u32))
    }
}
