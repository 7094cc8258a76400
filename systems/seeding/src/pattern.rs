use std::{fmt, str::FromStr};

use life_sandbox_core::{Board, BoardSize, CellCoord};

use crate::{seed_shape, SeedError};

/// Built-in patterns that can be placed at the center of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Three cells in a vertical line; oscillates with period two.
    Blinker,
    /// Two by two square; a still life.
    Block,
    /// Five-cell spaceship travelling down and to the right.
    Glider,
}

impl Pattern {
    /// Every built-in pattern.
    pub const ALL: [Pattern; 3] = [Pattern::Blinker, Pattern::Block, Pattern::Glider];

    /// Lowercase identifier used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blinker => "blinker",
            Self::Block => "block",
            Self::Glider => "glider",
        }
    }

    /// Plaintext drawing of the pattern.
    #[must_use]
    pub const fn drawing(self) -> &'static str {
        match self {
            Self::Blinker => "o\no\no",
            Self::Block => "oo\noo",
            Self::Glider => ".o.\n..o\nooo",
        }
    }

    /// Parsed shape of the pattern.
    #[must_use]
    pub fn shape(self) -> PatternShape {
        PatternShape::parse_drawing(self.drawing()).expect("built-in drawings are valid")
    }

    /// Replaces the live set of `board` with this pattern at the board center.
    ///
    /// The blinker lands on the middle column, covering the middle row and the
    /// rows directly above and below it.
    pub fn seed(self, board: &mut Board) -> Result<(), SeedError> {
        seed_shape(board, &self.shape())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownPattern(value.to_owned()))
    }
}

/// Raised when a pattern name does not match any [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown pattern '{0}' (expected blinker, block or glider)")]
pub struct UnknownPattern(pub String);

/// Set of live cells relative to the top-left corner of their bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternShape {
    offsets: Vec<(u32, u32)>,
    width: u32,
    height: u32,
}

impl PatternShape {
    /// Columns spanned by the bounding box.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Rows spanned by the bounding box.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of live cells in the shape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Reports whether the shape has no live cells, the companion to
    /// [`Self::len`]. Parsing rejects empty drawings, so parsed shapes are
    /// never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Cells of the shape with its top-left corner placed at `origin`.
    ///
    /// Coordinates saturate instead of overflowing; placing the result on a
    /// board reports anything that falls off it.
    pub fn anchored_at(&self, origin: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.offsets.iter().map(move |&(dx, dy)| {
            CellCoord::new(
                origin.column().saturating_add(dx),
                origin.row().saturating_add(dy),
            )
        })
    }

    /// Cells of the shape centered on a board of `size`.
    ///
    /// The center of the bounding box (rounded toward the top-left) lands on
    /// the center cell of the board, `(width / 2, height / 2)`.
    pub fn centered_on(&self, size: BoardSize) -> Result<Vec<CellCoord>, SeedError> {
        if self.width > size.width() || self.height > size.height() {
            return Err(SeedError::PatternTooLarge {
                pattern_width: self.width,
                pattern_height: self.height,
                width: size.width(),
                height: size.height(),
            });
        }
        let origin = CellCoord::new(
            size.width() / 2 - self.width / 2,
            size.height() / 2 - self.height / 2,
        );
        Ok(self.anchored_at(origin).collect())
    }

    fn parse_drawing(drawing: &str) -> Result<Self, PatternParseError> {
        let mut cells = Vec::new();
        let rows = drawing
            .lines()
            .filter(|line| !line.trim_start().starts_with('!'));
        for (row, line) in rows.enumerate() {
            for (column, character) in line.chars().enumerate() {
                match character {
                    'o' | 'O' | '*' => cells.push((column as u32, row as u32)),
                    '.' | ' ' | '\t' => {}
                    _ => {
                        return Err(PatternParseError::UnexpectedCharacter {
                            character,
                            line: row + 1,
                            column: column + 1,
                        })
                    }
                }
            }
        }
        Self::normalized(cells)
    }

    fn normalized(cells: Vec<(u32, u32)>) -> Result<Self, PatternParseError> {
        let (Some(min_x), Some(min_y)) = (
            cells.iter().map(|&(x, _)| x).min(),
            cells.iter().map(|&(_, y)| y).min(),
        ) else {
            return Err(PatternParseError::Empty);
        };

        let mut offsets: Vec<_> = cells
            .into_iter()
            .map(|(x, y)| (x - min_x, y - min_y))
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        let width = offsets.iter().map(|&(x, _)| x).max().unwrap_or(0) + 1;
        let height = offsets.iter().map(|&(_, y)| y).max().unwrap_or(0) + 1;
        Ok(Self {
            offsets,
            width,
            height,
        })
    }
}

impl FromStr for PatternShape {
    type Err = PatternParseError;

    /// Parses a plaintext drawing.
    ///
    /// `o`, `O` and `*` mark live cells; `.`, spaces and tabs are dead. Lines
    /// starting with `!` are comments. Leading blank rows and columns are
    /// dropped, so the shape always starts at its bounding box.
    fn from_str(drawing: &str) -> Result<Self, Self::Err> {
        Self::parse_drawing(drawing)
    }
}

/// Reasons a plaintext drawing could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternParseError {
    /// The drawing used a character other than a live or dead marker.
    #[error("unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        /// Offending character.
        character: char,
        /// One-based line number, not counting comment lines.
        line: usize,
        /// One-based character position within the line.
        column: usize,
    },
    /// The drawing has no live cell.
    #[error("pattern contains no live cells")]
    Empty,
}
