use std::io::Write;

use anyhow::Result as AnyResult;
use life_sandbox_core::{BoardSize, CellCoord};

use crate::{surface_buffer, RenderingBackend, RenderingError};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Renders live cells as terminal text, two board rows per line.
///
/// Each character covers one column and a pair of rows using half-block
/// glyphs. The frame ends with a `Generation: N` status line.
pub fn render_frame<I>(
    size: BoardSize,
    generation: u64,
    live_cells: I,
) -> Result<String, RenderingError>
where
    I: IntoIterator<Item = CellCoord>,
{
    let width = size.width() as usize;
    let height = size.height() as usize;
    let mut grid = surface_buffer(size, 1, false)?;
    for cell in live_cells {
        if !size.contains(cell) {
            return Err(RenderingError::out_of_bounds(cell, size));
        }
        grid[cell.row() as usize * width + cell.column() as usize] = true;
    }

    let mut frame = String::new();
    for top in (0..height).step_by(2) {
        for column in 0..width {
            let upper = grid[top * width + column];
            let lower = top + 1 < height && grid[(top + 1) * width + column];
            frame.push(match (upper, lower) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        frame.push('\n');
    }
    frame.push_str(&format!("Generation: {generation}\n"));
    Ok(frame)
}

/// Renderer writing [`render_frame`] output to any [`Write`] sink.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
    size: BoardSize,
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer for boards of `size` writing to `out`.
    pub const fn new(out: W, size: BoardSize) -> Self {
        Self {
            out,
            size,
            clear_screen: false,
        }
    }

    /// Prefixes every frame with an ANSI clear-screen sequence.
    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextRenderer<W> {
    fn surface_size(&self) -> BoardSize {
        self.size
    }

    fn present<I>(&mut self, generation: u64, live_cells: I) -> AnyResult<()>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let frame = render_frame(self.size, generation, live_cells)?;
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
