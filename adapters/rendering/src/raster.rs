use std::{io::Write, mem};

use anyhow::Result as AnyResult;
use life_sandbox_core::{BoardSize, CellCoord};

use crate::{surface_buffer, Color, RenderingBackend, RenderingError};

const CHANNELS: usize = 4;

/// RGBA8 drawing surface with one pixel per board cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    size: BoardSize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a transparent surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderingError> {
        let size = BoardSize::new(width, height)
            .map_err(|_| RenderingError::InvalidSurface { width, height })?;
        Self::for_board(size)
    }

    /// Creates a transparent surface matching a board.
    ///
    /// Fails with [`RenderingError::SurfaceTooLarge`] when the pixels cannot
    /// be held in memory.
    pub fn for_board(size: BoardSize) -> Result<Self, RenderingError> {
        Ok(Self {
            size,
            pixels: surface_buffer(size, CHANNELS, 0)?,
        })
    }

    /// Surface dimensions.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Paints the pixel at `cell`.
    pub fn set(&mut self, cell: CellCoord, color: Color) -> Result<(), RenderingError> {
        let offset = self.offset(cell)?;
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&color.to_bytes());
        Ok(())
    }

    /// Resets the pixel at `cell` to transparent.
    pub fn unset(&mut self, cell: CellCoord) -> Result<(), RenderingError> {
        self.set(cell, Color::TRANSPARENT)
    }

    /// Color of the pixel at `cell`.
    pub fn get(&self, cell: CellCoord) -> Result<Color, RenderingError> {
        let offset = self.offset(cell)?;
        let px = &self.pixels[offset..offset + CHANNELS];
        Ok(Color::new(px[0], px[1], px[2], px[3]))
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Raw RGBA bytes in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of pixels that are not transparent.
    #[must_use]
    pub fn painted(&self) -> usize {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] != 0)
            .count()
    }

    /// Writes the surface as a binary greymap; painted pixels are white.
    pub fn write_pgm<W: Write + ?Sized>(&self, out: &mut W) -> AnyResult<()> {
        out.write_all(
            format!("P5\n{} {}\n255\n", self.size.width(), self.size.height()).as_bytes(),
        )?;
        let grey: Vec<u8> = self
            .pixels
            .chunks_exact(CHANNELS)
            .map(|px| if px[3] == 0 { 0 } else { 255 })
            .collect();
        out.write_all(&grey)?;
        Ok(())
    }

    fn offset(&self, cell: CellCoord) -> Result<usize, RenderingError> {
        if !self.size.contains(cell) {
            return Err(RenderingError::out_of_bounds(cell, self.size));
        }
        let index = cell.row() as usize * self.size.width() as usize + cell.column() as usize;
        Ok(index * CHANNELS)
    }
}

/// Double-buffered renderer painting live cells onto a [`Raster`].
///
/// Each frame is drawn into a cleared back buffer which then becomes the
/// front buffer.
#[derive(Clone, Debug)]
pub struct RasterRenderer {
    front: Raster,
    back: Raster,
    live_color: Color,
    last_generation: Option<u64>,
}

impl RasterRenderer {
    /// Creates a renderer for boards of the given size.
    pub fn new(size: BoardSize) -> Result<Self, RenderingError> {
        Ok(Self {
            front: Raster::for_board(size)?,
            back: Raster::for_board(size)?,
            live_color: Color::RED,
            last_generation: None,
        })
    }

    /// Replaces the color used for live cells.
    #[must_use]
    pub fn with_live_color(mut self, color: Color) -> Self {
        self.live_color = color;
        self
    }

    /// Most recently presented frame.
    #[must_use]
    pub const fn front(&self) -> &Raster {
        &self.front
    }

    /// Generation shown by [`Self::front`], if any frame was presented.
    #[must_use]
    pub const fn last_generation(&self) -> Option<u64> {
        self.last_generation
    }
}

impl RenderingBackend for RasterRenderer {
    fn surface_size(&self) -> BoardSize {
        self.front.size()
    }

    fn present<I>(&mut self, generation: u64, live_cells: I) -> AnyResult<()>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        self.back.clear();
        for cell in live_cells {
            self.back.set(cell, self.live_color)?;
        }
        mem::swap(&mut self.front, &mut self.back);
        self.last_generation = Some(generation);
        Ok(())
    }
}
