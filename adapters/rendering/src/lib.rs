#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Life Sandbox adapters.
//!
//! A renderer is constructed with the board dimensions and then receives, once
//! per frame, the generation number and the sequence of live cells. It owns
//! its drawing surfaces and must not let a cell that died stay visible in the
//! next frame. The engine never calls into this crate.

mod raster;
mod text;

pub use raster::{Raster, RasterRenderer};
pub use text::{render_frame, TextRenderer};

use anyhow::Result as AnyResult;
use life_sandbox_core::{Board, BoardSize, CellCoord};

/// RGBA color with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
    /// Alpha channel; zero is fully transparent.
    pub alpha: u8,
}

impl Color {
    /// Fully transparent black, the color of an empty surface.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque red, the default color of live cells.
    pub const RED: Self = Self::from_rgb(255, 0, 0);

    /// Creates a color from all four channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Channels in RGBA order.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Reports whether the color leaves the pixel unpainted.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }
}

/// Renderer capable of presenting Life Sandbox generations.
pub trait RenderingBackend {
    /// Dimensions the renderer was constructed for.
    fn surface_size(&self) -> BoardSize;

    /// Paints one frame showing exactly `live_cells`.
    ///
    /// Implementations clear or swap their surface between frames so cells
    /// absent from `live_cells` are not visible afterwards.
    fn present<I>(&mut self, generation: u64, live_cells: I) -> AnyResult<()>
    where
        I: IntoIterator<Item = CellCoord>;

    /// Paints the current generation of `board`.
    fn present_board(&mut self, board: &Board) -> AnyResult<()> {
        self.present(board.generation(), board.live_cells())
    }
}

/// Errors raised by rendering surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderingError {
    /// Surfaces need at least one pixel along each axis.
    #[error("surface dimensions must be positive (received {width}x{height})")]
    InvalidSurface {
        /// Requested surface width.
        width: u32,
        /// Requested surface height.
        height: u32,
    },
    /// The surface holds more pixels than one buffer can address.
    #[error("a {width}x{height} surface is too large to allocate")]
    SurfaceTooLarge {
        /// Requested surface width.
        width: u32,
        /// Requested surface height.
        height: u32,
    },
    /// A live cell does not fit on the surface.
    #[error("cell ({column}, {row}) lies outside the {width}x{height} surface")]
    CellOutOfBounds {
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
    },
}

impl RenderingError {
    pub(crate) const fn out_of_bounds(cell: CellCoord, size: BoardSize) -> Self {
        Self::CellOutOfBounds {
            column: cell.column(),
            row: cell.row(),
            width: size.width(),
            height: size.height(),
        }
    }

    pub(crate) const fn too_large(size: BoardSize) -> Self {
        Self::SurfaceTooLarge {
            width: size.width(),
            height: size.height(),
        }
    }
}

/// Allocates `per_cell` slots for every cell of `size`, filled with `fill`.
///
/// Sizes that overflow or cannot be reserved are reported instead of
/// aborting the process.
pub(crate) fn surface_buffer<T: Clone>(
    size: BoardSize,
    per_cell: usize,
    fill: T,
) -> Result<Vec<T>, RenderingError> {
    let len = usize::try_from(size.area())
        .ok()
        .and_then(|area| area.checked_mul(per_cell))
        .ok_or(RenderingError::too_large(size))?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| RenderingError::too_large(size))?;
    buffer.resize(len, fill);
    Ok(buffer)
}
