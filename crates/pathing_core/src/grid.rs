//! World/grid coordinate mapping.
//!
//! The search engine works purely in grid space. Conversions to and from
//! world space happen only at the request boundary, through the
//! [`GridMapping`] collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed, Vec2Fixed};
use crate::node::GridCoord;

/// Maps between world positions and cells of a square grid.
pub trait GridMapping: Send + Sync {
    /// Cell containing a world position. May lie off-grid.
    fn to_grid(&self, world: Vec2Fixed) -> GridCoord;

    /// World position of the center of a cell.
    fn cell_center(&self, cell: GridCoord) -> Vec2Fixed;

    /// Side length of the square grid in cells.
    fn extent(&self) -> u32;
}

impl<G: GridMapping + ?Sized> GridMapping for Arc<G> {
    fn to_grid(&self, world: Vec2Fixed) -> GridCoord {
        (**self).to_grid(world)
    }

    fn cell_center(&self, cell: GridCoord) -> Vec2Fixed {
        (**self).cell_center(cell)
    }

    fn extent(&self) -> u32 {
        (**self).extent()
    }
}

/// Errors building a [`SquareGrid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid needs at least one cell.
    #[error("Grid extent must be positive")]
    ZeroExtent,
    /// Cells must have a positive world size.
    #[error("Cell size must be positive, got {0}")]
    NonPositiveCellSize(Fixed),
}

/// A square grid centered on the world origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridShape")]
pub struct SquareGrid {
    /// Grid side length in cells.
    extent: u32,
    /// Size of each cell in world units.
    #[serde(with = "fixed_serde")]
    cell_size: Fixed,
}

impl SquareGrid {
    /// Create a grid of `extent` x `extent` cells.
    ///
    /// # Panics
    ///
    /// Panics if `extent` is zero, or if `cell_size` is not positive.
    #[must_use]
    pub fn new(extent: u32, cell_size: Fixed) -> Self {
        match Self::try_new(extent, cell_size) {
            Ok(grid) => grid,
            Err(err) => panic!("SquareGrid: {err}"),
        }
    }

    /// Create a grid, rejecting an empty extent or a non-positive cell size.
    pub fn try_new(extent: u32, cell_size: Fixed) -> Result<Self, GridError> {
        if extent == 0 {
            return Err(GridError::ZeroExtent);
        }
        if cell_size <= Fixed::ZERO {
            return Err(GridError::NonPositiveCellSize(cell_size));
        }
        Ok(Self { extent, cell_size })
    }

    /// Cell size in world units.
    #[must_use]
    pub const fn cell_size(&self) -> Fixed {
        self.cell_size
    }

    /// World offset of cell (0, 0)'s lower corner from the origin.
    fn half_extent(&self) -> Fixed {
        Fixed::from_num(self.extent / 2) * self.cell_size
    }

    /// Convert a world position to the cell containing it.
    #[must_use]
    pub fn world_to_grid(&self, pos: Vec2Fixed) -> GridCoord {
        let half = self.half_extent();
        let axis = |v: Fixed| ((v + half) / self.cell_size).floor().saturating_to_num::<i32>();
        GridCoord::new(axis(pos.x), axis(pos.y))
    }

    /// Convert grid coordinates to world position (center of cell).
    #[must_use]
    pub fn grid_to_world(&self, cell: GridCoord) -> Vec2Fixed {
        let half_cell = self.cell_size / Fixed::from_num(2);
        let half = self.half_extent();
        Vec2Fixed::new(
            Fixed::from_num(cell.x) * self.cell_size - half + half_cell,
            Fixed::from_num(cell.y) * self.cell_size - half + half_cell,
        )
    }
}

/// Unvalidated serialized form of a [`SquareGrid`].
#[derive(Deserialize)]
struct GridShape {
    extent: u32,
    #[serde(with = "fixed_serde")]
    cell_size: Fixed,
}

impl TryFrom<GridShape> for SquareGrid {
    type Error = GridError;

    fn try_from(shape: GridShape) -> Result<Self, Self::Error> {
        Self::try_new(shape.extent, shape.cell_size)
    }
}

impl Default for SquareGrid {
    /// 100x100 cells of one world unit each.
    fn default() -> Self {
        Self::new(100, Fixed::ONE)
    }
}

impl GridMapping for SquareGrid {
    fn to_grid(&self, world: Vec2Fixed) -> GridCoord {
        self.world_to_grid(world)
    }

    fn cell_center(&self, cell: GridCoord) -> Vec2Fixed {
        self.grid_to_world(cell)
    }

    fn extent(&self) -> u32 {
        self.extent
    }
}
