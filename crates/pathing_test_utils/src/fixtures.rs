//! Test fixtures and helpers.
//!
//! Pre-built grids and terrain layouts for consistent testing.

use pathing_core::cost::step_cost;
use pathing_core::grid::SquareGrid;
use pathing_core::math::Fixed;
use pathing_core::node::GridCoord;
use pathing_core::terrain::TierMap;

/// Shorthand for a grid coordinate.
#[must_use]
pub fn cell(x: i32, y: i32) -> GridCoord {
    GridCoord::new(x, y)
}

/// A grid of `extent` cells, one world unit each.
#[must_use]
pub fn unit_grid(extent: u32) -> SquareGrid {
    SquareGrid::new(extent, Fixed::ONE)
}

/// Terrain with every cell on tier 0.
#[must_use]
pub fn flat(extent: u32) -> TierMap {
    TierMap::uniform(extent, 0)
}

/// Terrain drawn as rows of digits, top row is `y = 0`.
///
/// # Panics
///
/// Panics if the layout is not square or holds a non-digit.
#[must_use]
pub fn tiers_from_rows(rows: &[&str]) -> TierMap {
    let extent = rows.len() as u32;
    let tiers: Vec<u32> = rows
        .iter()
        .flat_map(|row| {
            assert_eq!(row.len(), rows.len(), "layout must be square");
            row.chars()
                .map(|c| c.to_digit(10).expect("tier digits only"))
        })
        .collect();
    TierMap::from_tiers(extent, tiers).expect("square layout")
}

/// Sum of step costs along `points`.
///
/// # Panics
///
/// Panics if a step leaves the terrain.
#[must_use]
pub fn walk_cost(terrain: &TierMap, points: &[GridCoord]) -> Fixed {
    points
        .windows(2)
        .map(|w| step_cost(terrain, w[0], w[1]).expect("path stays on terrain"))
        .sum()
}

/// Whether consecutive waypoints are distinct 8-neighbors.
#[must_use]
pub fn is_connected(points: &[GridCoord]) -> bool {
    points.windows(2).all(|w| {
        let dx = w[0].x.abs_diff(w[1].x);
        let dy = w[0].y.abs_diff(w[1].y);
        dx <= 1 && dy <= 1 && dx + dy > 0
    })
}
