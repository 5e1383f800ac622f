//! Terrain cost tiers.
//!
//! Terrain is produced elsewhere (a procedural heightmap process); the
//! pathfinder only reads a small integer cost tier per cell. A tier map is
//! immutable, so a search always sees one consistent terrain snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::node::GridCoord;

/// Supplies the terrain cost tier of each cell.
pub trait TerrainCost: Send + Sync {
    /// Cost tier of `cell`, or `None` if the terrain has no data for it.
    fn cost_tier(&self, cell: GridCoord) -> Option<u32>;
}

impl<T: TerrainCost + ?Sized> TerrainCost for Arc<T> {
    fn cost_tier(&self, cell: GridCoord) -> Option<u32> {
        (**self).cost_tier(cell)
    }
}

/// Errors building a [`TierMap`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierMapError {
    /// The data does not cover the grid.
    #[error("Expected {expected} cells for extent {extent}, got {actual}")]
    SizeMismatch {
        /// Grid side length.
        extent: u32,
        /// `extent * extent`.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// Quantizing into zero bands is meaningless.
    #[error("Band count must be positive")]
    NoBands,
}

/// Per-cell cost tiers of a square grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TierRows")]
pub struct TierMap {
    extent: u32,
    tiers: Vec<u32>,
}

/// Unvalidated serialized form of a [`TierMap`].
#[derive(Deserialize)]
struct TierRows {
    extent: u32,
    tiers: Vec<u32>,
}

impl TryFrom<TierRows> for TierMap {
    type Error = TierMapError;

    fn try_from(rows: TierRows) -> Result<Self, Self::Error> {
        Self::from_tiers(rows.extent, rows.tiers)
    }
}

impl TierMap {
    /// Every cell on the same tier.
    #[must_use]
    pub fn uniform(extent: u32, tier: u32) -> Self {
        let cell_count = (extent as usize) * (extent as usize);
        Self {
            extent,
            tiers: vec![tier; cell_count],
        }
    }

    /// Build from explicit row-major tiers.
    pub fn from_tiers(extent: u32, tiers: Vec<u32>) -> Result<Self, TierMapError> {
        let expected = (extent as usize) * (extent as usize);
        if tiers.len() != expected {
            return Err(TierMapError::SizeMismatch {
                extent,
                expected,
                actual: tiers.len(),
            });
        }
        Ok(Self { extent, tiers })
    }

    /// Quantize a row-major heightmap into `bands` equal-width tiers.
    ///
    /// Tier 0 holds the lowest heights, tier `bands - 1` the highest. The
    /// maximum height lands in the last band rather than one past it.
    pub fn from_heights(extent: u32, heights: &[f32], bands: u32) -> Result<Self, TierMapError> {
        if bands == 0 {
            return Err(TierMapError::NoBands);
        }
        let expected = (extent as usize) * (extent as usize);
        if heights.len() != expected {
            return Err(TierMapError::SizeMismatch {
                extent,
                expected,
                actual: heights.len(),
            });
        }

        let (min, max) = heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let span = max - min;

        let tiers = heights
            .iter()
            .map(|&h| {
                if span <= 0.0 {
                    return 0;
                }
                let band = ((h - min) / span * bands as f32).floor() as u32;
                band.min(bands - 1)
            })
            .collect();

        Ok(Self { extent, tiers })
    }

    /// Replace the tier of one cell. Off-grid cells are ignored.
    #[must_use]
    pub fn with_tier(mut self, cell: GridCoord, tier: u32) -> Self {
        if cell.in_bounds(self.extent) {
            if let Some(slot) = self.tiers.get_mut(cell.index(self.extent)) {
                *slot = tier;
            }
        }
        self
    }

    /// Grid side length in cells.
    #[must_use]
    pub const fn extent(&self) -> u32 {
        self.extent
    }

    /// Tier of a cell, `None` if off-grid.
    #[must_use]
    pub fn get(&self, cell: GridCoord) -> Option<u32> {
        if !cell.in_bounds(self.extent) {
            return None;
        }
        self.tiers.get(cell.index(self.extent)).copied()
    }
}

impl TerrainCost for TierMap {
    fn cost_tier(&self, cell: GridCoord) -> Option<u32> {
        self.get(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_map() {
        let map = TierMap::uniform(4, 2);
        assert_eq!(map.get(GridCoord::new(3, 3)), Some(2));
        assert_eq!(map.get(GridCoord::new(4, 0)), None);
        assert_eq!(map.get(GridCoord::new(0, -1)), None);
    }

    #[test]
    fn test_from_tiers_is_row_major() {
        let map = TierMap::from_tiers(2, vec![0, 1, 2, 3]).unwrap();
        assert_eq!(map.get(GridCoord::new(1, 0)), Some(1));
        assert_eq!(map.get(GridCoord::new(0, 1)), Some(2));
    }

    #[test]
    fn test_from_tiers_rejects_wrong_size() {
        let err = TierMap::from_tiers(3, vec![0; 8]).unwrap_err();
        assert_eq!(
            err,
            TierMapError::SizeMismatch {
                extent: 3,
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_with_tier_edits_single_cell() {
        let map = TierMap::uniform(5, 0).with_tier(GridCoord::new(1, 0), 5);
        assert_eq!(map.cost_tier(GridCoord::new(1, 0)), Some(5));
        assert_eq!(map.cost_tier(GridCoord::new(0, 1)), Some(0));

        let unchanged = TierMap::uniform(5, 0).with_tier(GridCoord::new(9, 9), 5);
        assert_eq!(unchanged, TierMap::uniform(5, 0));
    }

    #[test]
    fn test_heights_quantized_into_bands() {
        let heights = [0.0, 1.0, 2.0, 3.0];
        let map = TierMap::from_heights(2, &heights, 4).unwrap();
        assert_eq!(map.get(GridCoord::new(0, 0)), Some(0));
        assert_eq!(map.get(GridCoord::new(1, 0)), Some(1));
        assert_eq!(map.get(GridCoord::new(0, 1)), Some(2));
        // The maximum clamps into the top band.
        assert_eq!(map.get(GridCoord::new(1, 1)), Some(3));
    }

    #[test]
    fn test_flat_heightmap_is_single_tier() {
        let map = TierMap::from_heights(2, &[7.5; 4], 3).unwrap();
        assert_eq!(map, TierMap::uniform(2, 0));
    }

    #[test]
    fn test_deserialize_validates_size() {
        let map = TierMap::from_tiers(2, vec![0, 1, 2, 3]).unwrap();
        let text = ron::to_string(&map).unwrap();
        assert_eq!(ron::from_str::<TierMap>(&text).unwrap(), map);

        let err = ron::from_str::<TierMap>("(extent: 4, tiers: [0, 0])").unwrap_err();
        assert!(err.to_string().contains("Expected 16 cells for extent 4, got 2"));
    }

    #[test]
    fn test_zero_bands_rejected() {
        assert_eq!(
            TierMap::from_heights(1, &[0.0], 0).unwrap_err(),
            TierMapError::NoBands
        );
    }
}
