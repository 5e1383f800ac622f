//! Route scenario loading.
//!
//! A scenario is a small terrain drawn as digit rows plus one request to
//! route across it.

use std::path::Path;

use pathing_core::config::PathfinderConfig;
use pathing_core::grid::SquareGrid;
use pathing_core::math::Fixed;
use pathing_core::node::GridCoord;
use pathing_core::terrain::{TierMap, TierMapError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Terrain rows do not describe a square grid of tiers.
    #[error("Invalid terrain: {0}")]
    InvalidTerrain(String),
    /// Terrain could not be built.
    #[error(transparent)]
    Terrain(#[from] TierMapError),
}

/// A terrain and one path request across it.
///
/// # Example RON
///
/// ```ron
/// RouteScenario(
///     name: "ridge",
///     cell_size: 1,
///     tiers: [
///         "0010",
///         "0010",
///         "0000",
///         "0010",
///     ],
///     origin: (0, 0),
///     target: (3, 0),
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteScenario {
    /// Scenario name.
    pub name: String,
    /// World units per cell.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Terrain tiers, one digit per cell, first row is `y = 0`.
    pub tiers: Vec<String>,
    /// Origin cell.
    pub origin: (i32, i32),
    /// Target cell; may lie off the terrain.
    pub target: (i32, i32),
    /// Pathfinder settings.
    #[serde(default)]
    pub config: PathfinderConfig,
}

const fn default_cell_size() -> u32 {
    1
}

impl RouteScenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: RouteScenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Check that the scenario can be routed.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.cell_size == 0 {
            return Err(ScenarioError::InvalidTerrain(
                "cell_size must be positive".to_string(),
            ));
        }
        self.config
            .validate()
            .map_err(|e| ScenarioError::InvalidTerrain(e.to_string()))?;
        self.terrain().map(|_| ())
    }

    /// Grid side length in cells.
    #[must_use]
    pub fn extent(&self) -> u32 {
        self.tiers.len() as u32
    }

    /// The grid the terrain sits on, centered on the world origin.
    #[must_use]
    pub fn grid(&self) -> SquareGrid {
        SquareGrid::new(self.extent().max(1), Fixed::from_num(self.cell_size.max(1)))
    }

    /// Parse the digit rows into a tier map.
    pub fn terrain(&self) -> Result<TierMap, ScenarioError> {
        let extent = self.tiers.len();
        if extent == 0 {
            return Err(ScenarioError::InvalidTerrain("no rows".to_string()));
        }

        let mut tiers = Vec::with_capacity(extent * extent);
        for (y, row) in self.tiers.iter().enumerate() {
            if row.chars().count() != extent {
                return Err(ScenarioError::InvalidTerrain(format!(
                    "row {y} has {} cells, expected {extent}",
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let tier = c.to_digit(10).ok_or_else(|| {
                    ScenarioError::InvalidTerrain(format!("cell ({x}, {y}) is '{c}', not a digit"))
                })?;
                tiers.push(tier);
            }
        }
        Ok(TierMap::from_tiers(extent as u32, tiers)?)
    }

    /// Origin as a grid coordinate.
    #[must_use]
    pub fn origin_cell(&self) -> GridCoord {
        self.origin.into()
    }

    /// Target as a grid coordinate.
    #[must_use]
    pub fn target_cell(&self) -> GridCoord {
        self.target.into()
    }
}
