//! # Pathing Core
//!
//! Grid pathfinding for the RTS simulation: an A* search that runs off the
//! main thread and hands its results back to the main thread at a point the
//! host controls.
//!
//! The crate owns no world geometry and generates no terrain. It reads both
//! through the [`grid::GridMapping`] and [`terrain::TerrainCost`]
//! collaborators, passed in at construction.
//!
//! ## Crate Structure
//!
//! - [`node`] - Grid coordinates, per-search node records, neighbor offsets
//! - [`cost`] - Step costs and the octile heuristic
//! - [`frontier`] - Cost-ordered frontier with in-place reordering
//! - [`search`] - The A* engine
//! - [`dispatch`] - Main-thread callback queue
//! - [`pathfinder`] - Asynchronous path requests over a worker pool
//! - [`grid`], [`terrain`] - Collaborator traits and reference implementations
//! - [`config`] - RON-loadable settings
//!
//! ## Usage
//!
//! ```no_run
//! use pathing_core::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//! let pathfinder = Pathfinder::new(
//!     SquareGrid::new(100, Fixed::ONE),
//!     TierMap::uniform(100, 0),
//!     dispatcher.handle(),
//!     &PathfinderConfig::default(),
//! )
//! .expect("worker pool");
//!
//! pathfinder.find_path(Vec2Fixed::ZERO, Vec2Fixed::from_ints(10, 4), |result| {
//!     if let Ok(path) = result {
//!         println!("{} waypoints", path.len());
//!     }
//! });
//!
//! // Once per host tick:
//! dispatcher.poll();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod cost;
pub mod dispatch;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod math;
pub mod node;
pub mod path;
pub mod pathfinder;
pub mod search;
pub mod terrain;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, FailurePolicy, PathfinderConfig};
    pub use crate::dispatch::{DispatchHandle, Dispatcher};
    pub use crate::error::{PathError, Result};
    pub use crate::grid::{GridError, GridMapping, SquareGrid};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::node::{GridCoord, VisitedNode};
    pub use crate::path::Path;
    pub use crate::pathfinder::{Pathfinder, WorldPath};
    pub use crate::search::SearchEngine;
    pub use crate::terrain::{TerrainCost, TierMap, TierMapError};
}
