//! Error types for path searches.

use thiserror::Error;

use crate::node::GridCoord;

/// Result type alias using [`PathError`].
pub type Result<T> = std::result::Result<T, PathError>;

/// Everything that can stop a path request from producing a path.
///
/// [`PathError::NoPath`] is a legitimate outcome rather than a fault; the
/// remaining variants are faults contained at the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The goal is unreachable or lies outside the grid.
    #[error("No path from {origin} to {goal}")]
    NoPath {
        /// Origin cell of the request.
        origin: GridCoord,
        /// Goal cell of the request.
        goal: GridCoord,
    },

    /// The origin lies outside the grid.
    #[error("Origin {origin} outside grid of extent {extent}")]
    OriginOutOfBounds {
        /// Origin cell of the request.
        origin: GridCoord,
        /// Side length of the square grid.
        extent: u32,
    },

    /// The terrain collaborator has no cost tier for a cell.
    #[error("No terrain tier for cell {0}")]
    MissingTerrain(GridCoord),

    /// Accumulated path cost exceeds what `Fixed` can represent.
    #[error("Path cost overflows at cell {0}")]
    CostOverflow(GridCoord),

    /// A search panicked on its worker thread.
    #[error("Search panicked: {0}")]
    SearchPanicked(String),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

impl PathError {
    /// Returns true for the "no path" outcome, false for faults.
    #[must_use]
    pub const fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPath { .. })
    }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
