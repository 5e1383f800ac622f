//! Search results.

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed};
use crate::node::{GridCoord, VisitedNode};

/// An origin-to-goal route, inclusive of both ends.
///
/// Searches produce `Path<GridCoord>`; the pathfinder hands callers a
/// `Path<Vec2Fixed>` of cell centers in world space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path<P = GridCoord> {
    /// Waypoints from origin to goal.
    pub points: Vec<P>,
    /// Sum of step costs along the route.
    #[serde(with = "fixed_serde")]
    pub cost: Fixed,
    /// Number of distinct nodes discovered by the search.
    pub total_visited: usize,
    /// Every discovered node in discovery order, when diagnostics were requested.
    pub visited: Option<Vec<VisitedNode>>,
}

impl<P> Path<P> {
    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the path has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First waypoint (the origin).
    #[must_use]
    pub fn first(&self) -> Option<&P> {
        self.points.first()
    }

    /// Last waypoint (the goal).
    #[must_use]
    pub fn last(&self) -> Option<&P> {
        self.points.last()
    }

    /// Whether per-node diagnostics were retained.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        self.visited.is_some()
    }

    /// Convert every waypoint, keeping cost and diagnostics.
    pub fn map_points<Q>(self, f: impl FnMut(P) -> Q) -> Path<Q> {
        Path {
            points: self.points.into_iter().map(f).collect(),
            cost: self.cost,
            total_visited: self.total_visited,
            visited: self.visited,
        }
    }
}
