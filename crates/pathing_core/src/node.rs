//! Search nodes and their per-search bookkeeping.
//!
//! A node is nothing more than a grid coordinate: two coordinates that
//! compare equal are the same node, no matter where they were derived.
//! The graph is implicit; neighbors come from coordinate arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{fixed_serde, Fixed};

/// A cell coordinate on the search grid, and the identity of a search node.
///
/// Signed so that off-grid requests (negative or past the extent) can be
/// represented and rejected instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridCoord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by an offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Check if this coordinate lies on a square grid of side `extent`.
    #[must_use]
    pub fn in_bounds(self, extent: u32) -> bool {
        let inside = |v: i32| u32::try_from(v).is_ok_and(|v| v < extent);
        inside(self.x) && inside(self.y)
    }

    /// True when a step from `self` to `other` changes both axes.
    #[must_use]
    pub const fn is_diagonal_to(self, other: Self) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// Row-major index into a square grid. Caller checks bounds first.
    #[inline]
    #[must_use]
    pub(crate) fn index(self, extent: u32) -> usize {
        (self.y as usize) * (extent as usize) + (self.x as usize)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Neighbor offsets for 8-directional movement, column-major.
///
/// The order is part of the tie-break rule: among equal-cost discoveries the
/// earlier offset is queued first.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// All on-grid neighbors of `cell` (4 orthogonal + 4 diagonal).
pub fn neighbors(cell: GridCoord, extent: u32) -> impl Iterator<Item = GridCoord> {
    NEIGHBOR_OFFSETS
        .iter()
        .map(move |&(dx, dy)| cell.offset(dx, dy))
        .filter(move |n| n.in_bounds(extent))
}

/// Handle of a [`NodeMeta`] inside one search's arena.
///
/// Frontier entries are handles, so two records that tie on cost are still
/// told apart by handle equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaId(pub(crate) u32);

impl MetaId {
    /// Position of the record in the arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-search bookkeeping for one discovered node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMeta {
    /// The node this record describes.
    pub cell: GridCoord,
    /// Accumulated cost of the best known path from the origin.
    pub cost_from_start: Fixed,
    /// Heuristic estimate of the remaining cost to the goal.
    pub est_cost_to_end: Fixed,
    /// `cost_from_start + est_cost_to_end`; the frontier sort key.
    pub total_cost: Fixed,
    /// Predecessor on the best known path, `None` for the origin.
    pub parent: Option<GridCoord>,
    /// Last known frontier index. May be stale; always validated before use.
    pub(crate) queue_hint: Option<usize>,
}

impl NodeMeta {
    /// Create a record with costs computed from its two components.
    #[must_use]
    pub fn new(
        cell: GridCoord,
        cost_from_start: Fixed,
        est_cost_to_end: Fixed,
        parent: Option<GridCoord>,
    ) -> Self {
        Self {
            cell,
            cost_from_start,
            est_cost_to_end,
            total_cost: cost_from_start + est_cost_to_end,
            parent,
            queue_hint: None,
        }
    }

    /// Record a cheaper route to this node. Returns the previous total cost.
    pub fn improve(&mut self, cost_from_start: Fixed, parent: GridCoord) -> Fixed {
        let previous = self.total_cost;
        self.cost_from_start = cost_from_start;
        self.total_cost = cost_from_start + self.est_cost_to_end;
        self.parent = Some(parent);
        previous
    }
}

/// Arena owning every [`NodeMeta`] created during one search.
///
/// Records are never removed, so a [`MetaId`] stays valid until the arena
/// is dropped with the search.
#[derive(Debug, Default)]
pub struct MetaArena {
    records: Vec<NodeMeta>,
}

impl MetaArena {
    /// Create an empty arena with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Store a record and return its handle.
    pub fn push(&mut self, meta: NodeMeta) -> MetaId {
        let id = MetaId(self.records.len() as u32);
        self.records.push(meta);
        id
    }

    /// Borrow a record.
    #[inline]
    #[must_use]
    pub fn get(&self, id: MetaId) -> &NodeMeta {
        &self.records[id.index()]
    }

    /// Mutably borrow a record.
    #[inline]
    pub fn get_mut(&mut self, id: MetaId) -> &mut NodeMeta {
        &mut self.records[id.index()]
    }

    /// Sort key of a record.
    #[inline]
    #[must_use]
    pub fn total_cost(&self, id: MetaId) -> Fixed {
        self.records[id.index()].total_cost
    }

    /// Number of records (distinct nodes discovered).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no node has been discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeMeta> {
        self.records.iter()
    }
}

/// Read-only snapshot of a discovered node, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedNode {
    /// The discovered node.
    pub cell: GridCoord,
    /// Best known cost from the origin when the search ended.
    #[serde(with = "fixed_serde")]
    pub cost_from_start: Fixed,
    /// Frontier sort key when the search ended.
    #[serde(with = "fixed_serde")]
    pub total_cost: Fixed,
    /// Predecessor on the best known path.
    pub parent: Option<GridCoord>,
}

impl From<&NodeMeta> for VisitedNode {
    fn from(meta: &NodeMeta) -> Self {
        Self {
            cell: meta.cell,
            cost_from_start: meta.cost_from_start,
            total_cost: meta.total_cost,
            parent: meta.parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_coordinate_identity() {
        let a = GridCoord::new(3, 4);
        let b = GridCoord::from((3, 4));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_bounds() {
        assert!(GridCoord::new(0, 0).in_bounds(5));
        assert!(GridCoord::new(4, 4).in_bounds(5));
        assert!(!GridCoord::new(5, 0).in_bounds(5));
        assert!(!GridCoord::new(-1, 2).in_bounds(5));
        assert!(!GridCoord::new(0, 0).in_bounds(0));
    }

    #[test]
    fn test_interior_cell_has_eight_neighbors() {
        let around: Vec<_> = neighbors(GridCoord::new(2, 2), 5).collect();
        assert_eq!(around.len(), 8);
        assert!(!around.contains(&GridCoord::new(2, 2)));
    }

    #[test]
    fn test_corner_cell_neighbors_clipped() {
        let around: Vec<_> = neighbors(GridCoord::new(0, 0), 5).collect();
        assert_eq!(
            around,
            vec![
                GridCoord::new(0, 1),
                GridCoord::new(1, 0),
                GridCoord::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_improve_updates_total() {
        let mut meta = NodeMeta::new(
            GridCoord::new(1, 1),
            Fixed::from_num(5),
            Fixed::from_num(2),
            None,
        );
        assert_eq!(meta.total_cost, Fixed::from_num(7));

        let previous = meta.improve(Fixed::from_num(3), GridCoord::new(0, 0));
        assert_eq!(previous, Fixed::from_num(7));
        assert_eq!(meta.total_cost, Fixed::from_num(5));
        assert_eq!(meta.parent, Some(GridCoord::new(0, 0)));
    }

    #[test]
    fn test_arena_handles_distinguish_equal_records() {
        let mut arena = MetaArena::default();
        let meta = NodeMeta::new(GridCoord::new(0, 0), Fixed::ZERO, Fixed::ONE, None);
        let a = arena.push(meta.clone());
        let b = arena.push(meta);
        assert_ne!(a, b);
        assert_eq!(arena.get(a), arena.get(b));
        assert_eq!(arena.len(), 2);
    }
}
