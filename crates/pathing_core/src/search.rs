//! Grid-based pathfinding using the A* algorithm.
//!
//! Each search owns its own metadata arena, coordinate index and frontier,
//! so any number of searches can run concurrently against one engine.
//! The engine only reads its collaborators.

use std::collections::HashMap;

use tracing::debug;

use crate::cost::{octile_heuristic, step_cost};
use crate::error::{PathError, Result};
use crate::frontier::Frontier;
use crate::grid::GridMapping;
use crate::math::{Fixed, Vec2Fixed};
use crate::node::{neighbors, GridCoord, MetaArena, MetaId, NodeMeta, VisitedNode};
use crate::path::Path;
use crate::terrain::TerrainCost;

/// Upper bound on up-front allocation for one search.
const MAX_PREALLOCATED_NODES: usize = 1 << 16;

/// A* search over the grid described by `G`, costed by the terrain `T`.
#[derive(Debug, Clone)]
pub struct SearchEngine<G, T> {
    grid: G,
    terrain: T,
}

impl<G: GridMapping, T: TerrainCost> SearchEngine<G, T> {
    /// Create an engine from its collaborators.
    pub fn new(grid: G, terrain: T) -> Self {
        Self { grid, terrain }
    }

    /// The grid mapping collaborator.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// The terrain collaborator.
    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    /// Find a path between two world positions.
    ///
    /// Positions are mapped to cells first; the returned path is in grid
    /// space. `Ok(None)` means the goal is unreachable or off-grid.
    ///
    /// # Errors
    ///
    /// See [`SearchEngine::search`].
    pub fn find(
        &self,
        origin: Vec2Fixed,
        goal: Vec2Fixed,
        diagnostics: bool,
    ) -> Result<Option<Path>> {
        let origin = self.grid.to_grid(origin);
        let goal = self.grid.to_grid(goal);
        self.search(origin, goal, diagnostics)
    }

    /// Find a minimum-cost path between two cells.
    ///
    /// With `diagnostics`, the path also carries every node the search
    /// discovered. This changes what is retained, never the route.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OriginOutOfBounds`] if the origin is off-grid,
    /// [`PathError::MissingTerrain`] if the terrain lacks a tier the search
    /// needs, and [`PathError::CostOverflow`] if a route's cost outgrows
    /// [`Fixed`].
    pub fn search(
        &self,
        origin: GridCoord,
        goal: GridCoord,
        diagnostics: bool,
    ) -> Result<Option<Path>> {
        let extent = self.grid.extent();
        if !origin.in_bounds(extent) {
            return Err(PathError::OriginOutOfBounds { origin, extent });
        }
        if !goal.in_bounds(extent) {
            debug!(%origin, %goal, extent, "Goal outside grid");
            return Ok(None);
        }

        let capacity = ((extent as usize) * (extent as usize)).min(MAX_PREALLOCATED_NODES);
        let mut arena = MetaArena::with_capacity(capacity);
        let mut index: HashMap<GridCoord, MetaId> = HashMap::with_capacity(capacity);
        let mut frontier = Frontier::with_capacity(capacity);

        let start = arena.push(NodeMeta::new(
            origin,
            Fixed::ZERO,
            octile_heuristic(origin, goal),
            None,
        ));
        index.insert(origin, start);
        frontier.insert(&mut arena, start);

        while let Some(current) = frontier.pop_min(&mut arena) {
            let (cell, cost_so_far) = {
                let meta = arena.get(current);
                (meta.cell, meta.cost_from_start)
            };

            // Consistent heuristic: the first time the goal is popped, its route is optimal.
            if cell == goal {
                let path = unroll(&arena, &index, current, diagnostics);
                debug!(
                    %origin,
                    %goal,
                    visited = path.total_visited,
                    length = path.len(),
                    cost = %path.cost,
                    "Path found"
                );
                return Ok(Some(path));
            }

            for next in neighbors(cell, extent) {
                let overflow = || PathError::CostOverflow(next);
                let candidate = cost_so_far
                    .checked_add(step_cost(&self.terrain, cell, next)?)
                    .ok_or_else(overflow)?;

                match index.get(&next).copied() {
                    Some(id) => {
                        let meta = arena.get(id);
                        if candidate >= meta.cost_from_start {
                            continue;
                        }
                        meta.est_cost_to_end.checked_add(candidate).ok_or_else(overflow)?;
                        // Expanded nodes already hold their optimal cost, so an
                        // improved node is always still queued.
                        let previous = arena.get_mut(id).improve(candidate, cell);
                        let requeued = frontier.reposition(&mut arena, id, previous);
                        debug_assert!(requeued, "improved an expanded node at {next}");
                    }
                    None => {
                        let estimate = octile_heuristic(next, goal);
                        estimate.checked_add(candidate).ok_or_else(overflow)?;
                        let id = arena.push(NodeMeta::new(
                            next,
                            candidate,
                            estimate,
                            Some(cell),
                        ));
                        index.insert(next, id);
                        frontier.insert(&mut arena, id);
                    }
                }
            }
        }

        debug!(%origin, %goal, visited = arena.len(), "No path");
        Ok(None)
    }
}

/// Walk parent links back from the goal and reverse into origin-to-goal order.
fn unroll(
    arena: &MetaArena,
    index: &HashMap<GridCoord, MetaId>,
    goal: MetaId,
    diagnostics: bool,
) -> Path {
    let end = arena.get(goal);
    let mut points = vec![end.cell];
    let mut cursor = end.parent;
    while let Some(cell) = cursor {
        points.push(cell);
        cursor = index.get(&cell).and_then(|&id| arena.get(id).parent);
    }
    points.reverse();

    Path {
        points,
        cost: end.cost_from_start,
        total_visited: arena.len(),
        visited: diagnostics.then(|| arena.iter().map(VisitedNode::from).collect()),
    }
}
