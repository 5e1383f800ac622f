//! Brute-force reference solver.
//!
//! Relaxes every edge of the grid until nothing improves (Bellman-Ford).
//! Slow, but it shares nothing with the A* engine except the cost model,
//! which makes it a fair judge of optimality on small grids.

use pathing_core::cost::step_cost;
use pathing_core::math::Fixed;
use pathing_core::node::{neighbors, GridCoord};
use pathing_core::terrain::TierMap;

/// Minimum path cost from `origin` to `goal`, or `None` if either is off-grid.
///
/// # Panics
///
/// Panics if the terrain does not cover its own grid.
#[must_use]
pub fn brute_force_cost(terrain: &TierMap, origin: GridCoord, goal: GridCoord) -> Option<Fixed> {
    let extent = terrain.extent();
    if !origin.in_bounds(extent) || !goal.in_bounds(extent) {
        return None;
    }

    let size = extent as usize;
    let slot = |c: GridCoord| (c.y as usize) * size + (c.x as usize);
    let mut best: Vec<Option<Fixed>> = vec![None; size * size];
    best[slot(origin)] = Some(Fixed::ZERO);

    let cells: Vec<GridCoord> = (0..extent as i32)
        .flat_map(|y| (0..extent as i32).map(move |x| GridCoord::new(x, y)))
        .collect();

    loop {
        let mut changed = false;
        for &from in &cells {
            let Some(base) = best[slot(from)] else {
                continue;
            };
            for to in neighbors(from, extent) {
                let cost = base + step_cost(terrain, from, to).expect("terrain covers grid");
                if best[slot(to)].map_or(true, |known| cost < known) {
                    best[slot(to)] = Some(cost);
                    changed = true;
                }
            }
        }
        if !changed {
            return best[slot(goal)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{cell, flat, tiers_from_rows};
    use pathing_core::cost::DIAGONAL_STEP_COST;

    #[test]
    fn test_flat_costs() {
        let terrain = flat(5);
        assert_eq!(
            brute_force_cost(&terrain, cell(0, 0), cell(2, 0)),
            Some(Fixed::from_num(2))
        );
        assert_eq!(
            brute_force_cost(&terrain, cell(0, 0), cell(0, 0)),
            Some(Fixed::ZERO)
        );
    }

    #[test]
    fn test_off_grid_goal() {
        assert_eq!(brute_force_cost(&flat(3), cell(0, 0), cell(3, 0)), None);
    }

    #[test]
    fn test_detour_around_peak() {
        let terrain = tiers_from_rows(&["050", "000", "000"]);
        let cost = brute_force_cost(&terrain, cell(0, 0), cell(2, 0)).unwrap();
        assert_eq!(cost, DIAGONAL_STEP_COST * Fixed::from_num(2));
    }
}
