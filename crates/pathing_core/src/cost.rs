//! Step costs and the search heuristic.
//!
//! A step costs 1 orthogonally and 1.4 diagonally, plus a penalty of
//! [`TIER_PENALTY`] per terrain tier crossed. The heuristic is the octile
//! distance built from the same two step costs, so it never overestimates
//! and never decreases by more than one step's cost along an edge.

use crate::error::{PathError, Result};
use crate::math::Fixed;
use crate::node::GridCoord;
use crate::terrain::TerrainCost;

/// Cost of an orthogonal step on flat terrain.
pub const DIRECT_STEP_COST: Fixed = Fixed::ONE;

/// Cost of a diagonal step on flat terrain.
pub const DIAGONAL_STEP_COST: Fixed = Fixed::lit("1.4");

/// Extra cost per tier of elevation change between two cells.
pub const TIER_PENALTY: u32 = 4;

/// Octile distance from `from` to `to`.
#[inline]
#[must_use]
pub fn octile_heuristic(from: GridCoord, to: GridCoord) -> Fixed {
    let dx = from.x.abs_diff(to.x);
    let dy = from.y.abs_diff(to.y);
    let straight = Fixed::from_num(dx + dy);
    let shortcut = DIAGONAL_STEP_COST - DIRECT_STEP_COST * Fixed::from_num(2);
    DIRECT_STEP_COST * straight + shortcut * Fixed::from_num(dx.min(dy))
}

/// Cost of moving from `from` to the adjacent cell `to`.
///
/// # Errors
///
/// Returns [`PathError::MissingTerrain`] if either cell has no tier, and
/// [`PathError::CostOverflow`] if the tier gap is too large to cost.
pub fn step_cost<T: TerrainCost + ?Sized>(
    terrain: &T,
    from: GridCoord,
    to: GridCoord,
) -> Result<Fixed> {
    let base = if from.is_diagonal_to(to) {
        DIAGONAL_STEP_COST
    } else {
        DIRECT_STEP_COST
    };
    let from_tier = terrain
        .cost_tier(from)
        .ok_or(PathError::MissingTerrain(from))?;
    let to_tier = terrain.cost_tier(to).ok_or(PathError::MissingTerrain(to))?;
    let penalty = from_tier.abs_diff(to_tier).saturating_mul(TIER_PENALTY);
    Fixed::checked_from_num(penalty)
        .and_then(|penalty| base.checked_add(penalty))
        .ok_or(PathError::CostOverflow(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TierMap;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_heuristic_values() {
        assert_eq!(octile_heuristic(c(0, 0), c(0, 0)), Fixed::ZERO);
        assert_eq!(octile_heuristic(c(0, 0), c(2, 0)), Fixed::from_num(2));
        assert_eq!(octile_heuristic(c(0, 0), c(1, 1)), DIAGONAL_STEP_COST);
        // Three diagonal steps plus two straight ones.
        assert_eq!(
            octile_heuristic(c(5, 5), c(0, 2)),
            DIAGONAL_STEP_COST * Fixed::from_num(3) + Fixed::from_num(2)
        );
    }

    #[test]
    fn test_heuristic_is_symmetric() {
        assert_eq!(
            octile_heuristic(c(1, 7), c(4, 2)),
            octile_heuristic(c(4, 2), c(1, 7))
        );
    }

    #[test]
    fn test_flat_step_costs() {
        let flat = TierMap::uniform(3, 0);
        assert_eq!(step_cost(&flat, c(0, 0), c(1, 0)).unwrap(), Fixed::ONE);
        assert_eq!(
            step_cost(&flat, c(0, 0), c(1, 1)).unwrap(),
            DIAGONAL_STEP_COST
        );
    }

    #[test]
    fn test_tier_change_penalized_both_ways() {
        let map = TierMap::uniform(3, 0).with_tier(c(1, 0), 5);
        let up = step_cost(&map, c(0, 0), c(1, 0)).unwrap();
        let down = step_cost(&map, c(1, 0), c(2, 0)).unwrap();
        assert_eq!(up, Fixed::from_num(21));
        assert_eq!(down, Fixed::from_num(21));

        let diagonal = step_cost(&map, c(0, 1), c(1, 0)).unwrap();
        assert_eq!(diagonal, DIAGONAL_STEP_COST + Fixed::from_num(20));
    }

    #[test]
    fn test_heuristic_never_exceeds_flat_step() {
        let flat = TierMap::uniform(7, 0);
        let goal = c(5, 2);
        for x in 0..7 {
            for y in 0..7 {
                let here = c(x, y);
                for next in crate::node::neighbors(here, 7) {
                    let step = step_cost(&flat, here, next).unwrap();
                    assert!(
                        octile_heuristic(here, goal) <= step + octile_heuristic(next, goal),
                        "inconsistent at {here} -> {next}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_huge_tier_gap_overflows() {
        let map = TierMap::uniform(3, 0).with_tier(c(1, 1), 600_000_000);
        assert_eq!(
            step_cost(&map, c(0, 0), c(1, 1)),
            Err(PathError::CostOverflow(c(1, 1)))
        );
        assert_eq!(
            step_cost(&map, c(1, 1), c(2, 2)),
            Err(PathError::CostOverflow(c(2, 2)))
        );

        // Largest gap that still fits.
        let map = TierMap::uniform(3, 0).with_tier(c(1, 0), 500_000_000);
        assert_eq!(
            step_cost(&map, c(0, 0), c(1, 0)).unwrap(),
            Fixed::from_num(2_000_000_001)
        );
    }

    #[test]
    fn test_missing_terrain_reported() {
        let map = TierMap::uniform(2, 0);
        assert_eq!(
            step_cost(&map, c(1, 1), c(2, 2)),
            Err(PathError::MissingTerrain(c(2, 2)))
        );
    }
}
