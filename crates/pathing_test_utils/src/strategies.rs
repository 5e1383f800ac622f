//! Proptest strategies for terrain, routes and frontier operations.

use std::ops::RangeInclusive;

use pathing_core::node::GridCoord;
use pathing_core::terrain::TierMap;
use proptest::prelude::*;

/// Any on-grid cell of a grid with side `extent`.
pub fn arb_cell(extent: u32) -> impl Strategy<Value = GridCoord> {
    let extent = extent as i32;
    (0..extent, 0..extent).prop_map(|(x, y)| GridCoord::new(x, y))
}

/// Random terrain with side length in `extents` and tiers up to `max_tier`.
pub fn arb_tier_map(
    extents: RangeInclusive<u32>,
    max_tier: u32,
) -> impl Strategy<Value = TierMap> {
    extents.prop_flat_map(move |extent| {
        let cells = (extent as usize) * (extent as usize);
        proptest::collection::vec(0..=max_tier, cells).prop_map(move |tiers| {
            TierMap::from_tiers(extent, tiers).expect("tiers sized to extent")
        })
    })
}

/// Random terrain together with an origin and goal on it.
pub fn arb_route(
    extents: RangeInclusive<u32>,
    max_tier: u32,
) -> impl Strategy<Value = (TierMap, GridCoord, GridCoord)> {
    arb_tier_map(extents, max_tier).prop_flat_map(|terrain| {
        let extent = terrain.extent();
        (Just(terrain), arb_cell(extent), arb_cell(extent))
    })
}

/// One step of a frontier workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontierOp {
    /// Queue a new record with this cost.
    Insert(i32),
    /// Change the cost of a queued record (picked modulo queue length) by `delta`.
    Adjust {
        /// Which queued record.
        pick: usize,
        /// Signed cost change.
        delta: i32,
    },
    /// Pop the cheapest record.
    Pop,
}

/// Sequences of frontier operations, biased toward inserts and decreases.
pub fn arb_frontier_ops(max_len: usize) -> impl Strategy<Value = Vec<FrontierOp>> {
    let op = prop_oneof![
        4 => (0i32..20).prop_map(FrontierOp::Insert),
        3 => (any::<usize>(), -10i32..0).prop_map(|(pick, delta)| FrontierOp::Adjust { pick, delta }),
        1 => (any::<usize>(), 1i32..10).prop_map(|(pick, delta)| FrontierOp::Adjust { pick, delta }),
        2 => Just(FrontierOp::Pop),
    ];
    proptest::collection::vec(op, 0..max_len)
}
