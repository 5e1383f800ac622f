//! Cost-ordered frontier of discovered, not yet expanded nodes.
//!
//! The frontier is a sorted sequence of [`MetaId`] handles, ascending by the
//! `total_cost` of the records they point to. Among equal costs, entries keep
//! the order they were queued in. Because costs live in the [`MetaArena`],
//! every operation borrows the arena alongside the frontier.
//!
//! Unlike a binary heap, entries can be found and moved in place when a
//! cheaper route to an already queued node turns up. Lookups are by handle,
//! never by cost alone: several records may tie on cost, and only handle
//! equality says which one is meant.

use std::collections::VecDeque;

use crate::math::Fixed;
use crate::node::{MetaArena, MetaId};

/// Sorted frontier for one search.
#[derive(Debug, Default)]
pub struct Frontier {
    entries: VecDeque<MetaId>,
    /// Number of entries ever popped from the front.
    ///
    /// Position hints are stored as `popped + index`, so popping the minimum
    /// does not invalidate the hints of everything behind it.
    popped: usize,
}

impl Frontier {
    /// Create an empty frontier with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            popped: 0,
        }
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued handles, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = MetaId> + '_ {
        self.entries.iter().copied()
    }

    /// Queue a record after every entry whose cost is less than or equal to
    /// its own.
    pub fn insert(&mut self, arena: &mut MetaArena, id: MetaId) {
        let total = arena.total_cost(id);
        let at = self
            .entries
            .partition_point(|&entry| arena.total_cost(entry) <= total);
        self.entries.insert(at, id);
        self.remember(arena, id, at);
        self.validate(arena);
    }

    /// Remove and return the cheapest entry.
    pub fn pop_min(&mut self, arena: &mut MetaArena) -> Option<MetaId> {
        let id = self.entries.pop_front()?;
        self.popped += 1;
        arena.get_mut(id).queue_hint = None;
        Some(id)
    }

    /// Check whether a record is queued.
    ///
    /// The record's `total_cost` must still be the cost it was queued under.
    #[must_use]
    pub fn contains(&self, arena: &MetaArena, id: MetaId) -> bool {
        self.position(arena, id, arena.total_cost(id)).is_some()
    }

    /// Restore order after a queued record's `total_cost` changed.
    ///
    /// `previous_total` is the cost the record was queued under. The record
    /// moves one slot at a time until its neighbors are in order again.
    /// Returns false if the record was not queued.
    pub fn reposition(&mut self, arena: &mut MetaArena, id: MetaId, previous_total: Fixed) -> bool {
        let Some(mut at) = self.position(arena, id, previous_total) else {
            return false;
        };
        let total = arena.total_cost(id);

        if at > 0 && total < arena.total_cost(self.entries[at - 1]) {
            while at > 0 && total < arena.total_cost(self.entries[at - 1]) {
                let moved = self.entries[at - 1];
                self.entries[at] = moved;
                self.remember(arena, moved, at);
                at -= 1;
            }
        } else if at + 1 < self.entries.len() && total > arena.total_cost(self.entries[at + 1]) {
            while at + 1 < self.entries.len() && total > arena.total_cost(self.entries[at + 1]) {
                let moved = self.entries[at + 1];
                self.entries[at] = moved;
                self.remember(arena, moved, at);
                at += 1;
            }
        }

        self.entries[at] = id;
        self.remember(arena, id, at);
        self.validate(arena);
        true
    }

    /// Check that entries are in non-decreasing cost order.
    #[must_use]
    pub fn is_sorted(&self, arena: &MetaArena) -> bool {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(&a, &b)| arena.total_cost(a) <= arena.total_cost(b))
    }

    /// Index of `id`, assuming it is queued under cost `key`.
    fn position(&self, arena: &MetaArena, id: MetaId, key: Fixed) -> Option<usize> {
        if let Some(at) = self.hinted(arena, id) {
            return Some(at);
        }

        // The record itself may already carry a new cost; it sits where `key` put it.
        let cost_of = |entry: MetaId| {
            if entry == id {
                key
            } else {
                arena.total_cost(entry)
            }
        };
        let start = self.entries.partition_point(|&entry| cost_of(entry) < key);
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .take_while(|&(_, &entry)| cost_of(entry) == key)
            .find_map(|(at, &entry)| (entry == id).then_some(at))
    }

    /// Index from the record's hint, if the hint is still accurate.
    fn hinted(&self, arena: &MetaArena, id: MetaId) -> Option<usize> {
        let at = arena.get(id).queue_hint?.checked_sub(self.popped)?;
        (self.entries.get(at) == Some(&id)).then_some(at)
    }

    fn remember(&self, arena: &mut MetaArena, id: MetaId, at: usize) {
        arena.get_mut(id).queue_hint = Some(self.popped + at);
    }

    #[inline]
    fn validate(&self, arena: &MetaArena) {
        #[cfg(feature = "debug-validation")]
        assert!(self.is_sorted(arena), "frontier lost cost order");
        #[cfg(not(feature = "debug-validation"))]
        let _ = arena;
    }
}
