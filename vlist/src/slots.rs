use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap as IndexMap;
#[cfg(feature = "std")]
use std::collections::HashMap as IndexMap;

use crate::Range;

/// Handle to a render slot in the recycler's arena.
///
/// Slots are index-addressed rather than referenced by pointer, so "which
/// slot currently fronts index i" is a pure lookup and the payload a slot
/// fronts can live entirely in the external renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Position in the arena, stable for the instance lifetime.
    pub fn arena_index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    bound_index: Option<usize>,
    last_used_tick: u64,
}

/// The slot assignments produced by one reconciliation.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    /// Slots released by indexes that left the render range. A freed slot may
    /// appear again in `claimed` within the same reconciliation.
    pub freed: Vec<SlotId>,
    /// Newly entering indexes and the slot each one claimed.
    pub claimed: Vec<(usize, SlotId)>,
    /// Indexes present in both ranges; their slot binding is unchanged.
    pub retained: Vec<(usize, SlotId)>,
}

/// Assigns a bounded pool of render slots to the indexes inside the render
/// range, reusing slots as the range moves.
///
/// The pool size is fixed at configuration time (max visible + 2·overscan)
/// and never grows. Indexes staying in range keep their slot so the external
/// renderer sees zero churn for them; entering indexes claim released slots,
/// preferring the slot whose previous binding is numerically closest (less
/// perceived jitter when slots carry transient visual state).
#[derive(Clone, Debug)]
pub struct SlotRecycler {
    slots: Vec<Slot>,
    by_index: IndexMap<usize, usize>,
    // Unbound arena positions with the index each last fronted, in release
    // (arrival) order.
    free: Vec<(usize, Option<usize>)>,
    range: Option<Range>,
    tick: u64,
}

impl SlotRecycler {
    pub fn new(capacity: usize) -> Self {
        let slots = alloc::vec![
            Slot {
                bound_index: None,
                last_used_tick: 0,
            };
            capacity
        ];
        let free = (0..capacity).map(|s| (s, None)).collect();
        Self {
            slots,
            by_index: IndexMap::new(),
            free,
            range: None,
            tick: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The range bindings currently reflect.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Which slot currently fronts `index`, if any.
    pub fn slot_for(&self, index: usize) -> Option<SlotId> {
        self.by_index.get(&index).map(|&s| SlotId(s))
    }

    pub fn bound_index(&self, slot: SlotId) -> Option<usize> {
        self.slots.get(slot.0).and_then(|s| s.bound_index)
    }

    pub fn last_used_tick(&self, slot: SlotId) -> u64 {
        self.slots.get(slot.0).map_or(0, |s| s.last_used_tick)
    }

    /// Diffs the new render range against the current bindings.
    ///
    /// Pool exhaustion (more entering indexes than free slots) indicates a
    /// range-math bug upstream; it trips a `debug_assert` and the surplus
    /// indexes are left unclaimed in release builds.
    pub fn reconcile(&mut self, next: Option<Range>) -> Reconciliation {
        self.tick += 1;
        let mut out = Reconciliation::default();

        // Release leavers first so their slots are claimable below.
        let leavers: Vec<(usize, usize)> = self
            .by_index
            .iter()
            .filter(|&(&index, _)| !next.is_some_and(|r| r.contains(index)))
            .map(|(&index, &slot)| (index, slot))
            .collect();
        for (index, slot) in leavers {
            self.by_index.remove(&index);
            self.slots[slot].bound_index = None;
            self.free.push((slot, Some(index)));
            out.freed.push(SlotId(slot));
        }

        let Some(next_range) = next else {
            self.range = None;
            return out;
        };

        let mut entering: Vec<usize> = Vec::new();
        for index in next_range.iter() {
            if let Some(&slot) = self.by_index.get(&index) {
                self.slots[slot].last_used_tick = self.tick;
                out.retained.push((index, SlotId(slot)));
            } else {
                entering.push(index);
            }
        }

        debug_assert!(
            entering.len() <= self.free.len(),
            "render range exceeds slot pool (entering={}, free={}, capacity={})",
            entering.len(),
            self.free.len(),
            self.capacity()
        );

        for index in entering {
            let Some(pick) = self.pick_free_slot(index) else {
                lwarn!(index, capacity = self.capacity(), "slot pool exhausted");
                break;
            };
            let (slot, _) = self.free.remove(pick);
            self.slots[slot] = Slot {
                bound_index: Some(index),
                last_used_tick: self.tick,
            };
            self.by_index.insert(index, slot);
            out.claimed.push((index, SlotId(slot)));
        }

        self.range = Some(next_range);
        out
    }

    /// Unbinds everything; slots survive, their bindings do not.
    pub fn reset(&mut self) {
        self.by_index.clear();
        self.free.clear();
        for (s, slot) in self.slots.iter_mut().enumerate() {
            slot.bound_index = None;
            self.free.push((s, None));
        }
        self.range = None;
    }

    // Nearest previously-bound index wins; slots that never fronted anything
    // are taken in release order as a fallback.
    fn pick_free_slot(&self, claiming: usize) -> Option<usize> {
        if self.free.is_empty() {
            return None;
        }
        let mut best: Option<(usize, u64)> = None;
        for (pos, &(_, prev)) in self.free.iter().enumerate() {
            let Some(prev) = prev else { continue };
            let dist = prev.abs_diff(claiming) as u64;
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((pos, dist));
            }
        }
        Some(best.map_or(0, |(pos, _)| pos))
    }
}
