use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::size::SizeStrategy;

/// Cumulative-offset structure over a [`SizeStrategy`].
///
/// Offsets are measured in content ("virtual") space from the start of the
/// first item. `offset_of(i + 1) - offset_of(i)` always equals `size_of(i)`,
/// and offsets are monotonically non-decreasing.
///
/// With `SizeStrategy::Fixed` no table is kept: lookups are O(1) arithmetic.
/// With `SizeStrategy::PerIndex` resolved sizes are cached in a vector and
/// summed by a Fenwick tree, so `index_at` is O(log n) and a single-item
/// resize is an O(log n) point update.
#[derive(Clone, Debug)]
pub struct OffsetIndex {
    strategy: SizeStrategy,
    len: usize,
    // Variable-size path only; both stay empty for the fixed fast path.
    sizes: Vec<u32>,
    sums: Fenwick,
}

impl OffsetIndex {
    pub fn new(strategy: SizeStrategy, len: usize) -> Self {
        let mut idx = Self {
            strategy,
            len: 0,
            sizes: Vec::new(),
            sums: Fenwick::new(0),
        };
        idx.rebuild(len);
        idx
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn strategy(&self) -> &SizeStrategy {
        &self.strategy
    }

    /// Re-resolves every size and rebuilds the cumulative table, O(n).
    ///
    /// Any structural mutation can fall back to this; the incremental patch
    /// entry points below exist to avoid it on the common paths.
    pub fn rebuild(&mut self, len: usize) {
        self.len = len;
        if self.strategy.is_fixed() {
            return;
        }
        self.sizes.clear();
        self.sizes.reserve_exact(len);
        for i in 0..len {
            self.sizes.push(self.strategy.resolve(i));
        }
        self.sums = Fenwick::from_sizes(&self.sizes);
    }

    /// Start offset of `index`. `offset_of(len)` is the total extent.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.len);
        match &self.strategy {
            SizeStrategy::Fixed(extent) => index as u64 * *extent as u64,
            SizeStrategy::PerIndex(_) => self.sums.prefix_sum(index),
        }
    }

    pub fn size_of(&self, index: usize) -> u32 {
        if index >= self.len {
            return 0;
        }
        match &self.strategy {
            SizeStrategy::Fixed(extent) => *extent,
            SizeStrategy::PerIndex(_) => self.sizes[index],
        }
    }

    /// Maps a content-space offset to the index of the item occupying it.
    ///
    /// Offsets at or past the total extent clamp to the last item; `None`
    /// only for an empty collection.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        let index = match &self.strategy {
            SizeStrategy::Fixed(extent) => {
                debug_assert!(*extent > 0, "fixed extent must be validated non-zero");
                (offset / (*extent).max(1) as u64).min(last as u64) as usize
            }
            SizeStrategy::PerIndex(_) => self.sums.lower_bound(offset).min(last),
        };
        Some(index)
    }

    pub fn total_extent(&self) -> u64 {
        match &self.strategy {
            SizeStrategy::Fixed(extent) => self.len as u64 * *extent as u64,
            SizeStrategy::PerIndex(_) => self.sums.total(),
        }
    }

    /// Appends `count` items resolved at their final indexes.
    ///
    /// Tail-continuing: existing offsets are untouched, O(count · log n).
    pub fn append(&mut self, count: usize) {
        let new_len = self.len + count;
        if !self.strategy.is_fixed() {
            self.sizes.reserve(count);
            for i in self.len..new_len {
                let size = self.strategy.resolve(i);
                self.sizes.push(size);
                self.sums.push_value(size as u64);
            }
        }
        self.len = new_len;
    }

    /// Prepends `count` items, resolved at their new front indexes.
    ///
    /// Every existing cumulative offset shifts up by the summed extent of the
    /// new items; item *indexes* shift by `count` but each item keeps its
    /// cached size, so anchors expressed as `{index + count, offset_in_item}`
    /// stay visually stable. This is the classic off-by-one / scroll-jump
    /// hazard: callers holding absolute offsets must re-derive them.
    ///
    /// Returns the extent added before the old first item.
    pub fn prepend(&mut self, count: usize) -> u64 {
        self.insert(0, count)
    }

    /// Inserts `count` items before `at` (clamped to `len`).
    ///
    /// Returns the total extent of the inserted items. O(n) tree rebuild; the
    /// surviving sizes are kept verbatim rather than re-resolved.
    pub fn insert(&mut self, at: usize, count: usize) -> u64 {
        let at = at.min(self.len);
        let new_len = self.len + count;
        let added = match &self.strategy {
            SizeStrategy::Fixed(extent) => count as u64 * *extent as u64,
            SizeStrategy::PerIndex(_) => {
                let fresh: Vec<u32> = (at..at + count).map(|i| self.strategy.resolve(i)).collect();
                let added: u64 = fresh.iter().map(|&s| s as u64).sum();
                self.sizes.splice(at..at, fresh);
                self.sums = Fenwick::from_sizes(&self.sizes);
                added
            }
        };
        self.len = new_len;
        added
    }

    /// Removes `count` items starting at `at` (clamped to bounds).
    ///
    /// Returns the extent removed. O(n) tree rebuild on the variable path.
    pub fn remove(&mut self, at: usize, count: usize) -> u64 {
        let at = at.min(self.len);
        let count = count.min(self.len - at);
        if count == 0 {
            return 0;
        }
        let removed = match &self.strategy {
            SizeStrategy::Fixed(extent) => count as u64 * *extent as u64,
            SizeStrategy::PerIndex(_) => {
                let removed: u64 = self.sizes[at..at + count].iter().map(|&s| s as u64).sum();
                self.sizes.drain(at..at + count);
                self.sums = Fenwick::from_sizes(&self.sizes);
                removed
            }
        };
        self.len -= count;
        removed
    }

    /// Smallest per-item extent, used to bound how many items can share a
    /// viewport.
    pub(crate) fn min_size(&self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        match &self.strategy {
            SizeStrategy::Fixed(extent) => Some(*extent),
            SizeStrategy::PerIndex(_) => self.sizes.iter().copied().min(),
        }
    }

    /// Replaces the extent of one item, adjusting every later offset.
    ///
    /// Returns the signed extent delta. O(log n) point update. A resize on
    /// the fixed-size path is ignored: per-item corrections only make sense
    /// when sizes are per-index.
    pub fn resize(&mut self, index: usize, extent: u32) -> i64 {
        if index >= self.len {
            return 0;
        }
        match &self.strategy {
            SizeStrategy::Fixed(_) => {
                lwarn!(index, extent, "resize ignored for fixed-size strategy");
                0
            }
            SizeStrategy::PerIndex(_) => {
                let cur = self.sizes[index];
                if cur == extent {
                    return 0;
                }
                let delta = extent as i64 - cur as i64;
                self.sizes[index] = extent;
                self.sums.add(index, delta);
                delta
            }
        }
    }
}
