use crate::index::OffsetIndex;
use crate::mapper::ScrollSpaceMapper;
use crate::options::ListOptions;
use crate::range::RangeCalculator;
use crate::slots::{Reconciliation, SlotRecycler};
use crate::velocity::VelocityTracker;
use crate::{Direction, FrameUpdate, LoadBatch, Range, ScrollSnapshot, ThumbState, VlistError};

/// Where to place the target item when jumping to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset when the item is already fully visible,
    /// otherwise scroll the minimal distance.
    Auto,
}

/// A headless virtual list engine.
///
/// Owns one of each core component and drives the per-event pipeline: a raw
/// host scroll offset is decompressed into content space, the render range is
/// computed over the offset index, and slot assignments are diffed against
/// the previous range. The velocity tracker updates from the same offset
/// stream.
///
/// All work is synchronous; the engine never blocks and never awaits. The
/// asynchronous loader at the boundary delivers [`LoadBatch`]es through
/// [`Self::apply_batch`], which drops anything from a stale generation.
///
/// Computation vs application are split so scroll events can outpace the
/// consumer: [`Self::on_scroll`] hands back a sequence-numbered
/// [`FrameUpdate`], and [`Self::commit`] refuses updates older than one
/// already committed.
#[derive(Clone, Debug)]
pub struct VirtualList {
    index: OffsetIndex,
    calc: RangeCalculator,
    mapper: ScrollSpaceMapper,
    recycler: SlotRecycler,
    velocity: VelocityTracker,
    viewport_extent: u32,
    overscan: usize,
    /// Direction-local scroll coordinate: in reverse mode, 0 means the last
    /// item is on screen.
    scroll_offset: u64,
    next_seq: u64,
    committed_seq: Option<u64>,
    generation: u64,
    loaded_count: usize,
    has_more: bool,
}

impl VirtualList {
    pub fn new(options: ListOptions) -> Result<Self, VlistError> {
        options.validate()?;
        let index = OffsetIndex::new(options.size.clone(), options.count);
        let mapper = ScrollSpaceMapper::new(index.total_extent());
        let capacity = options
            .slot_capacity
            .unwrap_or_else(|| derive_slot_capacity(&index, options.viewport_extent, options.overscan));
        ldebug!(
            count = options.count,
            viewport = options.viewport_extent,
            overscan = options.overscan,
            slot_capacity = capacity,
            "VirtualList::new"
        );
        Ok(Self {
            calc: RangeCalculator::new(options.overscan, options.direction),
            recycler: SlotRecycler::new(capacity),
            velocity: VelocityTracker::new(options.velocity_window, options.velocity_staleness_ms),
            viewport_extent: options.viewport_extent,
            overscan: options.overscan,
            scroll_offset: 0,
            next_seq: 0,
            committed_seq: None,
            generation: 0,
            loaded_count: options.count,
            has_more: options.has_more,
            index,
            mapper,
        })
    }

    pub fn count(&self) -> usize {
        self.index.len()
    }

    pub fn total_extent(&self) -> u64 {
        self.index.total_extent()
    }

    pub fn viewport_extent(&self) -> u32 {
        self.viewport_extent
    }

    pub fn direction(&self) -> Direction {
        self.calc.direction()
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn ratio(&self) -> f64 {
        self.mapper.ratio()
    }

    pub fn mapper(&self) -> &ScrollSpaceMapper {
        &self.mapper
    }

    pub fn offset_index(&self) -> &OffsetIndex {
        &self.index
    }

    pub fn recycler(&self) -> &SlotRecycler {
        &self.recycler
    }

    pub fn velocity(&self) -> &VelocityTracker {
        &self.velocity
    }

    /// The range the recycler's bindings currently reflect.
    pub fn committed_range(&self) -> Option<Range> {
        self.recycler.range()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.index
            .total_extent()
            .saturating_sub(self.viewport_extent as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Position data for an external scrollbar/thumb UI.
    pub fn thumb_state(&self) -> ThumbState {
        ThumbState {
            virtual_offset: self.scroll_offset,
            real_offset: self.mapper.to_real(self.scroll_offset),
            ratio: self.mapper.ratio(),
        }
    }

    /// Handles one host scroll event.
    ///
    /// `real_offset` is in the host's representable scroll space; it is
    /// decompressed, clamped and fed to the velocity tracker before the range
    /// is recomputed. The returned update still has to be [`Self::commit`]ed.
    pub fn on_scroll(&mut self, real_offset: f64, now_ms: u64) -> FrameUpdate {
        let virtual_offset = self.clamp_scroll_offset(self.mapper.to_virtual(real_offset));
        ltrace!(real_offset, virtual_offset, now_ms, "on_scroll");
        self.scroll_offset = virtual_offset;
        self.velocity.sample(now_ms, virtual_offset);
        self.request_frame()
    }

    /// Scroll event already expressed in content (virtual) space, for hosts
    /// that own their scroll coordinate (TUIs, custom scrollbars).
    pub fn on_virtual_scroll(&mut self, virtual_offset: u64, now_ms: u64) -> FrameUpdate {
        let virtual_offset = self.clamp_scroll_offset(virtual_offset);
        ltrace!(virtual_offset, now_ms, "on_virtual_scroll");
        self.scroll_offset = virtual_offset;
        self.velocity.sample(now_ms, virtual_offset);
        self.request_frame()
    }

    /// Handles a viewport extent change.
    ///
    /// If the new geometry needs more render slots than the pool holds, the
    /// pool is re-derived; bindings reset and the next commit re-claims every
    /// rendered index.
    pub fn on_viewport_resize(&mut self, viewport_extent: u32) -> FrameUpdate {
        ldebug!(viewport_extent, "on_viewport_resize");
        self.viewport_extent = viewport_extent;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.ensure_slot_capacity();
        self.request_frame()
    }

    /// Recomputes the render range for the current state.
    ///
    /// Every call takes a fresh sequence number, so a recompute after a
    /// mutation supersedes anything still in flight.
    pub fn request_frame(&mut self) -> FrameUpdate {
        let seq = self.next_seq;
        self.next_seq += 1;
        FrameUpdate {
            seq,
            range: self
                .calc
                .compute(&self.index, self.scroll_offset, self.viewport_extent),
            thumb: self.thumb_state(),
        }
    }

    /// Applies an update's range to the slot pool, latest wins.
    ///
    /// Returns `None` (and leaves all bindings alone) when an update with an
    /// equal or newer sequence number has already been committed.
    pub fn commit(&mut self, update: &FrameUpdate) -> Option<Reconciliation> {
        if self.committed_seq.is_some_and(|committed| update.seq <= committed) {
            ldebug!(seq = update.seq, "stale frame update discarded");
            return None;
        }
        self.committed_seq = Some(update.seq);
        Some(self.recycler.reconcile(update.range))
    }

    /// Jumps directly to an item, bypassing the host scroll mechanism.
    ///
    /// Virtual and real positions are both derived from the item offset in a
    /// single direction of conversion; no real → virtual round trip that
    /// could drift under compression. Out-of-range indexes clamp with a
    /// warning: a navigation typo is not worth crashing over.
    pub fn jump_to_index(&mut self, index: usize, align: Align) -> FrameUpdate {
        if self.index.is_empty() {
            return self.request_frame();
        }
        let last = self.index.len() - 1;
        if index > last {
            lwarn!(index, last, "jump_to_index out of range, clamping");
        }
        let index = index.min(last);
        let target = self.jump_offset(index, align);
        self.set_forward_offset(target);
        self.request_frame()
    }

    fn jump_offset(&self, index: usize, align: Align) -> u64 {
        let start = self.index.offset_of(index);
        let size = self.index.size_of(index) as u64;
        let end = start.saturating_add(size);
        let view = self.viewport_extent as u64;
        match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start
                .saturating_add(size / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.forward_offset();
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        }
    }

    /// Captures the anchor needed to restore this scroll position later,
    /// independent of absolute offsets.
    pub fn snapshot(&self) -> Option<ScrollSnapshot> {
        let fwd = self.forward_offset();
        let index = self.index.index_at(fwd)?;
        Some(ScrollSnapshot {
            index,
            offset_in_item: fwd - self.index.offset_of(index),
        })
    }

    /// Restores a snapshot against the *current* offset index.
    ///
    /// The absolute offset is re-derived from the item's present position;
    /// totals may have changed arbitrarily since capture. Out-of-range
    /// indexes clamp with a warning.
    pub fn restore(&mut self, snapshot: ScrollSnapshot) -> FrameUpdate {
        if self.index.is_empty() {
            self.scroll_offset = 0;
            return self.request_frame();
        }
        let last = self.index.len() - 1;
        if snapshot.index > last {
            lwarn!(index = snapshot.index, last, "snapshot index out of range, clamping");
        }
        let index = snapshot.index.min(last);
        let within = snapshot.offset_in_item.min(self.index.size_of(index) as u64);
        self.set_forward_offset(self.index.offset_of(index).saturating_add(within));
        self.request_frame()
    }

    // ---- structural mutations -------------------------------------------

    /// Replaces the item count, re-resolving every size. O(n).
    pub fn set_count(&mut self, count: usize) {
        if count == self.index.len() {
            return;
        }
        self.index.rebuild(count);
        self.loaded_count = count;
        self.after_structure_change();
    }

    /// Appends `count` items at the tail. Existing offsets are untouched.
    pub fn append(&mut self, count: usize) {
        self.index.append(count);
        self.loaded_count = self.index.len();
        self.after_structure_change();
    }

    /// Prepends `count` items, keeping the viewport visually anchored.
    ///
    /// In forward mode the scroll offset shifts by the added extent so the
    /// same content stays on screen (the anchored item is now `count`
    /// indexes later). In reverse mode the bottom-anchored coordinate is
    /// already measured from the far end, so no adjustment is needed.
    ///
    /// Returns the extent added before the old first item.
    pub fn prepend(&mut self, count: usize) -> u64 {
        let fwd = self.forward_offset();
        let added = self.index.prepend(count);
        self.loaded_count = self.index.len();
        self.mapper.set_virtual_extent(self.index.total_extent());
        if self.calc.direction() == Direction::Forward {
            self.set_forward_offset(fwd.saturating_add(added));
        } else {
            self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        }
        self.ensure_slot_capacity();
        ldebug!(count, added, "prepend");
        added
    }

    /// Inserts `count` items before `at`; content before the viewport keeps
    /// the viewport anchored, content inside or after it does not move the
    /// scroll position.
    pub fn insert(&mut self, at: usize, count: usize) -> u64 {
        let fwd = self.forward_offset();
        let insert_at = self.index.offset_of(at.min(self.index.len()));
        let added = self.index.insert(at, count);
        self.loaded_count = self.index.len();
        self.mapper.set_virtual_extent(self.index.total_extent());
        if insert_at < fwd {
            self.set_forward_offset(fwd.saturating_add(added));
        } else {
            self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        }
        self.ensure_slot_capacity();
        added
    }

    /// Removes `count` items starting at `at`, anchoring the viewport to the
    /// content that survives.
    pub fn remove(&mut self, at: usize, count: usize) -> u64 {
        let fwd = self.forward_offset();
        let region_start = self.index.offset_of(at.min(self.index.len()));
        let removed = self.index.remove(at, count);
        self.loaded_count = self.index.len();
        self.mapper.set_virtual_extent(self.index.total_extent());
        if region_start < fwd {
            let shift = removed.min(fwd - region_start);
            self.set_forward_offset(fwd.saturating_sub(shift));
        } else {
            self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        }
        removed
    }

    /// Corrects one item's extent (e.g. a post-render measurement replacing
    /// an estimate). Every later offset moves, so the current range is stale
    /// until the caller requests a fresh frame.
    ///
    /// When the item lies before the viewport, the scroll offset absorbs the
    /// delta so visible content does not jump. Returns the scroll adjustment
    /// actually applied.
    pub fn resize(&mut self, index: usize, extent: u32) -> i64 {
        if index >= self.index.len() {
            lwarn!(index, len = self.index.len(), "resize out of range, ignored");
            return 0;
        }
        let fwd = self.forward_offset();
        let item_start = self.index.offset_of(index);
        let delta = self.index.resize(index, extent);
        self.mapper.set_virtual_extent(self.index.total_extent());
        if delta == 0 {
            return 0;
        }
        ltrace!(index, extent, delta, "resize");
        self.ensure_slot_capacity();
        if item_start < fwd {
            let adjusted = if delta > 0 {
                fwd.saturating_add(delta as u64)
            } else {
                fwd.saturating_sub(delta.unsigned_abs())
            };
            self.set_forward_offset(adjusted);
            delta
        } else {
            self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
            0
        }
    }

    // ---- asynchronous loader boundary -----------------------------------

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of items (a contiguous prefix) whose content is available;
    /// indexes past it render as placeholders.
    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        index < self.loaded_count
    }

    /// Starts a new load generation; batches tagged with older generations
    /// will be dropped on arrival. Returns the new generation for tagging
    /// outgoing requests. Cancelling the in-flight work itself is advisory
    /// and up to the loader.
    pub fn begin_reload(&mut self) -> u64 {
        self.generation += 1;
        ldebug!(generation = self.generation, "begin_reload");
        self.generation
    }

    /// Empties the collection and invalidates all in-flight loads.
    pub fn clear(&mut self) -> u64 {
        self.generation += 1;
        self.index.rebuild(0);
        self.loaded_count = 0;
        self.has_more = false;
        self.scroll_offset = 0;
        self.mapper.set_virtual_extent(0);
        self.recycler.reset();
        self.velocity.clear();
        ldebug!(generation = self.generation, "clear");
        self.generation
    }

    /// Applies a loader result batch, unless its generation is stale.
    ///
    /// Stale batches are silently dropped (the request they answer was
    /// superseded); the caller learns via the return value only.
    pub fn apply_batch(&mut self, batch: LoadBatch) -> bool {
        if batch.generation != self.generation {
            ldebug!(
                batch_generation = batch.generation,
                generation = self.generation,
                "stale load batch dropped"
            );
            return false;
        }
        let len = self.index.len();
        if batch.count >= len {
            self.index.append(batch.count - len);
        } else {
            self.index.rebuild(batch.count);
        }
        self.loaded_count = batch.loaded_count.min(batch.count);
        self.has_more = batch.has_more;
        self.after_structure_change();
        ldebug!(
            count = batch.count,
            loaded = self.loaded_count,
            has_more = self.has_more,
            "load batch applied"
        );
        true
    }

    // ---- internals -------------------------------------------------------

    fn after_structure_change(&mut self) {
        self.mapper.set_virtual_extent(self.index.total_extent());
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.ensure_slot_capacity();
    }

    // Geometry or structure changes can raise the worst-case rendered count;
    // the pool is re-derived then. Reconciliation itself never grows it.
    fn ensure_slot_capacity(&mut self) {
        let needed = derive_slot_capacity(&self.index, self.viewport_extent, self.overscan);
        if needed > self.recycler.capacity() {
            lwarn!(
                needed,
                capacity = self.recycler.capacity(),
                "re-deriving slot pool, bindings reset"
            );
            self.recycler = SlotRecycler::new(needed);
        }
    }

    /// Scroll offset in forward content space regardless of direction.
    fn forward_offset(&self) -> u64 {
        match self.calc.direction() {
            Direction::Forward => self.scroll_offset,
            Direction::Reverse => self
                .max_scroll_offset()
                .saturating_sub(self.scroll_offset),
        }
    }

    fn set_forward_offset(&mut self, fwd: u64) {
        let max = self.max_scroll_offset();
        let fwd = fwd.min(max);
        self.scroll_offset = match self.calc.direction() {
            Direction::Forward => fwd,
            Direction::Reverse => max - fwd,
        };
    }
}

/// Upper bound on simultaneously rendered items: two partial items plus the
/// full ones a viewport can hold at the smallest extent, plus overscan on
/// both sides.
fn derive_slot_capacity(index: &OffsetIndex, viewport_extent: u32, overscan: usize) -> usize {
    let min_size = index.min_size().unwrap_or(viewport_extent).max(1) as u64;
    let max_visible = (viewport_extent as u64 / min_size) as usize + 2;
    (max_visible + 2 * overscan).min(index.len().max(1))
}
