use crate::index::OffsetIndex;
use crate::{Direction, Range};

/// Computes visible/render ranges from a scroll offset and viewport extent.
///
/// Stateless apart from configuration; the offset index is borrowed per call
/// so the calculator never holds stale cumulative data.
#[derive(Clone, Copy, Debug)]
pub struct RangeCalculator {
    overscan: usize,
    direction: Direction,
}

impl RangeCalculator {
    pub fn new(overscan: usize, direction: Direction) -> Self {
        Self {
            overscan,
            direction,
        }
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The strictly visible range, no overscan.
    ///
    /// `scroll_offset` is in the configured direction's coordinate (in
    /// reverse mode, 0 means the last item is on screen). Offsets beyond the
    /// maximum valid value clamp to the last valid range.
    pub fn visible(
        &self,
        index: &OffsetIndex,
        scroll_offset: u64,
        viewport_extent: u32,
    ) -> Option<Range> {
        if index.is_empty() || viewport_extent == 0 {
            return None;
        }

        let total = index.total_extent();
        let view = (viewport_extent as u64).min(total.max(1));
        let max_scroll = total.saturating_sub(view);
        let scroll_offset = scroll_offset.min(max_scroll);

        // Reverse mode measures from the logical bottom; invert into forward
        // content space before the lookup.
        let start_offset = match self.direction {
            Direction::Forward => scroll_offset,
            Direction::Reverse => max_scroll - scroll_offset,
        };
        let end_offset = start_offset.saturating_add(view).saturating_sub(1);

        let start = index.index_at(start_offset)?;
        let end = index.index_at(end_offset.max(start_offset))?;
        Some(Range::new(start, end.max(start)))
    }

    /// The render range: visible range widened by `overscan` on both sides,
    /// clamped to valid indexes.
    pub fn compute(
        &self,
        index: &OffsetIndex,
        scroll_offset: u64,
        viewport_extent: u32,
    ) -> Option<Range> {
        let visible = self.visible(index, scroll_offset, viewport_extent)?;
        let last = index.len() - 1;
        Some(Range::new(
            visible.start.saturating_sub(self.overscan),
            visible.end.saturating_add(self.overscan).min(last),
        ))
    }
}
