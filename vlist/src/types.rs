/// Scroll axis orientation.
///
/// In `Reverse` mode the scroll coordinate is measured from the logical
/// bottom: offset 0 means the last item is visible (chat/timeline layouts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// An inclusive index interval.
///
/// Invariant: `start <= end` and both are valid indexes. An empty interval has
/// no `Range` value; APIs that can produce one return `Option<Range>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Range: start={start} > end={end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Iterates the indexes in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + use<> {
        self.start..=self.end
    }
}

/// The minimal state needed to restore a scroll position independent of
/// absolute pixel offsets.
///
/// Total extent may change between capture and restore (measurements, loads,
/// prepends); restoring re-derives the absolute offset from the *current*
/// offset index, never from a stored pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    /// Index of the anchor item (the first one visible at capture time).
    pub index: usize,
    /// Distance from the anchor item's start to the viewport's start edge,
    /// in content units.
    pub offset_in_item: u64,
}

/// Position data for an external scrollbar/thumb UI.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThumbState {
    /// Scroll offset in content (virtual) space.
    pub virtual_offset: u64,
    /// Scroll offset in the host's representable (real) space.
    pub real_offset: f64,
    /// Compression ratio (`1.0` when the content fits the host range).
    pub ratio: f64,
}

/// The result of one range computation.
///
/// Carries a monotonically increasing sequence number so that out-of-order
/// application can be detected: committing an update older than one already
/// committed is a no-op ("latest wins").
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameUpdate {
    pub seq: u64,
    /// Render range (visible plus overscan), `None` when nothing to render.
    pub range: Option<Range>,
    pub thumb: ThumbState,
}

/// A batch delivered by an external asynchronous loader.
///
/// The batch is only applied when `generation` still matches the engine's
/// current generation; batches racing a `reload`/`clear` are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadBatch {
    pub generation: u64,
    /// Total addressable item count after this batch.
    pub count: usize,
    /// Contiguous prefix of items whose content is available.
    pub loaded_count: usize,
    /// Whether more items can still be fetched past `count`.
    pub has_more: bool,
}
