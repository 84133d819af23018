use vlist::{FrameUpdate, ScrollSnapshot, VirtualList};

/// Captures the anchor for the first visible item.
///
/// Typical use cases:
/// - chat/timeline "prepend" (load older messages above) without content
///   jumping
/// - any reorder/replace where the viewport should stay anchored to an item
///
/// Returns `None` when the list is empty.
pub fn capture_first_visible(list: &VirtualList) -> Option<ScrollSnapshot> {
    list.snapshot()
}

/// Restores a snapshot after the dataset changed shape.
///
/// `map_index` translates the captured index into the *current* dataset (for
/// a prepend of `k` items that is `|i| Some(i + k)`; for a removal it may
/// return `None` when the anchor item is gone). The absolute offset is
/// re-derived from the item's present position, never from a stored value.
///
/// Returns the frame to commit, or `None` when the anchor no longer maps.
pub fn restore_mapped(
    list: &mut VirtualList,
    snapshot: ScrollSnapshot,
    mut map_index: impl FnMut(usize) -> Option<usize>,
) -> Option<FrameUpdate> {
    let index = map_index(snapshot.index)?;
    Some(list.restore(ScrollSnapshot {
        index,
        offset_in_item: snapshot.offset_in_item,
    }))
}
