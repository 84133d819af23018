use vlist::{
    Align, FrameUpdate, ListOptions, Range, Reconciliation, ScrollSnapshot, ThumbState,
    VirtualList, VlistError,
};

/// A framework-neutral controller that wraps a [`vlist::VirtualList`] and
/// commits frames eagerly.
///
/// The engine splits computation from application so hosts with their own
/// frame pipeline can defer commits; most hosts do not need that, they want
/// each event's slot reconciliation right away. This type collapses the two
/// steps and adds `is_scrolling` debouncing on top of the velocity tracker.
///
/// Adapters drive it by calling:
/// - `on_scroll` / `on_viewport_resize` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (for `is_scrolling` debouncing)
#[derive(Clone, Debug)]
pub struct Controller {
    list: VirtualList,
    scrolling: bool,
    idle_timeout_ms: u64,
}

impl Controller {
    /// Default quiet period after which `is_scrolling` flips off.
    pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 150;

    pub fn new(options: ListOptions) -> Result<Self, VlistError> {
        Ok(Self::from_list(VirtualList::new(options)?))
    }

    pub fn from_list(list: VirtualList) -> Self {
        Self {
            list,
            scrolling: false,
            idle_timeout_ms: Self::DEFAULT_IDLE_TIMEOUT_MS,
        }
    }

    pub fn with_idle_timeout_ms(mut self, idle_timeout_ms: u64) -> Self {
        self.idle_timeout_ms = idle_timeout_ms.max(1);
        self
    }

    pub fn list(&self) -> &VirtualList {
        &self.list
    }

    /// Direct access for structural mutations (append, prepend, resize, the
    /// loader entry points). Frames computed before a mutation are superseded
    /// by the next event's frame automatically.
    pub fn list_mut(&mut self) -> &mut VirtualList {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList {
        self.list
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// The range the last committed frame rendered.
    pub fn range(&self) -> Option<Range> {
        self.list.committed_range()
    }

    pub fn thumb(&self) -> ThumbState {
        self.list.thumb_state()
    }

    /// Handles a host scroll event (real scroll space) and commits the frame.
    pub fn on_scroll(&mut self, real_offset: f64, now_ms: u64) -> Option<Reconciliation> {
        self.scrolling = true;
        let update = self.list.on_scroll(real_offset, now_ms);
        self.commit(update)
    }

    /// Scroll event already in content space, for hosts that own their scroll
    /// coordinate.
    pub fn on_virtual_scroll(&mut self, offset: u64, now_ms: u64) -> Option<Reconciliation> {
        self.scrolling = true;
        let update = self.list.on_virtual_scroll(offset, now_ms);
        self.commit(update)
    }

    pub fn on_viewport_resize(&mut self, viewport_extent: u32) -> Option<Reconciliation> {
        let update = self.list.on_viewport_resize(viewport_extent);
        self.commit(update)
    }

    /// Jumps to an item and commits the resulting frame.
    pub fn jump_to_index(&mut self, index: usize, align: Align) -> Option<Reconciliation> {
        let update = self.list.jump_to_index(index, align);
        self.commit(update)
    }

    /// Recomputes and commits a frame for the current state. Call after
    /// structural mutations through [`Self::list_mut`].
    pub fn refresh(&mut self) -> Option<Reconciliation> {
        let update = self.list.request_frame();
        self.commit(update)
    }

    /// Advances debounced state; returns whether the list is still considered
    /// scrolling.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.scrolling && self.list.velocity().is_idle(now_ms, self.idle_timeout_ms) {
            self.scrolling = false;
        }
        self.scrolling
    }

    pub fn snapshot(&self) -> Option<ScrollSnapshot> {
        self.list.snapshot()
    }

    /// Restores a snapshot and commits the resulting frame.
    pub fn restore(&mut self, snapshot: ScrollSnapshot) -> Option<Reconciliation> {
        let update = self.list.restore(snapshot);
        self.commit(update)
    }

    fn commit(&mut self, update: FrameUpdate) -> Option<Reconciliation> {
        self.list.commit(&update)
    }
}
