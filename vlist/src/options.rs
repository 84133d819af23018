use crate::error::VlistError;
use crate::size::SizeStrategy;
use crate::types::Direction;

/// Configuration for [`crate::VirtualList`].
///
/// Geometry is validated once, up front: a non-positive viewport extent or a
/// zero fixed item extent is a caller bug and fails construction instead of
/// being tolerated at runtime.
#[derive(Clone, Debug)]
pub struct ListOptions {
    pub count: usize,
    pub size: SizeStrategy,
    /// Viewport extent along the scroll axis, in content units.
    pub viewport_extent: u32,
    /// Extra items rendered on each side of the visible window.
    pub overscan: usize,
    pub direction: Direction,
    /// Render-slot pool size. `None` derives `max_visible + 2 * overscan`
    /// from the viewport and the smallest item extent.
    pub slot_capacity: Option<usize>,
    /// Velocity sample ring size.
    pub velocity_window: usize,
    /// Sample pairs further apart than this are a pause, not a measurement;
    /// also the quiet period after which the smoothed velocity reads 0.
    pub velocity_staleness_ms: u64,
    /// Whether more items can be fetched past `count` by an external loader.
    pub has_more: bool,
}

impl ListOptions {
    pub fn new(count: usize, viewport_extent: u32, size: SizeStrategy) -> Self {
        Self {
            count,
            size,
            viewport_extent,
            overscan: 1,
            direction: Direction::Forward,
            slot_capacity: None,
            velocity_window: 8,
            velocity_staleness_ms: 200,
            has_more: false,
        }
    }

    /// Fixed-extent list, the common case.
    pub fn fixed(count: usize, viewport_extent: u32, item_extent: u32) -> Self {
        Self::new(count, viewport_extent, SizeStrategy::Fixed(item_extent))
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_slot_capacity(mut self, slot_capacity: usize) -> Self {
        self.slot_capacity = Some(slot_capacity);
        self
    }

    pub fn with_velocity_window(mut self, velocity_window: usize) -> Self {
        self.velocity_window = velocity_window;
        self
    }

    pub fn with_velocity_staleness_ms(mut self, staleness_ms: u64) -> Self {
        self.velocity_staleness_ms = staleness_ms;
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), VlistError> {
        if self.viewport_extent == 0 {
            return Err(VlistError::EmptyViewport);
        }
        if matches!(self.size, SizeStrategy::Fixed(0)) {
            return Err(VlistError::ZeroItemExtent);
        }
        if self.velocity_window < 2 {
            return Err(VlistError::VelocityWindowTooSmall(self.velocity_window));
        }
        Ok(())
    }
}
