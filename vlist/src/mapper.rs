/// Largest content extent most host scroll mechanisms can represent.
pub const MAX_REAL_EXTENT: f64 = 16_777_216.0; // 2^24

/// Virtual extents beyond this lose integer precision in f64; the mapper
/// degrades by clamping rather than producing drifting offsets.
pub const MAX_SAFE_VIRTUAL_EXTENT: u64 = 1 << 53;

/// Bidirectional mapping between true ("virtual") content space and the
/// host's representable ("real") scroll space.
///
/// Short lists map 1:1 so small-scale scrolling stays exact; once the virtual
/// extent exceeds [`MAX_REAL_EXTENT`] the real axis is compressed by
/// `ratio = virtual / MAX_REAL_EXTENT` so the host's native thumb stays
/// proportional. Must be re-derived whenever the total extent changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpaceMapper {
    virtual_extent: u64,
    ratio: f64,
    overflowed: bool,
}

impl ScrollSpaceMapper {
    pub fn new(virtual_extent: u64) -> Self {
        let mut mapper = Self {
            virtual_extent: 0,
            ratio: 1.0,
            overflowed: false,
        };
        mapper.set_virtual_extent(virtual_extent);
        mapper
    }

    /// Re-derives the compression ratio for a new total extent.
    ///
    /// Pathological extents past [`MAX_SAFE_VIRTUAL_EXTENT`] are clamped with
    /// a warning; the list stays usable, only extreme-end precision degrades.
    pub fn set_virtual_extent(&mut self, virtual_extent: u64) {
        self.overflowed = virtual_extent > MAX_SAFE_VIRTUAL_EXTENT;
        if self.overflowed {
            lwarn!(
                virtual_extent,
                max = MAX_SAFE_VIRTUAL_EXTENT,
                "virtual extent exceeds safe f64 range, clamping"
            );
        }
        self.virtual_extent = virtual_extent.min(MAX_SAFE_VIRTUAL_EXTENT);
        let v = self.virtual_extent as f64;
        self.ratio = if v > MAX_REAL_EXTENT {
            v / MAX_REAL_EXTENT
        } else {
            1.0
        };
    }

    pub fn virtual_extent(&self) -> u64 {
        self.virtual_extent
    }

    /// `virtual_extent / real_extent`; exactly 1.0 when uncompressed.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn is_compressed(&self) -> bool {
        self.ratio > 1.0
    }

    /// Whether the last `set_virtual_extent` had to clamp.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The scroll extent to hand to the host.
    pub fn real_extent(&self) -> f64 {
        (self.virtual_extent as f64).min(MAX_REAL_EXTENT)
    }

    /// Virtual → real. Clamped to `[0, real_extent]` so the very last virtual
    /// offset lands exactly on the ceiling instead of drifting past it.
    pub fn to_real(&self, virtual_offset: u64) -> f64 {
        let real = virtual_offset.min(self.virtual_extent) as f64 / self.ratio;
        real.clamp(0.0, self.real_extent())
    }

    /// Real → virtual. Non-finite and negative inputs clamp to 0; the result
    /// never exceeds the virtual extent.
    pub fn to_virtual(&self, real_offset: f64) -> u64 {
        if !real_offset.is_finite() || real_offset <= 0.0 {
            return 0;
        }
        let v = (real_offset.min(self.real_extent()) * self.ratio).round();
        (v as u64).min(self.virtual_extent)
    }
}
