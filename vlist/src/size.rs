use alloc::sync::Arc;

/// A per-index extent resolver.
pub type SizeResolver = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// How item extents are resolved.
///
/// The strategy is fixed at configuration time; hot paths dispatch on this tag
/// instead of re-deciding per call. Extents are integer scroll-space units, so
/// negative or non-finite sizes are unrepresentable by construction.
#[derive(Clone)]
pub enum SizeStrategy {
    /// Every item has the same extent. Offset ↔ index lookups are O(1)
    /// arithmetic and no cumulative table is kept.
    Fixed(u32),
    /// Each item's extent comes from a resolver; resolved values are cached
    /// in the offset index and only re-resolved on rebuild.
    PerIndex(SizeResolver),
}

impl SizeStrategy {
    pub fn fixed(extent: u32) -> Self {
        Self::Fixed(extent)
    }

    pub fn per_index(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::PerIndex(Arc::new(f))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub(crate) fn resolve(&self, index: usize) -> u32 {
        match self {
            Self::Fixed(extent) => *extent,
            Self::PerIndex(f) => f(index),
        }
    }
}

impl core::fmt::Debug for SizeStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(extent) => f.debug_tuple("Fixed").field(extent).finish(),
            Self::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}
