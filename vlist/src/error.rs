use thiserror::Error;

/// Configuration-time errors.
///
/// Only caller bugs surface as errors. Runtime conditions the engine can
/// recover from (out-of-range navigation, scroll-space overflow, stale async
/// results) are clamped or discarded instead, with a warning where it matters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VlistError {
    /// The viewport has no extent along the scroll axis.
    #[error("invalid geometry: viewport extent must be non-zero")]
    EmptyViewport,

    /// A fixed per-item extent of zero would make offset → index lookups
    /// ill-defined.
    #[error("invalid geometry: fixed item extent must be non-zero")]
    ZeroItemExtent,

    /// The velocity sample window cannot hold a single sample pair.
    #[error("invalid geometry: velocity window must hold at least 2 samples (got {0})")]
    VelocityWindowTooSmall(usize),
}
