//! A headless virtual list engine.
//!
//! This crate materializes only the visible slice of an arbitrarily large
//! ordered collection, recycling render slots as the viewport scrolls. It
//! covers the core math and state:
//!
//! - cumulative offsets over fixed or per-index item extents, with O(log n)
//!   offset → index lookup ([`OffsetIndex`])
//! - overscanned visible-range computation, forward or bottom-anchored
//!   ([`RangeCalculator`])
//! - scroll-space compression for collections whose true extent exceeds what
//!   the host scroll mechanism can represent ([`ScrollSpaceMapper`])
//! - a bounded render-slot pool diffed against the moving range
//!   ([`SlotRecycler`])
//! - a smoothed scroll-speed estimate for gating expensive work
//!   ([`VelocityTracker`])
//!
//! It is UI-agnostic and never paints, fetches, or awaits. A host layer is
//! expected to provide viewport geometry, a timestamped scroll-offset stream,
//! and structural mutations; [`VirtualList`] ties the components together per
//! event. For driver-level utilities (controllers, snapshots across data
//! changes, load gating), see the `vlist-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod fenwick;
mod index;
mod mapper;
mod options;
mod range;
mod size;
mod slots;
mod types;
mod velocity;


pub use engine::{Align, VirtualList};
pub use error::VlistError;
pub use index::OffsetIndex;
pub use mapper::{MAX_REAL_EXTENT, MAX_SAFE_VIRTUAL_EXTENT, ScrollSpaceMapper};
pub use options::ListOptions;
pub use range::RangeCalculator;
pub use size::{SizeResolver, SizeStrategy};
pub use slots::{Reconciliation, SlotId, SlotRecycler};
pub use types::{Direction, FrameUpdate, LoadBatch, Range, ScrollSnapshot, ThumbState};
pub use velocity::{VelocitySample, VelocityTracker};
