//! Driver utilities for the `vlist` crate.
//!
//! The `vlist` crate is UI-agnostic and focuses on the core math and state.
//! This crate provides small, framework-neutral helpers commonly needed by
//! hosts:
//!
//! - a [`Controller`] that wires scroll/resize/tick events through the engine
//!   and commits the resulting frames
//! - the asynchronous loader boundary made concrete: request planning and a
//!   velocity-driven [`LoadGate`] (fetch when slow or idle, skip mid-fling)
//! - snapshot helpers for preserving the visual position across structural
//!   changes (e.g. prepending older history above the viewport)
//!
//! This crate is intentionally framework-agnostic (no DOM/TUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod loader;
mod snapshot;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use loader::{LoadGate, LoadPlanner, LoadRequest};
pub use snapshot::{capture_first_visible, restore_mapped};
