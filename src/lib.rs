//! A headless windowing engine for virtualized list rendering.
//!
//! Given an ordered sequence of items with (possibly non-uniform) display
//! heights, this crate computes the minimal contiguous window of items that
//! covers the visible viewport plus an overscan margin, and the absolute
//! offset at which each windowed item must be placed. Off-screen items are
//! never positioned or measured.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport extent in the scroll axis
//! - scroll offsets as the user scrolls
//! - the item list and a height rule (a constant, or a per-item function)
//!
//! The pure pieces ([`PositionTable`], [`FixedLayout`], [`is_near_end`]) are
//! usable on their own; [`ListController`] ties them together into the usual
//! scroll/resize/replace event loop and drives an optional end-reached
//! callback for incremental loading.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod detector;
mod error;
mod fixed;
mod options;
mod table;
mod types;


pub use controller::ListController;
pub use detector::is_near_end;
pub use error::LayoutError;
pub use fixed::FixedLayout;
pub use options::{HeightRule, OnChangeCallback, OnEndReachedCallback, WindowOptions};
pub use table::{PositionEntry, PositionTable};
pub use types::{Align, ItemSlot, ScrollPhase, VisibleRange};
