/// An inclusive range of item indices to materialize.
///
/// Invariant: `start <= end`, and both are valid indices into the layout that
/// produced the range. The empty window is represented by `Option::None` at
/// the call sites, never by a degenerate range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    /// Number of items in the range.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterates the indices in the range, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        self.start..=self.end
    }
}

/// One materialized item: where to place it and how tall it is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSlot {
    pub index: usize,
    /// Absolute offset of the item's leading edge in the scroll axis.
    pub offset: f64,
    pub height: f64,
}

impl ItemSlot {
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }
}

/// Scroll activity phase of a [`crate::ListController`].
///
/// Transitions are event-driven: any scroll event enters `Scrolling`, and
/// [`crate::ListController::settle`] returns to `Idle` once the configured
/// quiet period has elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// Alignment for [`crate::ListController::scroll_to_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll the minimal distance that brings the item fully into view.
    Auto,
}
