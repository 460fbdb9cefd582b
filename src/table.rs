use alloc::vec::Vec;

use crate::error::{LayoutError, check_height};
use crate::types::VisibleRange;

/// Cumulative position of a single item.
///
/// `offset` is the sum of all preceding heights; `offset + height` is the
/// item's trailing edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionEntry {
    pub offset: f64,
    pub height: f64,
}

impl PositionEntry {
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }
}

/// A precomputed cumulative-offset table over one item list.
///
/// Built in a single O(n) pass when the item list changes, then queried in
/// O(log n) per scroll event. The table is immutable: any change to the item
/// list (or to the height rule it was built with) replaces the table
/// wholesale, so the strict ordering of offsets can never be violated after
/// construction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionTable {
    entries: Vec<PositionEntry>,
    total_extent: f64,
}

impl PositionTable {
    /// Builds the table for `items`, reading one height per item.
    ///
    /// `height_of` must return a finite height > 0 for every item; the first
    /// offending item fails the whole build with
    /// [`LayoutError::InvalidHeight`]. Clamping bad heights instead would
    /// corrupt the offset of every subsequent item, so the build refuses.
    pub fn build<T>(
        items: &[T],
        mut height_of: impl FnMut(&T, usize) -> f64,
    ) -> Result<Self, LayoutError> {
        let mut entries = Vec::with_capacity(items.len());
        let mut offset = 0.0f64;
        for (index, item) in items.iter().enumerate() {
            let height = check_height(index, height_of(item, index))?;
            entries.push(PositionEntry { offset, height });
            offset += height;
        }
        Ok(Self {
            entries,
            total_extent: offset,
        })
    }

    /// Builds the table directly from a height sequence.
    pub fn from_heights(heights: &[f64]) -> Result<Self, LayoutError> {
        Self::build(heights, |&h, _| h)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all item heights; `0.0` for an empty table.
    pub fn total_extent(&self) -> f64 {
        self.total_extent
    }

    pub fn entries(&self) -> &[PositionEntry] {
        &self.entries
    }

    /// Position of the item at `index`.
    ///
    /// Out-of-range indices are a resolver bug by the time they reach the
    /// table, so this surfaces them as [`LayoutError::OutOfBounds`] rather
    /// than panicking or clamping.
    pub fn entry(&self, index: usize) -> Result<PositionEntry, LayoutError> {
        self.entries
            .get(index)
            .copied()
            .ok_or(LayoutError::OutOfBounds {
                index,
                len: self.entries.len(),
            })
    }

    pub fn offset_of(&self, index: usize) -> Result<f64, LayoutError> {
        Ok(self.entry(index)?.offset)
    }

    pub fn end_of(&self, index: usize) -> Result<f64, LayoutError> {
        Ok(self.entry(index)?.end())
    }

    /// Maps an absolute offset to the index of the item covering it.
    ///
    /// Offsets past the end map to the last item; `None` only for an empty
    /// table. Binary search over the monotone offsets.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let i = self.entries.partition_point(|e| e.end() <= offset);
        Some(i.min(self.entries.len() - 1))
    }

    /// Largest scroll offset that still shows a full viewport of content.
    pub fn max_scroll_offset(&self, viewport_extent: f64) -> f64 {
        (self.total_extent - viewport_extent).max(0.0)
    }

    /// The minimal covering range for a viewport, without overscan.
    ///
    /// An item is in view when it overlaps `[scroll, scroll + viewport)`.
    /// The scroll offset is evaluated as if clamped to
    /// `[0, max_scroll_offset]`; persistent clamping of stored scroll state
    /// is the controller's job.
    ///
    /// Returns `None` for an empty table or a zero-extent viewport.
    pub fn visible_range(&self, scroll_offset: f64, viewport_extent: f64) -> Option<VisibleRange> {
        let n = self.entries.len();
        if n == 0 || viewport_extent <= 0.0 {
            return None;
        }

        let scroll = scroll_offset.clamp(0.0, self.max_scroll_offset(viewport_extent));
        let view_end = scroll + viewport_extent;

        // First item whose trailing edge is past the top of the viewport.
        let start = self.entries.partition_point(|e| e.end() <= scroll);
        // One past the last item whose leading edge is above the bottom.
        let end = self.entries.partition_point(|e| e.offset < view_end);

        if start >= end {
            return None;
        }
        Some(VisibleRange {
            start,
            end: end - 1,
        })
    }

    /// The visible range expanded by `overscan` items on each side, clamped
    /// to the table bounds. Expansion never wraps or duplicates indices.
    pub fn windowed_range(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan: usize,
    ) -> Option<VisibleRange> {
        let visible = self.visible_range(scroll_offset, viewport_extent)?;
        Some(VisibleRange {
            start: visible.start.saturating_sub(overscan),
            end: visible.end.saturating_add(overscan).min(self.entries.len() - 1),
        })
    }
}
