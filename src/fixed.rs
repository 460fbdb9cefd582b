use crate::error::LayoutError;
use crate::types::VisibleRange;

/// Constant-time layout for lists where every item has the same height.
///
/// This is an algebraic specialization of [`crate::PositionTable`]: offsets
/// are `index * height`, and range resolution is division plus clamping
/// instead of a search. For any uniform-height list the two produce
/// identical ranges and identical offsets, which is what lets
/// [`crate::ListController`] pick the path from the configured height rule
/// without callers noticing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLayout {
    height: f64,
    count: usize,
}

impl FixedLayout {
    /// Creates a layout of `count` items of identical `height`.
    ///
    /// The height is validated once, up front; the per-item checks of the
    /// general path have nothing left to catch here.
    pub fn new(count: usize, height: f64) -> Result<Self, LayoutError> {
        if height.is_finite() && height > 0.0 {
            Ok(Self { height, count })
        } else {
            Err(LayoutError::InvalidFixedHeight { height })
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn total_extent(&self) -> f64 {
        self.count as f64 * self.height
    }

    pub fn offset_of(&self, index: usize) -> Result<f64, LayoutError> {
        if index < self.count {
            Ok(index as f64 * self.height)
        } else {
            Err(LayoutError::OutOfBounds {
                index,
                len: self.count,
            })
        }
    }

    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let i = (offset.max(0.0) / self.height) as usize;
        Some(i.min(self.count - 1))
    }

    pub fn max_scroll_offset(&self, viewport_extent: f64) -> f64 {
        (self.total_extent() - viewport_extent).max(0.0)
    }

    /// The minimal covering range for a viewport, without overscan.
    ///
    /// The last index is `ceil(view_end / height) - 1`, not
    /// `floor(view_end / height)`: when the viewport edge lands exactly on
    /// an item boundary, the item starting at that boundary has no pixel
    /// overlap with the viewport and must not be included. The general
    /// path's `offset < view_end` scan agrees.
    pub fn visible_range(&self, scroll_offset: f64, viewport_extent: f64) -> Option<VisibleRange> {
        if self.count == 0 || viewport_extent <= 0.0 {
            return None;
        }

        let scroll = scroll_offset.clamp(0.0, self.max_scroll_offset(viewport_extent));
        let view_end = scroll + viewport_extent;

        // Both quotients are non-negative and finite after clamping, so an
        // `as usize` cast truncates like floor; ceil is truncate-and-bump.
        // Plain casts keep this path available without `std`.
        let start = ((scroll / self.height) as usize).min(self.count - 1);
        let end_ratio = view_end / self.height;
        let mut end_excl = end_ratio as usize;
        if (end_excl as f64) < end_ratio {
            end_excl += 1;
        }
        let end_excl = end_excl.min(self.count);
        if start >= end_excl {
            return None;
        }
        Some(VisibleRange {
            start,
            end: end_excl - 1,
        })
    }

    /// The visible range expanded by `overscan` items on each side, clamped
    /// to the list bounds.
    pub fn windowed_range(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan: usize,
    ) -> Option<VisibleRange> {
        let visible = self.visible_range(scroll_offset, viewport_extent)?;
        Some(VisibleRange {
            start: visible.start.saturating_sub(overscan),
            end: visible.end.saturating_add(overscan).min(self.count - 1),
        })
    }
}
