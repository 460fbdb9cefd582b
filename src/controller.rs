use alloc::vec::Vec;

use crate::detector::is_near_end;
use crate::error::LayoutError;
use crate::fixed::FixedLayout;
use crate::options::{OnChangeCallback, OnEndReachedCallback};
use crate::table::PositionTable;
use crate::{Align, HeightRule, ItemSlot, ScrollPhase, VisibleRange, WindowOptions};

/// The layout path in use, chosen by the configured height rule.
///
/// Both arms expose the same observable behavior for uniform heights; the
/// controller switches between them without callers noticing.
#[derive(Clone, Debug)]
enum Layout {
    Fixed(FixedLayout),
    Table(PositionTable),
}

impl Layout {
    fn len(&self) -> usize {
        match self {
            Self::Fixed(f) => f.len(),
            Self::Table(t) => t.len(),
        }
    }

    fn total_extent(&self) -> f64 {
        match self {
            Self::Fixed(f) => f.total_extent(),
            Self::Table(t) => t.total_extent(),
        }
    }

    fn max_scroll_offset(&self, viewport_extent: f64) -> f64 {
        match self {
            Self::Fixed(f) => f.max_scroll_offset(viewport_extent),
            Self::Table(t) => t.max_scroll_offset(viewport_extent),
        }
    }

    fn visible_range(&self, scroll_offset: f64, viewport_extent: f64) -> Option<VisibleRange> {
        match self {
            Self::Fixed(f) => f.visible_range(scroll_offset, viewport_extent),
            Self::Table(t) => t.visible_range(scroll_offset, viewport_extent),
        }
    }

    fn windowed_range(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan: usize,
    ) -> Option<VisibleRange> {
        match self {
            Self::Fixed(f) => f.windowed_range(scroll_offset, viewport_extent, overscan),
            Self::Table(t) => t.windowed_range(scroll_offset, viewport_extent, overscan),
        }
    }

    fn slot(&self, index: usize) -> Result<ItemSlot, LayoutError> {
        match self {
            Self::Fixed(f) => Ok(ItemSlot {
                index,
                offset: f.offset_of(index)?,
                height: f.height(),
            }),
            Self::Table(t) => {
                let entry = t.entry(index)?;
                Ok(ItemSlot {
                    index,
                    offset: entry.offset,
                    height: entry.height,
                })
            }
        }
    }

    fn index_at_offset(&self, offset: f64) -> Option<usize> {
        match self {
            Self::Fixed(f) => f.index_at_offset(offset),
            Self::Table(t) => t.index_at_offset(offset),
        }
    }
}

/// Single-owner scroll state machine over one item list.
///
/// The controller is the only stateful object in the crate: it holds the
/// scroll offset, the viewport extent, the `Idle`/`Scrolling` phase, and the
/// end-reached latch, and re-runs the pure resolvers on every event. All
/// recomputation happens synchronously inside the event call; nothing here
/// blocks or spans event-loop turns.
///
/// Items are only read while (re)building the layout in [`Self::set_items`];
/// the controller stores no `T`.
#[derive(Clone, Debug)]
pub struct ListController<T> {
    options: WindowOptions<T>,
    layout: Layout,
    scroll_offset: f64,
    viewport_extent: f64,
    phase: ScrollPhase,
    last_scroll_event_ms: Option<u64>,
    /// Armed means the next false→true near-end transition fires the callback.
    end_armed: bool,
}

impl<T> ListController<T> {
    /// Creates a controller with an empty item list.
    ///
    /// A fixed height rule is validated here, once; a per-item rule is
    /// validated against each item when [`Self::set_items`] runs.
    pub fn new(options: WindowOptions<T>) -> Result<Self, LayoutError> {
        let layout = match &options.height {
            HeightRule::Fixed(h) => Layout::Fixed(FixedLayout::new(0, *h)?),
            HeightRule::PerItem(_) => Layout::Table(PositionTable::default()),
        };
        lwdebug!(
            overscan = options.overscan,
            end_threshold = options.end_threshold,
            "ListController::new"
        );
        let viewport_extent = options.initial_viewport_extent.max(0.0);
        let scroll_offset = options.initial_scroll_offset.max(0.0);
        Ok(Self {
            scroll_offset: scroll_offset.min(layout.max_scroll_offset(viewport_extent)),
            viewport_extent,
            phase: ScrollPhase::Idle,
            last_scroll_event_ms: None,
            end_armed: true,
            layout,
            options,
        })
    }

    pub fn options(&self) -> &WindowOptions<T> {
        &self.options
    }

    /// Replaces the item list, rebuilding the whole layout.
    ///
    /// The previous scroll offset is reclamped against the new total extent,
    /// so shrinking the list never leaves the viewport stranded past the
    /// content.
    pub fn set_items(&mut self, items: &[T]) -> Result<(), LayoutError> {
        let layout = match &self.options.height {
            HeightRule::Fixed(h) => Layout::Fixed(FixedLayout::new(items.len(), *h)?),
            HeightRule::PerItem(height_of) => {
                Layout::Table(PositionTable::build(items, |item, i| height_of(item, i))?)
            }
        };
        lwdebug!(
            count = items.len(),
            total_extent = layout.total_extent(),
            "set_items"
        );
        self.layout = layout;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.finish_event();
        Ok(())
    }

    /// Handles a scroll event from the host.
    ///
    /// Clamps the offset, enters `Scrolling`, and re-evaluates the near-end
    /// latch. `now_ms` feeds the [`Self::settle`] debounce.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) {
        lwtrace!(offset, now_ms, "on_scroll");
        self.scroll_offset = self.clamp_scroll_offset(offset.max(0.0));
        self.phase = ScrollPhase::Scrolling;
        self.last_scroll_event_ms = Some(now_ms);
        self.finish_event();
    }

    /// Scrolls by a relative distance (negative scrolls toward the start).
    pub fn scroll_by(&mut self, delta: f64, now_ms: u64) {
        self.on_scroll((self.scroll_offset + delta).max(0.0), now_ms);
    }

    /// Handles a viewport resize.
    ///
    /// Reclamps the scroll offset; the near-end latch is re-evaluated since
    /// a taller viewport can itself cross the threshold.
    pub fn on_resize(&mut self, viewport_extent: f64) {
        let viewport_extent = viewport_extent.max(0.0);
        if self.viewport_extent == viewport_extent {
            return;
        }
        lwtrace!(viewport_extent, "on_resize");
        self.viewport_extent = viewport_extent;
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        self.finish_event();
    }

    /// Returns the phase to `Idle` once the configured quiet period has
    /// elapsed since the last scroll event. Call this from a frame/timer
    /// tick; scroll events themselves never auto-expire.
    pub fn settle(&mut self, now_ms: u64) {
        if self.phase != ScrollPhase::Scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.settle_delay_ms {
            self.phase = ScrollPhase::Idle;
            self.last_scroll_event_ms = None;
            self.notify();
        }
    }

    /// Scrolls so that `index` lands at the requested alignment.
    ///
    /// Returns the applied (clamped) offset. Does not enter `Scrolling`:
    /// programmatic jumps are not user scroll activity.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<f64, LayoutError> {
        let slot = self.layout.slot(index)?;
        let view = self.viewport_extent;
        let cur = self.scroll_offset;

        let target = match align {
            Align::Start => slot.offset,
            Align::End => slot.end() - view,
            Align::Center => slot.offset + slot.height / 2.0 - view / 2.0,
            Align::Auto => {
                if slot.offset >= cur && slot.end() <= cur + view {
                    cur
                } else if slot.offset < cur {
                    slot.offset
                } else {
                    slot.end() - view
                }
            }
        };

        self.scroll_offset = self.clamp_scroll_offset(target.max(0.0));
        self.finish_event();
        Ok(self.scroll_offset)
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_end_threshold(&mut self, end_threshold: f64) {
        self.options.end_threshold = end_threshold;
        self.finish_event();
    }

    pub fn set_on_change(&mut self, on_change: Option<OnChangeCallback<T>>) {
        self.options.on_change = on_change;
    }

    pub fn set_on_end_reached(&mut self, on_end_reached: Option<OnEndReachedCallback>) {
        self.options.on_end_reached = on_end_reached;
    }

    pub fn item_count(&self) -> usize {
        self.layout.len()
    }

    pub fn total_extent(&self) -> f64 {
        self.layout.total_extent()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn max_scroll_offset(&self) -> f64 {
        self.layout.max_scroll_offset(self.viewport_extent)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// The minimal covering range at the current scroll state, no overscan.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.layout
            .visible_range(self.scroll_offset, self.viewport_extent)
    }

    /// The range to materialize: visible range plus overscan, clamped.
    pub fn windowed_range(&self) -> Option<VisibleRange> {
        self.layout
            .windowed_range(self.scroll_offset, self.viewport_extent, self.options.overscan)
    }

    /// Whether the viewport currently sits within the end threshold.
    ///
    /// Always `false` for an empty list; there is no end to be near.
    pub fn is_near_end(&self) -> bool {
        self.layout.len() > 0
            && is_near_end(
                self.layout.total_extent(),
                self.scroll_offset,
                self.viewport_extent,
                self.options.end_threshold,
            )
    }

    /// Position of the item at `index` (O(1) table lookup).
    pub fn item_offset(&self, index: usize) -> Result<f64, LayoutError> {
        Ok(self.layout.slot(index)?.offset)
    }

    pub fn item_height(&self, index: usize) -> Result<f64, LayoutError> {
        Ok(self.layout.slot(index)?.height)
    }

    pub fn slot(&self, index: usize) -> Result<ItemSlot, LayoutError> {
        self.layout.slot(index)
    }

    /// Maps an absolute content offset to an item index.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        self.layout.index_at_offset(offset)
    }

    /// Iterates the slots of the current render window without allocating.
    ///
    /// Offsets are read straight from the layout, never recomputed per call.
    pub fn for_each_slot(&self, mut f: impl FnMut(ItemSlot)) {
        let Some(range) = self.windowed_range() else {
            return;
        };
        match &self.layout {
            Layout::Fixed(fixed) => {
                let height = fixed.height();
                for index in range.indices() {
                    f(ItemSlot {
                        index,
                        offset: index as f64 * height,
                        height,
                    });
                }
            }
            Layout::Table(table) => {
                for (index, entry) in table.entries()[range.start..=range.end]
                    .iter()
                    .enumerate()
                {
                    f(ItemSlot {
                        index: range.start + index,
                        offset: entry.offset,
                        height: entry.height,
                    });
                }
            }
        }
    }

    /// Collects the current render window into `out` (clears `out` first).
    pub fn collect_slots(&self, out: &mut Vec<ItemSlot>) {
        out.clear();
        self.for_each_slot(|slot| out.push(slot));
    }

    /// Runs the end-of-event bookkeeping shared by every mutating event:
    /// near-end latch, change notification, then the end-reached callback.
    ///
    /// The callback is dispatched strictly after all state mutation and
    /// after `on_change`, so it can never observe a half-updated controller
    /// and never re-enters for the same crossing.
    fn finish_event(&mut self) {
        let fire = self.update_end_latch();
        self.notify();
        if let Some(cb) = fire {
            lwdebug!(scroll_offset = self.scroll_offset, "end reached");
            cb();
        }
    }

    fn update_end_latch(&mut self) -> Option<OnEndReachedCallback> {
        if self.is_near_end() {
            if self.end_armed {
                self.end_armed = false;
                return self.options.on_end_reached.clone();
            }
        } else {
            // Re-arm only after the signal has dropped, so lingering near
            // the bottom fires once per crossing, not once per frame.
            self.end_armed = true;
        }
        None
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }
}
