use alloc::sync::Arc;

use crate::controller::ListController;

/// A callback fired after every state change of a [`ListController`].
///
/// Fired exactly once per public event (scroll, resize, item replacement),
/// after all recomputation has finished, so reading the controller from the
/// callback always observes a consistent window.
pub type OnChangeCallback<T> = Arc<dyn Fn(&ListController<T>) + Send + Sync>;

/// A callback fired when the viewport first comes within the end threshold.
///
/// Fired once per false→true crossing of the near-end signal; it re-arms
/// only after the signal drops back below the threshold, so lingering near
/// the bottom does not fire it once per scroll frame.
pub type OnEndReachedCallback = Arc<dyn Fn() + Send + Sync>;

/// How item heights are obtained.
///
/// `Fixed` selects the constant-time arithmetic path; `PerItem` builds a
/// cumulative position table. The per-item function must be deterministic
/// for a given `(item, index)` pair for the lifetime of one layout build;
/// replacing the item list rebuilds the layout from scratch, so nothing is
/// cached across list identities.
pub enum HeightRule<T> {
    /// Every item has this height.
    Fixed(f64),
    /// Heights are read per item at layout-build time.
    PerItem(Arc<dyn Fn(&T, usize) -> f64 + Send + Sync>),
}

impl<T> HeightRule<T> {
    pub fn per_item(f: impl Fn(&T, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerItem(Arc::new(f))
    }
}

impl<T> Clone for HeightRule<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(h) => Self::Fixed(*h),
            Self::PerItem(f) => Self::PerItem(Arc::clone(f)),
        }
    }
}

impl<T> core::fmt::Debug for HeightRule<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// Configuration for [`ListController`].
///
/// Cheap to clone: callbacks and the height rule are stored in `Arc`s.
pub struct WindowOptions<T> {
    pub height: HeightRule<T>,

    /// Extra items materialized beyond the strictly visible window, on each
    /// side, to hide popping-in during fast scrolls.
    pub overscan: usize,

    /// Distance from the end of the content below which the near-end signal
    /// fires.
    pub end_threshold: f64,

    /// Quiet period after the last scroll event before [`ListController::settle`]
    /// returns the phase to `Idle`.
    pub settle_delay_ms: u64,

    /// Initial viewport extent in the scroll axis.
    pub initial_viewport_extent: f64,

    /// Initial scroll offset (clamped against the first item list).
    pub initial_scroll_offset: f64,

    /// Optional callback fired after every state change.
    pub on_change: Option<OnChangeCallback<T>>,

    /// Optional callback fired once per near-end crossing.
    pub on_end_reached: Option<OnEndReachedCallback>,
}

impl<T> WindowOptions<T> {
    pub fn new(height: HeightRule<T>) -> Self {
        Self {
            height,
            overscan: 3,
            end_threshold: 200.0,
            settle_delay_ms: 150,
            initial_viewport_extent: 0.0,
            initial_scroll_offset: 0.0,
            on_change: None,
            on_end_reached: None,
        }
    }

    /// Options for a uniform-height list.
    pub fn fixed(height: f64) -> Self {
        Self::new(HeightRule::Fixed(height))
    }

    /// Options with a per-item height function.
    pub fn per_item(f: impl Fn(&T, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(HeightRule::per_item(f))
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_end_threshold(mut self, end_threshold: f64) -> Self {
        self.end_threshold = end_threshold;
        self
    }

    pub fn with_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.settle_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_viewport_extent(mut self, extent: f64) -> Self {
        self.initial_viewport_extent = extent;
        self
    }

    pub fn with_initial_scroll_offset(mut self, offset: f64) -> Self {
        self.initial_scroll_offset = offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&ListController<T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn with_on_end_reached(mut self, on_end_reached: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_end_reached = Some(Arc::new(on_end_reached));
        self
    }
}

impl<T> Clone for WindowOptions<T> {
    fn clone(&self) -> Self {
        Self {
            height: self.height.clone(),
            overscan: self.overscan,
            end_threshold: self.end_threshold,
            settle_delay_ms: self.settle_delay_ms,
            initial_viewport_extent: self.initial_viewport_extent,
            initial_scroll_offset: self.initial_scroll_offset,
            on_change: self.on_change.clone(),
            on_end_reached: self.on_end_reached.clone(),
        }
    }
}

impl<T> core::fmt::Debug for WindowOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("height", &self.height)
            .field("overscan", &self.overscan)
            .field("end_threshold", &self.end_threshold)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("initial_viewport_extent", &self.initial_viewport_extent)
            .field("initial_scroll_offset", &self.initial_scroll_offset)
            .finish_non_exhaustive()
    }
}
