/// Whether the viewport is within `threshold` of the end of the content.
///
/// `true` whenever less than `threshold` of content remains below the
/// viewport. When everything fits on screen (`total_extent <=
/// viewport_extent`) the signal is unconditionally `true`, whatever the
/// threshold — callers use it to request further pages, which must also
/// happen for short lists that never scroll. The empty-list case is the
/// caller's to exclude: with no items there is no "end" to be near, and
/// [`crate::ListController`] never consults the detector at count zero.
///
/// This is a pure predicate; it fires on every call while the condition
/// holds. Edge-triggered "once per crossing" delivery is the controller's
/// latch, not the detector's.
pub fn is_near_end(
    total_extent: f64,
    scroll_offset: f64,
    viewport_extent: f64,
    threshold: f64,
) -> bool {
    total_extent <= viewport_extent || total_extent - scroll_offset - viewport_extent < threshold
}
