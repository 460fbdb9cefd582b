/// Errors surfaced by the layout engine.
///
/// Every variant is a caller-contract violation, not a recoverable runtime
/// condition: the engine never retries or silently coerces bad input, since
/// coercion would desynchronize the cumulative offsets from the heights the
/// renderer actually draws.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A height rule produced a non-finite, zero, or negative height.
    #[error("item {index} has invalid height {height} (heights must be finite and > 0)")]
    InvalidHeight { index: usize, height: f64 },

    /// A fixed-height layout was configured with an invalid constant.
    #[error("fixed item height {height} is invalid (heights must be finite and > 0)")]
    InvalidFixedHeight { height: f64 },

    /// A position lookup was requested for an index outside the table.
    ///
    /// This never occurs when ranges come from the resolver, whose clamping
    /// keeps indices in bounds; seeing it in tests indicates a resolver bug.
    #[error("index {index} out of bounds for a table of {len} items")]
    OutOfBounds { index: usize, len: usize },
}

/// Checks a single height value against the layout contract.
pub(crate) fn check_height(index: usize, height: f64) -> Result<f64, LayoutError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(LayoutError::InvalidHeight { index, height })
    }
}
